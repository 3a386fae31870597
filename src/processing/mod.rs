//! Text normalization, vectorization, scoring and the matching orchestrator

pub mod document;
pub mod engine;
pub mod similarity;
pub mod stemmer;
pub mod text_processor;
pub mod vectorizer;
