//! Cosine similarity over unit vectors and stable candidate ranking

use crate::error::{Result, ResumeRankerError};
use crate::processing::vectorizer::WeightVector;

/// A candidate id paired with its similarity to the job
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub id: String,
    pub score: f64,
    /// Index of the candidate in the caller's input order
    pub position: usize,
}

/// Cosine similarity of two L2-normalized vectors, in [0, 1].
/// Zero vectors (empty documents) score 0.
pub fn similarity(reference: &WeightVector, candidate: &WeightVector) -> f64 {
    if reference.is_zero() || candidate.is_zero() {
        return 0.0;
    }
    reference.dot(candidate).clamp(0.0, 1.0)
}

/// One score per candidate, aligned with `candidates`
pub fn similarity_scores(reference: &WeightVector, candidates: &[WeightVector]) -> Vec<f64> {
    candidates
        .iter()
        .map(|candidate| similarity(reference, candidate))
        .collect()
}

/// Order candidates by descending score. The sort is stable: equal scores
/// keep their input order.
pub fn rank<S: AsRef<str>>(scores: &[f64], ids: &[S]) -> Result<Vec<ScoredCandidate>> {
    if scores.len() != ids.len() {
        return Err(ResumeRankerError::InvalidInput(format!(
            "{} scores for {} candidate ids",
            scores.len(),
            ids.len()
        )));
    }

    let mut ranked: Vec<ScoredCandidate> = ids
        .iter()
        .zip(scores)
        .enumerate()
        .map(|(position, (id, &score))| ScoredCandidate {
            id: id.as_ref().to_string(),
            score,
            position,
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(ranked)
}

/// The first `n` entries of [`rank`]
pub fn top_n<S: AsRef<str>>(scores: &[f64], ids: &[S], n: usize) -> Result<Vec<ScoredCandidate>> {
    let mut ranked = rank(scores, ids)?;
    ranked.truncate(n);
    Ok(ranked)
}
