//! Matching orchestrator: normalize, vectorize, score, rank and report
//!
//! [`MatchingEngine`] holds no mutable state. The job under consideration is
//! an explicit [`JobContext`] value passed to every ranking call, so any
//! number of rankings may run concurrently against the same engine.
//! [`MatchingSession`] layers the "current job" workflow on top: replacing the
//! job needs `&mut self` while ranking only needs `&self`, so the two can
//! never interleave.

use crate::config::{Config, RankingConfig};
use crate::error::{Result, ResumeRankerError};
use crate::input::text_extractor;
use crate::output::formatter::render_text;
use crate::output::report::{ranking_report, summarize, RankingReport};
use crate::processing::document::{JobContext, RawDocument};
use crate::processing::similarity::{rank, similarity_scores};
use crate::processing::text_processor::TextNormalizer;
use crate::processing::vectorizer::TfidfVectorizer;
use chrono::{DateTime, Utc};
use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

const SUCCESS: &str = "success";

/// Result of processing a job description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobProcessed {
    pub status: String,
    pub message: String,
    pub preprocessed_length: usize,
}

/// Result of one ranking call: the structured report and its text rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingOutcome {
    pub status: String,
    pub report: RankingReport,
    pub text_report: String,
}

pub struct MatchingEngine {
    normalizer: TextNormalizer,
    vectorizer: TfidfVectorizer,
    ranking: RankingConfig,
}

impl MatchingEngine {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            normalizer: TextNormalizer::new(),
            vectorizer: TfidfVectorizer::new(config.vectorizer.clone())?,
            ranking: config.ranking.clone(),
        })
    }

    /// Decode an uploaded document through the parsing collaborator
    pub fn parse_document(&self, bytes: &[u8], filename: &str) -> Result<String> {
        text_extractor::parse(bytes, filename)
    }

    pub fn process_job(&self, raw_text: &str) -> JobContext {
        let normalized = self.normalizer.normalize(raw_text);
        debug!(
            "Processed job description: {} raw chars, {} normalized chars",
            raw_text.chars().count(),
            normalized.chars().count()
        );
        JobContext::new(raw_text.to_string(), normalized)
    }

    pub fn process_job_bytes(&self, bytes: &[u8]) -> Result<JobContext> {
        let raw_text = std::str::from_utf8(bytes)?;
        Ok(self.process_job(raw_text))
    }

    /// Rank `resumes` against `job`, stamping the report with the current time
    pub fn rank_with_job(&self, job: &JobContext, resumes: &[RawDocument]) -> Result<RankingOutcome> {
        self.rank_with_job_at(job, resumes, Utc::now())
    }

    pub fn rank_with_job_at(
        &self,
        job: &JobContext,
        resumes: &[RawDocument],
        timestamp: DateTime<Utc>,
    ) -> Result<RankingOutcome> {
        if resumes.is_empty() {
            return Err(ResumeRankerError::InvalidInput(
                "no resumes provided".to_string(),
            ));
        }

        info!("Ranking {} candidates", resumes.len());

        let mut corpus = Vec::with_capacity(resumes.len() + 1);
        corpus.push(job.normalized().to_string());
        corpus.extend(self.normalize_resumes(resumes));

        let model = self.vectorizer.fit(&corpus)?;
        let (job_vector, resume_vectors) = model
            .vectors()
            .split_first()
            .ok_or_else(|| ResumeRankerError::EmptyCorpus("no job vector".to_string()))?;

        let scores = similarity_scores(job_vector, resume_vectors);
        let ids: Vec<&str> = resumes.iter().map(|r| r.id.as_str()).collect();
        let ranked = rank(&scores, &ids)?;

        let candidate_terms: Vec<Vec<(String, f64)>> = resume_vectors
            .iter()
            .map(|vector| model.top_terms(vector, self.ranking.top_terms))
            .collect();

        let summary = summarize(job.raw_text(), self.ranking.summary_length);
        let report = ranking_report(&summary, &ranked, &candidate_terms, timestamp);
        let text_report = render_text(&report);

        if let Some(best) = ranked.first() {
            info!(
                "Ranking complete: {} candidates over {} terms, best match {} ({:.4})",
                ranked.len(),
                model.vocabulary().len(),
                best.id,
                best.score
            );
        }

        Ok(RankingOutcome {
            status: SUCCESS.to_string(),
            report,
            text_report,
        })
    }

    /// Normalize every resume, keeping input order
    fn normalize_resumes(&self, resumes: &[RawDocument]) -> Vec<String> {
        if self.ranking.parallel_normalization {
            resumes
                .par_iter()
                .map(|resume| self.normalizer.normalize(&resume.text))
                .collect()
        } else {
            resumes
                .iter()
                .map(|resume| self.normalizer.normalize(&resume.text))
                .collect()
        }
    }
}

/// Stateful workflow: load a job once, rank many resume batches against it
pub struct MatchingSession {
    engine: MatchingEngine,
    job: Option<JobContext>,
}

impl MatchingSession {
    pub fn new(engine: MatchingEngine) -> Self {
        Self { engine, job: None }
    }

    pub fn job(&self) -> Option<&JobContext> {
        self.job.as_ref()
    }

    /// Normalize and hold `raw_text`, replacing any previous job
    pub fn process_job(&mut self, raw_text: &str) -> JobProcessed {
        let job = self.engine.process_job(raw_text);
        let processed = JobProcessed {
            status: SUCCESS.to_string(),
            message: "Job description processed successfully".to_string(),
            preprocessed_length: job.preprocessed_length(),
        };
        self.job = Some(job);
        processed
    }

    pub fn process_job_bytes(&mut self, bytes: &[u8]) -> Result<JobProcessed> {
        let raw_text = std::str::from_utf8(bytes)?;
        Ok(self.process_job(raw_text))
    }

    pub fn rank_candidates(&self, resumes: &[RawDocument]) -> Result<RankingOutcome> {
        let job = self.job.as_ref().ok_or_else(|| {
            ResumeRankerError::Precondition("job must be processed first".to_string())
        })?;
        self.engine.rank_with_job(job, resumes)
    }
}
