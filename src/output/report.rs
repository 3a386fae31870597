//! Ranking report structures and their assembly from ranked scores

use crate::processing::similarity::ScoredCandidate;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One explanatory term with its weight in the candidate's own vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermRelevance {
    pub term: String,
    pub relevance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateReport {
    pub candidate_id: String,
    pub rank: usize,
    /// Cosine similarity, 4 decimals
    pub similarity_score: f64,
    /// Similarity × 100, 2 decimals
    pub match_percentage: f64,
    pub top_matching_terms: Vec<TermRelevance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingReport {
    /// ISO-8601 generation time
    pub timestamp: String,
    /// Leading characters of the raw job description
    pub job_description_summary: String,
    pub total_candidates: usize,
    pub candidates: Vec<CandidateReport>,
}

/// Round half away from zero to `places` decimals
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// The first `max_chars` characters of `text`
pub fn summarize(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn candidate_report(
    candidate_id: &str,
    score: f64,
    top_terms: &[(String, f64)],
    rank: usize,
) -> CandidateReport {
    CandidateReport {
        candidate_id: candidate_id.to_string(),
        rank,
        similarity_score: round_to(score, 4),
        match_percentage: round_to(score * 100.0, 2),
        top_matching_terms: top_terms
            .iter()
            .filter(|(_, relevance)| *relevance > 0.0)
            .map(|(term, relevance)| TermRelevance {
                term: term.clone(),
                relevance: round_to(*relevance, 4),
            })
            .collect(),
    }
}

/// Number the already-ordered candidates 1..N and attach their terms.
///
/// `candidate_terms` is indexed by each candidate's input position, so
/// duplicate ids keep their own terms.
pub fn ranking_report(
    job_summary: &str,
    ranked: &[ScoredCandidate],
    candidate_terms: &[Vec<(String, f64)>],
    timestamp: DateTime<Utc>,
) -> RankingReport {
    let candidates = ranked
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            let terms = candidate_terms
                .get(candidate.position)
                .map(Vec::as_slice)
                .unwrap_or_default();
            candidate_report(&candidate.id, candidate.score, terms, i + 1)
        })
        .collect();

    RankingReport {
        timestamp: format_timestamp(timestamp),
        job_description_summary: job_summary.to_string(),
        total_candidates: ranked.len(),
        candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn terms(pairs: &[(&str, f64)]) -> Vec<(String, f64)> {
        pairs.iter().map(|(t, w)| (t.to_string(), *w)).collect()
    }

    fn scored(id: &str, score: f64, position: usize) -> ScoredCandidate {
        ScoredCandidate {
            id: id.to_string(),
            score,
            position,
        }
    }

    #[test]
    fn test_candidate_report_rounding() {
        let top = terms(&[("python", 0.812345), ("machin learn", 0.7), ("data", 0.6)]);

        let report = candidate_report("candidate1", 0.856789, &top, 1);

        assert_eq!(report.candidate_id, "candidate1");
        assert_eq!(report.rank, 1);
        assert_eq!(report.similarity_score, 0.8568);
        assert_eq!(report.match_percentage, 85.68);
        assert_eq!(report.top_matching_terms.len(), 3);
        assert_eq!(report.top_matching_terms[0].relevance, 0.8123);
    }

    #[test]
    fn test_candidate_report_drops_zero_terms() {
        let top = terms(&[("rust", 0.5), ("go", 0.0)]);
        let report = candidate_report("c", 0.5, &top, 2);
        assert_eq!(report.top_matching_terms.len(), 1);
        assert_eq!(report.top_matching_terms[0].term, "rust");
    }

    #[test]
    fn test_ranking_report_numbers_in_given_order() {
        let ranked = vec![scored("candidate1", 0.9, 1), scored("candidate2", 0.7, 0)];
        let candidate_terms = vec![
            terms(&[("java", 0.6), ("spring", 0.5)]),
            terms(&[("python", 0.8), ("ml", 0.7)]),
        ];
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let report = ranking_report("Python developer position", &ranked, &candidate_terms, timestamp);

        assert_eq!(report.total_candidates, 2);
        assert_eq!(report.timestamp, "2024-01-01T00:00:00.000000Z");
        assert_eq!(report.candidates[0].rank, 1);
        assert_eq!(report.candidates[0].candidate_id, "candidate1");
        assert_eq!(report.candidates[0].top_matching_terms[0].term, "python");
        assert_eq!(report.candidates[1].rank, 2);
        assert_eq!(report.candidates[1].top_matching_terms[0].term, "java");
    }

    #[test]
    fn test_missing_terms_yield_empty_list() {
        let ranked = vec![scored("ghost", 0.1, 7)];
        let report = ranking_report("job", &ranked, &[], Utc::now());
        assert!(report.candidates[0].top_matching_terms.is_empty());
    }

    #[test]
    fn test_summarize_counts_characters() {
        assert_eq!(summarize("héllo wörld", 4), "héll");
        assert_eq!(summarize("short", 200), "short");
    }

    #[test]
    fn test_json_shape() {
        let ranked = vec![scored("a.txt", 0.5, 0)];
        let candidate_terms = vec![terms(&[("rust", 0.9)])];
        let report = ranking_report("job", &ranked, &candidate_terms, Utc::now());

        let value = serde_json::to_value(&report).unwrap();

        for key in ["timestamp", "job_description_summary", "total_candidates", "candidates"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        let candidate = &value["candidates"][0];
        for key in ["candidate_id", "rank", "similarity_score", "match_percentage", "top_matching_terms"] {
            assert!(candidate.get(key).is_some(), "missing {key}");
        }
        assert_eq!(candidate["top_matching_terms"][0]["term"], "rust");
        assert_eq!(candidate["top_matching_terms"][0]["relevance"], 0.9);
    }
}
