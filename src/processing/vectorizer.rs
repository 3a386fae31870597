//! TF-IDF vector space model fitted over one ordered corpus
//!
//! Every call to [`TfidfVectorizer::fit`] builds a fresh vocabulary; nothing is
//! carried between fits. Column indices follow lexicographic term order and
//! each document row is L2-normalized, so cosine similarity between two rows
//! is a plain dot product.

use crate::config::VectorizerConfig;
use crate::error::{Result, ResumeRankerError};
use log::debug;
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

/// Term to column index mapping for one fitted corpus
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build from terms already in column order
    fn from_sorted_terms(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        Self { terms, index }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Sparse document row: (column, weight) pairs sorted by column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightVector {
    entries: Vec<(usize, f64)>,
}

impl WeightVector {
    /// Sort by column and scale to unit Euclidean norm.
    /// An all-zero input stays the zero vector.
    pub fn normalized(mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, weight)| weight != 0.0);
        entries.sort_by_key(|&(index, _)| index);

        let norm = entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for entry in &mut entries {
                entry.1 /= norm;
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |&(i, _)| i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge-join dot product over the sorted entries
    pub fn dot(&self, other: &WeightVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Vocabulary, idf weights and one row per corpus document
#[derive(Debug, Clone)]
pub struct FittedModel {
    vocabulary: Vocabulary,
    idf: Vec<f64>,
    vectors: Vec<WeightVector>,
}

impl FittedModel {
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn vectors(&self) -> &[WeightVector] {
        &self.vectors
    }

    pub fn vector(&self, document: usize) -> Option<&WeightVector> {
        self.vectors.get(document)
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.index_of(term).map(|i| self.idf[i])
    }

    /// Highest-weighted terms of a row, ties broken by term order.
    /// Non-positive weights are never returned.
    pub fn top_terms(&self, vector: &WeightVector, top_n: usize) -> Vec<(String, f64)> {
        let mut terms: Vec<(&str, f64)> = vector
            .entries()
            .iter()
            .filter(|&&(_, weight)| weight > 0.0)
            .filter_map(|&(index, weight)| self.vocabulary.term(index).map(|t| (t, weight)))
            .collect();

        terms.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms.truncate(top_n);

        terms
            .into_iter()
            .map(|(term, weight)| (term.to_string(), weight))
            .collect()
    }
}

pub struct TfidfVectorizer {
    config: VectorizerConfig,
}

impl TfidfVectorizer {
    pub fn new(config: VectorizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    /// Fit the vocabulary and weight every document of `corpus`
    pub fn fit<S: AsRef<str>>(&self, corpus: &[S]) -> Result<FittedModel> {
        if corpus.is_empty() {
            return Err(ResumeRankerError::EmptyCorpus(
                "corpus has no documents".to_string(),
            ));
        }

        let doc_counts: Vec<HashMap<String, usize>> = corpus
            .iter()
            .map(|doc| self.count_terms(doc.as_ref()))
            .collect();

        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        let mut total_frequency: HashMap<&str, usize> = HashMap::new();
        for counts in &doc_counts {
            for (term, &count) in counts {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
                *total_frequency.entry(term.as_str()).or_insert(0) += count;
            }
        }

        if document_frequency.is_empty() {
            return Err(ResumeRankerError::EmptyCorpus(
                "no terms survive in any document".to_string(),
            ));
        }

        let n_docs = corpus.len() as f64;
        let idf_of = |df: usize| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0;

        let mut terms: Vec<&str> = document_frequency.keys().copied().collect();
        let candidate_count = terms.len();

        if let Some(max_features) = self.config.max_features {
            if terms.len() > max_features {
                let mass = |term: &str| total_frequency[term] as f64 * idf_of(document_frequency[term]);
                terms.sort_by(|a, b| mass(*b).total_cmp(&mass(*a)).then_with(|| a.cmp(b)));
                terms.truncate(max_features);
            }
        }
        terms.sort_unstable();

        let idf: Vec<f64> = terms.iter().map(|&term| idf_of(document_frequency[term])).collect();
        let vocabulary = Vocabulary::from_sorted_terms(terms.iter().map(|t| t.to_string()).collect());

        let vectors = doc_counts
            .iter()
            .map(|counts| {
                let weights = counts
                    .iter()
                    .filter_map(|(term, &count)| {
                        vocabulary
                            .index_of(term)
                            .map(|index| (index, count as f64 * idf[index]))
                    })
                    .collect();
                WeightVector::normalized(weights)
            })
            .collect();

        debug!(
            "Fitted TF-IDF over {} documents: {} candidate terms, {} retained",
            corpus.len(),
            candidate_count,
            vocabulary.len()
        );

        Ok(FittedModel {
            vocabulary,
            idf,
            vectors,
        })
    }

    /// Split into tokens, re-applying lowercase and ASCII folding.
    /// Accented letters decompose and keep their base letter.
    fn tokens(&self, document: &str) -> Vec<String> {
        let min_len = self.config.min_token_length;
        let folded: String = document
            .nfkd()
            .filter(char::is_ascii)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        folded
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|word| !word.is_empty() && word.len() >= min_len)
            .map(str::to_string)
            .collect()
    }

    /// Raw counts of every n-gram in the configured range
    fn count_terms(&self, document: &str) -> HashMap<String, usize> {
        let tokens = self.tokens(document);
        let (min_n, max_n) = self.config.ngram_range();
        let mut counts = HashMap::new();

        for n in min_n..=max_n {
            for window in tokens.windows(n) {
                *counts.entry(window.join(" ")).or_insert(0) += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer(max_features: Option<usize>, ngram_max: usize) -> TfidfVectorizer {
        TfidfVectorizer::new(VectorizerConfig {
            max_features,
            ngram_min: 1,
            ngram_max,
            min_token_length: 2,
        })
        .unwrap()
    }

    #[test]
    fn test_accents_folded_to_ascii() {
        let model = vectorizer(None, 1).fit(&["résumé café python", "Naïve RÉSUMÉ"]).unwrap();
        let terms = model.vocabulary().terms();

        assert_eq!(terms, &["cafe", "naive", "python", "resume"]);
        assert_eq!(model.vector(0).unwrap().entries().len(), 3);
    }

    #[test]
    fn test_fit_shape() {
        let documents = [
            "python program machin learn",
            "java develop web servic",
            "data scienc python analyt",
        ];

        let model = vectorizer(Some(50), 2).fit(&documents).unwrap();

        assert_eq!(model.vectors().len(), 3);
        assert!(model.vocabulary().len() > 0);
        assert!(model.vocabulary().contains("machin learn"));
        assert!(model.vocabulary().contains("python"));
    }

    #[test]
    fn test_vocabulary_in_lexicographic_order() {
        let model = vectorizer(None, 1).fit(&["zeta alpha", "mu"]).unwrap();
        assert_eq!(model.vocabulary().terms(), &["alpha", "mu", "zeta"]);
        assert_eq!(model.vocabulary().index_of("mu"), Some(1));
        assert_eq!(model.vocabulary().term(2), Some("zeta"));
    }

    #[test]
    fn test_smoothed_idf() {
        let model = vectorizer(None, 1).fit(&["python java", "python"]).unwrap();

        let python_idf = model.idf("python").unwrap();
        let java_idf = model.idf("java").unwrap();

        assert!((python_idf - 1.0).abs() < 1e-12);
        assert!((java_idf - ((3.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rows_have_unit_norm() {
        let documents = ["rust rust tokio", "python django", "rust python"];
        let model = vectorizer(None, 2).fit(&documents).unwrap();

        for vector in model.vectors() {
            assert!((vector.norm() - 1.0).abs() < 1e-9);
            assert!(vector.entries().iter().all(|&(_, w)| w > 0.0));
        }
    }

    #[test]
    fn test_term_frequency_weighting() {
        let model = vectorizer(None, 1).fit(&["rust rust go", "java"]).unwrap();
        let row = model.vector(0).unwrap();

        let rust = row.get(model.vocabulary().index_of("rust").unwrap());
        let go = row.get(model.vocabulary().index_of("go").unwrap());

        // same idf, so weights keep the 2:1 count ratio
        assert!((rust / go - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_document_gets_zero_vector() {
        let model = vectorizer(None, 2).fit(&["python develop", ""]).unwrap();
        assert!(model.vector(1).unwrap().is_zero());
        assert_eq!(model.vector(1).unwrap().norm(), 0.0);
    }

    #[test]
    fn test_empty_corpus_errors() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            vectorizer(None, 2).fit(&empty),
            Err(ResumeRankerError::EmptyCorpus(_))
        ));
        assert!(matches!(
            vectorizer(None, 2).fit(&["", "   ", "a b c"]),
            Err(ResumeRankerError::EmptyCorpus(_))
        ));
    }

    #[test]
    fn test_single_character_tokens_ignored() {
        let model = vectorizer(None, 2).fit(&["c rust x"]).unwrap();
        assert_eq!(model.vocabulary().terms(), &["rust"]);
    }

    #[test]
    fn test_max_features_keeps_heaviest_terms() {
        let documents = ["alpha alpha alpha beta", "gamma"];
        let model = vectorizer(Some(2), 1).fit(&documents).unwrap();

        // beta and gamma tie on mass; beta wins lexicographically
        assert_eq!(model.vocabulary().terms(), &["alpha", "beta"]);
        assert!(model.vector(1).unwrap().is_zero());
        assert!((model.vector(0).unwrap().norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_terms_ordering() {
        let documents = ["python python python java java rust", "golang"];
        let model = vectorizer(None, 1).fit(&documents).unwrap();
        let row = model.vector(0).unwrap();

        let top = model.top_terms(row, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, "python");
        assert_eq!(top[1].0, "java");
        assert!(top[0].1 > top[1].1);

        let all = model.top_terms(row, 10);
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|(_, w)| *w > 0.0));
    }

    #[test]
    fn test_top_terms_tie_break_and_zero_vector() {
        let model = vectorizer(None, 1).fit(&["beta alpha", ""]).unwrap();

        let top = model.top_terms(model.vector(0).unwrap(), 5);
        assert_eq!(top[0].0, "alpha");
        assert_eq!(top[1].0, "beta");

        assert!(model.top_terms(model.vector(1).unwrap(), 5).is_empty());
    }

    #[test]
    fn test_dot_product() {
        let a = WeightVector::normalized(vec![(0, 1.0), (2, 1.0)]);
        let b = WeightVector::normalized(vec![(2, 3.0), (5, 4.0)]);

        let expected = (1.0 / 2f64.sqrt()) * (3.0 / 5.0);
        assert!((a.dot(&b) - expected).abs() < 1e-12);
        assert_eq!(a.dot(&WeightVector::default()), 0.0);
    }
}
