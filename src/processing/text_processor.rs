//! Text normalization: cleaning, tokenization, stopword removal and stemming

use crate::error::Result;
use crate::processing::stemmer;
use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// English stopwords (the standard NLTK list)
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "that'll", "these", "those", "am", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "having", "do",
    "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because",
    "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to",
    "from", "up", "down", "in", "out", "on", "off", "over", "under", "again",
    "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t",
    "can", "will", "just", "don", "don't", "should", "should've", "now", "d", "ll",
    "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't",
    "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't",
    "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn",
    "mustn't", "needn", "needn't", "shan", "shan't", "shouldn", "shouldn't", "wasn",
    "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
];

pub struct TextNormalizer {
    stop_words: HashSet<&'static str>,
    url_regex: Regex,
    email_regex: Regex,
    non_letter_regex: Regex,
    whitespace_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        let stop_words = STOP_WORDS.iter().copied().collect();

        let url_regex = Regex::new(r"http\S+|www\S+")
            .expect("Invalid URL regex");

        let email_regex = Regex::new(r"\S+@\S+")
            .expect("Invalid email regex");

        let non_letter_regex = Regex::new(r"[^a-z\s]")
            .expect("Invalid character class regex");

        let whitespace_regex = Regex::new(r"\s+")
            .expect("Invalid whitespace regex");

        Self {
            stop_words,
            url_regex,
            email_regex,
            non_letter_regex,
            whitespace_regex,
        }
    }

    /// Full pipeline: clean, tokenize, drop stopwords, stem, rejoin.
    /// Empty text yields an empty string.
    pub fn normalize(&self, text: &str) -> String {
        let cleaned = self.clean_text(text);
        if cleaned.is_empty() {
            return String::new();
        }

        let tokens = self.tokenize(&cleaned);
        let tokens = self.remove_stopwords(tokens);
        self.stem_tokens(&tokens).join(" ")
    }

    /// Absent text normalizes to the empty string
    pub fn normalize_opt(&self, text: Option<&str>) -> String {
        text.map(|t| self.normalize(t)).unwrap_or_default()
    }

    /// Normalize raw bytes, failing only when they are not valid UTF-8
    pub fn normalize_bytes(&self, bytes: &[u8]) -> Result<String> {
        let text = std::str::from_utf8(bytes)?;
        Ok(self.normalize(text))
    }

    /// Lowercase, strip URLs and emails, keep only ASCII letters, collapse whitespace
    pub fn clean_text(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let lowered = text.to_lowercase();
        let cleaned = self.url_regex.replace_all(&lowered, "");
        let cleaned = self.email_regex.replace_all(&cleaned, "");
        let cleaned = self.non_letter_regex.replace_all(&cleaned, " ");
        self.whitespace_regex
            .replace_all(&cleaned, " ")
            .trim()
            .to_string()
    }

    /// Split into words using Unicode word boundaries
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.unicode_words().collect()
    }

    pub fn remove_stopwords<'a>(&self, tokens: Vec<&'a str>) -> Vec<&'a str> {
        tokens
            .into_iter()
            .filter(|token| !self.stop_words.contains(token))
            .collect()
    }

    pub fn stem_tokens(&self, tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|token| stemmer::stem(token)).collect()
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}
