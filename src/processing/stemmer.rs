//! Porter suffix-stripping stemmer
//!
//! Works on lowercase ASCII words. Anything else, and words of two letters
//! or fewer, are returned unchanged.

/// Reduce a word to its Porter stem
pub fn stem(word: &str) -> String {
    if word.len() <= 2 || !word.bytes().all(|b| b.is_ascii_lowercase()) {
        return word.to_string();
    }

    let mut stemmer = PorterStemmer::new(word);
    stemmer.step1ab();
    if stemmer.k > 1 {
        stemmer.step1c();
        stemmer.step2();
        stemmer.step3();
        stemmer.step4();
        stemmer.step5();
    }
    stemmer.into_string()
}

/// Working buffer. `k` is the current word length and `j` the length of the
/// stem preceding the most recently matched suffix.
struct PorterStemmer {
    b: Vec<u8>,
    k: usize,
    j: usize,
}

impl PorterStemmer {
    fn new(word: &str) -> Self {
        let b = word.as_bytes().to_vec();
        let k = b.len();
        Self { b, k, j: 0 }
    }

    fn into_string(mut self) -> String {
        self.b.truncate(self.k);
        // Only ASCII bytes ever enter the buffer
        String::from_utf8(self.b).unwrap_or_default()
    }

    fn is_consonant(&self, i: usize) -> bool {
        match self.b[i] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.is_consonant(i - 1),
            _ => true,
        }
    }

    /// Number of vowel-consonant sequences in `b[..j]`
    fn measure(&self) -> usize {
        let j = self.j;
        let mut n = 0;
        let mut i = 0;

        while i < j && self.is_consonant(i) {
            i += 1;
        }
        loop {
            while i < j && !self.is_consonant(i) {
                i += 1;
            }
            if i >= j {
                return n;
            }
            n += 1;
            while i < j && self.is_consonant(i) {
                i += 1;
            }
            if i >= j {
                return n;
            }
        }
    }

    fn vowel_in_stem(&self) -> bool {
        (0..self.j).any(|i| !self.is_consonant(i))
    }

    fn double_consonant(&self, i: usize) -> bool {
        i >= 1 && self.b[i] == self.b[i - 1] && self.is_consonant(i)
    }

    /// consonant-vowel-consonant ending at `i`, where the last consonant is not w, x or y
    fn cvc(&self, i: usize) -> bool {
        if i < 2 || !self.is_consonant(i) || self.is_consonant(i - 1) || !self.is_consonant(i - 2) {
            return false;
        }
        !matches!(self.b[i], b'w' | b'x' | b'y')
    }

    fn ends(&mut self, suffix: &str) -> bool {
        let suffix = suffix.as_bytes();
        if suffix.len() > self.k || &self.b[self.k - suffix.len()..self.k] != suffix {
            return false;
        }
        self.j = self.k - suffix.len();
        true
    }

    fn set_to(&mut self, replacement: &str) {
        self.b.truncate(self.j);
        self.b.extend_from_slice(replacement.as_bytes());
        self.k = self.j + replacement.len();
    }

    fn replace_if_measured(&mut self, replacement: &str) {
        if self.measure() > 0 {
            self.set_to(replacement);
        }
    }

    /// Shorten the word to `len`. Bytes past `k` stay in the buffer until
    /// `into_string`, so `j` may still point past the new end.
    fn truncate_to(&mut self, len: usize) {
        self.k = len;
    }

    fn last(&self) -> u8 {
        self.b[self.k - 1]
    }

    fn penultimate(&self) -> u8 {
        self.b[self.k - 2]
    }

    /// Plurals and -ed / -ing
    fn step1ab(&mut self) {
        if self.last() == b's' {
            if self.ends("sses") {
                self.truncate_to(self.k - 2);
            } else if self.ends("ies") {
                self.set_to("i");
            } else if self.k >= 2 && self.penultimate() != b's' {
                self.truncate_to(self.k - 1);
            }
        }

        if self.ends("eed") {
            if self.measure() > 0 {
                self.truncate_to(self.k - 1);
            }
        } else if (self.ends("ed") || self.ends("ing")) && self.vowel_in_stem() {
            self.truncate_to(self.j);
            if self.ends("at") {
                self.set_to("ate");
            } else if self.ends("bl") {
                self.set_to("ble");
            } else if self.ends("iz") {
                self.set_to("ize");
            } else if self.double_consonant(self.k - 1) {
                if !matches!(self.last(), b'l' | b's' | b'z') {
                    self.truncate_to(self.k - 1);
                }
            } else {
                self.j = self.k;
                if self.measure() == 1 && self.cvc(self.k - 1) {
                    self.set_to("e");
                }
            }
        }
    }

    /// Terminal y to i when there is another vowel in the stem
    fn step1c(&mut self) {
        if self.ends("y") && self.vowel_in_stem() {
            let last = self.k - 1;
            self.b[last] = b'i';
        }
    }

    /// Double suffixes to single ones
    fn step2(&mut self) {
        let rules: &[(&str, &str)] = match self.penultimate() {
            b'a' => &[("ational", "ate"), ("tional", "tion")],
            b'c' => &[("enci", "ence"), ("anci", "ance")],
            b'e' => &[("izer", "ize")],
            b'l' => &[
                ("bli", "ble"),
                ("alli", "al"),
                ("entli", "ent"),
                ("eli", "e"),
                ("ousli", "ous"),
            ],
            b'o' => &[("ization", "ize"), ("ation", "ate"), ("ator", "ate")],
            b's' => &[
                ("alism", "al"),
                ("iveness", "ive"),
                ("fulness", "ful"),
                ("ousness", "ous"),
            ],
            b't' => &[("aliti", "al"), ("iviti", "ive"), ("biliti", "ble")],
            b'g' => &[("logi", "log")],
            _ => &[],
        };
        self.apply_first_rule(rules);
    }

    /// -ic-, -full, -ness etc.
    fn step3(&mut self) {
        let rules: &[(&str, &str)] = match self.last() {
            b'e' => &[("icate", "ic"), ("ative", ""), ("alize", "al")],
            b'i' => &[("iciti", "ic")],
            b'l' => &[("ical", "ic"), ("ful", "")],
            b's' => &[("ness", "")],
            _ => &[],
        };
        self.apply_first_rule(rules);
    }

    fn apply_first_rule(&mut self, rules: &[(&str, &str)]) {
        for (suffix, replacement) in rules {
            if self.ends(suffix) {
                self.replace_if_measured(replacement);
                return;
            }
        }
    }

    /// Strip -ant, -ence etc. in context <c>vcvc<v>
    fn step4(&mut self) {
        let matched = match self.penultimate() {
            b'a' => self.ends("al"),
            b'c' => self.ends("ance") || self.ends("ence"),
            b'e' => self.ends("er"),
            b'i' => self.ends("ic"),
            b'l' => self.ends("able") || self.ends("ible"),
            b'n' => self.ends("ant") || self.ends("ement") || self.ends("ment") || self.ends("ent"),
            b'o' => {
                (self.ends("ion") && self.j >= 1 && matches!(self.b[self.j - 1], b's' | b't'))
                    || self.ends("ou")
            }
            b's' => self.ends("ism"),
            b't' => self.ends("ate") || self.ends("iti"),
            b'u' => self.ends("ous"),
            b'v' => self.ends("ive"),
            b'z' => self.ends("ize"),
            _ => false,
        };
        if matched && self.measure() > 1 {
            self.truncate_to(self.j);
        }
    }

    /// Final -e and -ll
    fn step5(&mut self) {
        self.j = self.k;
        if self.last() == b'e' {
            let m = self.measure();
            if m > 1 || (m == 1 && !self.cvc(self.k - 2)) {
                self.truncate_to(self.k - 1);
            }
        }
        if self.last() == b'l' && self.double_consonant(self.k - 1) && self.measure() > 1 {
            self.truncate_to(self.k - 1);
        }
    }
}
