use serde::{Deserialize, Serialize};

/// Splits text into lowercase word tokens, optionally adding bigrams.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokenizer {
    #[serde(default)]
    pub bigrams: bool,
}

impl Tokenizer {
    pub fn new(bigrams: bool) -> Self {
        Self { bigrams }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let words: Vec<String> = text
            .split(is_separator)
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();

        if !self.bigrams || words.len() < 2 {
            return words;
        }

        let pairs: Vec<String> = words
            .windows(2)
            .map(|pair| format!("{} {}", pair[0], pair[1]))
            .collect();
        words.into_iter().chain(pairs).collect()
    }
}

// Zero-width joiners (U+200C/U+200D) sit below the general punctuation range
// and stay inside words; Sinhala conjuncts depend on them.
fn is_separator(c: char) -> bool {
    c.is_whitespace()
        || c.is_ascii_punctuation()
        || ('\u{2010}'..='\u{205E}').contains(&c)
        || matches!(c, '«' | '»' | '¡' | '¿' | '·' | '।' | '॥')
}
