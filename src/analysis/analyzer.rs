use crate::analysis::filter::TokenFilter;
use crate::analysis::filters::lowercase::LowercaseFilter;
use crate::analysis::filters::stemmer::StemmerFilter;
use crate::analysis::filters::stopword::StopWordFilter;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::{AlphanumericTokenizer, Tokenizer};
use rust_stemmers::Algorithm;

/// Text analysis pipeline: one tokenizer followed by zero or more filters,
/// applied in registration order. The same pipeline analyzes both indexed
/// documents and incoming queries, so a term only ever matches another term
/// that reduces to the same final form.
pub struct Analyzer {
    pub tokenizer: Box<dyn Tokenizer>,
    pub filters: Vec<Box<dyn TokenFilter>>,
    pub name: String,
}

impl Analyzer {
    pub fn new(name: impl Into<String>, tokenizer: Box<dyn Tokenizer>) -> Self {
        Analyzer {
            tokenizer,
            filters: Vec::new(),
            name: name.into(),
        }
    }

    pub fn add_filter(mut self, filter: Box<dyn TokenFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn analyze(&self, text: &str) -> Vec<Token> {
        let mut tokens = self.tokenizer.tokenize(text);

        for filter in &self.filters {
            tokens = filter.filter(tokens);
        }

        tokens
    }

    /// Full pipeline: tokenize, lowercase, drop Spanish stop words, stem.
    /// This is the default analyzer a freshly created index gets.
    pub fn spanish() -> Self {
        Analyzer::new("spanish", Box::new(AlphanumericTokenizer))
            .add_filter(Box::new(LowercaseFilter))
            .add_filter(Box::new(StopWordFilter::spanish()))
            .add_filter(Box::new(StemmerFilter::new(Algorithm::Spanish)))
    }

    /// Tokenize and lowercase only, no stop-word removal or stemming.
    /// Useful for fields where exact (case-insensitive) term matching is
    /// wanted, such as identifiers embedded in indexed text.
    pub fn simple() -> Self {
        Analyzer::new("simple", Box::new(AlphanumericTokenizer)).add_filter(Box::new(LowercaseFilter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanish_pipeline_stems_and_drops_stop_words() {
        let analyzer = Analyzer::spanish();
        let texts: Vec<String> = analyzer
            .analyze("El perro corre por la casa")
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert!(!texts.contains(&"el".to_string()));
        assert!(!texts.contains(&"la".to_string()));
        assert!(!texts.contains(&"por".to_string()));
    }

    #[test]
    fn simple_pipeline_only_lowercases() {
        let analyzer = Analyzer::simple();
        let texts: Vec<String> = analyzer
            .analyze("El Perro")
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, vec!["el", "perro"]);
    }
}
