use std::collections::HashSet;

use crate::analysis::filter::TokenFilter;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::tokenize_single;

pub struct StopWordFilter {
    pub stop_words: HashSet<String>,
}

impl StopWordFilter {
    /// Builds a filter from raw words, running each one through the same
    /// boundary rules the upstream tokenizer applies so a stop word with
    /// stray punctuation (e.g. copied from a sentence) still matches.
    pub fn new(stop_words: Vec<String>) -> Self {
        StopWordFilter {
            stop_words: stop_words
                .into_iter()
                .filter_map(|w| tokenize_single(&w.to_lowercase()))
                .collect(),
        }
    }

    pub fn spanish() -> Self {
        let words = [
            "de", "la", "que", "el", "en", "y", "a", "los", "del", "se",
            "las", "por", "un", "para", "con", "no", "una", "su", "al",
            "lo", "como", "mas", "pero", "sus", "le", "ya", "o", "este",
            "si", "porque", "esta", "entre", "cuando", "muy", "sin",
            "sobre", "tambien", "me", "hasta", "hay", "donde", "quien",
            "desde", "todo", "nos", "durante", "todos", "uno", "les",
            "ni", "contra", "otros", "ese", "eso", "ante", "ellos", "e",
            "esto", "mi", "antes", "algunos", "que", "unos", "yo",
            "otro", "otras", "otra", "él", "tanto", "esa", "estos",
            "mucho", "quienes", "nada", "muchos", "cual", "poco",
            "ella", "estar", "estas", "algunas", "algo", "nosotros",
            "mi", "mis", "tu", "tus", "ellas", "es", "son", "fue",
            "ser", "han", "hemos", "soy", "eres",
        ]
        .iter()
        .map(|w| w.to_string())
        .collect();

        StopWordFilter::new(words)
    }
}

impl TokenFilter for StopWordFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .filter(|token| !self.stop_words.contains(&token.text))
            .collect()
    }

    fn name(&self) -> &str {
        "stop_words"
    }

    fn clone_box(&self) -> Box<dyn TokenFilter> {
        Box::new(StopWordFilter {
            stop_words: self.stop_words.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_known_spanish_stop_words() {
        let filter = StopWordFilter::spanish();
        let tokens = vec![
            Token::new("el", 0),
            Token::new("perro", 1),
            Token::new("de", 2),
            Token::new("casa", 3),
        ];
        let kept: Vec<String> = filter.filter(tokens).into_iter().map(|t| t.text).collect();
        assert_eq!(kept, vec!["perro", "casa"]);
    }
}
