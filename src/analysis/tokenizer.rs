use crate::analysis::token::Token;

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    fn name(&self) -> &str;

    fn clone_box(&self) -> Box<dyn Tokenizer>;
}

/// Keeps runs of alphanumeric code points (Unicode category Letter or
/// Number) and discards everything else as a separator. Empty substrings
/// are never emitted.
#[derive(Clone, Default)]
pub struct AlphanumericTokenizer;

impl Tokenizer for AlphanumericTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut position = 0u32;

        for ch in text.chars() {
            if ch.is_alphanumeric() {
                current.push(ch);
            } else if !current.is_empty() {
                tokens.push(Token::new(std::mem::take(&mut current), position));
                position += 1;
            }
        }
        if !current.is_empty() {
            tokens.push(Token::new(current, position));
        }

        tokens
    }

    fn name(&self) -> &str {
        "alphanumeric"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(Self)
    }
}

/// Tokenizes a single word the same way [`AlphanumericTokenizer`] would,
/// returning `None` if nothing alphanumeric survives. Used by
/// [`crate::analysis::filters::stopword::StopWordFilter`] to normalize its
/// own vocabulary through the same boundary rules applied to indexed text.
pub fn tokenize_single(word: &str) -> Option<String> {
    let cleaned: String = word.chars().filter(|c| c.is_alphanumeric()).collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_non_alphanumeric_runs() {
        let tokenizer = AlphanumericTokenizer;
        let texts: Vec<String> = tokenizer
            .tokenize("Curso de programación, en Java!")
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, vec!["Curso", "de", "programación", "en", "Java"]);
    }

    #[test]
    fn never_emits_empty_tokens() {
        let tokenizer = AlphanumericTokenizer;
        assert!(tokenizer.tokenize("   ...   ").is_empty());
        assert!(tokenizer.tokenize("").is_empty());
    }
}
