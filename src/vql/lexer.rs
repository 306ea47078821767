use super::token::{Keyword, Token};

/// Byte-at-a-time scanner. Identifiers are runs of ASCII letters, digits,
/// or underscore; strings are single- or double-quoted with no escaping
/// (matching the surface forms VQL actually needs: names, not general
/// text literals).
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> u8 {
        *self.input.get(self.pos).unwrap_or(&0)
    }

    fn advance(&mut self) -> u8 {
        let ch = self.peek();
        self.pos += 1;
        ch
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), b' ' | b'\t' | b'\r' | b'\n') {
            self.pos += 1;
        }
    }

    fn read_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while pred(self.peek()) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.input[start..self.pos]).unwrap_or("")
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        match self.peek() {
            0 => Token::Eof,
            b'\'' | b'"' => {
                let quote = self.advance();
                let text = self.read_while(|c| c != quote && c != 0);
                let text = text.to_string();
                if self.peek() == quote {
                    self.pos += 1;
                }
                Token::Str(text)
            }
            c if is_ident_start(c) => {
                let word = self.read_while(is_ident_continue).to_string();
                match Keyword::lookup(&word) {
                    Some(keyword) => Token::Keyword(keyword),
                    None => Token::Ident(word),
                }
            }
            c => {
                self.pos += 1;
                Token::Illegal(c as char)
            }
        }
    }
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'/' || c == b':' || c == b'.' || c == b'-'
}

fn is_ident_continue(c: u8) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}
