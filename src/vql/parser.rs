use super::ast::{ShowTarget, Statement};
use super::lexer::Lexer;
use super::token::{Keyword, Token};
use crate::core::error::{Error, Result};

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Parser { lexer, current, peek }
    }

    fn advance(&mut self) {
        self.current = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    fn peek_is_keyword(&self, kw: Keyword) -> bool {
        self.peek == Token::Keyword(kw)
    }

    /// A "name" position accepts an identifier, a quoted string, or a bare
    /// keyword spelled as a name (matches the source's rule that literals
    /// colliding with a keyword may still pass as identifiers).
    fn take_name(&mut self) -> Option<String> {
        match self.peek.clone() {
            Token::Ident(s) | Token::Str(s) => {
                self.advance();
                Some(s)
            }
            Token::Keyword(kw) => {
                self.advance();
                Some(format!("{:?}", kw).to_lowercase())
            }
            _ => None,
        }
    }

    pub fn parse_statement(&mut self) -> Result<Statement> {
        match self.current.clone() {
            Token::Keyword(Keyword::Search) => self.parse_search(),
            Token::Keyword(Keyword::Index) => self.parse_index(),
            Token::Keyword(Keyword::Use) => self.parse_use(),
            Token::Keyword(Keyword::Show) => self.parse_show(),
            Token::Keyword(Keyword::Drop) => self.parse_drop(),
            Token::Keyword(Keyword::Alias) => self.parse_alias(),
            Token::Keyword(Keyword::UnAlias) => self.parse_unalias(),
            other => Err(Error::parse(format!("unexpected token at statement start: {:?}", other))),
        }
    }

    fn parse_search(&mut self) -> Result<Statement> {
        self.advance();
        let mut index = self.take_name();

        let terms = if matches!(self.peek, Token::Str(_)) {
            self.advance();
            match self.current.clone() {
                Token::Str(s) => s,
                _ => unreachable!(),
            }
        } else {
            // single-argument form: the lone value is the query, not the index
            index.take().ok_or_else(|| Error::parse("SEARCH requires a query"))?
        };

        let engine = if self.peek_is_keyword(Keyword::Using) {
            self.advance();
            self.take_name()
        } else {
            None
        };

        Ok(Statement::Search { index, terms, engine })
    }

    fn parse_index(&mut self) -> Result<Statement> {
        if !matches!(self.peek, Token::Str(_)) {
            return Err(Error::parse("INDEX requires a quoted payload"));
        }
        self.advance();
        let payload = match self.current.clone() {
            Token::Str(s) => s,
            _ => unreachable!(),
        };

        let mut doc = None;
        if self.peek_is_keyword(Keyword::Aka) {
            self.advance();
            doc = self.take_name();
        }

        let mut format = None;
        if self.peek_is_keyword(Keyword::As) {
            self.advance();
            format = self.take_name();
        }

        let mut index = None;
        if self.peek_is_keyword(Keyword::Into) {
            self.advance();
            index = self.take_name();
        }

        Ok(Statement::Index { payload, doc, format, index })
    }

    fn parse_use(&mut self) -> Result<Statement> {
        let index = self
            .take_name()
            .ok_or_else(|| Error::parse("USE requires an index name"))?;
        Ok(Statement::Use { index })
    }

    fn parse_show(&mut self) -> Result<Statement> {
        let shown = self
            .take_name()
            .ok_or_else(|| Error::parse("SHOW requires 'indices' or 'aliases'"))?;
        let target = match shown.to_ascii_lowercase().as_str() {
            "indices" | "indexes" => ShowTarget::Indices,
            "aliases" => ShowTarget::Aliases,
            other => return Err(Error::parse(format!("unknown SHOW target '{}'", other))),
        };
        Ok(Statement::Show { target })
    }

    fn parse_drop(&mut self) -> Result<Statement> {
        let target = self
            .take_name()
            .ok_or_else(|| Error::parse("DROP requires a target name"))?;
        Ok(Statement::Drop { target })
    }

    fn parse_alias(&mut self) -> Result<Statement> {
        let index = self
            .take_name()
            .ok_or_else(|| Error::parse("ALIAS requires an index name"))?;
        if self.peek_is_keyword(Keyword::As) {
            self.advance();
        }
        let alias = self
            .take_name()
            .ok_or_else(|| Error::parse("ALIAS requires an alias name"))?;
        Ok(Statement::Alias { index, alias })
    }

    fn parse_unalias(&mut self) -> Result<Statement> {
        let first = self
            .take_name()
            .ok_or_else(|| Error::parse("UNALIAS requires a name"))?;
        if self.peek_is_keyword(Keyword::As) {
            self.advance();
        }
        let second = self.take_name();
        match second {
            Some(alias) => Ok(Statement::UnAlias {
                index: Some(first),
                alias,
            }),
            // single-argument form: the lone name is the alias to remove entirely
            None => Ok(Statement::UnAlias {
                index: None,
                alias: first,
            }),
        }
    }
}

pub fn parse(input: &str) -> Result<Statement> {
    Parser::new(input).parse_statement()
}
