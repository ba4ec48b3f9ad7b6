use std::fmt;

use pest::{
    Parser,
    iterators::Pair,
};

#[derive(Parser)]
#[grammar = "tokens.pest"]
pub struct LineParser;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    PestParsingError(pest::error::Error<Rule>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PestParsingError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error { }

impl LineParser {
    pub fn new() -> LineParser {
        LineParser {}
    }

    fn parse_token(&self, token: Pair<Rule>) -> Option<String> {
        match token.as_rule() {
            Rule::token =>
                Some(token.as_str().to_string()),
            _ =>
                None,
        }
    }

    /// Splits a line into whitespace separated tokens.
    pub fn parse_line(&self, input: &str) -> Result<Vec<String>, Error> {
        let mut lines = LineParser::parse(Rule::line, input)
            .map_err(Error::PestParsingError)?;
        let tokens = match lines.next() {
            Some(line) =>
                line.into_inner()
                    .filter_map(|token| self.parse_token(token))
                    .collect(),
            None =>
                vec![],
        };
        Ok(tokens)
    }
}

impl Default for LineParser {
    fn default() -> LineParser {
        LineParser::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_00() {
        let parser = LineParser::new();
        assert_eq!(
            parser.parse_line("5 2"),
            Ok(vec!["5".to_string(), "2".to_string()]),
        );
    }

    #[test]
    fn operators() {
        let parser = LineParser::new();
        assert_eq!(
            parser.parse_line("1 2 3 * 5 + sqrt undo clear /"),
            Ok(vec!["1", "2", "3", "*", "5", "+", "sqrt", "undo", "clear", "/"]
                .into_iter()
                .map(String::from)
                .collect()),
        );
    }

    #[test]
    fn extra_whitespace() {
        let parser = LineParser::new();
        assert_eq!(
            parser.parse_line("  -1.5\t\t4   -\r\n"),
            Ok(vec!["-1.5".to_string(), "4".to_string(), "-".to_string()]),
        );
    }

    #[test]
    fn empty() {
        let parser = LineParser::new();
        assert_eq!(parser.parse_line(""), Ok(vec![]));
        assert_eq!(parser.parse_line(" \t "), Ok(vec![]));
    }

    #[test]
    fn garbage_is_still_a_token() {
        let parser = LineParser::new();
        assert_eq!(parser.parse_line("null 4x"), Ok(vec!["null".to_string(), "4x".to_string()]));
    }
}
