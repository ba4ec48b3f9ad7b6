use std::fmt;

use crate::{
    number::{
        ArithError,
        Number,
        NumberFormat,
    },
    parser::{
        self,
        LineParser,
    },
    vm::interpret::{
        self,
        Interpreter,
    },
};

#[derive(Debug)]
pub enum Error {
    Parse(parser::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(e) => Some(e),
        }
    }
}

/// Outcome of one input line: the build failure that stopped the line (if
/// any) and the value of every root left on the stack.
#[derive(Clone, PartialEq, Debug)]
pub struct Report {
    pub failure: Option<interpret::Error>,
    pub stack: Vec<Result<Number, ArithError>>,
}

impl Report {
    pub fn rendered_stack(&self) -> Vec<String> {
        self.stack
            .iter()
            .map(|result| match result {
                Ok(number) => number.to_string(),
                Err(error) => error.to_string(),
            })
            .collect()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(failure) = &self.failure {
            writeln!(f, "{}", failure)?;
        }
        write!(f, "Stack: {}", self.rendered_stack().join(" "))
    }
}

pub struct Session {
    inter: Interpreter<Number>,
    parser: LineParser,
}

impl Session {
    pub fn new() -> Session {
        Session::with_interpreter(Interpreter::new())
    }

    pub fn with_format(format: NumberFormat) -> Session {
        Session::with_interpreter(
            Interpreter::with_operand_parser(Box::new(move |token: &str| format.parse(token))),
        )
    }

    pub fn with_interpreter(inter: Interpreter<Number>) -> Session {
        Session {
            inter,
            parser: LineParser::new(),
        }
    }

    pub fn eval_line(&mut self, line: &str) -> Result<Report, Error> {
        let tokens = self.parser.parse_line(line).map_err(Error::Parse)?;
        Ok(self.eval_tokens(&tokens))
    }

    pub fn eval_tokens<S>(&mut self, tokens: &[S]) -> Report where S: AsRef<str> {
        let failure = self.inter.accept_many(tokens).err();
        Report {
            failure,
            stack: self.inter.evaluate(),
        }
    }

    pub fn clear(&mut self) {
        self.inter.clear();
    }

    pub fn interpreter(&self) -> &Interpreter<Number> {
        &self.inter
    }
}

impl Default for Session {
    fn default() -> Session {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_line() {
        let mut session = Session::new();
        let report = session.eval_line("5 2").unwrap();
        assert_eq!(report.failure, None);
        assert_eq!(report.rendered_stack(), vec!["5", "2"]);
        assert_eq!(report.to_string(), "Stack: 5 2");
    }

    #[test]
    fn eval_line_keeps_state() {
        let mut session = Session::new();
        session.eval_line("2 sqrt").unwrap();
        assert_eq!(session.eval_line("").unwrap().to_string(), "Stack: 1.4142135623");
        assert_eq!(session.eval_line("clear 9 sqrt").unwrap().to_string(), "Stack: 3");
        session.clear();
        assert_eq!(session.interpreter().depth(), 0);
    }

    #[test]
    fn eval_line_failure() {
        let mut session = Session::new();
        let report = session.eval_line("1 2 3 * 5 + * * 6 5").unwrap();
        assert_eq!(
            report.failure,
            Some(interpret::Error::InsufficientOperands { operator: "*".to_string(), position: 8, }),
        );
        assert_eq!(
            report.to_string(),
            "Operator '*' (position 8), insufficient parameter\nStack: 11",
        );
    }

    #[test]
    fn eval_line_arithmetic_failure() {
        let mut session = Session::new();
        let report = session.eval_line("1 0 / 6 5 *").unwrap();
        assert_eq!(report.failure, None);
        assert_eq!(report.to_string(), "Stack: Division by zero 30");
    }

    #[test]
    fn with_format() {
        let mut session = Session::with_format(NumberFormat::new(6, 3));
        assert_eq!(session.eval_line("2 3 /").unwrap().to_string(), "Stack: 0.666");
    }
}
