use std::fmt;

use log::{
    debug,
    warn,
};
use rayon::prelude::*;

use super::{
    super::code::Operable,
    cache::{
        Cell,
        Cached,
    },
    registry::{
        self,
        Registry,
        OperandParser,
    },
    stack::Stack,
};

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    UnknownToken { token: String, },
    InsufficientOperands { operator: String, position: usize, },
    Registry(registry::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownToken { token, } =>
                write!(f, "Unknown element or operator: {}", token),
            Error::InsufficientOperands { operator, position, } =>
                write!(f, "Operator '{}' (position {}), insufficient parameter", operator, position),
            Error::Registry(e) =>
                write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Registry(e) => Some(e),
            _ => None,
        }
    }
}

/// Evaluation engine.
///
/// Tokens build a forest of deferred commands on the operand stack; nothing
/// is computed until `evaluate`. Building takes `&mut self`, so tokens are
/// always accepted one caller at a time, while forcing only needs `&self`.
pub struct Interpreter<E> where E: Operable {
    registry: Registry<E>,
    stack: Stack<Cell<E>>,
}

impl<E> Interpreter<E> where E: Operable + 'static {
    pub fn new() -> Interpreter<E> {
        Interpreter::with_operand_parser(Box::new(E::parse))
    }

    pub fn with_operand_parser(operand_parser: OperandParser<E>) -> Interpreter<E> {
        Interpreter {
            registry: Registry::new(operand_parser),
            stack: Stack::new(),
        }
    }

    /// Applies a single token. On failure the stack is left as it was.
    pub fn accept(&mut self, token: &str) -> Result<(), Error> {
        let definition = match self.registry.resolve(token) {
            Some(definition) =>
                definition,
            None => {
                warn!("rejected token {:?}", token);
                return Err(Error::UnknownToken { token: token.to_string(), });
            },
        };

        let args = match definition.arity().value() {
            None =>
                self.stack.drain_all(),
            Some(arity) if self.stack.depth() < arity => {
                let position = self.stack.weight() + 1;
                warn!("operator {:?} needs {} operands, stack depth is {}", token, arity, self.stack.depth());
                return Err(Error::InsufficientOperands {
                    operator: token.to_string(),
                    position,
                });
            },
            Some(arity) =>
                self.stack.pop(arity),
        };

        let consumed = args.len();
        let cells = definition.apply(args).map_err(Error::Registry)?;
        debug!("token {:?}: {} root(s) consumed, {} pushed", token, consumed, cells.len());
        self.stack.push(cells);
        Ok(())
    }

    /// Applies tokens in order, stopping at the first failure.
    pub fn accept_many<I, S>(&mut self, tokens: I) -> Result<(), Error> where I: IntoIterator<Item = S>, S: AsRef<str> {
        for token in tokens {
            self.accept(token.as_ref())?;
        }
        Ok(())
    }

    /// Forces every root, bottom to top. A failing root does not affect the
    /// others.
    pub fn evaluate(&self) -> Vec<Result<E, E::Error>> {
        self.stack.snapshot()
            .iter()
            .map(|cell| cell.force())
            .collect()
    }

    /// Drops every root, same as accepting `clear`.
    pub fn clear(&mut self) {
        let roots = self.stack.drain_all();
        debug!("clear: {} root(s) dropped", roots.len());
        Cached::release(roots);
    }

    pub fn roots(&self) -> Vec<Cell<E>> {
        self.stack.snapshot()
    }

    /// Number of roots on the stack.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Number of nodes across all roots.
    pub fn weight(&self) -> usize {
        self.stack.weight()
    }
}

impl<E> Interpreter<E> where E: Operable + Send + Sync + 'static, E::Error: Send + Sync {
    /// Same as `evaluate`, forcing roots on the rayon pool.
    pub fn evaluate_parallel(&self) -> Vec<Result<E, E::Error>> {
        self.stack.snapshot()
            .par_iter()
            .map(|cell| cell.force())
            .collect()
    }
}

impl<E> Drop for Interpreter<E> where E: Operable {
    fn drop(&mut self) {
        Cached::release(self.stack.drain_all());
    }
}

impl<E> Default for Interpreter<E> where E: Operable + 'static {
    fn default() -> Interpreter<E> {
        Interpreter::new()
    }
}
