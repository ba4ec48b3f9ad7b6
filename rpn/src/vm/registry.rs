use std::{
    fmt,
    collections::HashMap,
};

use super::{
    super::code::{
        Arity,
        Operable,
        UnaryFun,
        BinaryFun,
        StackFun,
    },
    cache::{
        Cell,
        Cached,
    },
    command::Command,
};

pub type OperandParser<E> = Box<dyn Fn(&str) -> Option<E> + Send + Sync>;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    ArityMismatch { expected: usize, received: usize, },
    TransformMismatch { arity: Arity, received: usize, },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ArityMismatch { expected, received, } =>
                write!(f, "Unexpected state: expects {} arguments but receives {} arguments", expected, received),
            Error::TransformMismatch { arity, received, } =>
                write!(f, "Unexpected state: {:?} arity transform cannot take {} arguments", arity, received),
        }
    }
}

impl std::error::Error for Error { }

#[derive(Clone, PartialEq, Debug)]
pub enum Transform<E> {
    Operand(E),
    Unary(UnaryFun),
    Binary(BinaryFun),
    Stack(StackFun),
}

/// Profile of a token: how many roots it consumes and what it turns them into.
#[derive(Clone, PartialEq, Debug)]
pub struct Definition<E> {
    arity: Arity,
    transform: Transform<E>,
}

impl<E> Definition<E> where E: Operable {
    pub fn operand(value: E) -> Definition<E> {
        Definition { arity: Arity::Zero, transform: Transform::Operand(value), }
    }

    pub fn unary(fun: UnaryFun) -> Definition<E> {
        Definition { arity: Arity::One, transform: Transform::Unary(fun), }
    }

    pub fn binary(fun: BinaryFun) -> Definition<E> {
        Definition { arity: Arity::Two, transform: Transform::Binary(fun), }
    }

    pub fn stack(fun: StackFun) -> Definition<E> {
        let arity = match fun {
            StackFun::Clear =>
                Arity::All,
            StackFun::Undo =>
                Arity::One,
        };
        Definition { arity, transform: Transform::Stack(fun), }
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn transform(&self) -> &Transform<E> {
        &self.transform
    }

    /// Turns the popped roots into their replacements. Freshly built commands
    /// come back in new memo cells; `undo` hands back the existing child
    /// cells with their memo state intact.
    pub fn apply(self, args: Vec<Cell<E>>) -> Result<Vec<Cell<E>>, Error> {
        let received = args.len();
        if let Some(expected) = self.arity.value() {
            if expected != received {
                return Err(Error::ArityMismatch { expected, received, });
            }
        }

        if let Transform::Stack(StackFun::Clear) = self.transform {
            Cached::release(args);
            return Ok(vec![]);
        }

        let mut args = args.into_iter();
        let cells = match (self.transform, args.next(), args.next()) {
            (Transform::Operand(value), None, None) =>
                vec![Cached::wrap(Command::operand(value))],
            (Transform::Unary(fun), Some(arg), None) =>
                vec![Cached::wrap(Command::unary(fun, arg))],
            (Transform::Binary(fun), Some(left), Some(right)) =>
                vec![Cached::wrap(Command::binary(fun, left, right))],
            (Transform::Stack(StackFun::Undo), Some(arg), None) =>
                arg.undo(),
            _ =>
                return Err(Error::TransformMismatch { arity: self.arity, received, }),
        };
        Ok(cells)
    }
}

/// Operation dispatcher: fixed operator table first, operand literals second.
pub struct Registry<E> {
    operators: HashMap<&'static str, Definition<E>>,
    operand_parser: OperandParser<E>,
}

impl<E> Registry<E> where E: Operable {
    pub fn new(operand_parser: OperandParser<E>) -> Registry<E> {
        let mut operators = HashMap::new();
        operators.insert("+", Definition::binary(BinaryFun::Add));
        operators.insert("-", Definition::binary(BinaryFun::Sub));
        operators.insert("*", Definition::binary(BinaryFun::Mul));
        operators.insert("/", Definition::binary(BinaryFun::Div));
        operators.insert("sqrt", Definition::unary(UnaryFun::Sqrt));
        operators.insert("clear", Definition::stack(StackFun::Clear));
        operators.insert("undo", Definition::stack(StackFun::Undo));

        Registry { operators, operand_parser, }
    }

    pub fn resolve(&self, token: &str) -> Option<Definition<E>> {
        match self.operators.get(token) {
            Some(definition) =>
                Some(definition.clone()),
            None =>
                (self.operand_parser)(token).map(Definition::operand),
        }
    }

    pub fn operators(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.operators.keys().cloned()
    }
}
