use std::fmt;

/// Arithmetic capabilities the engine requires from an operand type.
///
/// Every operation returns a fresh value; failures are typed and must be
/// cloneable, because a forced result (good or bad) is cached forever.
pub trait Operable: Sized + Clone {
    type Error: Clone + fmt::Debug + fmt::Display;

    fn parse(text: &str) -> Option<Self>;

    fn add(&self, that: &Self) -> Result<Self, Self::Error>;
    fn subtract(&self, that: &Self) -> Result<Self, Self::Error>;
    fn multiply(&self, that: &Self) -> Result<Self, Self::Error>;
    fn divide(&self, that: &Self) -> Result<Self, Self::Error>;
    fn sqrt(&self) -> Result<Self, Self::Error>;
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum UnaryFun {
    Sqrt,
}

impl UnaryFun {
    pub fn apply<E>(&self, value: &E) -> Result<E, E::Error> where E: Operable {
        match self {
            UnaryFun::Sqrt =>
                value.sqrt(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BinaryFun {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryFun {
    pub fn apply<E>(&self, left: &E, right: &E) -> Result<E, E::Error> where E: Operable {
        match self {
            BinaryFun::Add =>
                left.add(right),
            BinaryFun::Sub =>
                left.subtract(right),
            BinaryFun::Mul =>
                left.multiply(right),
            BinaryFun::Div =>
                left.divide(right),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum StackFun {
    Clear,
    Undo,
}

/// Number of stack roots an operator consumes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Arity {
    Zero,
    One,
    Two,
    All,
}

impl Arity {
    /// Fixed operand count, `None` for `All`.
    pub fn value(&self) -> Option<usize> {
        match self {
            Arity::Zero =>
                Some(0),
            Arity::One =>
                Some(1),
            Arity::Two =>
                Some(2),
            Arity::All =>
                None,
        }
    }
}

impl fmt::Display for UnaryFun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryFun::Sqrt => write!(f, "sqrt"),
        }
    }
}

impl fmt::Display for BinaryFun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryFun::Add => write!(f, "+"),
            BinaryFun::Sub => write!(f, "-"),
            BinaryFun::Mul => write!(f, "*"),
            BinaryFun::Div => write!(f, "/"),
        }
    }
}

impl fmt::Display for StackFun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackFun::Clear => write!(f, "clear"),
            StackFun::Undo => write!(f, "undo"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_values() {
        assert_eq!(Arity::Zero.value(), Some(0));
        assert_eq!(Arity::One.value(), Some(1));
        assert_eq!(Arity::Two.value(), Some(2));
        assert_eq!(Arity::All.value(), None);
    }

    #[test]
    fn symbols() {
        assert_eq!(BinaryFun::Add.to_string(), "+");
        assert_eq!(BinaryFun::Sub.to_string(), "-");
        assert_eq!(BinaryFun::Mul.to_string(), "*");
        assert_eq!(BinaryFun::Div.to_string(), "/");
        assert_eq!(UnaryFun::Sqrt.to_string(), "sqrt");
        assert_eq!(StackFun::Clear.to_string(), "clear");
        assert_eq!(StackFun::Undo.to_string(), "undo");
    }
}
