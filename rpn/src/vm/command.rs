use super::{
    super::code::{
        Operable,
        UnaryFun,
        BinaryFun,
    },
    cache::Cell,
    stack::Measurable,
};

/// A deferred computation.
///
/// Children are the memo cells that were popped off the stack when the node
/// was built, so `undo` hands them back with whatever memo state they had.
/// `size` is fixed at construction.
pub enum Command<E> where E: Operable {
    Operand { value: E, },
    Unary { fun: UnaryFun, arg: Cell<E>, size: usize, },
    Binary { fun: BinaryFun, left: Cell<E>, right: Cell<E>, size: usize, },
}

impl<E> Command<E> where E: Operable {
    pub fn operand(value: E) -> Command<E> {
        Command::Operand { value, }
    }

    pub fn unary(fun: UnaryFun, arg: Cell<E>) -> Command<E> {
        let size = 1 + arg.size();
        Command::Unary { fun, arg, size, }
    }

    pub fn binary(fun: BinaryFun, left: Cell<E>, right: Cell<E>) -> Command<E> {
        let size = 1 + left.size() + right.size();
        Command::Binary { fun, left, right, size, }
    }

    pub fn arity(&self) -> usize {
        match self {
            Command::Operand { .. } =>
                0,
            Command::Unary { .. } =>
                1,
            Command::Binary { .. } =>
                2,
        }
    }

    /// Children are forced left to right; the first failure wins and the
    /// remaining children are left untouched.
    pub fn force(&self) -> Result<E, E::Error> {
        match self {
            Command::Operand { value, } =>
                Ok(value.clone()),
            Command::Unary { fun, arg, .. } => {
                let value = arg.force()?;
                fun.apply(&value)
            },
            Command::Binary { fun, left, right, .. } => {
                let left_value = left.force()?;
                let right_value = right.force()?;
                fun.apply(&left_value, &right_value)
            },
        }
    }

    pub fn undo(&self) -> Vec<Cell<E>> {
        match self {
            Command::Operand { .. } =>
                vec![],
            Command::Unary { arg, .. } =>
                vec![arg.clone()],
            Command::Binary { left, right, .. } =>
                vec![left.clone(), right.clone()],
        }
    }

    pub fn into_children(self) -> Vec<Cell<E>> {
        match self {
            Command::Operand { .. } =>
                vec![],
            Command::Unary { arg, .. } =>
                vec![arg],
            Command::Binary { left, right, .. } =>
                vec![left, right],
        }
    }
}

impl<E> Measurable for Command<E> where E: Operable {
    fn size(&self) -> usize {
        match self {
            Command::Operand { .. } =>
                1,
            Command::Unary { size, .. } |
            Command::Binary { size, .. } =>
                *size,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{
        Command,
        Measurable,
        super::cache::Cached,
        super::super::{
            code::{
                UnaryFun,
                BinaryFun,
            },
            number::{
                Number,
                ArithError,
            },
        },
    };

    fn num(text: &str) -> Number {
        text.parse().unwrap()
    }

    fn leaf(text: &str) -> Arc<Cached<Number>> {
        Cached::wrap(Command::operand(num(text)))
    }

    #[test]
    fn operand() {
        let command = Command::operand(num("5"));
        assert_eq!(command.arity(), 0);
        assert_eq!(command.size(), 1);
        assert_eq!(command.force(), Ok(num("5")));
        assert!(command.undo().is_empty());
    }

    #[test]
    fn binary_order() {
        let command = Command::binary(BinaryFun::Sub, leaf("5"), leaf("2"));
        assert_eq!(command.arity(), 2);
        assert_eq!(command.force(), Ok(num("3")));

        let command = Command::binary(BinaryFun::Div, leaf("12"), leaf("2"));
        assert_eq!(command.force(), Ok(num("6")));
    }

    #[test]
    fn size_is_fixed_at_construction() {
        let inner = Cached::wrap(Command::binary(BinaryFun::Mul, leaf("2"), leaf("3")));
        let outer = Command::binary(BinaryFun::Add, leaf("1"), inner.clone());
        assert_eq!(inner.size(), 3);
        assert_eq!(outer.size(), 5);

        let children = outer.undo();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].size(), 1);
        assert_eq!(children[1].size(), 3);
        assert_eq!(outer.size(), 1 + children.iter().map(|c| c.size()).sum::<usize>());
    }

    #[test]
    fn undo_returns_same_children() {
        let left = leaf("4");
        let right = leaf("3");
        let command = Command::binary(BinaryFun::Mul, left.clone(), right.clone());
        let children = command.undo();
        assert_eq!(children.len(), 2);
        assert!(Arc::ptr_eq(&children[0], &left));
        assert!(Arc::ptr_eq(&children[1], &right));

        let arg = leaf("9");
        let command = Command::unary(UnaryFun::Sqrt, arg.clone());
        assert_eq!(command.size(), 2);
        let children = command.undo();
        assert_eq!(children.len(), 1);
        assert!(Arc::ptr_eq(&children[0], &arg));
        assert_eq!(command.force(), Ok(num("3")));
    }

    #[test]
    fn first_failure_short_circuits() {
        let failing = Cached::wrap(Command::binary(BinaryFun::Div, leaf("1"), leaf("0")));
        let untouched = Cached::wrap(Command::unary(UnaryFun::Sqrt, leaf("4")));
        let command = Command::binary(BinaryFun::Add, failing, untouched.clone());
        assert_eq!(command.force(), Err(ArithError::DivisionByZero));
        assert!(!untouched.is_resolved());
    }

    #[test]
    fn arithmetic_failure_is_a_value() {
        let command = Command::unary(UnaryFun::Sqrt, leaf("-4"));
        assert!(command.force().is_err());
    }
}
