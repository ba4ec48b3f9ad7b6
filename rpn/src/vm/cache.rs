use std::sync::{
    Arc,
    Mutex,
    MutexGuard,
};

use log::trace;

use super::{
    super::code::Operable,
    command::Command,
    stack::Measurable,
};

/// What the operand stack holds: a shared handle to a memoized command.
pub type Cell<E> = Arc<Cached<E>>;

enum Memo<E> where E: Operable {
    Unresolved,
    Resolved(Result<E, E::Error>),
}

/// Memoizing wrapper around a single command.
///
/// The first `force` evaluates the command under the cell's lock and stores
/// the outcome, failures included; every later call returns that outcome.
/// Concurrent callers block on the lock, find the cell resolved and never
/// evaluate the command a second time.
pub struct Cached<E> where E: Operable {
    command: Command<E>,
    memo: Mutex<Memo<E>>,
}

impl<E> Cached<E> where E: Operable {
    pub fn new(command: Command<E>) -> Cached<E> {
        Cached {
            command,
            memo: Mutex::new(Memo::Unresolved),
        }
    }

    pub fn wrap(command: Command<E>) -> Cell<E> {
        Arc::new(Cached::new(command))
    }

    pub fn command(&self) -> &Command<E> {
        &self.command
    }

    /// Descendants are settled bottom up from an explicit work list, so the
    /// wrapped command only ever reads operands that are already cached and
    /// tree depth never turns into call depth.
    pub fn force(&self) -> Result<E, E::Error> {
        let mut pending: Vec<Cell<E>> = Vec::new();
        loop {
            let blocker = match pending.last() {
                Some(cell) =>
                    cell.unsettled_child(),
                None =>
                    self.unsettled_child(),
            };
            match blocker {
                Some(child) =>
                    pending.push(child),
                None => match pending.pop() {
                    Some(cell) => {
                        let settled = cell.settle();
                        trace!("operand settled, ok: {}", settled.is_ok());
                    },
                    None =>
                        return self.settle(),
                },
            }
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome().is_some()
    }

    /// Children of the wrapped command, bypassing this cell's memo.
    pub fn undo(&self) -> Vec<Cell<E>> {
        self.command.undo()
    }

    /// Drops cells one node at a time: a cell nobody else holds hands its
    /// children over to the work list before it goes away.
    pub fn release(cells: Vec<Cell<E>>) {
        let mut pending = cells;
        while let Some(cell) = pending.pop() {
            if let Ok(Cached { command, .. }) = Arc::try_unwrap(cell) {
                pending.extend(command.into_children());
            }
        }
    }

    // first child that has to be settled before this cell can be
    fn unsettled_child(&self) -> Option<Cell<E>> {
        if self.is_resolved() {
            return None;
        }
        for child in self.command.undo() {
            match child.outcome() {
                None =>
                    return Some(child),
                // later children are never forced past a failure
                Some(false) =>
                    return None,
                Some(true) =>
                    (),
            }
        }
        None
    }

    fn settle(&self) -> Result<E, E::Error> {
        let mut memo = self.lock();
        match &*memo {
            Memo::Resolved(result) =>
                return result.clone(),
            Memo::Unresolved =>
                (),
        }
        trace!("forcing command of arity {}", self.command.arity());
        let result = self.command.force();
        *memo = Memo::Resolved(result.clone());
        result
    }

    // `None` while unresolved, otherwise whether the cached result is a success
    fn outcome(&self) -> Option<bool> {
        match &*self.lock() {
            Memo::Resolved(result) =>
                Some(result.is_ok()),
            Memo::Unresolved =>
                None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Memo<E>> {
        // a panic inside an operand leaves the memo unresolved, nothing to repair
        self.memo.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<E> Measurable for Cached<E> where E: Operable {
    fn size(&self) -> usize {
        self.command.size()
    }
}
