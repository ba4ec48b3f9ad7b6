use std::sync::{
    Arc,
    Mutex,
    MutexGuard,
};

/// Anything that can report how many tree nodes it stands for.
pub trait Measurable {
    fn size(&self) -> usize;
}

impl<T> Measurable for Arc<T> where T: Measurable + ?Sized {
    fn size(&self) -> usize {
        (**self).size()
    }
}

/// Ordered container of tree roots, the top being the most recent push.
///
/// `push`, `pop` and `drain_all` are serialized by one lock, so concurrent
/// producers never observe or leave behind a half applied batch. Readers
/// (`depth`, `weight`, `snapshot`) take the lock only long enough to copy
/// what they need and then work on that copy.
pub struct Stack<T> {
    internal: Mutex<Vec<T>>,
}

impl<T> Stack<T> where T: Measurable + Clone {
    pub fn new() -> Stack<T> {
        Stack {
            internal: Mutex::new(Vec::new()),
        }
    }

    pub fn push<I>(&self, items: I) where I: IntoIterator<Item = T> {
        self.lock().extend(items);
    }

    /// Removes the `n` most recent items, returned in their original order.
    /// Returns nothing and leaves the stack untouched when `n` is zero or
    /// larger than the current depth.
    pub fn pop(&self, n: usize) -> Vec<T> {
        let mut internal = self.lock();
        if n < 1 || n > internal.len() {
            return vec![];
        }
        let at = internal.len() - n;
        internal.split_off(at)
    }

    /// Removes everything, bottom to top.
    pub fn drain_all(&self) -> Vec<T> {
        self.lock().drain(..).collect()
    }

    /// Shallow count of roots.
    pub fn depth(&self) -> usize {
        self.lock().len()
    }

    /// Total node count across all roots.
    pub fn weight(&self) -> usize {
        self.snapshot().iter().map(Measurable::size).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.depth() == 0
    }

    /// Point in time copy, bottom to top.
    pub fn snapshot(&self) -> Vec<T> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        self.internal.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T> Default for Stack<T> where T: Measurable + Clone {
    fn default() -> Stack<T> {
        Stack::new()
    }
}
