//! Copy/paste history.
//!
//! Each entry pairs a value with the capability that realizes a copy of it,
//! so the history never needs to know how the values it stores are cloned.
//! Pasting the same entry twice yields two independent copies.

/// Realizes a new copy of a value.
///
/// Implemented for every `Fn(&T) -> T`, so closures and functions such as
/// `Clone::clone` can be passed directly.
pub trait Duplicate<T> {
    fn duplicate(&self, value: &T) -> T;
}

impl<T, F> Duplicate<T> for F
where
    F: Fn(&T) -> T,
{
    #[inline]
    fn duplicate(&self, value: &T) -> T {
        self(value)
    }
}

struct Entry<T> {
    value: T,
    copy: Box<dyn Duplicate<T>>,
}

/// An unbounded, append-only copy/paste stack.
pub struct History<T> {
    entries: Vec<Entry<T>>,
}

impl<T> History<T> {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Push `value` together with the capability used to copy it.
    pub fn copy<D>(&mut self, value: T, copy: D)
    where
        D: Duplicate<T> + 'static,
    {
        self.entries.push(Entry {
            value,
            copy: Box::new(copy),
        });
    }

    /// Copy of the most recent entry, which stays in the history.
    pub fn paste(&self) -> Option<T> {
        self.entries.last().map(|e| e.copy.duplicate(&e.value))
    }

    /// Remove the most recent entry and return a copy of it.
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop().map(|e| e.copy.duplicate(&e.value))
    }

    /// The most recent value, without copying it.
    pub fn peek(&self) -> Option<&T> {
        self.entries.last().map(|e| &e.value)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Clone + 'static> History<T> {
    /// Push `value`, copying it with [`Clone`].
    pub fn copy_cloned(&mut self, value: T) {
        self.copy(value, T::clone);
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for History<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| &e.value))
            .finish()
    }
}
