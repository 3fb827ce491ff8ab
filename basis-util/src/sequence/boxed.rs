use core::fmt;
use std::rc::Rc;

use basis_core::Sequence;

/// A type-erased sequence.
///
/// Cloning is cheap and every clone shares the wrapped sequence.
pub struct LocalBoxSequence<'a, T> {
    factory: Rc<dyn Fn() -> Box<dyn Iterator<Item = T> + 'a> + 'a>,
}

impl<'a, T> LocalBoxSequence<'a, T> {
    /// Erases the type of `seq`.
    pub fn new<S>(seq: S) -> LocalBoxSequence<'a, T>
    where
        S: Sequence<Item = T> + 'a,
        S::Cursor: 'a,
    {
        let factory = move || -> Box<dyn Iterator<Item = T> + 'a> { Box::new(seq.cursor()) };
        LocalBoxSequence { factory: Rc::new(factory) }
    }
}

impl<T> Clone for LocalBoxSequence<'_, T> {
    fn clone(&self) -> Self {
        LocalBoxSequence { factory: self.factory.clone() }
    }
}

impl<T> fmt::Debug for LocalBoxSequence<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalBoxSequence").finish_non_exhaustive()
    }
}

impl<'a, T> Sequence for LocalBoxSequence<'a, T> {
    type Item = T;
    type Cursor = Box<dyn Iterator<Item = T> + 'a>;

    fn cursor(&self) -> Self::Cursor {
        (self.factory)()
    }
}
