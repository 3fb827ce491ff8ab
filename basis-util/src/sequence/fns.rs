//! Nameable two-argument functions, so that folds can be flipped and
//! orderings built without boxing a closure.

use core::cmp::Ordering;
use core::fmt;

/// Like [`Fn`] taking two arguments but implementable.
pub trait Fn2<A, B> {
    /// The returned type after the call operator is used.
    type Output;
    /// Performs the call operation.
    fn call(&self, a: A, b: B) -> Self::Output;
}

impl<F, A, B, R> Fn2<A, B> for F
where
    F: Fn(A, B) -> R,
{
    type Output = R;
    #[inline]
    fn call(&self, a: A, b: B) -> R {
        self(a, b)
    }
}

/// A [`Fn2`] calling the wrapped function with its arguments swapped.
///
/// Right folds are left folds over the reversed sequence with the operator
/// flipped.
#[derive(Clone, Copy)]
pub struct Flip<F>(pub(crate) F);

impl<F> fmt::Debug for Flip<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Flip").finish()
    }
}

impl<F, A, B> Fn2<A, B> for Flip<F>
where
    F: Fn2<B, A>,
{
    type Output = F::Output;
    #[inline]
    fn call(&self, a: A, b: B) -> F::Output {
        self.0.call(b, a)
    }
}

/// Like [`Fn`] comparing two borrowed elements but implementable.
pub trait Compare<T> {
    /// Orders `a` relative to `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// A [`Compare`] using the elements' own [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrder;

impl<T: Ord> Compare<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// A [`Compare`] ordering elements by the key the wrapped function extracts.
#[derive(Clone, Copy)]
pub struct ByKey<F>(pub(crate) F);

impl<F> fmt::Debug for ByKey<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ByKey").finish()
    }
}

impl<T, K, F> Compare<T> for ByKey<F>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a).cmp(&(self.0)(b))
    }
}
