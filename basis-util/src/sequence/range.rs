use basis_core::Sequence;

/// Numeric types a [`Range`] can step through.
///
/// Integer steps that would overflow end the range instead of wrapping or
/// panicking.
pub trait Step: Copy + PartialOrd {
    /// The additive identity, used to tell the direction of a step.
    const ZERO: Self;
    /// The step used by [`range`].
    const ONE: Self;

    /// Returns `self + step`, or `None` when it is not representable.
    fn forward(self, step: Self) -> Option<Self>;
}

macro_rules! integer_step {
    ($($t:ty)*) => {$(
        impl Step for $t {
            const ZERO: Self = 0;
            const ONE: Self = 1;

            fn forward(self, step: Self) -> Option<Self> {
                self.checked_add(step)
            }
        }
    )*};
}

integer_step!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

macro_rules! float_step {
    ($($t:ty)*) => {$(
        impl Step for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            fn forward(self, step: Self) -> Option<Self> {
                Some(self + step)
            }
        }
    )*};
}

float_step!(f32 f64);

/// Sequence for the [`range`] and [`range_step`] functions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use = "sequences do nothing unless iterated"]
pub struct Range<T> {
    start: T,
    end: T,
    step: T,
}

/// Creates the sequence `start, start + 1, ...` of values below `end`.
///
/// Empty when `end <= start`.
pub fn range<T: Step>(start: T, end: T) -> Range<T> {
    Range { start, end, step: T::ONE }
}

/// Creates the sequence `start, start + step, ...` stopping before `end`.
///
/// With a positive `step` the values stay below `end`, with a negative one
/// they stay above it. Fractional steps work for floating point types. A
/// zero step, or bounds on the wrong side of each other, make an empty
/// sequence.
///
/// # Examples
///
/// ```
/// use basis_util::sequence::{range_step, SequenceExt};
///
/// assert_eq!(range_step(2, 12, 3).to_vec(), vec![2, 5, 8, 11]);
/// assert_eq!(range_step(3, 0, -1).to_vec(), vec![3, 2, 1]);
/// assert_eq!(range_step(0.0, 1.0, 0.25).to_vec(), vec![0.0, 0.25, 0.5, 0.75]);
/// ```
pub fn range_step<T: Step>(start: T, end: T, step: T) -> Range<T> {
    Range { start, end, step }
}

impl<T: Step> Sequence for Range<T> {
    type Item = T;
    type Cursor = RangeCursor<T>;

    fn cursor(&self) -> Self::Cursor {
        RangeCursor { next: Some(self.start), end: self.end, step: self.step }
    }
}

/// Cursor for [`Range`].
#[derive(Debug, Clone)]
pub struct RangeCursor<T> {
    next: Option<T>,
    end: T,
    step: T,
}

impl<T: Step> Iterator for RangeCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let value = self.next?;
        let more = if self.step > T::ZERO {
            value < self.end
        } else if self.step < T::ZERO {
            value > self.end
        } else {
            false
        };
        if !more {
            self.next = None;
            return None;
        }
        self.next = value.forward(self.step);
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::SequenceExt;

    #[test]
    fn integer_ranges() {
        assert_eq!(range(0, 3).to_vec(), [0, 1, 2]);
        assert_eq!(range(0, 1).to_vec(), [0]);
        assert!(range(0, 0).is_empty());
        assert!(range(1, 0).is_empty());
        assert_eq!(range_step(0, 10, 3).to_vec(), [0, 3, 6, 9]);
        assert_eq!(range_step(1, 10, 3).to_vec(), [1, 4, 7]);
        assert_eq!(range(1, 7).count(), 6);
    }

    #[test]
    fn negative_and_zero_steps() {
        assert_eq!(range_step(0, -6, -2).to_vec(), [0, -2, -4]);
        assert!(range_step(0, 5, -1).is_empty());
        assert!(range_step(0, 5, 0).is_empty());
    }

    #[test]
    fn steps_stop_at_the_end_of_the_type() {
        assert_eq!(range_step(250u8, 255, 2).to_vec(), [250, 252, 254]);
        assert_eq!(range_step(0i8, 127, 100).to_vec(), [0, 100]);
        assert_eq!(range_step(-100i8, -128, -50).to_vec(), [-100]);
        assert_eq!(range(i32::MAX - 2, i32::MAX).to_vec(), [i32::MAX - 2, i32::MAX - 1]);
        assert_eq!(range(u8::MAX - 1, u8::MAX).to_vec(), [u8::MAX - 1]);

        let mut cursor = range_step(250u8, 255, 10).cursor();
        assert_eq!(cursor.next(), Some(250));
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn fractional_steps() {
        assert_eq!(range_step(0.0, 1.0, 0.5).to_vec(), [0.0, 0.5]);
        assert!(range_step(0.0, f64::NAN, 0.5).is_empty());
    }
}
