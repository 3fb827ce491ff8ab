//! Boolean coercion for loop conditions.

/// Values with a notion of truthiness.
///
/// Numbers are truthy when non-zero (and not NaN), strings when non-empty,
/// options when `Some` with a truthy payload.
pub trait Truthy {
    /// Returns the boolean reading of the value.
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthy for () {
    fn is_truthy(&self) -> bool {
        false
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().map_or(false, Truthy::is_truthy)
    }
}

impl<T: ?Sized + Truthy> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

macro_rules! truthy_int {
    ($($t:ty)*) => ($(
        impl Truthy for $t {
            fn is_truthy(&self) -> bool {
                *self != 0
            }
        }
    )*)
}

truthy_int! { i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize }

macro_rules! truthy_float {
    ($($t:ty)*) => ($(
        impl Truthy for $t {
            fn is_truthy(&self) -> bool {
                *self != 0.0 && !self.is_nan()
            }
        }
    )*)
}

truthy_float! { f32 f64 }
