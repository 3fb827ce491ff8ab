//! The randomness capability consumed by sampling.

/// A source of uniformly distributed values in `[0, 1)`.
///
/// With the `rand` feature (on by default) every [`rand::RngCore`] is a
/// `RandomSource`.
pub trait RandomSource {
    /// Draws the next value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;
}

#[cfg(feature = "rand")]
impl<R: rand::RngCore> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        rand::Rng::gen::<f64>(self)
    }
}
