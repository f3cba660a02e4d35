use crate::*;
pub use shuffle::*;

mod shuffle;

/// Narrow randomness capability used for mine placement.
pub trait UniformSource {
    /// Returns a uniformly distributed integer in `[0, n)`, `n` is never zero.
    fn below(&mut self, n: usize) -> usize;
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    fn below(&mut self, n: usize) -> usize {
        (**self).below(n)
    }
}

pub trait LayoutGenerator {
    fn generate(self, config: &Config) -> Result<MineLayout>;
}
