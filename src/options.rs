//! Options controlling how an array is mapped.

use rgb::RGBA8;

/// Fully transparent black, the default fallback color.
pub const TRANSPARENT: RGBA8 = RGBA8 { r: 0, g: 0, b: 0, a: 0 };

/// How the mapping loop is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingMode {
    /// Single thread, left to right.
    Sequential,
    /// Split the input over rayon's global thread pool.
    #[default]
    Parallel,
    /// Split the input over a dedicated pool of the given number of
    /// threads.
    ParallelWith(usize),
}

/// Parameters of a mapping call.
///
/// The output never depends on [`ProcessingMode`] or
/// `parallel_threshold`; they only select how the work is scheduled.
/// Without the `parallel` feature every mode runs sequentially.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapOptions {
    /// Color of values absent from the colormap.
    pub fallback: RGBA8,
    pub mode: ProcessingMode,
    /// Inputs shorter than this are always mapped sequentially.
    pub parallel_threshold: usize,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self { fallback: TRANSPARENT,
               mode: ProcessingMode::default(),
               parallel_threshold: 1 << 16 }
    }
}

impl MapOptions {
    pub fn new() -> Self { Self::default() }

    /// Sequential options with the given fallback color.
    pub fn sequential(fallback: RGBA8) -> Self {
        Self { fallback, mode: ProcessingMode::Sequential, ..Self::default() }
    }

    pub fn fallback(mut self, color: RGBA8) -> Self {
        self.fallback = color;
        self
    }

    pub fn mode(mut self, mode: ProcessingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn parallel_threshold(mut self, n: usize) -> Self {
        self.parallel_threshold = n;
        self
    }

    /// Whether an input of length `len` is split across threads.
    pub(crate) fn runs_parallel(&self, len: usize) -> bool {
        cfg!(feature = "parallel")
            && self.mode != ProcessingMode::Sequential
            && len >= self.parallel_threshold.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let o = MapOptions::default();
        assert_eq!(o.fallback, TRANSPARENT);
        assert_eq!(o.mode, ProcessingMode::Parallel);
        assert_eq!(o.parallel_threshold, 65536);
        assert_eq!(MapOptions::new(), o);
    }

    #[test]
    fn chained_setters() {
        let red = RGBA8::new(255, 0, 0, 255);
        let o = MapOptions::new().fallback(red)
            .mode(ProcessingMode::ParallelWith(2))
            .parallel_threshold(10);
        assert_eq!(o.fallback, red);
        assert_eq!(o.mode, ProcessingMode::ParallelWith(2));
        assert!(!o.runs_parallel(9));
        assert_eq!(o.runs_parallel(10), cfg!(feature = "parallel"));
        assert!(!MapOptions::sequential(red).runs_parallel(1 << 20));
    }

    #[test]
    fn zero_threshold_skips_empty() {
        let o = MapOptions::new().parallel_threshold(0);
        assert!(!o.runs_parallel(0));
    }
}
