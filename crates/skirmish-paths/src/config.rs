/// Tuning knobs for a [`PathFinder`](crate::PathFinder).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FinderConfig {
    /// Run the simplifier on every path `find` returns.
    pub simplify: bool,
    /// Searches slower than this many seconds are logged as warnings by the
    /// timed pathfinder.
    pub slow_search_secs: Option<f32>,
}

impl FinderConfig {
    /// Enable or disable path simplification (builder).
    pub const fn with_simplify(mut self, simplify: bool) -> Self {
        self.simplify = simplify;
        self
    }

    /// Set the slow-search warning threshold in seconds (builder).
    pub const fn with_slow_search_secs(mut self, secs: f32) -> Self {
        self.slow_search_secs = Some(secs);
        self
    }
}
