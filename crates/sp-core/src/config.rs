//! Playground-wide configuration.

use crate::SimTime;

/// Settings fixed when a playground is created.
///
/// ```
/// use sp_core::PlaygroundConfig;
///
/// let config = PlaygroundConfig { dimension: 3, ..Default::default() };
/// assert_eq!(config.max_simulation_time.as_f64(), 10_000.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaygroundConfig {
    /// Dimension of every position in the playground (2 or 3).
    pub dimension: usize,

    /// `run()` never advances the clock past this time.  Guards against
    /// repeating events that would otherwise run forever.
    pub max_simulation_time: SimTime,

    /// The event queue is rebuilt once cancelled entries exceed this fraction
    /// of its length.
    pub compaction_threshold: f64,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            dimension:            2,
            max_simulation_time:  SimTime(10_000.0),
            compaction_threshold: 0.5,
        }
    }
}
