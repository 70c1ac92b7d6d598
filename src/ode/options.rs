#[cfg(feature = "serde0")]
use serde::{Deserialize, Serialize};

use derive_builder::Builder;
use std::fmt;

/// Absolute slack added to `t_end` so that a grid point landing on the right
/// endpoint up to rounding is still recorded.
pub const ENDPOINT_TOLERANCE: f64 = 1e-10;

/// Upper bound on the number of recorded samples of a single solve.
pub const MAX_SAMPLES: usize = 10_000_000;

/// What to do once a sample stops being finite.
#[cfg_attr(feature = "serde0", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonFinitePolicy {
    /// keep stepping and record NaN/inf as they come
    #[default]
    Propagate,
    /// stop and report the first non-finite sample
    Abort,
}

impl fmt::Display for NonFinitePolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NonFinitePolicy::Propagate => f.write_str("propagate"),
            NonFinitePolicy::Abort => f.write_str("abort"),
        }
    }
}

#[cfg_attr(feature = "serde0", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(pattern = "owned", default)]
pub struct SolveOptions {
    /// inclusive slack on the right endpoint
    pub endpoint_tolerance: f64,
    pub non_finite: NonFinitePolicy,
    /// grids with more samples than this are rejected before stepping
    pub max_samples: usize,
}

impl SolveOptions {
    /// convenience method to create a new builder
    /// same as `SolveOptionsBuilder::default()`
    pub fn builder() -> SolveOptionsBuilder {
        SolveOptionsBuilder::default()
    }
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            endpoint_tolerance: ENDPOINT_TOLERANCE,
            non_finite: NonFinitePolicy::Propagate,
            max_samples: MAX_SAMPLES,
        }
    }
}
