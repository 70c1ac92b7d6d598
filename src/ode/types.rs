#[cfg(feature = "serde0")]
use serde::{Deserialize, Serialize};

use na::Vector3;

/// `(y, y', y'')`, the dependent variable of the equivalent first order system
pub type State = Vector3<f64>;

/// A single grid point of a trajectory.
#[cfg_attr(feature = "serde0", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub t: f64,
    pub y: f64,
    pub dy: f64,
    pub d2y: f64,
}

impl Sample {
    #[inline]
    pub fn new(t: f64, state: &State) -> Self {
        Self {
            t,
            y: state[0],
            dy: state[1],
            d2y: state[2],
        }
    }

    #[inline]
    pub fn state(&self) -> State {
        State::new(self.y, self.dy, self.d2y)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.t.is_finite() && self.y.is_finite() && self.dy.is_finite() && self.d2y.is_finite()
    }
}

/// `(t0, y0, y'0, y''0)`
#[cfg_attr(feature = "serde0", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialCondition {
    pub t0: f64,
    pub y0: f64,
    pub dy0: f64,
    pub d2y0: f64,
}

impl InitialCondition {
    pub const fn new(t0: f64, y0: f64, dy0: f64, d2y0: f64) -> Self {
        Self { t0, y0, dy0, d2y0 }
    }

    #[inline]
    pub fn state(&self) -> State {
        State::new(self.y0, self.dy0, self.d2y0)
    }

    /// the sample recorded at the first grid point
    #[inline]
    pub fn sample(&self) -> Sample {
        Sample {
            t: self.t0,
            y: self.y0,
            dy: self.dy0,
            d2y: self.d2y0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_from_state() {
        let s = Sample::new(0.5, &State::new(1., 2., 3.));
        assert_eq!(s.state(), State::new(1., 2., 3.));
        assert!(s.is_finite());
        assert!(!Sample::new(0., &State::new(f64::NAN, 0., 0.)).is_finite());
    }

    #[test]
    fn initial_sample_is_verbatim() {
        let ic = InitialCondition::new(5., 2., 5., 6.);
        assert_eq!(
            ic.sample(),
            Sample {
                t: 5.,
                y: 2.,
                dy: 5.,
                d2y: 6.
            }
        );
    }
}
