#[cfg(feature = "serde0")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use std::fmt;

pub mod coeff;
pub mod options;
pub mod problem;
pub mod runge_kutta;
pub mod solution;
pub mod solver;
pub mod types;

/// The available fixed step solvers.
#[cfg_attr(feature = "serde0", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Euler,
    EulerCauchy,
    Rk3Heun,
    Rk4,
    Fehlberg5,
}

impl Method {
    /// all methods, in the order a user interface lists them
    pub const ALL: [Method; 5] = [
        Method::Euler,
        Method::EulerCauchy,
        Method::Rk3Heun,
        Method::Rk4,
        Method::Fehlberg5,
    ];

    /// global order of accuracy `p`
    pub fn order(&self) -> usize {
        match self {
            Method::Euler => 1,
            Method::EulerCauchy => 2,
            Method::Rk3Heun => 3,
            Method::Rk4 => 4,
            Method::Fehlberg5 => 5,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Method::Euler => "euler",
            Method::EulerCauchy => "euler-cauchy",
            Method::Rk3Heun => "rk3-heun",
            Method::Rk4 => "rk4",
            Method::Fehlberg5 => "fehlberg5",
        }
    }

    /// display label of the desktop front end
    pub fn label(&self) -> &'static str {
        match self {
            Method::Euler => "Эйлер",
            Method::EulerCauchy => "Эйлер-Коши (РК2)",
            Method::Rk3Heun => "Рунге-Кутта 3 (Гейне)",
            Method::Rk4 => "Рунге-Кутта 4",
            Method::Fehlberg5 => "Фельдберг 5(4)",
        }
    }

    /// number of right hand side evaluations per step
    pub fn stages(&self) -> usize {
        match self {
            Method::Euler => 1,
            Method::EulerCauchy => 2,
            Method::Rk3Heun => 3,
            Method::Rk4 => 4,
            Method::Fehlberg5 => 6,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Method::ALL
            .iter()
            .find(|m| m.id().eq_ignore_ascii_case(s) || m.label() == s)
            .copied()
            .ok_or_else(|| Error::invalid("method", format!("{} is not a valid method identifier", s)))
    }
}
