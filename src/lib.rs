//! Fixed step explicit Runge-Kutta integration of third order scalar ODEs
//! `y''' = f(t, y, y', y'')`.
//!
//! The equation is carried as the first order system over `(y, y', y'')`
//! and stepped with one of the tableaus in [`ode::runge_kutta`].
//! [`session::Session`] keeps the latest result for tabulation and export.

extern crate nalgebra as na;

pub mod error;
pub mod ode;
pub mod session;
pub mod table;

pub use crate::error::{Error, Result};
pub use crate::ode::problem::{register_problems, Problem};
pub use crate::ode::solution::Trajectory;
pub use crate::ode::types::{InitialCondition, Sample, State};
pub use crate::ode::Method;
pub use crate::session::{exact_at, solve, Session};
