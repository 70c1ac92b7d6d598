use crate::ode::problem::Problem;
use crate::ode::types::{Sample, State};
use crate::ode::Method;
use std::fmt;

/// The samples of a single solve, together with the problem and method that produced them.
///
/// Samples are ordered by strictly increasing `t`; the first one is the initial condition.
#[derive(Debug, Clone)]
pub struct Trajectory {
    problem: Problem,
    method: Method,
    samples: Vec<Sample>,
}

impl Trajectory {
    pub(crate) fn new(problem: Problem, method: Method, samples: Vec<Sample>) -> Self {
        Self {
            problem,
            method,
            samples,
        }
    }

    #[inline]
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    #[inline]
    pub fn method(&self) -> Method {
        self.method
    }

    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// the grid points
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.t)
    }

    /// pointwise `(|y - ŷ|, |y' - ŷ'|, |y'' - ŷ''|)` against the problem's exact solution,
    /// `None` if the problem has none
    pub fn errors(&self) -> Option<Vec<State>> {
        if !self.problem.has_exact() {
            return None;
        }
        self.samples
            .iter()
            .map(|s| self.problem.exact(s.t).map(|exact| (s.state() - exact).abs()))
            .collect()
    }

    /// the largest absolute error of each component over the whole grid
    pub fn max_errors(&self) -> Option<State> {
        self.errors()
            .map(|errors| errors.iter().fold(State::zeros(), |acc, e| acc.sup(e)))
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl fmt::Display for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}] (", self.problem, self.method)?;

        fn slice_print<T: fmt::Debug>(f: &mut fmt::Formatter, items: &[T]) -> fmt::Result {
            write!(f, "[")?;
            let mut i = 0;
            while i < items.len() {
                if i == items.len() - 1 {
                    write!(f, "{:?}", items[i])?;
                } else {
                    write!(f, "{:?}, ", items[i])?;
                }
                if i > 8 && i + 10 < items.len() {
                    write!(f, "... ")?;
                    i = items.len() - 11;
                }
                i += 1;
            }
            write!(f, "]")
        }

        let tout: Vec<f64> = self.times().collect();
        slice_print(f, &tout)?;
        write!(f, ", Vec{{{}}}", self.samples.len())?;
        let yout: Vec<[f64; 3]> = self.samples.iter().map(|s| [s.y, s.dy, s.d2y]).collect();
        slice_print(f, &yout)?;

        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ode::problem::register_problems;

    fn exact_samples(n: usize) -> Vec<Sample> {
        let problem = &register_problems()[0];
        (0..n)
            .map(|i| {
                let t = i as f64 * 0.1;
                Sample::new(t, &problem.exact(t).unwrap())
            })
            .collect()
    }

    #[test]
    fn errors_vanish_on_exact_samples() {
        let traj = Trajectory::new(register_problems()[0], Method::Rk4, exact_samples(5));
        let errors = traj.errors().unwrap();
        assert_eq!(errors.len(), 5);
        assert!(errors.iter().all(|e| *e == State::zeros()));
        assert_eq!(traj.max_errors().unwrap(), State::zeros());
    }

    #[test]
    fn no_errors_without_exact() {
        let traj = Trajectory::new(register_problems()[1], Method::Euler, exact_samples(3));
        assert!(traj.errors().is_none());
        assert!(traj.max_errors().is_none());
    }

    #[test]
    fn display_elides_long_trajectories() {
        let traj = Trajectory::new(register_problems()[0], Method::Rk4, exact_samples(40));
        let s = traj.to_string();
        assert!(s.starts_with("y''' + y'' + y' + y = 0 [rk4] ([0.0, 0.1,"));
        assert!(s.contains("... "));
        assert!(s.contains("Vec{40}"));
    }
}
