use crate::error::{Error, Result};
use crate::ode::options::{NonFinitePolicy, SolveOptions};
use crate::ode::problem::{register_problems, Problem};
use crate::ode::runge_kutta::ButcherTableau;
use crate::ode::solution::Trajectory;
use crate::ode::types::{InitialCondition, Sample};
use crate::ode::Method;
use derive_builder::Builder;
use log::{debug, warn};

/// Everything needed to integrate a problem over `[t0, t_end]` with step `h`.
#[derive(Debug, Clone, Builder)]
#[builder(pattern = "owned")]
pub struct SolveRequest {
    pub method: Method,
    #[builder(setter(into))]
    pub initial: InitialCondition,
    pub t_end: f64,
    pub h: f64,
    #[builder(default)]
    pub options: SolveOptions,
}

impl SolveRequest {
    /// convenience method to create a new builder
    /// same as `SolveRequestBuilder::default()`
    pub fn builder() -> SolveRequestBuilder {
        SolveRequestBuilder::default()
    }

    /// rejects parameters that can not describe a forward grid
    pub fn validate(&self) -> Result<()> {
        let ic = &self.initial;
        for (field, value) in [
            ("y0", ic.y0),
            ("dy0", ic.dy0),
            ("d2y0", ic.d2y0),
            ("t0", ic.t0),
            ("t_end", self.t_end),
            ("h", self.h),
        ] {
            if !value.is_finite() {
                return Err(Error::invalid(field, format!("{} is not a finite number", value)));
            }
        }
        if self.h <= 0. {
            return Err(Error::invalid("h", format!("step must be positive, got {}", self.h)));
        }
        if self.t_end < ic.t0 {
            return Err(Error::invalid(
                "t_end",
                format!("t_end ({}) lies before t0 ({})", self.t_end, ic.t0),
            ));
        }
        let scale = ic.t0.abs().max(self.t_end.abs());
        if self.h <= 4. * f64::EPSILON * scale {
            return Err(Error::invalid(
                "h",
                format!("step {} is below the float resolution near t = {}", self.h, scale),
            ));
        }
        let tol = self.options.endpoint_tolerance;
        if !(tol.is_finite() && tol >= 0.) {
            return Err(Error::invalid(
                "endpoint_tolerance",
                format!("{} is not a non-negative number", tol),
            ));
        }
        let expected = self.expected_len();
        if expected > self.options.max_samples as f64 {
            return Err(Error::invalid(
                "h",
                format!(
                    "grid would hold {:.0} samples, at most {} are allowed",
                    expected, self.options.max_samples
                ),
            ));
        }
        Ok(())
    }

    /// `⌊(t_end - t0) / h⌋ + 1`, up to the endpoint tolerance
    fn expected_len(&self) -> f64 {
        ((self.t_end - self.initial.t0 + self.options.endpoint_tolerance) / self.h).floor() + 1.
    }
}

impl From<SolveRequestBuilderError> for Error {
    fn from(err: SolveRequestBuilderError) -> Self {
        Error::uninitialized(err.to_string())
    }
}

/// Integrates `problem` as described by `request`.
///
/// Either the full trajectory is returned or an error, never a partial result.
pub fn solve(problem: &Problem, request: &SolveRequest) -> Result<Trajectory> {
    request.validate()?;
    debug!(
        "solving `{}` with {} on [{}, {}], h = {}",
        problem, request.method, request.initial.t0, request.t_end, request.h
    );

    let samples = match request.method {
        Method::Euler => march(&ButcherTableau::euler(), problem, request)?,
        Method::EulerCauchy => march(&ButcherTableau::euler_cauchy(), problem, request)?,
        Method::Rk3Heun => march(&ButcherTableau::heun3(), problem, request)?,
        Method::Rk4 => march(&ButcherTableau::rk4(), problem, request)?,
        Method::Fehlberg5 => march(&ButcherTableau::fehlberg5(), problem, request)?,
    };

    debug!("recorded {} samples", samples.len());
    Ok(Trajectory::new(*problem, request.method, samples))
}

/// Looks up a registered problem by index and integrates it.
pub fn solve_registered(problem_index: usize, request: &SolveRequest) -> Result<Trajectory> {
    solve(problem_by_index(problem_index)?, request)
}

pub(crate) fn problem_by_index(problem_index: usize) -> Result<&'static Problem> {
    let problems = register_problems();
    problems.get(problem_index).ok_or_else(|| {
        Error::invalid(
            "problem",
            format!(
                "no problem with index {}, {} are registered",
                problem_index,
                problems.len()
            ),
        )
    })
}

/// Walks the grid `t_i = t0 + i h` while `t_i <= t_end + tol`, recording each visited point.
///
/// Never records more than `expected_len() + 1` samples.
fn march<const S: usize>(
    btab: &ButcherTableau<S>,
    problem: &Problem,
    request: &SolveRequest,
) -> Result<Vec<Sample>> {
    let ic = &request.initial;
    let h = request.h;
    let limit = request.t_end + request.options.endpoint_tolerance;

    let n = request.expected_len() as usize;
    let mut samples = Vec::with_capacity(n);
    samples.push(ic.sample());

    let mut v = ic.state();
    let mut reported = false;
    for i in 1..=n {
        let t_prev = samples[i - 1].t;
        let t = ic.t0 + i as f64 * h;
        if t > limit {
            break;
        }
        v = btab.step(problem, t_prev, &v, h);
        let sample = Sample::new(t, &v);

        if !reported && !sample.is_finite() {
            match request.options.non_finite {
                NonFinitePolicy::Abort => return Err(Error::NonFinite { index: i, t }),
                NonFinitePolicy::Propagate => {
                    warn!("state became non-finite at t = {} (sample {})", t, i);
                    reported = true;
                }
            }
        }
        samples.push(sample);
    }
    Ok(samples)
}
