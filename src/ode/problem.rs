use crate::ode::types::State;
use std::fmt;

/// the right hand side `f(t, y, y', y'')` of `y''' = f(t, y, y', y'')`
pub type Rhs = fn(f64, f64, f64, f64) -> f64;

/// closed form `(y, y', y'')(t)`
pub type ExactSolution = fn(f64) -> State;

/// A third order scalar ODE together with its optional closed form reference solution.
#[derive(Clone, Copy)]
pub struct Problem {
    name: &'static str,
    rhs: Rhs,
    exact: Option<ExactSolution>,
}

impl Problem {
    pub const fn new(name: &'static str, rhs: Rhs) -> Self {
        Self {
            name,
            rhs,
            exact: None,
        }
    }

    pub const fn with_exact(mut self, exact: ExactSolution) -> Self {
        self.exact = Some(exact);
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn has_exact(&self) -> bool {
        self.exact.is_some()
    }

    #[inline]
    pub fn rhs(&self, t: f64, y: f64, dy: f64, d2y: f64) -> f64 {
        (self.rhs)(t, y, dy, d2y)
    }

    /// `None` when the problem has no registered reference solution
    #[inline]
    pub fn exact(&self, t: f64) -> Option<State> {
        self.exact.map(|exact| exact(t))
    }

    /// `F(t, (y, y', y'')) = (y', y'', f(t, y, y', y''))`
    #[inline]
    pub fn vector_field(&self, t: f64, v: &State) -> State {
        State::new(v[1], v[2], self.rhs(t, v[0], v[1], v[2]))
    }
}

impl fmt::Debug for Problem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Problem")
            .field("name", &self.name)
            .field("has_exact", &self.has_exact())
            .finish()
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn homogeneous(_t: f64, y: f64, dy: f64, d2y: f64) -> f64 {
    -d2y - dy - y
}

/// solution of the homogeneous problem for `(y, y', y'')(0) = (1, 0, 0)`
fn homogeneous_exact(t: f64) -> State {
    let (e, cos, sin) = ((-t).exp(), t.cos(), t.sin());
    State::new(
        0.5 * e + 0.5 * cos + 0.5 * sin,
        -0.5 * e - 0.5 * sin + 0.5 * cos,
        0.5 * e - 0.5 * cos - 0.5 * sin,
    )
}

fn sine_forced(t: f64, y: f64, dy: f64, d2y: f64) -> f64 {
    t.sin() - y - dy - d2y
}

static PROBLEMS: [Problem; 2] = [
    Problem::new("y''' + y'' + y' + y = 0", homogeneous).with_exact(homogeneous_exact),
    Problem::new("y''' + y'' + y' + y = sin(t)", sine_forced),
];

/// The built in problems, in registration order.
pub fn register_problems() -> &'static [Problem] {
    &PROBLEMS
}
