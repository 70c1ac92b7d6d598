use crate::ode::coeff::{CoefficientMap, CoefficientPoint};
use crate::ode::problem::Problem;
use crate::ode::types::State;
use na::{Matrix1, Matrix2, Matrix3, Matrix4, Matrix6, Matrix6x2, SMatrix, SVector};
use na::{Vector1, Vector2, Vector3, Vector4};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RKSymbol {
    Euler,
    EulerCauchy,
    Heun3,
    RK4,
    Fehlberg5,
}

impl RKSymbol {
    pub fn order(&self) -> RKOrder {
        match self {
            RKSymbol::Euler => RKOrder::Explicit(1),
            RKSymbol::EulerCauchy => RKOrder::Explicit(2),
            RKSymbol::Heun3 => RKOrder::Explicit(3),
            RKSymbol::RK4 => RKOrder::Explicit(4),
            RKSymbol::Fehlberg5 => RKOrder::Embedded((5, 4)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RKOrder {
    Explicit(usize),
    /// (stepping order, embedded order)
    Embedded((usize, usize)),
}

impl RKOrder {
    /// the order of the solution the step actually advances with
    pub fn stepping(&self) -> usize {
        match *self {
            RKOrder::Explicit(o) => o,
            RKOrder::Embedded((o, _)) => o,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Weights<const S: usize> {
    Explicit(SVector<f64, S>),
    /// column 0 is used for stepping,
    /// column 1 holds the embedded lower order weights
    Embedded(SMatrix<f64, S, 2>),
}

impl<const S: usize> Weights<S> {
    /// weight `b_s` of the stepping solution
    #[inline]
    pub fn stepping(&self, s: usize) -> f64 {
        match self {
            Weights::Explicit(b) => b[s],
            Weights::Embedded(b) => b[(s, 0)],
        }
    }

    /// weights of the embedded solution, if the tableau carries one
    pub fn embedded(&self) -> Option<SVector<f64, S>> {
        match self {
            Weights::Explicit(_) => None,
            Weights::Embedded(b) => Some(b.column(1).into_owned()),
        }
    }
}

/// Tableau of the form
///
/// ```text
///  c1  | a_11   ....   a_1s
///  .   | a_21 .          .
///  .   | a_31     .      .
///  .   | ....         .  .
///  c_s | a_s1  ....... a_ss
/// -----+--------------------
///      | b_1     ...   b_s   this is the one used for stepping
///      | b'_1    ...   b'_s  embedded weights, never used by the fixed step driver
/// ```
///
/// where `S` is the number of stages
#[derive(Debug, Clone)]
pub struct ButcherTableau<const S: usize> {
    /// identifier for the rk method
    pub symbol: RKSymbol,
    /// coefficients - rk matrix
    pub a: SMatrix<f64, S, S>,
    pub b: Weights<S>,
    /// nodes
    pub c: SVector<f64, S>,
}

impl<const S: usize> ButcherTableau<S> {
    #[inline]
    pub fn order(&self) -> RKOrder {
        self.symbol.order()
    }

    /// the number of stages `S`
    #[inline]
    pub fn nstages(&self) -> usize {
        S
    }

    /// A Runge–Kutta method is consistent if
    /// \sum _{j=1}^{i-1}a_{ij}=c_{i} for i=2,\ldots ,s
    /// and the stepping weights sum to one.
    pub fn is_consistent_rk(&self) -> bool {
        const TOL: f64 = 1e-12;
        for i in 0..S {
            let row: f64 = (0..i).map(|j| self.a[(i, j)]).sum();
            if (row - self.c[i]).abs() > TOL {
                return false;
            }
        }
        let weights: f64 = (0..S).map(|s| self.b.stepping(s)).sum();
        (weights - 1.).abs() <= TOL
    }

    #[inline]
    pub fn is_explicit(&self) -> bool {
        (0..S).all(|i| (i..S).all(|j| self.a[(i, j)] == 0.))
    }

    /// calculates all stage slopes `k` and their stage states for the state `v` at time `t`
    pub fn calc_coefficients(
        &self,
        problem: &Problem,
        t: f64,
        v: &State,
        dt: f64,
    ) -> CoefficientMap {
        let mut coeffs = CoefficientMap::with_capacity(S);
        coeffs.push(CoefficientPoint::new(problem.vector_field(t, v), *v));

        for s in 1..S {
            let tn = t + self.c[s] * dt;
            let mut vi = *v;
            for (j, k) in coeffs.ks().enumerate() {
                let a = self.a[(s, j)];
                if a != 0. {
                    vi += k * (a * dt);
                }
            }
            coeffs.push(CoefficientPoint::new(problem.vector_field(tn, &vi), vi));
        }
        coeffs
    }

    /// advances `v` from `t` to `t + dt`
    ///
    /// ```latex
    /// v_{n+1} = v_n + h \sum_{i=1}^{s} b_i k_i
    /// ```
    pub fn step(&self, problem: &Problem, t: f64, v: &State, dt: f64) -> State {
        let coeffs = self.calc_coefficients(problem, t, v, dt);
        let mut next = *v;
        for (s, k) in coeffs.ks().enumerate() {
            let b = self.b.stepping(s);
            if b != 0. {
                next += k * (b * dt);
            }
        }
        next
    }
}

impl<const S: usize> fmt::Display for ButcherTableau<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..S {
            write!(f, " {:.3} |", self.c[row])?;
            for col in 0..S {
                write!(f, " {:.3}", self.a[(row, col)])?;
            }
            writeln!(f)?;
        }
        write!(f, "-------+")?;
        write!(f, "{}", "------".repeat(S))?;
        match &self.b {
            Weights::Explicit(explicit) => {
                write!(f, "\n       |")?;
                for b in explicit.iter() {
                    write!(f, " {:.3}", b)?;
                }
            }
            Weights::Embedded(embedded) => {
                for col in 0..embedded.ncols() {
                    write!(f, "\n       |")?;
                    for row in 0..S {
                        write!(f, " {:.3}", embedded[(row, col)])?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl ButcherTableau<1> {
    /// constructs the Butcher Tableau for the (forward) Euler method
    /// ```text
    ///   0.000 | 0.000
    ///  -------+------
    ///         | 1.000
    /// ```
    pub fn euler() -> Self {
        Self {
            symbol: RKSymbol::Euler,
            a: Matrix1::new(0.),
            b: Weights::Explicit(Vector1::new(1.)),
            c: Vector1::new(0.),
        }
    }
}

impl ButcherTableau<2> {
    /// Euler-Cauchy predictor/corrector, also known as Heun's second order method
    ///
    /// ```text
    ///  0.000 | 0.000 0.000
    ///  1.000 | 1.000 0.000
    /// -------+------------
    ///        | 0.500 0.500
    /// ```
    pub fn euler_cauchy() -> Self {
        Self {
            symbol: RKSymbol::EulerCauchy,
            a: Matrix2::new(0., 0., 1., 0.),
            b: Weights::Explicit(Vector2::new(0.5, 0.5)),
            c: Vector2::new(0., 1.),
        }
    }
}

impl ButcherTableau<3> {
    /// Heun's third order method
    ///
    /// ```text
    ///  0.000 | 0.000 0.000 0.000
    ///  0.333 | 0.333 0.000 0.000
    ///  0.667 | 0.000 0.667 0.000
    /// -------+------------------
    ///        | 0.250 0.000 0.750
    /// ```
    pub fn heun3() -> Self {
        let a = Matrix3::new(
            0., 0., 0., //
            1. / 3., 0., 0., //
            0., 2. / 3., 0.,
        );
        Self {
            symbol: RKSymbol::Heun3,
            a,
            b: Weights::Explicit(Vector3::new(0.25, 0., 0.75)),
            c: Vector3::new(0., 1. / 3., 2. / 3.),
        }
    }
}

impl ButcherTableau<4> {
    /// constructs the Butcher Tableau for the classical Runge Kutta 4 method
    /// ```text
    ///  0.000 | 0.000 0.000 0.000 0.000
    ///  0.500 | 0.500 0.000 0.000 0.000
    ///  0.500 | 0.000 0.500 0.000 0.000
    ///  1.000 | 0.000 0.000 1.000 0.000
    /// -------+------------------------
    ///        | 0.167 0.333 0.333 0.167
    /// ```
    pub fn rk4() -> Self {
        let a = Matrix4::new(
            0., 0., 0., 0., //
            0.5, 0., 0., 0., //
            0., 0.5, 0., 0., //
            0., 0., 1., 0.,
        );
        Self {
            symbol: RKSymbol::RK4,
            a,
            b: Weights::Explicit(Vector4::new(1. / 6., 1. / 3., 1. / 3., 1. / 6.)),
            c: Vector4::new(0., 0.5, 0.5, 1.),
        }
    }
}

impl ButcherTableau<6> {
    /// Fehlberg https://en.wikipedia.org/wiki/Runge%E2%80%93Kutta%E2%80%93Fehlberg_method
    /// Steps with the 5th order solution, the 4th order weights are kept as the embedded column.
    ///
    /// ```text
    ///  0.000 | 0.000 0.000 0.000 0.000 0.000 0.000
    ///  0.250 | 0.250 0.000 0.000 0.000 0.000 0.000
    ///  0.375 | 0.094 0.281 0.000 0.000 0.000 0.000
    ///  0.923 | 0.879 -3.277 3.321 0.000 0.000 0.000
    ///  1.000 | 2.032 -8.000 7.173 -0.206 0.000 0.000
    ///  0.500 | -0.296 2.000 -1.382 0.453 -0.275 0.000
    /// -------+------------------------------------
    ///        | 0.119 0.000 0.519 0.506 -0.180 0.036
    ///        | 0.116 0.000 0.549 0.535 -0.200 0.000
    /// ```
    pub fn fehlberg5() -> Self {
        let a = Matrix6::new(
            0., 0., 0., 0., 0., 0., //
            0.25, 0., 0., 0., 0., 0., //
            3. / 32., 9. / 32., 0., 0., 0., 0., //
            1932. / 2197., -7200. / 2197., 7296. / 2197., 0., 0., 0., //
            439. / 216., -8., 3680. / 513., -845. / 4104., 0., 0., //
            -8. / 27., 2., -3544. / 2565., 1859. / 4104., -11. / 40., 0.,
        );
        let b = Weights::Embedded(Matrix6x2::new(
            16. / 135., 25. / 216., //
            0., 0., //
            6656. / 12825., 1408. / 2565., //
            28561. / 56430., 2197. / 4104., //
            -9. / 50., -0.2, //
            2. / 55., 0.,
        ));
        let c = SVector::<f64, 6>::from_column_slice(&[0., 0.25, 0.375, 12. / 13., 1., 0.5]);

        Self {
            symbol: RKSymbol::Fehlberg5,
            a,
            b,
            c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ode::problem::register_problems;
    use approx::assert_abs_diff_eq;

    #[test]
    fn is_consistent() {
        assert!(ButcherTableau::euler().is_consistent_rk());
        assert!(ButcherTableau::euler_cauchy().is_consistent_rk());
        assert!(ButcherTableau::heun3().is_consistent_rk());
        assert!(ButcherTableau::rk4().is_consistent_rk());
        assert!(ButcherTableau::fehlberg5().is_consistent_rk());
    }

    #[test]
    fn is_explicit() {
        assert!(ButcherTableau::rk4().is_explicit());
        assert!(ButcherTableau::fehlberg5().is_explicit());
    }

    #[test]
    fn fehlberg_embedded_weights() {
        let btab = ButcherTableau::fehlberg5();
        let embedded = btab.b.embedded().unwrap();
        assert_abs_diff_eq!(embedded.sum(), 1., epsilon = 1e-12);
        assert_abs_diff_eq!(btab.b.stepping(5), 2. / 55.);
        assert!(ButcherTableau::rk4().b.embedded().is_none());
        assert_eq!(btab.order().stepping(), 5);
    }

    #[test]
    fn euler_step_matches_formula() {
        let problem = &register_problems()[0];
        let v = State::new(1., 2., 3.);
        let h = 0.1;
        let next = ButcherTableau::euler().step(problem, 0.5, &v, h);
        let f = problem.rhs(0.5, 1., 2., 3.);
        assert_eq!(next, State::new(1. + h * 2., 2. + h * 3., 3. + h * f));
    }

    #[test]
    fn euler_cauchy_step_matches_predictor_corrector() {
        let problem = &register_problems()[1];
        let (t, h) = (5., 0.1);
        let v = State::new(2., 5., 6.);
        let next = ButcherTableau::euler_cauchy().step(problem, t, &v, h);

        let k1 = problem.vector_field(t, &v);
        let pred = v + k1 * h;
        let k2 = problem.vector_field(t + h, &pred);
        let expected = v + (k1 + k2) * (h / 2.);
        for d in 0..3 {
            assert_abs_diff_eq!(next[d], expected[d], epsilon = 1e-14);
        }
    }

    #[test]
    fn display_rk4() {
        let table = ButcherTableau::rk4().to_string();
        assert!(table.starts_with(" 0.000 | 0.000 0.000 0.000 0.000"));
        assert!(table.ends_with("| 0.167 0.333 0.333 0.167"));
    }
}
