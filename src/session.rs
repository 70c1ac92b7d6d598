//! The narrow contract a front end (window, chart, export dialog) talks to.

use crate::error::{Error, Result};
use crate::ode::options::SolveOptions;
use crate::ode::problem::{register_problems, Problem};
use crate::ode::solution::Trajectory;
use crate::ode::solver::{self, problem_by_index, SolveRequest};
use crate::ode::types::{InitialCondition, State};
use crate::ode::Method;
use crate::table::{Precision, Table};
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const DEFAULT_T_END: f64 = 1.;
pub const DEFAULT_STEP: f64 = 0.1;

/// Integrates the registered problem `problem_index` from `(t0, y0, y0', y0'')` to `t_end`.
#[allow(clippy::too_many_arguments)]
pub fn solve(
    problem_index: usize,
    method: Method,
    y0: f64,
    dy0: f64,
    d2y0: f64,
    t0: f64,
    t_end: f64,
    h: f64,
) -> Result<Trajectory> {
    let request = SolveRequest::builder()
        .method(method)
        .initial(InitialCondition::new(t0, y0, dy0, d2y0))
        .t_end(t_end)
        .h(h)
        .build()?;
    solver::solve_registered(problem_index, &request)
}

/// `(y, y', y'')(t)` of a registered problem, `None` if it has no exact solution.
pub fn exact_at(problem_index: usize, t: f64) -> Result<Option<State>> {
    Ok(problem_by_index(problem_index)?.exact(t))
}

/// Values a front end pre-fills when a problem is selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Defaults {
    pub initial: InitialCondition,
    pub t_end: f64,
    pub h: f64,
    /// the initial state belongs to the exact solution and must not be edited
    pub locked: bool,
}

impl Defaults {
    pub fn for_problem(problem_index: usize) -> Result<Self> {
        match problem_index {
            0 => Ok(Self {
                initial: InitialCondition::new(0., 1., 0., 0.),
                t_end: DEFAULT_T_END,
                h: DEFAULT_STEP,
                locked: true,
            }),
            1 => Ok(Self {
                initial: InitialCondition::new(5., 2., 5., 6.),
                t_end: 6.,
                h: DEFAULT_STEP,
                locked: false,
            }),
            _ => {
                let problem = problem_by_index(problem_index)?;
                Err(Error::invalid(
                    "problem",
                    format!("no defaults for `{}`", problem),
                ))
            }
        }
    }
}

/// The raw text of the six numeric input fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFields {
    pub y0: String,
    pub dy0: String,
    pub d2y0: String,
    pub t0: String,
    pub t_end: String,
    pub h: String,
}

impl InputFields {
    pub fn parse(&self) -> Result<(InitialCondition, f64, f64)> {
        fn real(field: &'static str, text: &str) -> Result<f64> {
            text.trim()
                .parse::<f64>()
                .map_err(|err| Error::invalid(field, format!("`{}`: {}", text, err)))
        }

        let initial = InitialCondition::new(
            real("t0", &self.t0)?,
            real("y0", &self.y0)?,
            real("dy0", &self.dy0)?,
            real("d2y0", &self.d2y0)?,
        );
        Ok((initial, real("t_end", &self.t_end)?, real("h", &self.h)?))
    }
}

impl From<&Defaults> for InputFields {
    fn from(defaults: &Defaults) -> Self {
        let ic = &defaults.initial;
        Self {
            y0: format!("{:?}", ic.y0),
            dy0: format!("{:?}", ic.dy0),
            d2y0: format!("{:?}", ic.d2y0),
            t0: format!("{:?}", ic.t0),
            t_end: format!("{:?}", defaults.t_end),
            h: format!("{:?}", defaults.h),
        }
    }
}

/// A named line for the chart collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: &'static str,
    pub points: Vec<(f64, f64)>,
}

/// Holds the most recent successful solve for display and export.
#[derive(Debug, Default)]
pub struct Session {
    options: SolveOptions,
    last: Option<Trajectory>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SolveOptions) -> Self {
        Self {
            options,
            last: None,
        }
    }

    pub fn problems(&self) -> &'static [Problem] {
        register_problems()
    }

    /// Solves and keeps the result. On failure the previous result is left in place.
    pub fn solve(
        &mut self,
        problem_index: usize,
        method: Method,
        initial: InitialCondition,
        t_end: f64,
        h: f64,
    ) -> Result<&Trajectory> {
        let request = SolveRequest {
            method,
            initial,
            t_end,
            h,
            options: self.options.clone(),
        };
        let trajectory = solver::solve_registered(problem_index, &request)?;
        let last: &Trajectory = self.last.insert(trajectory);
        Ok(last)
    }

    pub fn solve_fields(
        &mut self,
        problem_index: usize,
        method: Method,
        fields: &InputFields,
    ) -> Result<&Trajectory> {
        let (initial, t_end, h) = fields.parse()?;
        self.solve(problem_index, method, initial, t_end, h)
    }

    #[inline]
    pub fn last(&self) -> Option<&Trajectory> {
        self.last.as_ref()
    }

    pub fn screen_table(&self) -> Option<String> {
        self.last
            .as_ref()
            .map(|traj| Table::new(traj).render(Precision::Screen))
    }

    /// numeric `y, y', y''` and, if available, the exact ones at the same grid points
    pub fn chart_series(&self) -> Vec<Series> {
        let traj = match &self.last {
            Some(traj) => traj,
            None => return Vec::new(),
        };
        let mut series: Vec<Series> = ["y(t)", "y'(t)", "y''(t)"]
            .iter()
            .enumerate()
            .map(|(d, label)| Series {
                label: *label,
                points: traj.samples().iter().map(|s| (s.t, s.state()[d])).collect(),
            })
            .collect();

        let problem = traj.problem();
        if problem.has_exact() {
            for (d, label) in ["Точное y(t)", "Точное y'(t)", "Точное y''(t)"]
                .iter()
                .enumerate()
            {
                let points = traj
                    .times()
                    .filter_map(|t| problem.exact(t).map(|exact| (t, exact[d])))
                    .collect();
                series.push(Series {
                    label: *label,
                    points,
                });
            }
        }
        series
    }

    /// Writes the export table of the most recent solve to `path`.
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let traj = self.last.as_ref().ok_or(Error::NoData)?;
        let path = path.as_ref();
        debug!("exporting {} samples to {}", traj.len(), path.display());

        let mut writer = BufWriter::new(File::create(path)?);
        Table::new(traj).write_to(&mut writer, Precision::Export)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_per_problem() {
        let d0 = Defaults::for_problem(0).unwrap();
        assert!(d0.locked);
        assert_eq!(d0.initial, InitialCondition::new(0., 1., 0., 0.));
        assert_eq!((d0.t_end, d0.h), (1., 0.1));

        let d1 = Defaults::for_problem(1).unwrap();
        assert!(!d1.locked);
        assert_eq!(d1.initial, InitialCondition::new(5., 2., 5., 6.));
        assert_eq!(d1.t_end, 6.);

        assert!(Defaults::for_problem(7).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn defaults_cover_every_registered_problem() {
        for (i, problem) in register_problems().iter().enumerate() {
            let defaults = Defaults::for_problem(i).unwrap();
            assert_eq!(defaults.locked, problem.has_exact(), "{}", problem);
        }
        let past_end = register_problems().len();
        match Defaults::for_problem(past_end) {
            Err(Error::InvalidArgument { field, .. }) => assert_eq!(field, "problem"),
            other => panic!("expected invalid argument, got {:?}", other),
        }
    }

    #[test]
    fn fields_round_trip_defaults() {
        let d1 = Defaults::for_problem(1).unwrap();
        let fields = InputFields::from(&d1);
        assert_eq!(fields.y0, "2.0");
        assert_eq!(fields.parse().unwrap(), (d1.initial, 6., 0.1));
    }

    #[test]
    fn unparsable_field() {
        let mut fields = InputFields::from(&Defaults::for_problem(0).unwrap());
        fields.h = "0,1".to_string();
        match fields.parse() {
            Err(Error::InvalidArgument { field, .. }) => assert_eq!(field, "h"),
            other => panic!("expected invalid argument, got {:?}", other),
        }
    }

    #[test]
    fn failed_solve_keeps_previous() {
        let mut session = Session::new();
        let fields = InputFields::from(&Defaults::for_problem(0).unwrap());
        session.solve_fields(0, Method::Rk4, &fields).unwrap();
        assert_eq!(session.last().unwrap().len(), 11);

        let mut bad = fields.clone();
        bad.h = "-0.1".to_string();
        assert!(session.solve_fields(0, Method::Euler, &bad).is_err());
        assert_eq!(session.last().unwrap().method(), Method::Rk4);
    }

    #[test]
    fn chart_series_with_exact() {
        let mut session = Session::new();
        assert!(session.chart_series().is_empty());
        session
            .solve(0, Method::Rk4, InitialCondition::new(0., 1., 0., 0.), 1., 0.1)
            .unwrap();
        let series = session.chart_series();
        assert_eq!(series.len(), 6);
        assert_eq!(series[3].label, "Точное y(t)");
        assert!(series.iter().all(|s| s.points.len() == 11));
        let (t, y) = series[0].points[10];
        assert_relative_eq!(y, series[3].points[10].1, epsilon = 1e-5);
        assert_eq!(t, series[3].points[10].0);

        session
            .solve(1, Method::Rk4, InitialCondition::new(5., 2., 5., 6.), 6., 0.1)
            .unwrap();
        assert_eq!(session.chart_series().len(), 3);
    }

    #[test]
    fn exact_lookup() {
        assert_eq!(exact_at(0, 0.).unwrap(), Some(State::new(1., 0., 0.)));
        assert_eq!(exact_at(1, 0.).unwrap(), None);
        assert!(exact_at(5, 0.).is_err());
    }

    #[test]
    fn export_without_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        assert!(matches!(Session::new().export(&path), Err(Error::NoData)));
        assert!(!path.exists());
    }

    #[test]
    fn export_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new();
        session
            .solve(0, Method::Euler, InitialCondition::new(0., 1., 0., 0.), 1., 0.1)
            .unwrap();
        let err = session.export(dir.path().join("missing").join("out.txt")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
