//! Tabulation of trajectories for on-screen display and text export.
//!
//! Both renderings share one column set: `t, y, y', y''` followed, when the
//! producing problem has an exact solution, by the absolute errors of the
//! three components at the same grid point.

use crate::ode::solution::Trajectory;
use crate::ode::types::{Sample, State};
use std::fmt;
use std::io::{self, Write};

pub const HEADER: [&str; 7] = [
    "t",
    "y(t)",
    "y'(t)",
    "y''(t)",
    "Ошибка y",
    "Ошибка y'",
    "Ошибка y''",
];

const WIDTHS: [usize; 7] = [8, 12, 12, 12, 12, 12, 12];

/// Number of decimals per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Screen,
    Export,
}

impl Precision {
    fn digits(&self) -> [usize; 7] {
        match self {
            Precision::Screen => [3, 8, 6, 6, 8, 6, 6],
            Precision::Export => [3, 6, 6, 6, 6, 6, 6],
        }
    }
}

/// One tabulated grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    pub sample: Sample,
    /// `(|y - ŷ|, |y' - ŷ'|, |y'' - ŷ''|)`
    pub error: Option<State>,
}

impl Row {
    pub fn values(&self) -> Vec<f64> {
        let s = &self.sample;
        let mut values = vec![s.t, s.y, s.dy, s.d2y];
        if let Some(e) = &self.error {
            values.extend(e.iter());
        }
        values
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    trajectory: &'a Trajectory,
}

impl<'a> Table<'a> {
    pub fn new(trajectory: &'a Trajectory) -> Self {
        Self { trajectory }
    }

    /// whether the error columns are present
    #[inline]
    pub fn has_errors(&self) -> bool {
        self.trajectory.problem().has_exact()
    }

    pub fn columns(&self) -> usize {
        if self.has_errors() {
            7
        } else {
            4
        }
    }

    pub fn header(&self) -> &'static [&'static str] {
        &HEADER[..self.columns()]
    }

    pub fn rows(&self) -> impl Iterator<Item = Row> + 'a {
        let trajectory: &'a Trajectory = self.trajectory;
        let problem = *trajectory.problem();
        trajectory.samples().iter().map(move |sample| Row {
            sample: *sample,
            error: problem
                .exact(sample.t)
                .map(|exact| (sample.state() - exact).abs()),
        })
    }

    /// the table laid out with `precision`, ready for `{}` formatting
    pub fn formatted(&self, precision: Precision) -> Formatted<'a> {
        Formatted {
            table: *self,
            precision,
        }
    }

    pub fn write_to<W: Write>(&self, writer: &mut W, precision: Precision) -> io::Result<()> {
        write!(writer, "{}", self.formatted(precision))
    }

    pub fn render(&self, precision: Precision) -> String {
        self.formatted(precision).to_string()
    }
}

/// A [`Table`] paired with the precision its cells are printed with.
#[derive(Debug, Clone, Copy)]
pub struct Formatted<'a> {
    table: Table<'a>,
    precision: Precision,
}

impl fmt::Display for Formatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let header: Vec<String> = self
            .table
            .header()
            .iter()
            .zip(WIDTHS.iter())
            .map(|(label, width)| format!("{:<1$}", label, *width))
            .collect();
        writeln!(f, "{}", header.join(" "))?;

        let digits = self.precision.digits();
        for row in self.table.rows() {
            let cells: Vec<String> = row
                .values()
                .iter()
                .zip(WIDTHS.iter().zip(digits.iter()))
                .map(|(value, (width, prec))| format!("{:<1$.2$}", value, *width, *prec))
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ode::problem::register_problems;
    use crate::ode::solver::{solve, SolveRequest};
    use crate::ode::types::InitialCondition;
    use crate::ode::Method;

    fn trajectory(problem: usize, ic: InitialCondition, t_end: f64) -> Trajectory {
        let req = SolveRequest::builder()
            .method(Method::Rk4)
            .initial(ic)
            .t_end(t_end)
            .h(0.1)
            .build()
            .unwrap();
        solve(&register_problems()[problem], &req).unwrap()
    }

    #[test]
    fn screen_table_with_errors() {
        let traj = trajectory(0, InitialCondition::new(0., 1., 0., 0.), 1.);
        let table = Table::new(&traj);
        assert!(table.has_errors());
        let text = table.render(Precision::Screen);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(
            lines[0].split_whitespace().collect::<Vec<_>>(),
            vec!["t", "y(t)", "y'(t)", "y''(t)", "Ошибка", "y", "Ошибка", "y'", "Ошибка", "y''"]
        );
        assert!(lines[1].starts_with("0.000    1.00000000   0.000000     0.000000     0.00000000   0.000000     0.000000"));
        assert_eq!(lines[5].split_whitespace().count(), 7);
    }

    #[test]
    fn export_table_without_errors() {
        let traj = trajectory(1, InitialCondition::new(5., 2., 5., 6.), 6.);
        let table = Table::new(&traj);
        assert!(!table.has_errors());
        assert_eq!(table.header(), &["t", "y(t)", "y'(t)", "y''(t)"]);
        let text = table.render(Precision::Export);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[1].starts_with("5.000    2.000000     5.000000     6.000000"));
        assert!(lines.iter().skip(1).all(|l| l.split_whitespace().count() == 4));
        assert!(table.rows().all(|row| row.error.is_none()));
    }

    #[test]
    fn writer_and_display_agree() {
        let traj = trajectory(0, InitialCondition::new(0., 1., 0., 0.), 0.3);
        let table = Table::new(&traj);
        for precision in [Precision::Screen, Precision::Export] {
            let mut buf = Vec::new();
            table.write_to(&mut buf, precision).unwrap();
            assert_eq!(String::from_utf8(buf).unwrap(), table.render(precision));
            assert_eq!(format!("{}", table.formatted(precision)), table.render(precision));
        }
    }

    #[test]
    fn row_errors_follow_exact_solution() {
        let traj = trajectory(0, InitialCondition::new(0., 1., 0., 0.), 0.5);
        let problem = &register_problems()[0];
        for row in Table::new(&traj).rows() {
            let exact = problem.exact(row.sample.t).unwrap();
            let err = row.error.unwrap();
            assert_eq!(err[0], (row.sample.y - exact[0]).abs());
            assert_eq!(err[2], (row.sample.d2y - exact[2]).abs());
        }
    }
}
