use clap::Parser;
use log::{error, info, warn};
use ode3::ode::options::{NonFinitePolicy, SolveOptions};
use ode3::session::Defaults;
use ode3::{register_problems, InitialCondition, Method, Session};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

/// Solve a third order ODE with a fixed step Runge-Kutta method.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// index of the registered problem
    #[arg(short, long, default_value_t = 0)]
    problem: usize,

    #[arg(short, long, default_value = "rk4")]
    method: Method,

    #[arg(long, allow_hyphen_values = true)]
    y0: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    dy0: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    d2y0: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    t0: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    t_end: Option<f64>,

    /// step size
    #[arg(long, allow_hyphen_values = true)]
    h: Option<f64>,

    /// write the export table to this file
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// fail on the first non-finite sample instead of carrying it along
    #[arg(long)]
    abort_on_non_finite: bool,

    /// list problems and methods, then exit
    #[arg(long)]
    list: bool,
}

fn list() {
    println!("problems:");
    for (i, problem) in register_problems().iter().enumerate() {
        let exact = if problem.has_exact() { " (exact)" } else { "" };
        println!("  {}: {}{}", i, problem, exact);
    }
    println!("methods:");
    for method in Method::ALL.iter() {
        println!("  {:<14} order {}, {}", method.id(), method.order(), method.label());
    }
}

fn run(args: Args) -> ode3::Result<()> {
    let defaults = Defaults::for_problem(args.problem)?;
    let ic = defaults.initial;
    let overridden = args.y0.is_some() || args.dy0.is_some() || args.d2y0.is_some();
    let initial = if defaults.locked {
        if overridden {
            warn!(
                "initial state of problem {} is fixed by its exact solution, ignoring overrides",
                args.problem
            );
        }
        InitialCondition::new(args.t0.unwrap_or(ic.t0), ic.y0, ic.dy0, ic.d2y0)
    } else {
        InitialCondition::new(
            args.t0.unwrap_or(ic.t0),
            args.y0.unwrap_or(ic.y0),
            args.dy0.unwrap_or(ic.dy0),
            args.d2y0.unwrap_or(ic.d2y0),
        )
    };

    let non_finite = if args.abort_on_non_finite {
        NonFinitePolicy::Abort
    } else {
        NonFinitePolicy::Propagate
    };
    let options = SolveOptions {
        non_finite,
        ..SolveOptions::default()
    };

    let mut session = Session::with_options(options);
    session.solve(
        args.problem,
        args.method,
        initial,
        args.t_end.unwrap_or(defaults.t_end),
        args.h.unwrap_or(defaults.h),
    )?;

    if let Some(table) = session.screen_table() {
        print!("{}", table);
    }
    if let Some(path) = &args.export {
        session.export(path)?;
        info!("exported to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let args = Args::parse();
    if args.list {
        list();
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
