use crate::constraints::encode_hard;
use crate::data::{Roster, ScheduleOutput, SolveRequest, SolveStatus};
use crate::error::SolverError;
use crate::extract::extract;
use crate::objective::compose;
use crate::variables::VarGrid;
use good_lp::{ProblemVariables, ResolutionError, SolverModel, default_solver};
use log::{info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Knobs for a single solve run.
///
/// A single thread with a fixed seed keeps runs reproducible; more threads
/// speed up the search without changing which objective value is optimal.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Wall-clock budget for the search. A run cut off by the budget reports
    /// `FEASIBLE` for whatever incumbent it found instead of `OPTIMAL`.
    pub time_limit_secs: Option<f64>,
    pub threads: u32,
    pub seed: i32,
    /// Cooperative cancellation flag, checked between pipeline stages. A
    /// cancelled run reports `UNKNOWN` and exposes no assignment.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            time_limit_secs: None,
            threads: 1,
            seed: 1234,
            cancel: None,
        }
    }
}

impl SolveOptions {
    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Runs the whole pipeline once: build the grid, encode the rules, minimise
/// the weighted penalties with the HiGHS ILP solver, and read the assignment
/// back out.
pub fn solve(roster: &Roster, options: &SolveOptions) -> Result<ScheduleOutput, SolverError> {
    let start_time = Instant::now();
    let config = &roster.config;

    // model setup
    info!(
        "Setting up ILP model with {} employees, {} days, and {} shift types...",
        roster.employees.len(),
        config.num_days,
        config.num_shift_types
    );
    let mut problem = ProblemVariables::new();
    let grid = VarGrid::build(
        &mut problem,
        roster.employees.len(),
        config.num_days,
        config.num_shift_types,
    )?;

    let hard = encode_hard(&mut problem, &grid, roster)?;
    let mut sheet = compose(&mut problem, &grid, roster);
    info!(
        "Encoded {} hard constraints and {} penalty terms.",
        hard.len(),
        sheet.term_count()
    );

    if options.is_cancelled() {
        info!("Solve cancelled before the search started.");
        return Ok(ScheduleOutput::empty(SolveStatus::Unknown));
    }

    let objective = sheet.objective();
    let mut model = problem
        .minimise(objective)
        .using(default_solver)
        .set_option("threads", options.threads as i32)
        .set_option("random_seed", options.seed)
        .set_option("log_to_console", "false");
    if let Some(limit) = options.time_limit_secs {
        model = model.set_option("time_limit", limit);
    }
    for link in hard.into_iter().chain(sheet.take_constraints()) {
        model.add_constraint(link);
    }

    // solve
    info!("Starting ILP solver...");
    match model.solve() {
        Ok(solution) => {
            let duration = start_time.elapsed();
            if options.is_cancelled() {
                info!("Solve cancelled; discarding the result.");
                return Ok(ScheduleOutput::empty(SolveStatus::Unknown));
            }
            let timed_out = options
                .time_limit_secs
                .is_some_and(|limit| duration.as_secs_f64() >= limit);
            let status = if timed_out {
                SolveStatus::Feasible
            } else {
                SolveStatus::Optimal
            };
            let objective_value = sheet.value(&solution).round() as i64;
            info!(
                "Solution found in {:.2?} with penalty {}.",
                duration, objective_value
            );
            let (schedule, summaries) = extract(&solution, &grid, roster);
            Ok(ScheduleOutput {
                status,
                objective: Some(objective_value),
                schedule,
                summaries,
            })
        }
        Err(ResolutionError::Infeasible) => {
            info!("Hard constraints admit no assignment.");
            Ok(ScheduleOutput::empty(SolveStatus::Infeasible))
        }
        Err(error) => {
            warn!("Solver finished without a usable outcome: {}", error);
            Ok(ScheduleOutput::empty(SolveStatus::Unknown))
        }
    }
}

/// Convenience entry point for the service: validate, solve, report.
pub fn solve_request(request: SolveRequest) -> Result<ScheduleOutput, SolverError> {
    let options = SolveOptions {
        time_limit_secs: request.time_limit_secs,
        ..SolveOptions::default()
    };
    let roster = Roster::new(request.employees, request.config)?;
    solve(&roster, &options)
}
