//! Weekly shift roster solver.
//!
//! Assigns employees to a grid of weekly shifts (days x shift types, a fixed
//! demand per slot) with the HiGHS ILP solver: hard eligibility rules carve
//! out the feasible region, weighted soft penalties pick the best assignment
//! inside it. Input records come from external per-week config loaders and
//! constraint extractors; the output matrix and per-employee counts go back
//! out to external report renderers.

pub mod constraints;
pub mod data;
pub mod error;
pub mod extract;
pub mod objective;
pub mod server;
pub mod solver;
pub mod variables;

pub use data::{
    Employee, EmployeeSummary, PreferenceProfile, Roster, ScheduleOutput, ShiftType, SlotRef,
    SolveConfig, SolveRequest, SolveStatus, WeeklyState, Weights,
};
pub use error::SolverError;
pub use solver::{SolveOptions, solve, solve_request};
