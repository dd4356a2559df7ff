use crate::data::{Roster, ShiftType, SlotRef, SolveConfig};
use crate::error::SolverError;
use crate::variables::{VarGrid, or_indicator};
use good_lp::{Constraint, Expression, ProblemVariables, Variable, constraint};
use itertools::iproduct;
use log::{trace, warn};
use std::collections::HashSet;

// A run of seven consecutive working days is never allowed, on any horizon.
const MAX_RUN_DAYS: u32 = 7;

/// Emits every non-negotiable rule as a linear constraint over the grid.
///
/// Fails with a `ConflictError` if an employee's forced set intersects their
/// unavailable set; nothing is solved in that case.
pub fn encode_hard(
    problem: &mut ProblemVariables,
    grid: &VarGrid,
    roster: &Roster,
) -> Result<Vec<Constraint>, SolverError> {
    let config = &roster.config;
    let mut constraints = Vec::new();

    // exact staffing on every slot, never under or over
    for (d, s) in iproduct!(0..config.num_days, 0..config.num_shift_types) {
        let staffed: Expression = (0..roster.employees.len()).map(|e| grid.var(e, d, s)).sum();
        constraints.push(constraint!(staffed == config.demand_per_slot as f64));
    }

    // one shift a day only
    for (e, d) in iproduct!(0..roster.employees.len(), 0..config.num_days) {
        constraints.push(constraint!(grid.day_sum(e, d) <= 1));
    }

    // no back-to-back slots, including across the day boundary
    for e in 0..roster.employees.len() {
        for t in 0..grid.slot_count().saturating_sub(1) {
            let pair = Expression::from(grid.at_chrono(e, t)) + grid.at_chrono(e, t + 1);
            constraints.push(constraint!(pair <= 1));
        }
    }

    for (e, employee) in roster.employees.iter().enumerate() {
        if !employee.active {
            trace!("Pinning inactive employee {} to zero.", employee.name);
            for (d, s) in iproduct!(0..config.num_days, 0..config.num_shift_types) {
                constraints.push(constraint!(Expression::from(grid.var(e, d, s)) == 0));
            }
            continue;
        }

        // unavailability, deduplicated
        let unavailable = dedup_in_range(&employee.week.unavailable, config, &employee.name, "unavailability");
        let unavailable_set: HashSet<SlotRef> = unavailable.iter().copied().collect();
        for slot in &unavailable {
            constraints.push(constraint!(
                Expression::from(grid.shift_var(e, slot.day, slot.shift)) == 0
            ));
        }

        // a Saturday-night worker cannot open the new week
        if employee.week.worked_last_saturday_night {
            constraints.push(constraint!(
                Expression::from(grid.shift_var(e, 0, ShiftType::Morning)) == 0
            ));
        }

        // forced assignments, validated against unavailability first
        for slot in dedup_in_range(&employee.week.forced, config, &employee.name, "forced-assignment") {
            if unavailable_set.contains(&slot) {
                return Err(SolverError::Conflict {
                    employee: employee.name.clone(),
                    slot,
                });
            }
            trace!("Forcing {} into {}.", employee.name, slot);
            constraints.push(constraint!(
                Expression::from(grid.shift_var(e, slot.day, slot.shift)) == 1
            ));
        }

        // per-day working indicators feed the cross-week rest rule
        let work_days: Vec<Variable> = (0..config.num_days)
            .map(|d| {
                let day_vars: Vec<Variable> =
                    (0..config.num_shift_types).map(|s| grid.var(e, d, s)).collect();
                or_indicator(problem, &mut constraints, &day_vars)
            })
            .collect();

        let streak = employee.week.history_streak;
        if streak > 0 {
            let limit = config.num_days.saturating_sub(streak);
            if limit > 0 {
                let early: Expression = work_days[..limit as usize].iter().copied().sum();
                let not_all = limit as f64 - 1.0;
                constraints.push(constraint!(early <= not_all));
            }
        } else if config.num_days >= MAX_RUN_DAYS {
            let whole_week: Expression = work_days.iter().copied().sum();
            let not_all = config.num_days as f64 - 1.0;
            constraints.push(constraint!(whole_week <= not_all));
        }

        // hard ceiling, independent of the soft target
        constraints.push(constraint!(
            grid.total(e) <= employee.profile.max_shifts as f64
        ));
    }

    Ok(constraints)
}

/// Drops duplicate and out-of-range entries. The upstream extractors are
/// best-effort, so both are expected noise rather than errors.
fn dedup_in_range(
    slots: &[SlotRef],
    config: &SolveConfig,
    employee_name: &str,
    kind: &str,
) -> Vec<SlotRef> {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    for slot in slots {
        if slot.day >= config.num_days || slot.shift.index() >= config.num_shift_types {
            warn!(
                "Skipping out-of-range {} entry {} for {}.",
                kind, slot, employee_name
            );
            continue;
        }
        if seen.insert(*slot) {
            kept.push(*slot);
        }
    }
    kept
}
