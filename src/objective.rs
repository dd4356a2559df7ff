use crate::data::{Roster, ShiftType};
use crate::variables::{VarGrid, and_indicator};
use good_lp::{Constraint, Expression, ProblemVariables, Solution, Variable, constraint, variable};
use log::trace;
use std::mem;

/// The soft side of the model: slack/indicator variables with their weights,
/// plus the linking constraints that tie them to the assignment grid.
pub struct PenaltySheet {
    terms: Vec<(Variable, f64)>,
    constraints: Vec<Constraint>,
}

impl PenaltySheet {
    /// The single scalar objective, a weighted sum of all penalty terms.
    pub fn objective(&self) -> Expression {
        self.terms.iter().map(|(var, weight)| *weight * *var).sum()
    }

    /// Evaluates the objective against a solved model.
    pub fn value(&self, solution: &impl Solution) -> f64 {
        self.terms
            .iter()
            .map(|(var, weight)| weight * solution.value(*var))
            .sum()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Hands the linking constraints over to the model builder.
    pub fn take_constraints(&mut self) -> Vec<Constraint> {
        mem::take(&mut self.constraints)
    }
}

/// Builds every penalty term for every active employee.
pub fn compose(problem: &mut ProblemVariables, grid: &VarGrid, roster: &Roster) -> PenaltySheet {
    let config = &roster.config;
    let weights = &config.weights;
    let num_days = config.num_days;
    let has_night = config
        .shift_types()
        .contains(&ShiftType::Night);
    let has_noon = config.shift_types().contains(&ShiftType::Noon);

    let mut terms: Vec<(Variable, f64)> = Vec::new();
    let mut constraints: Vec<Constraint> = Vec::new();

    for (e, employee) in roster.employees.iter().enumerate() {
        if !employee.active {
            continue;
        }
        let profile = &employee.profile;
        let week = &employee.week;

        // per-type overage and shortage, slack-bounded by the week length
        for shift in config.shift_types() {
            let (min_required, max_allowed) = profile.bounds_for(*shift);
            let (weight_max, weight_min) = weights.type_weights(*shift);

            let excess = problem.add(variable().integer().min(0).max(num_days as f64));
            constraints.push(constraint!(
                grid.type_count(e, *shift) - excess <= max_allowed as f64
            ));
            terms.push((excess, weight_max as f64));

            let shortage = problem.add(variable().integer().min(0).max(num_days as f64));
            constraints.push(constraint!(
                grid.type_count(e, *shift) + shortage >= min_required as f64
            ));
            terms.push((shortage, weight_min as f64));
        }

        // two-sided distance from the personal target
        let delta = problem.add(variable().integer().min(0).max(grid.slot_count() as f64));
        let target = profile.target_shifts as f64;
        constraints.push(constraint!(grid.total(e) - delta <= target));
        constraints.push(constraint!(grid.total(e) + delta >= target));
        terms.push((delta, weights.target_shifts as f64));

        if has_night {
            // three nights in a row
            for d in 0..num_days.saturating_sub(2) {
                let window = [
                    grid.shift_var(e, d, ShiftType::Night),
                    grid.shift_var(e, d + 1, ShiftType::Night),
                    grid.shift_var(e, d + 2, ShiftType::Night),
                ];
                let run = and_indicator(problem, &mut constraints, &window);
                terms.push((run, weights.consecutive_nights as f64));
            }

            // last Saturday night counts as the first night of a potential run
            if week.worked_last_saturday_night && num_days >= 2 {
                let continuation = [
                    grid.shift_var(e, 0, ShiftType::Night),
                    grid.shift_var(e, 1, ShiftType::Night),
                ];
                let run = and_indicator(problem, &mut constraints, &continuation);
                terms.push((run, weights.consecutive_nights as f64));
            }
        }

        // a single skipped slot between two shifts is legal but discouraged
        for t in 0..grid.slot_count().saturating_sub(2) {
            let pair = [grid.at_chrono(e, t), grid.at_chrono(e, t + 2)];
            let both = and_indicator(problem, &mut constraints, &pair);
            terms.push((both, weights.rest_gap as f64));
        }

        // weekend carryover pressure on the first slots of the week
        if week.worked_last_saturday_noon {
            terms.push((
                grid.shift_var(e, 0, ShiftType::Morning),
                weights.rest_gap as f64,
            ));
        }
        if week.worked_last_saturday_night && has_noon {
            terms.push((
                grid.shift_var(e, 0, ShiftType::Noon),
                weights.rest_gap as f64,
            ));
        }

        trace!(
            "Penalty terms composed for {}: {} so far.",
            employee.name,
            terms.len()
        );
    }

    PenaltySheet { terms, constraints }
}
