use crate::data::{EmployeeSummary, Roster, ShiftType};
use crate::variables::VarGrid;
use good_lp::Solution;

/// Reads solved variable values back into the boolean assignment matrix plus
/// the per-employee aggregate counts the renderers consume.
///
/// Inactive employees keep their row (all false) so the matrix stays aligned
/// with the input employee list.
pub fn extract(
    solution: &impl Solution,
    grid: &VarGrid,
    roster: &Roster,
) -> (Vec<Vec<Vec<bool>>>, Vec<EmployeeSummary>) {
    let config = &roster.config;
    let mut schedule = Vec::with_capacity(roster.employees.len());
    let mut summaries = Vec::with_capacity(roster.employees.len());

    for (e, employee) in roster.employees.iter().enumerate() {
        let mut days = Vec::with_capacity(config.num_days as usize);
        let mut mornings = 0;
        let mut evenings = 0;
        let mut nights = 0;

        for d in 0..config.num_days {
            let mut row = Vec::with_capacity(config.num_shift_types as usize);
            for s in 0..config.num_shift_types {
                let assigned = solution.value(grid.var(e, d, s)) > 0.9;
                if assigned {
                    match ShiftType::from_index(s) {
                        Some(ShiftType::Morning) => mornings += 1,
                        Some(ShiftType::Noon) => evenings += 1,
                        Some(ShiftType::Night) => nights += 1,
                        None => {}
                    }
                }
                row.push(assigned);
            }
            days.push(row);
        }

        schedule.push(days);
        summaries.push(EmployeeSummary {
            id: employee.id,
            name: employee.name.clone(),
            total: mornings + evenings + nights,
            nights,
            mornings,
            evenings,
        });
    }

    (schedule, summaries)
}
