use crate::data::ShiftType;
use crate::error::SolverError;
use good_lp::{Constraint, Expression, ProblemVariables, Variable, constraint, variable};

/// The block of binary decision variables, one per (employee, day, shift-type)
/// triple. Pure allocation; constraints are layered on top by the encoders.
pub struct VarGrid {
    vars: Vec<Variable>,
    pub num_employees: usize,
    pub num_days: u32,
    pub num_shift_types: u32,
}

impl VarGrid {
    /// Allocates `employees * days * shift_types` binary variables.
    pub fn build(
        problem: &mut ProblemVariables,
        num_employees: usize,
        num_days: u32,
        num_shift_types: u32,
    ) -> Result<Self, SolverError> {
        if num_employees == 0 || num_days == 0 || num_shift_types == 0 {
            return Err(SolverError::configuration(format!(
                "variable grid needs positive dimensions, got {}x{}x{}",
                num_employees, num_days, num_shift_types
            )));
        }
        let count = num_employees * num_days as usize * num_shift_types as usize;
        let vars = problem.add_vector(variable().binary(), count);
        Ok(Self {
            vars,
            num_employees,
            num_days,
            num_shift_types,
        })
    }

    fn offset(&self, employee: usize, day: u32, shift: u32) -> usize {
        debug_assert!(employee < self.num_employees);
        debug_assert!(day < self.num_days && shift < self.num_shift_types);
        (employee * self.num_days as usize + day as usize) * self.num_shift_types as usize
            + shift as usize
    }

    pub fn var(&self, employee: usize, day: u32, shift: u32) -> Variable {
        self.vars[self.offset(employee, day, shift)]
    }

    pub fn shift_var(&self, employee: usize, day: u32, shift: ShiftType) -> Variable {
        self.var(employee, day, shift.index())
    }

    /// Variable at a chronological slot index (`day * types + shift`).
    pub fn at_chrono(&self, employee: usize, chrono: u32) -> Variable {
        self.var(
            employee,
            chrono / self.num_shift_types,
            chrono % self.num_shift_types,
        )
    }

    pub fn slot_count(&self) -> u32 {
        self.num_days * self.num_shift_types
    }

    /// Sum of one employee's variables over a single day.
    pub fn day_sum(&self, employee: usize, day: u32) -> Expression {
        (0..self.num_shift_types)
            .map(|s| self.var(employee, day, s))
            .sum()
    }

    /// Count of one shift type over the whole week for one employee.
    pub fn type_count(&self, employee: usize, shift: ShiftType) -> Expression {
        (0..self.num_days)
            .map(|d| self.shift_var(employee, d, shift))
            .sum()
    }

    /// Total assigned shifts for one employee.
    pub fn total(&self, employee: usize) -> Expression {
        (0..self.num_days)
            .flat_map(|d| (0..self.num_shift_types).map(move |s| (d, s)))
            .map(|(d, s)| self.var(employee, d, s))
            .sum()
    }
}

/// Binary `y` constrained to equal the conjunction of `literals`.
///
/// Encoded as `y <= l_i` for every literal plus `sum(l) - y <= n - 1`,
/// which is exact over binaries.
pub fn and_indicator(
    problem: &mut ProblemVariables,
    constraints: &mut Vec<Constraint>,
    literals: &[Variable],
) -> Variable {
    let indicator = problem.add(variable().binary());
    for lit in literals {
        constraints.push(constraint!(Expression::from(indicator) - *lit <= 0));
    }
    let together: Expression = literals.iter().copied().sum();
    let all_but_one = literals.len() as f64 - 1.0;
    constraints.push(constraint!(together - indicator <= all_but_one));
    indicator
}

/// Binary `y` constrained to equal the disjunction of `literals`.
///
/// Encoded as `y >= l_i` for every literal plus `y <= sum(l)`, exact over
/// binaries.
pub fn or_indicator(
    problem: &mut ProblemVariables,
    constraints: &mut Vec<Constraint>,
    literals: &[Variable],
) -> Variable {
    let indicator = problem.add(variable().binary());
    for lit in literals {
        constraints.push(constraint!(Expression::from(*lit) - indicator <= 0));
    }
    let together: Expression = literals.iter().copied().sum();
    constraints.push(constraint!(Expression::from(indicator) - together <= 0));
    indicator
}
