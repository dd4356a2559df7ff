use crate::error::SolverError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

// Type aliases for clarity
pub type EmployeeId = u32;
pub type Day = u32;

/// One of the three shift types of a working day, in chronological order.
///
/// The per-type preference bounds and weights keep the operator's historical
/// names: the "evenings" bounds and weights govern the `Noon` shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Morning,
    Noon,
    Night,
}

impl ShiftType {
    pub const COUNT: u32 = 3;
    pub const ALL: [ShiftType; 3] = [ShiftType::Morning, ShiftType::Noon, ShiftType::Night];

    pub fn index(self) -> u32 {
        match self {
            ShiftType::Morning => 0,
            ShiftType::Noon => 1,
            ShiftType::Night => 2,
        }
    }

    pub fn from_index(index: u32) -> Option<ShiftType> {
        Self::ALL.get(index as usize).copied()
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShiftType::Morning => "morning",
            ShiftType::Noon => "noon",
            ShiftType::Night => "night",
        };
        write!(f, "{}", name)
    }
}

/// A single (day, shift-type) coverage unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct SlotRef {
    pub day: Day,
    pub shift: ShiftType,
}

impl SlotRef {
    pub fn new(day: Day, shift: ShiftType) -> Self {
        Self { day, shift }
    }

    /// Position of this slot in the chronological order of the week.
    pub fn chrono_index(&self, num_shift_types: u32) -> u32 {
        self.day * num_shift_types + self.shift.index()
    }

    /// Inverse of [`SlotRef::chrono_index`]; `None` past the last known type.
    pub fn from_chrono_index(index: u32, num_shift_types: u32) -> Option<SlotRef> {
        let shift = ShiftType::from_index(index % num_shift_types)?;
        Some(SlotRef::new(index / num_shift_types, shift))
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} {}", self.day, self.shift)
    }
}

/// Integer preference bounds for one employee.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceProfile {
    pub target_shifts: u32,
    pub max_shifts: u32,
    pub min_mornings: u32,
    pub max_mornings: u32,
    pub min_evenings: u32,
    pub max_evenings: u32,
    pub min_nights: u32,
    pub max_nights: u32,
}

impl PreferenceProfile {
    /// (min, max) bounds governing the given shift type.
    pub fn bounds_for(&self, shift: ShiftType) -> (u32, u32) {
        match shift {
            ShiftType::Morning => (self.min_mornings, self.max_mornings),
            ShiftType::Noon => (self.min_evenings, self.max_evenings),
            ShiftType::Night => (self.min_nights, self.max_nights),
        }
    }
}

/// Continuity state and per-week constraint sets for one employee.
///
/// `unavailable` and `forced` may contain duplicate entries (the upstream
/// extractors are best-effort); duplicates are treated as a single entry.
/// `worked_last_friday_night` is carried for the history updater but no
/// current rule consumes it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeeklyState {
    pub history_streak: u32,
    pub worked_last_friday_night: bool,
    pub worked_last_saturday_noon: bool,
    pub worked_last_saturday_night: bool,
    pub unavailable: Vec<SlotRef>,
    pub forced: Vec<SlotRef>,
}

/// An employee with their preference profile and this week's state.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    pub profile: PreferenceProfile,
    #[serde(default)]
    pub week: WeeklyState,
}

fn default_active() -> bool {
    true
}

/// Penalty weights, keyed by the operator-facing names.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct Weights {
    pub target_shifts: u32,
    pub rest_gap: u32,
    pub max_nights: u32,
    pub max_mornings: u32,
    pub max_evenings: u32,
    pub consecutive_nights: u32,
    pub min_nights: u32,
    pub min_mornings: u32,
    pub min_evenings: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            target_shifts: 4,
            rest_gap: 2,
            max_nights: 5,
            max_mornings: 4,
            max_evenings: 4,
            consecutive_nights: 20,
            min_nights: 5,
            min_mornings: 4,
            min_evenings: 4,
        }
    }
}

impl Weights {
    /// (max-overage weight, min-shortage weight) for the given shift type.
    pub fn type_weights(&self, shift: ShiftType) -> (u32, u32) {
        match shift {
            ShiftType::Morning => (self.max_mornings, self.min_mornings),
            ShiftType::Noon => (self.max_evenings, self.min_evenings),
            ShiftType::Night => (self.max_nights, self.min_nights),
        }
    }
}

/// Scalar configuration for one scheduling run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolveConfig {
    pub num_days: u32,
    pub num_shift_types: u32,
    pub demand_per_slot: u32,
    pub weights: Weights,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            num_days: 7,
            num_shift_types: ShiftType::COUNT,
            demand_per_slot: 2,
            weights: Weights::default(),
        }
    }
}

impl SolveConfig {
    /// Number of slots in the week, in chronological order.
    pub fn slot_count(&self) -> u32 {
        self.num_days * self.num_shift_types
    }

    /// The shift types in play for this run.
    pub fn shift_types(&self) -> &[ShiftType] {
        &ShiftType::ALL[..self.num_shift_types as usize]
    }
}

/// The complete input for one scheduling run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub config: SolveConfig,
    #[serde(default)]
    pub time_limit_secs: Option<f64>,
}

/// The immutable per-run snapshot of employees and configuration.
///
/// Construction is the validation boundary: a `Roster` only exists once the
/// dimensions and the employee list have been checked, so the encoders can
/// assume a structurally sound input.
#[derive(Debug, Clone)]
pub struct Roster {
    pub employees: Vec<Employee>,
    pub config: SolveConfig,
}

impl Roster {
    pub fn new(employees: Vec<Employee>, config: SolveConfig) -> Result<Self, SolverError> {
        if employees.is_empty() {
            return Err(SolverError::configuration("employee list is empty"));
        }
        if config.num_days == 0 {
            return Err(SolverError::configuration("numDays must be positive"));
        }
        if config.num_shift_types == 0 || config.num_shift_types > ShiftType::COUNT {
            return Err(SolverError::configuration(format!(
                "numShiftTypes must be between 1 and {}, got {}",
                ShiftType::COUNT,
                config.num_shift_types
            )));
        }
        if let Some(id) = employees.iter().map(|e| e.id).duplicates().next() {
            return Err(SolverError::configuration(format!(
                "duplicate employee id {}",
                id
            )));
        }
        Ok(Self { employees, config })
    }
}

/// Terminal outcome of a solve run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
    Unknown,
}

impl SolveStatus {
    /// Whether this outcome carries a usable assignment.
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Feasible => "FEASIBLE",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

/// Per-employee aggregate counts for downstream reporting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub id: EmployeeId,
    pub name: String,
    pub total: u32,
    pub nights: u32,
    pub mornings: u32,
    pub evenings: u32,
}

/// The final output of one scheduling run.
///
/// `schedule[e][d][s]` is true iff employee `e` works shift type `s` on day
/// `d`. The matrix and summaries are empty when `status` carries no solution.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOutput {
    pub status: SolveStatus,
    pub objective: Option<i64>,
    pub schedule: Vec<Vec<Vec<bool>>>,
    pub summaries: Vec<EmployeeSummary>,
}

impl ScheduleOutput {
    /// An output with no assignment, for the non-solution statuses.
    pub fn empty(status: SolveStatus) -> Self {
        Self {
            status,
            objective: None,
            schedule: Vec::new(),
            summaries: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chrono_index_orders_slots() {
        let night_day0 = SlotRef::new(0, ShiftType::Night);
        let morning_day1 = SlotRef::new(1, ShiftType::Morning);
        assert_eq!(night_day0.chrono_index(3), 2);
        assert_eq!(morning_day1.chrono_index(3), 3);
        assert_eq!(
            SlotRef::from_chrono_index(5, 3),
            Some(SlotRef::new(1, ShiftType::Night))
        );
        assert_eq!(SlotRef::from_chrono_index(4, 3).unwrap().shift, ShiftType::Noon);
    }

    #[test]
    fn request_parses_wire_names() {
        let raw = r#"{
            "employees": [{
                "id": 0,
                "name": "Ira",
                "profile": {
                    "targetShifts": 5, "maxShifts": 6,
                    "minMornings": 1, "maxMornings": 3,
                    "minEvenings": 1, "maxEvenings": 3,
                    "minNights": 1, "maxNights": 1
                },
                "week": {
                    "historyStreak": 2,
                    "workedLastSaturdayNoon": true,
                    "unavailable": [{"day": 3, "shift": "morning"}, {"day": 3, "shift": "night"}]
                }
            }],
            "config": {
                "numDays": 7,
                "weights": {"TARGET_SHIFTS": 4, "CONSECUTIVE_NIGHTS": 20}
            }
        }"#;
        let request: SolveRequest = serde_json::from_str(raw).unwrap();
        let employee = &request.employees[0];
        assert!(employee.active);
        assert_eq!(employee.week.history_streak, 2);
        assert!(employee.week.worked_last_saturday_noon);
        assert!(!employee.week.worked_last_saturday_night);
        assert_eq!(employee.week.unavailable[1].shift, ShiftType::Night);
        assert_eq!(request.config.demand_per_slot, 2);
        assert_eq!(request.config.weights.consecutive_nights, 20);
        assert_eq!(request.config.weights.rest_gap, 2);
        assert_eq!(request.time_limit_secs, None);
    }

    #[test]
    fn evenings_bounds_govern_noon() {
        let profile = PreferenceProfile {
            target_shifts: 5,
            max_shifts: 6,
            min_mornings: 0,
            max_mornings: 3,
            min_evenings: 2,
            max_evenings: 4,
            min_nights: 1,
            max_nights: 2,
        };
        assert_eq!(profile.bounds_for(ShiftType::Noon), (2, 4));
        assert_eq!(Weights::default().type_weights(ShiftType::Night), (5, 5));
    }

    fn plain_employee(id: EmployeeId) -> Employee {
        Employee {
            id,
            name: format!("employee {}", id),
            active: true,
            profile: PreferenceProfile {
                target_shifts: 3,
                max_shifts: 7,
                min_mornings: 0,
                max_mornings: 7,
                min_evenings: 0,
                max_evenings: 7,
                min_nights: 0,
                max_nights: 7,
            },
            week: WeeklyState::default(),
        }
    }

    #[test]
    fn roster_rejects_bad_dimensions() {
        let empty = Roster::new(Vec::new(), SolveConfig::default());
        assert!(matches!(empty, Err(SolverError::Configuration { .. })));

        let zero_days = Roster::new(
            vec![plain_employee(0)],
            SolveConfig {
                num_days: 0,
                ..SolveConfig::default()
            },
        );
        assert!(matches!(zero_days, Err(SolverError::Configuration { .. })));

        let four_types = Roster::new(
            vec![plain_employee(0)],
            SolveConfig {
                num_shift_types: 4,
                ..SolveConfig::default()
            },
        );
        assert!(matches!(four_types, Err(SolverError::Configuration { .. })));
    }

    #[test]
    fn roster_rejects_duplicate_ids() {
        let result = Roster::new(
            vec![plain_employee(3), plain_employee(3)],
            SolveConfig::default(),
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("duplicate employee id 3"));
    }

    #[test]
    fn status_serializes_screaming() {
        let json = serde_json::to_string(&SolveStatus::Infeasible).unwrap();
        assert_eq!(json, "\"INFEASIBLE\"");
        assert!(!SolveStatus::Unknown.has_solution());
        assert!(SolveStatus::Feasible.has_solution());
    }
}
