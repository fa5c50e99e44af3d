use crate::core::{Day, Employee, Roster, RosterSource, Shift, ShiftId};
use crate::utils::error::{RosterError, Result};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationOutcome {
    /// Nothing changed: same source and destination, or the shift was
    /// missing from the source and already on the destination.
    Unchanged,
    /// The shift now sits at the end of the destination day.
    Moved,
    /// The destination already held an equal shift; only the removal happened.
    Merged,
}

/// A parsed request to move one shift, e.g. from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Relocation {
    pub employee: String,
    pub from: Day,
    pub to: Day,
    pub shift: Shift,
}

impl FromStr for Relocation {
    type Err = RosterError;

    /// Parses `<employee>,<from>,<to>,<HH:MM>-<HH:MM>`. The name may itself contain commas.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| RosterError::InvalidRelocation {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = s.rsplitn(4, ',');
        let shift = parts.next().ok_or_else(|| invalid("missing shift"))?;
        let to = parts.next().ok_or_else(|| invalid("missing destination day"))?;
        let from = parts.next().ok_or_else(|| invalid("missing source day"))?;
        let employee = parts
            .next()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| invalid("missing employee name"))?;

        Ok(Self {
            employee: employee.to_string(),
            from: from.trim().parse()?,
            to: to.trim().parse()?,
            shift: shift.trim().parse()?,
        })
    }
}

/// Owns the current roster snapshot and applies relocations to it.
///
/// Every change builds a new [`Roster`]; readers holding an earlier snapshot
/// keep seeing it unchanged.
#[derive(Debug, Clone)]
pub struct ShiftStore {
    roster: Arc<Roster>,
}

impl ShiftStore {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster: Arc::new(roster),
        }
    }

    pub fn from_source<S: RosterSource + ?Sized>(source: &S) -> Result<Self> {
        let roster = source.load_roster()?;
        tracing::info!(
            "Loaded {} employees from {}",
            roster.len(),
            source.describe()
        );
        Ok(Self::new(roster))
    }

    pub fn snapshot(&self) -> Arc<Roster> {
        Arc::clone(&self.roster)
    }

    /// Moves `shift` (matched by start and end time) from `from` to `to`.
    pub fn relocate(
        &mut self,
        employee_name: &str,
        from: Day,
        to: Day,
        shift: &Shift,
    ) -> Result<RelocationOutcome> {
        let (index, current) = self.find(employee_name)?;
        if from == to {
            tracing::debug!("{} {} stays on {}", employee_name, shift, from);
            return Ok(RelocationOutcome::Unchanged);
        }

        let mut shifts = current.shifts.clone();

        // keep the stored instance so its id survives the move
        let mut carried = None;
        if let Some(source) = shifts.get_mut(&from) {
            source.retain(|s| {
                if s == shift {
                    carried.get_or_insert_with(|| s.clone());
                    false
                } else {
                    true
                }
            });
        }
        let removed = carried.is_some();
        let moving = carried.unwrap_or_else(|| shift.clone());

        let outcome = place(shifts.entry(to).or_default(), moving);
        if outcome == RelocationOutcome::Merged && !removed {
            tracing::debug!(
                "{} {} not on {} and already on {}, nothing to do",
                employee_name,
                shift,
                from,
                to
            );
            return Ok(RelocationOutcome::Unchanged);
        }
        self.commit(index, current, shifts);
        log_outcome(employee_name, shift, from, to, outcome);
        Ok(outcome)
    }

    /// Moves exactly the shift carrying `shift_id`, leaving equal-looking shifts alone.
    pub fn relocate_by_id(
        &mut self,
        employee_name: &str,
        from: Day,
        to: Day,
        shift_id: ShiftId,
    ) -> Result<RelocationOutcome> {
        let (index, current) = self.find(employee_name)?;

        let mut shifts = current.shifts.clone();
        let source = shifts.entry(from).or_default();
        let position = source
            .iter()
            .position(|s| s.id() == shift_id)
            .ok_or_else(|| RosterError::ShiftNotFound {
                employee: employee_name.to_string(),
                day: from.to_string(),
                shift: shift_id.to_string(),
            })?;
        if from == to {
            return Ok(RelocationOutcome::Unchanged);
        }
        let moving = source.remove(position);
        let label = moving.to_string();

        let outcome = place(shifts.entry(to).or_default(), moving);
        self.commit(index, current, shifts);
        tracing::info!(
            "{} shift {} ({}) {} -> {}: {:?}",
            employee_name,
            shift_id,
            label,
            from,
            to,
            outcome
        );
        Ok(outcome)
    }

    pub fn apply(&mut self, relocation: &Relocation) -> Result<RelocationOutcome> {
        self.relocate(
            &relocation.employee,
            relocation.from,
            relocation.to,
            &relocation.shift,
        )
    }

    fn find(&self, employee_name: &str) -> Result<(usize, Arc<Employee>)> {
        self.roster
            .locate(employee_name)
            .map(|(index, handle)| (index, Arc::clone(handle)))
            .ok_or_else(|| {
                tracing::warn!("Relocation rejected: unknown employee '{}'", employee_name);
                RosterError::EmployeeNotFound {
                    name: employee_name.to_string(),
                }
            })
    }

    fn commit(
        &mut self,
        index: usize,
        current: Arc<Employee>,
        shifts: BTreeMap<Day, Vec<Shift>>,
    ) {
        let updated = Employee {
            name: current.name.clone(),
            shifts,
        };
        self.roster = Arc::new(self.roster.with_employee_at(index, updated));
    }
}

fn place(destination: &mut Vec<Shift>, shift: Shift) -> RelocationOutcome {
    if destination.contains(&shift) {
        RelocationOutcome::Merged
    } else {
        destination.push(shift);
        RelocationOutcome::Moved
    }
}

fn log_outcome(employee: &str, shift: &Shift, from: Day, to: Day, outcome: RelocationOutcome) {
    match outcome {
        RelocationOutcome::Merged => tracing::info!(
            "{} {} {} -> {}: already on {}, removed from {} only",
            employee,
            shift,
            from,
            to,
            to,
            from
        ),
        _ => tracing::info!("{} {} {} -> {}: {:?}", employee, shift, from, to, outcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(s: &str) -> Shift {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_relocation() {
        let r: Relocation = "Timmermans, Alexandre,Mon,Tue,07:00-15:00".parse().unwrap();
        assert_eq!(r.employee, "Timmermans, Alexandre");
        assert_eq!(r.from, Day::Mon);
        assert_eq!(r.to, Day::Tue);
        assert_eq!(r.shift, shift("07:00-15:00"));
    }

    #[test]
    fn test_parse_relocation_errors() {
        assert!(matches!(
            "Mon,Tue,07:00-15:00".parse::<Relocation>(),
            Err(RosterError::InvalidRelocation { .. })
        ));
        assert!(matches!(
            "Elise Leroy,Mon,Someday,07:00-15:00".parse::<Relocation>(),
            Err(RosterError::InvalidDay { .. })
        ));
    }

    #[test]
    fn test_relocate_keeps_shift_id() {
        let stored = shift("07:00-15:00");
        let id = stored.id();
        let roster = Roster::new(vec![Employee::new("A").with_shift(Day::Mon, stored)]).unwrap();
        let mut store = ShiftStore::new(roster);

        let outcome = store
            .relocate("A", Day::Mon, Day::Tue, &shift("07:00-15:00"))
            .unwrap();

        assert_eq!(outcome, RelocationOutcome::Moved);
        let snapshot = store.snapshot();
        let moved = &snapshot.employee("A").unwrap().shifts_on(Day::Tue)[0];
        assert_eq!(moved.id(), id);
    }

    #[test]
    fn test_relocate_missing_source_still_adds() {
        let roster = Roster::new(vec![Employee::new("A")]).unwrap();
        let mut store = ShiftStore::new(roster);

        let outcome = store
            .relocate("A", Day::Wed, Day::Fri, &shift("09:00-12:00"))
            .unwrap();

        assert_eq!(outcome, RelocationOutcome::Moved);
        let snapshot = store.snapshot();
        let a = snapshot.employee("A").unwrap();
        assert!(a.shifts_on(Day::Wed).is_empty());
        assert_eq!(a.shifts_on(Day::Fri), &[shift("09:00-12:00")]);
    }

    #[test]
    fn test_absent_from_source_and_present_on_destination_is_unchanged() {
        let roster =
            Roster::new(vec![Employee::new("A").with_shift(Day::Tue, shift("07:00-15:00"))])
                .unwrap();
        let mut store = ShiftStore::new(roster);
        let before = store.snapshot();

        let outcome = store
            .relocate("A", Day::Mon, Day::Tue, &shift("07:00-15:00"))
            .unwrap();

        assert_eq!(outcome, RelocationOutcome::Unchanged);
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_merge_removes_from_source() {
        let roster = Roster::new(vec![Employee::new("A")
            .with_shift(Day::Mon, shift("07:00-15:00"))
            .with_shift(Day::Tue, shift("07:00-15:00"))])
        .unwrap();
        let mut store = ShiftStore::new(roster);
        let before = store.snapshot();

        let outcome = store
            .relocate("A", Day::Mon, Day::Tue, &shift("07:00-15:00"))
            .unwrap();

        assert_eq!(outcome, RelocationOutcome::Merged);
        assert!(!Arc::ptr_eq(&before, &store.snapshot()));
        let snapshot = store.snapshot();
        let a = snapshot.employee("A").unwrap();
        assert!(!a.works_on(Day::Mon));
        assert_eq!(a.shifts_on(Day::Tue).len(), 1);
    }

    #[test]
    fn test_parse_relocation_trims_fields_but_not_case() {
        let r: Relocation = "Elise Leroy, Mon , Wed ,08:00-17:00".parse().unwrap();
        assert_eq!((r.from, r.to), (Day::Mon, Day::Wed));
        assert!(matches!(
            "Elise Leroy,mon,Wed,08:00-17:00".parse::<Relocation>(),
            Err(RosterError::InvalidDay { .. })
        ));
    }
}
