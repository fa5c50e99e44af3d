use crate::utils::error::{RosterError, Result};
use crate::utils::validation::{find_duplicate, validate_non_empty_string};
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }

    /// Zero-based position in the week, Monday first.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Day {
    type Err = RosterError;

    /// Accepts exactly the seven tokens `Mon` .. `Sun`.
    fn from_str(s: &str) -> Result<Self> {
        Day::ALL
            .into_iter()
            .find(|day| day.label() == s)
            .ok_or_else(|| RosterError::InvalidDay {
                label: s.to_string(),
            })
    }
}

impl TryFrom<String> for Day {
    type Error = RosterError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Day> for &'static str {
    fn from(day: Day) -> Self {
        day.label()
    }
}

impl From<Day> for Weekday {
    fn from(day: Day) -> Self {
        match day {
            Day::Mon => Weekday::Mon,
            Day::Tue => Weekday::Tue,
            Day::Wed => Weekday::Wed,
            Day::Thu => Weekday::Thu,
            Day::Fri => Weekday::Fri,
            Day::Sat => Weekday::Sat,
            Day::Sun => Weekday::Sun,
        }
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        Day::ALL[weekday.num_days_from_monday() as usize]
    }
}

static NEXT_SHIFT_ID: AtomicU64 = AtomicU64::new(1);

/// Surrogate key handed out when a shift is created. Never part of value identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ShiftId(u64);

impl ShiftId {
    fn next() -> Self {
        ShiftId(NEXT_SHIFT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|e| RosterError::InvalidTime {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// One work period within a day.
///
/// Two shifts are equal when their start and end times match; the [`ShiftId`]
/// only distinguishes instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "ShiftRecord", try_from = "ShiftRecord")]
pub struct Shift {
    id: ShiftId,
    start: NaiveTime,
    end: NaiveTime,
}

impl Shift {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start > end {
            return Err(RosterError::InvalidShift {
                start: start.format(TIME_FORMAT).to_string(),
                end: end.format(TIME_FORMAT).to_string(),
            });
        }
        Ok(Self {
            id: ShiftId::next(),
            start,
            end,
        })
    }

    /// Builds a shift from `HH:MM` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_time(start)?, parse_time(end)?)
    }

    pub fn id(&self) -> ShiftId {
        self.id
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_minutes() as f64 / 60.0
    }
}

impl PartialEq for Shift {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl Eq for Shift {}

impl Hash for Shift {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format(TIME_FORMAT),
            self.end.format(TIME_FORMAT)
        )
    }
}

impl FromStr for Shift {
    type Err = RosterError;

    /// Parses `HH:MM-HH:MM`.
    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s.split_once('-').ok_or_else(|| RosterError::InvalidTime {
            value: s.to_string(),
            reason: "expected HH:MM-HH:MM".to_string(),
        })?;
        Shift::parse(start, end)
    }
}

/// Wire form of a shift. Incoming ids are ignored; every loaded shift gets a fresh one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRecord {
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    id: Option<ShiftId>,
    start: String,
    end: String,
}

impl From<Shift> for ShiftRecord {
    fn from(shift: Shift) -> Self {
        ShiftRecord {
            id: Some(shift.id),
            start: shift.start.format(TIME_FORMAT).to_string(),
            end: shift.end.format(TIME_FORMAT).to_string(),
        }
    }
}

impl TryFrom<ShiftRecord> for Shift {
    type Error = RosterError;

    fn try_from(record: ShiftRecord) -> Result<Self> {
        Shift::parse(&record.start, &record.end)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    #[serde(default)]
    pub shifts: BTreeMap<Day, Vec<Shift>>,
}

impl Employee {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shifts: BTreeMap::new(),
        }
    }

    pub fn with_shift(mut self, day: Day, shift: Shift) -> Self {
        self.shifts.entry(day).or_default().push(shift);
        self
    }

    /// Shifts on `day` in insertion order; a day without an entry is empty.
    pub fn shifts_on(&self, day: Day) -> &[Shift] {
        self.shifts.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn works_on(&self, day: Day) -> bool {
        !self.shifts_on(day).is_empty()
    }

    fn check_no_duplicate_shifts(&self) -> Result<()> {
        for (day, shifts) in &self.shifts {
            for (i, shift) in shifts.iter().enumerate() {
                if shifts[..i].contains(shift) {
                    return Err(RosterError::DuplicateShift {
                        employee: self.name.clone(),
                        day: day.to_string(),
                        shift: shift.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

// A missing day and an empty day are the same schedule.
impl PartialEq for Employee {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && Day::ALL
                .into_iter()
                .all(|day| self.shifts_on(day) == other.shifts_on(day))
    }
}

/// Ordered list of employees. Snapshots share unchanged employees through `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Employee>")]
pub struct Roster {
    employees: Vec<Arc<Employee>>,
}

impl Roster {
    /// Checks that names are non-empty and unique and that no day repeats a shift.
    pub fn new(employees: Vec<Employee>) -> Result<Self> {
        for employee in &employees {
            validate_non_empty_string("employees.name", &employee.name)?;
            employee.check_no_duplicate_shifts()?;
        }
        if let Some(name) = find_duplicate(employees.iter().map(|e| e.name.as_str())) {
            return Err(RosterError::DuplicateEmployee {
                name: name.to_string(),
            });
        }

        Ok(Self {
            employees: employees.into_iter().map(Arc::new).collect(),
        })
    }

    /// The three-person week the calendar starts with.
    pub fn seed() -> Result<Self> {
        Self::new(vec![
            Employee::new("Alexandre Timmermans")
                .with_shift(Day::Mon, Shift::parse("07:00", "15:00")?)
                .with_shift(Day::Mon, Shift::parse("16:00", "21:00")?)
                .with_shift(Day::Tue, Shift::parse("08:30", "17:00")?),
            Employee::new("Elise Leroy").with_shift(Day::Mon, Shift::parse("08:00", "17:00")?),
            Employee::new("Samuel Goossens")
                .with_shift(Day::Mon, Shift::parse("07:00", "15:00")?),
        ])
    }

    pub fn employees(&self) -> impl Iterator<Item = &Employee> {
        self.employees.iter().map(Arc::as_ref)
    }

    pub fn employee(&self, name: &str) -> Option<&Employee> {
        self.employee_handle(name).map(Arc::as_ref)
    }

    /// Shared handle to an employee, for checking structural sharing between snapshots.
    pub fn employee_handle(&self, name: &str) -> Option<&Arc<Employee>> {
        self.employees.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub(crate) fn locate(&self, name: &str) -> Option<(usize, &Arc<Employee>)> {
        self.employees.iter().enumerate().find(|(_, e)| e.name == name)
    }

    /// New roster with the employee at `index` replaced; every other entry is shared.
    pub(crate) fn with_employee_at(&self, index: usize, employee: Employee) -> Self {
        let mut employees = self.employees.clone();
        employees[index] = Arc::new(employee);
        Self { employees }
    }
}

impl TryFrom<Vec<Employee>> for Roster {
    type Error = RosterError;

    fn try_from(employees: Vec<Employee>) -> Result<Self> {
        Roster::new(employees)
    }
}

impl Serialize for Roster {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.employees())
    }
}
