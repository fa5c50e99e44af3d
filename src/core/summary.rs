use crate::core::{Day, Roster};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub day: Day,
    pub hours: f64,
    pub shift_count: usize,
    /// Employees with at least one shift that day.
    pub headcount: usize,
}

/// Scheduled hours per day and for the whole week, as shown above the calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    pub days: Vec<DaySummary>,
    pub total_hours: f64,
    pub total_shifts: usize,
}

impl WeeklySummary {
    pub fn from_roster(roster: &Roster) -> Self {
        let days: Vec<DaySummary> = Day::ALL
            .into_iter()
            .map(|day| {
                let mut summary = DaySummary {
                    day,
                    hours: 0.0,
                    shift_count: 0,
                    headcount: 0,
                };
                for employee in roster.employees() {
                    let shifts = employee.shifts_on(day);
                    if !shifts.is_empty() {
                        summary.headcount += 1;
                    }
                    summary.shift_count += shifts.len();
                    summary.hours += shifts.iter().map(|s| s.duration_hours()).sum::<f64>();
                }
                summary
            })
            .collect();

        Self {
            total_hours: days.iter().map(|d| d.hours).sum(),
            total_shifts: days.iter().map(|d| d.shift_count).sum(),
            days,
        }
    }

    pub fn day(&self, day: Day) -> &DaySummary {
        &self.days[day.index()]
    }
}

impl fmt::Display for WeeklySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "week  {:>6.2}h  {:>3} shifts",
            self.total_hours, self.total_shifts
        )?;
        for d in &self.days {
            writeln!(
                f,
                "{}   {:>6.2}h  {:>3} shifts  {:>3} staff",
                d.day, d.hours, d.shift_count, d.headcount
            )?;
        }
        Ok(())
    }
}
