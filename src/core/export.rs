use crate::core::{Day, Employee, Roster};
use crate::utils::error::{RosterError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Tsv,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 3] = ["json", "csv", "tsv"];
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            other => Err(RosterError::InvalidConfigValueError {
                field: "output.format".to_string(),
                value: other.to_string(),
                reason: format!("Valid formats: {}", OutputFormat::NAMES.join(", ")),
            }),
        }
    }
}

pub fn render(roster: &Roster, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(roster),
        OutputFormat::Csv => to_csv(roster),
        OutputFormat::Tsv => to_tsv(roster),
    }
}

pub fn to_json(roster: &Roster) -> Result<String> {
    Ok(serde_json::to_string_pretty(roster)?)
}

pub fn to_csv(roster: &Roster) -> Result<String> {
    to_delimited(roster, b',')
}

pub fn to_tsv(roster: &Roster) -> Result<String> {
    to_delimited(roster, b'\t')
}

/// One row per employee, one column per day; a cell lists that day's shifts joined by `;`.
fn to_delimited(roster: &Roster, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    let mut header = vec!["employee"];
    header.extend(Day::ALL.iter().map(|day| day.label()));
    writer.write_record(&header)?;

    for employee in roster.employees() {
        writer.write_record(row(employee))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| RosterError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn row(employee: &Employee) -> Vec<String> {
    let mut cells = Vec::with_capacity(Day::ALL.len() + 1);
    cells.push(employee.name.clone());
    for day in Day::ALL {
        let shifts: Vec<String> = employee
            .shifts_on(day)
            .iter()
            .map(ToString::to_string)
            .collect();
        cells.push(shifts.join(";"));
    }
    cells
}
