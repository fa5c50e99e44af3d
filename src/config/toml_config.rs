use crate::core::export::OutputFormat;
use crate::core::{Day, Employee, Roster, RosterSource, Shift};
use crate::utils::error::{RosterError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A roster file: the employees to seed the store with plus output preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterFile {
    pub roster: Option<RosterMeta>,
    #[serde(default)]
    pub employees: Vec<EmployeeEntry>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterMeta {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeEntry {
    pub name: String,
    /// Day label to shifts. Labels stay raw so bad ones surface as `InvalidDay`.
    #[serde(default)]
    pub shifts: BTreeMap<String, Vec<ShiftEntry>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftEntry {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub summary: Option<bool>,
}

impl RosterFile {
    /// 從 TOML 檔案載入班表
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RosterError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RosterError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TEAM_LEAD})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RosterError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(meta) = &self.roster {
            validate_non_empty_string("roster.name", &meta.name)?;
        }

        self.output_format()?;

        // Building the roster checks days, times, and duplicates
        self.load_roster().map(|_| ())
    }

    pub fn name(&self) -> Option<&str> {
        self.roster.as_ref().map(|m| m.name.as_str())
    }

    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .map(str::parse::<OutputFormat>)
            .transpose()
    }

    pub fn summary_enabled(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.summary)
            .unwrap_or(false)
    }
}

impl EmployeeEntry {
    fn to_employee(&self) -> Result<Employee> {
        let mut employee = Employee::new(self.name.trim());
        for (label, entries) in &self.shifts {
            let day: Day = label.parse()?;
            for entry in entries {
                employee = employee.with_shift(day, Shift::parse(&entry.start, &entry.end)?);
            }
        }
        Ok(employee)
    }
}

impl RosterSource for RosterFile {
    fn load_roster(&self) -> Result<Roster> {
        let employees = self
            .employees
            .iter()
            .map(EmployeeEntry::to_employee)
            .collect::<Result<Vec<_>>>()?;
        Roster::new(employees)
    }

    fn describe(&self) -> String {
        match self.name() {
            Some(name) => format!("roster file '{}'", name),
            None => "roster file".to_string(),
        }
    }
}

impl Validate for RosterFile {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
