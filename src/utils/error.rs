use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Employee not found: {name}")]
    EmployeeNotFound { name: String },

    #[error("Invalid day label: {label}")]
    InvalidDay { label: String },

    #[error("Invalid time of day '{value}': {reason}")]
    InvalidTime { value: String, reason: String },

    #[error("Invalid shift {start}-{end}: start is after end")]
    InvalidShift { start: String, end: String },

    #[error("Shift {shift} not found on {day} for {employee}")]
    ShiftNotFound {
        employee: String,
        day: String,
        shift: String,
    },

    #[error("Duplicate employee name: {name}")]
    DuplicateEmployee { name: String },

    #[error("Duplicate shift {shift} on {day} for {employee}")]
    DuplicateShift {
        employee: String,
        day: String,
        shift: String,
    },

    #[error("Cannot drop a shift of {from} onto the row of {to}")]
    CrossEmployeeDrop { from: String, to: String },

    #[error("Invalid relocation '{input}': {reason}")]
    InvalidRelocation { input: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Lookup,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RosterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RosterError::InvalidDay { .. }
            | RosterError::InvalidTime { .. }
            | RosterError::InvalidShift { .. }
            | RosterError::InvalidRelocation { .. }
            | RosterError::CrossEmployeeDrop { .. } => ErrorCategory::Input,
            RosterError::EmployeeNotFound { .. } | RosterError::ShiftNotFound { .. } => {
                ErrorCategory::Lookup
            }
            RosterError::DuplicateEmployee { .. }
            | RosterError::DuplicateShift { .. }
            | RosterError::ConfigError { .. }
            | RosterError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            RosterError::IoError(_)
            | RosterError::SerializationError(_)
            | RosterError::CsvError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // usually a stale snapshot on the caller's side
            ErrorCategory::Lookup => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            RosterError::EmployeeNotFound { name } => format!(
                "Check the spelling of '{}'; employee names must match the roster exactly",
                name
            ),
            RosterError::InvalidDay { .. } => {
                "Use one of Mon, Tue, Wed, Thu, Fri, Sat, Sun".to_string()
            }
            RosterError::InvalidTime { .. } => "Write times as HH:MM, e.g. 07:30".to_string(),
            RosterError::InvalidShift { .. } => {
                "Make sure the shift starts before it ends".to_string()
            }
            RosterError::ShiftNotFound { .. } => {
                "Refresh the roster snapshot; the shift was moved or removed".to_string()
            }
            RosterError::DuplicateEmployee { .. } => {
                "Give every employee a unique name in the roster file".to_string()
            }
            RosterError::DuplicateShift { .. } => {
                "Remove the repeated shift from the roster file".to_string()
            }
            RosterError::CrossEmployeeDrop { .. } => {
                "Shifts can only be moved within the same employee's row".to_string()
            }
            RosterError::InvalidRelocation { .. } => {
                "Use the form '<employee>,<from>,<to>,<HH:MM>-<HH:MM>'".to_string()
            }
            RosterError::ConfigError { .. } | RosterError::InvalidConfigValueError { .. } => {
                "Check the roster file against the documented TOML layout".to_string()
            }
            RosterError::IoError(_) => "Check that the file exists and is readable".to_string(),
            RosterError::SerializationError(_) | RosterError::CsvError(_) => {
                "This is likely a bug; rerun with --verbose and report it".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Lookup => format!("Not found: {}", self),
            ErrorCategory::Configuration => format!("Roster configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_errors_are_medium_severity() {
        let err = RosterError::EmployeeNotFound {
            name: "Nobody".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Lookup);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.recovery_suggestion().contains("Nobody"));
    }

    #[test]
    fn test_user_friendly_message_includes_cause() {
        let err = RosterError::InvalidDay {
            label: "Funday".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "Invalid input: Invalid day label: Funday");
    }
}
