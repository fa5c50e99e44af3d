pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::export::OutputFormat;
#[cfg(feature = "cli")]
use crate::core::store::Relocation;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::logger::LogFormat;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "shift-roster")]
#[command(about = "Weekly shift roster: load a week, move shifts between days, print the result")]
pub struct CliConfig {
    /// Path to a TOML roster file; the built-in week is used when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    /// Move a shift, e.g. "Elise Leroy,Mon,Tue,08:00-17:00" (repeatable)
    #[arg(long = "relocate", value_name = "EMPLOYEE,FROM,TO,HH:MM-HH:MM")]
    pub relocations: Vec<Relocation>,

    /// Output format, overriding the roster file
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print scheduled hours per day after the roster
    #[arg(long)]
    pub summary: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: LogFormat,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::core::Day;

    #[test]
    fn test_parse_cli_relocations() {
        let config = CliConfig::try_parse_from([
            "shift-roster",
            "--relocate",
            "Elise Leroy,Mon,Tue,08:00-17:00",
            "--relocate",
            "Samuel Goossens,Mon,Sun,07:00-15:00",
            "--format",
            "csv",
            "--summary",
        ])
        .unwrap();

        assert_eq!(config.relocations.len(), 2);
        assert_eq!(config.relocations[1].to, Day::Sun);
        assert_eq!(config.format, Some(OutputFormat::Csv));
        assert!(config.summary);
        assert_eq!(config.log_format, LogFormat::Compact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_relocation_is_rejected_by_clap() {
        let result =
            CliConfig::try_parse_from(["shift-roster", "--relocate", "Elise Leroy,Mon,Tue"]);
        assert!(result.is_err());
    }
}
