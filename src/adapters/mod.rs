// Adapters layer: concrete roster sources. The TOML file source lives in config::toml_config.

use crate::domain::model::Roster;
use crate::domain::ports::RosterSource;
use crate::utils::error::Result;

/// The built-in week used when no roster file is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedRoster;

impl RosterSource for SeedRoster {
    fn load_roster(&self) -> Result<Roster> {
        Roster::seed()
    }

    fn describe(&self) -> String {
        "built-in seed roster".to_string()
    }
}
