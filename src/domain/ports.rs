use crate::domain::model::Roster;
use crate::utils::error::Result;

/// Anything that can hand the store its initial roster.
pub trait RosterSource {
    fn load_roster(&self) -> Result<Roster>;

    /// Short description for log lines.
    fn describe(&self) -> String;
}
