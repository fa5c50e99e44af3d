pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::SeedRoster;
pub use config::toml_config::RosterFile;
pub use crate::core::dnd::{can_drop, DragPayload, DropTarget};
pub use crate::core::export::OutputFormat;
pub use crate::core::store::{Relocation, RelocationOutcome, ShiftStore};
pub use crate::core::summary::WeeklySummary;
pub use domain::model::{Day, Employee, Roster, Shift, ShiftId};
pub use domain::ports::RosterSource;
pub use utils::error::{RosterError, Result};
