pub mod dnd;
pub mod export;
pub mod store;
pub mod summary;

pub use crate::domain::model::{Day, Employee, Roster, Shift, ShiftId};
pub use crate::domain::ports::RosterSource;
pub use crate::utils::error::Result;
