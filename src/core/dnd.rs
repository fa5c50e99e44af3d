//! The contract between calendar cells and the store.
//!
//! A dragged shift remembers where it came from ([`DragPayload`]); a calendar
//! cell ([`DropTarget`]) decides whether it accepts the payload and, on
//! release, asks the store to relocate it.

use crate::core::store::{RelocationOutcome, ShiftStore};
use crate::core::{Day, Shift};
use crate::utils::error::{RosterError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragPayload {
    pub employee: String,
    pub day: Day,
    pub shift: Shift,
}

impl DragPayload {
    pub fn new(employee: impl Into<String>, day: Day, shift: Shift) -> Self {
        Self {
            employee: employee.into(),
            day,
            shift,
        }
    }
}

/// One cell of the weekly grid: an employee's row and a day column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTarget {
    pub employee: String,
    pub day: Day,
}

impl DropTarget {
    pub fn new(employee: impl Into<String>, day: Day) -> Self {
        Self {
            employee: employee.into(),
            day,
        }
    }
}

/// Shifts may only be dropped within their own employee's row.
pub fn can_drop(payload: &DragPayload, target: &DropTarget) -> bool {
    payload.employee == target.employee
}

impl ShiftStore {
    /// Completes a drag: relocates the payload's shift to the target's day.
    pub fn drop_shift(
        &mut self,
        payload: &DragPayload,
        target: &DropTarget,
    ) -> Result<RelocationOutcome> {
        if !can_drop(payload, target) {
            tracing::warn!(
                "Drop rejected: {} shift {} dragged onto {}'s row",
                payload.employee,
                payload.shift,
                target.employee
            );
            return Err(RosterError::CrossEmployeeDrop {
                from: payload.employee.clone(),
                to: target.employee.clone(),
            });
        }
        self.relocate(&payload.employee, payload.day, target.day, &payload.shift)
    }
}
