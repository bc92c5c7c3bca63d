//! User events that move the dashboard from one [`QueryState`] to the next.
//!
//! [`QueryState`]: crate::structs::QueryState

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single user interaction with the dashboard controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum QueryEvent {
    /// The year slider moved.
    SetYear {
        /// New slider position.
        year: i32,
    },
    /// The dropdown selection was replaced wholesale.
    SetEntities {
        /// New selection.
        entities: BTreeSet<String>,
    },
    /// One entity was ticked in the dropdown.
    AddEntity {
        /// Entity to add.
        entity: String,
    },
    /// One entity was unticked in the dropdown.
    RemoveEntity {
        /// Entity to remove.
        entity: String,
    },
}
