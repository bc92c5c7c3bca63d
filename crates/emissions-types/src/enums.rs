//! Enumeration types for the emissions dashboard.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A nine-class sequential colour scale used to shade choropleth regions.
///
/// Low metric values map to the lightest stop and high values to the
/// darkest. The stops themselves live in `emissions-core`; this enum is
/// only the stable, serializable name that configuration and the browser
/// agree on.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum SequentialScale {
    /// White to dark red.
    #[default]
    Reds,
    /// White to dark blue.
    Blues,
    /// White to dark green.
    Greens,
    /// White to black.
    Greys,
    /// White to dark orange.
    Oranges,
    /// White to dark purple.
    Purples,
}

impl SequentialScale {
    /// All supported scales, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Reds,
        Self::Blues,
        Self::Greens,
        Self::Greys,
        Self::Oranges,
        Self::Purples,
    ];
}
