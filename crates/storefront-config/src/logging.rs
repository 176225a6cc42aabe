//! Output formats for the `storefront` telemetry subscriber.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Format of the log lines the CLI writes to stderr.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One flattened JSON object per event.
    #[default]
    Json,
    /// Compact human-readable line per event.
    Compact,
}
