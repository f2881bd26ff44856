//! Output configuration.

use serde::{Deserialize, Serialize};

/// The `[output]` table of a config file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputSection {
    /// Moment-match Beta query results before returning them. Default: true.
    pub moment_matching: Option<bool>,
    /// Report results as SL opinions. Default: false.
    pub sl_output: Option<bool>,
}

impl OutputSection {
    /// Returns whether moment matching is applied, defaulting to true.
    pub fn effective_moment_matching(&self) -> bool {
        self.moment_matching.unwrap_or(true)
    }

    /// Returns whether results are reported as opinions, defaulting to false.
    pub fn effective_sl_output(&self) -> bool {
        self.sl_output.unwrap_or(false)
    }
}
