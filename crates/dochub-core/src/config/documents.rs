//! Document screen settings.

use serde::{Deserialize, Serialize};

/// Rendering settings for the document screens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsConfig {
    /// chrono format string used for creation and modification dates.
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            datetime_format: default_datetime_format(),
        }
    }
}

fn default_datetime_format() -> String {
    "%d/%m/%Y %H:%M".to_string()
}
