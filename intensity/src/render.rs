use clap::ValueEnum;
use intensity_core::IntensityMap;
use serde::{Deserialize, Serialize};

/// How a map state is rendered to text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// A single line of the form `[[k1,v1],[k2,v2]]`
    #[default]
    Compact,
    /// Indented JSON, one breakpoint component per line
    Pretty,
}

impl OutputFormat {
    /// Render the breakpoints of `map`
    pub fn render(&self, map: &IntensityMap) -> serde_json::Result<String> {
        match self {
            Self::Compact => Ok(map.to_string()),
            Self::Pretty => serde_json::to_string_pretty(map),
        }
    }
}
