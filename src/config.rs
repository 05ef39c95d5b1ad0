use crate::dashboard::DashboardConfig;
use crate::dates::DayOrder;
use crate::error::Result;
use crate::filter::{BranchFilter, FilterParams};
use crate::focus::FocusSlots;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional JSON settings file. Every field may be omitted.
///
/// ```json
/// { "branch": "JKT", "focus_codes": ["SKU-1", "", "SKU-9"], "day_order": "day_first" }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub search: Option<String>,
    pub branch: Option<String>,
    pub focus_codes: Vec<String>,
    pub day_order: Option<DayOrder>,
    pub out_dir: Option<PathBuf>,
}

impl FileConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let cfg: FileConfig = serde_json::from_str(&text)?;
        log::info!("using settings from {}", path.as_ref().display());
        Ok(cfg)
    }

    pub fn dashboard_config(&self) -> Result<DashboardConfig> {
        Ok(DashboardConfig {
            filter: FilterParams {
                search: self.search.clone().unwrap_or_default(),
                branch: self
                    .branch
                    .as_deref()
                    .map(BranchFilter::parse)
                    .unwrap_or_default(),
            },
            focus: FocusSlots::from_codes(&self.focus_codes[..])?,
            day_order: self.day_order.unwrap_or_default(),
        })
    }
}
