use bevy::prelude::Resource;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::config::{BatteryConfig, BatteryConfigV2};
use super::validation::validate_any;
use crate::error::AppError;

/// JSON file holding the flat battery record. Saves replace the whole file.
#[derive(Debug, Clone, Resource)]
pub struct BatteryConfigStore {
    path: PathBuf,
}

impl BatteryConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the record in whatever revision it was written. A missing file
    /// yields the defaults of the current revision.
    pub fn load(&self) -> Result<BatteryConfig, AppError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No battery config at '{}', using defaults", self.path.display());
                return Ok(BatteryConfig::default());
            }
            Err(source) => {
                return Err(AppError::Io { path: self.path.clone(), source });
            }
        };
        let config = BatteryConfig::from_json(&json)?;
        debug!("Loaded {:?} battery config from '{}'", config.revision(), self.path.display());
        Ok(config)
    }

    pub fn load_current(&self) -> Result<BatteryConfigV2, AppError> {
        Ok(self.load()?.into_current())
    }

    /// Writes to a sibling temp file first so readers never see half a record.
    /// Records that would not load back, or not pass validation, are refused.
    pub fn save(&self, config: &BatteryConfig) -> Result<(), AppError> {
        validate_any(config)?;
        let json = config.to_json_pretty()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|source| AppError::Io { path: parent.to_path_buf(), source })?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .map_err(|source| AppError::Io { path: tmp_path.clone(), source })?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|source| AppError::Io { path: self.path.clone(), source })?;

        info!("Saved {:?} battery config to '{}'", config.revision(), self.path.display());
        Ok(())
    }
}
