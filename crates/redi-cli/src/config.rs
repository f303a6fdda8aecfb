//! Seed configuration file.
//!
//! Every setting has a default matching the standard extract set, so an
//! absent or empty file is valid. Example:
//!
//! ```toml
//! events_date_format = "%d-%b-%Y"
//!
//! [files]
//! participants = "Participants-2026.csv"
//!
//! [transfer_columns]
//! header_row = 5
//!
//! [sheets]
//! census = "Inpatients"
//! ```

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use redi_core::entities::OrgUnitColumns;
use redi_core::{CensusColumns, SeedSettings, TransferColumns};
use redi_transform::DEFAULT_HASH_SALT;
use redi_transform::normalization::datetime::{
    DAY_ABBREVIATED_MONTH_YEAR, DAY_MONTH_YEAR_NUMERIC,
};

/// Source names, as used for `[files]` keys and in `[sheets]`.
pub const SOURCE_NAMES: [&str; 8] = [
    "org_units",
    "census",
    "transfers",
    "als_certification",
    "bls_certification",
    "participants",
    "faculty_list",
    "events",
];

/// Environment variable overriding [`SeedConfig::hash_salt`].
pub const HASH_SALT_ENV: &str = "REDI_HASH_SALT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {message}")]
    Invalid { message: String },
}

/// Extract file names, relative to the input directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceFiles {
    pub org_units: String,
    pub census: String,
    pub transfers: String,
    pub als_certification: String,
    pub bls_certification: String,
    pub participants: String,
    pub faculty_list: String,
    pub events: String,
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self {
            org_units: "orgunits.xlsx".to_string(),
            census: "PF_Current_RBWH_Inpatients.xlsx".to_string(),
            transfers: "RBWH_PrevDay_Transfers_from_Other_Hospitals_to_Facility-2026-02-03.xlsx"
                .to_string(),
            als_certification: "ALS_Cert.csv".to_string(),
            bls_certification: "_Grouped__Certification_Completion_Summary_003A_Organisation_003EPerson_003ECompletion_Status.csv".to_string(),
            participants: "Participants.csv".to_string(),
            faculty_list: "FacultyList.csv".to_string(),
            events: "Events.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgUnitColumnsConfig {
    pub id: String,
    pub name: String,
    pub directorate: String,
    pub service_line: String,
}

impl Default for OrgUnitColumnsConfig {
    fn default() -> Self {
        let columns = OrgUnitColumns::default();
        Self {
            id: columns.id,
            name: columns.name,
            directorate: columns.directorate,
            service_line: columns.service_line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CensusColumnsConfig {
    pub ward: String,
    pub unit: String,
}

impl Default for CensusColumnsConfig {
    fn default() -> Self {
        let columns = CensusColumns::default();
        Self {
            ward: columns.ward,
            unit: columns.unit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferColumnsConfig {
    pub unit: String,
    pub division: String,
    pub subdivision: String,
    /// 1-based worksheet row holding the headers; the report has a title block above it.
    pub header_row: usize,
}

impl Default for TransferColumnsConfig {
    fn default() -> Self {
        let columns = TransferColumns::default();
        Self {
            unit: columns.unit,
            division: columns.division,
            subdivision: columns.subdivision,
            header_row: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub files: SourceFiles,
    pub org_unit_columns: OrgUnitColumnsConfig,
    pub census_columns: CensusColumnsConfig,
    pub transfer_columns: TransferColumnsConfig,
    pub events_date_format: String,
    pub faculty_date_format: String,
    pub hash_salt: String,
    /// Worksheet per source for spreadsheet extracts; unnamed sources read
    /// the first sheet.
    pub sheets: BTreeMap<String, String>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            files: SourceFiles::default(),
            org_unit_columns: OrgUnitColumnsConfig::default(),
            census_columns: CensusColumnsConfig::default(),
            transfer_columns: TransferColumnsConfig::default(),
            events_date_format: DAY_ABBREVIATED_MONTH_YEAR.to_string(),
            faculty_date_format: DAY_MONTH_YEAR_NUMERIC.to_string(),
            hash_salt: DEFAULT_HASH_SALT.to_string(),
            sheets: BTreeMap::new(),
        }
    }
}

impl SeedConfig {
    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: SeedConfig = toml::from_str(content).map_err(|source| ConfigError::Toml {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or use the defaults when no path is given.
    ///
    /// The salt is then overridden by `REDI_HASH_SALT` when that is set.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                let config = Self::from_toml_str(&content, path)?;
                tracing::info!(path = %path.display(), "loaded config");
                config
            }
            None => Self::default(),
        };
        Ok(config.with_salt_override(env::var(HASH_SALT_ENV).ok()))
    }

    /// Replace the salt with a non-blank override.
    #[must_use]
    pub fn with_salt_override(mut self, salt: Option<String>) -> Self {
        if let Some(salt) = salt.filter(|value| !value.trim().is_empty()) {
            self.hash_salt = salt;
        }
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.transfer_columns.header_row == 0 {
            return Err(ConfigError::Invalid {
                message: "transfer_columns.header_row is 1-based and must be at least 1"
                    .to_string(),
            });
        }
        for (name, format) in [
            ("events_date_format", &self.events_date_format),
            ("faculty_date_format", &self.faculty_date_format),
        ] {
            if format.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    message: format!("{name} must not be empty"),
                });
            }
        }
        for (source, sheet) in &self.sheets {
            if !SOURCE_NAMES.contains(&source.as_str()) {
                return Err(ConfigError::Invalid {
                    message: format!("sheets.{source} does not name a source"),
                });
            }
            if sheet.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    message: format!("sheets.{source} must not be empty"),
                });
            }
        }
        Ok(())
    }

    /// Worksheet configured for `source`, if any.
    pub fn sheet_for(&self, source: &str) -> Option<&str> {
        self.sheets.get(source).map(String::as_str)
    }

    /// Extract layout handed to the pipeline.
    pub fn settings(&self) -> SeedSettings {
        SeedSettings {
            org_unit_columns: OrgUnitColumns {
                id: self.org_unit_columns.id.clone(),
                name: self.org_unit_columns.name.clone(),
                directorate: self.org_unit_columns.directorate.clone(),
                service_line: self.org_unit_columns.service_line.clone(),
            },
            census_columns: CensusColumns {
                ward: self.census_columns.ward.clone(),
                unit: self.census_columns.unit.clone(),
            },
            transfer_columns: TransferColumns {
                unit: self.transfer_columns.unit.clone(),
                division: self.transfer_columns.division.clone(),
                subdivision: self.transfer_columns.subdivision.clone(),
            },
            events_date_format: self.events_date_format.clone(),
            faculty_date_format: self.faculty_date_format.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_serializable() {
        let toml = toml::to_string_pretty(&SeedConfig::default());
        assert!(toml.is_ok());
    }

    #[test]
    fn blank_salt_override_is_ignored() {
        let config = SeedConfig::default().with_salt_override(Some("  ".to_string()));
        assert_eq!(config.hash_salt, DEFAULT_HASH_SALT);
    }
}
