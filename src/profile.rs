//! Authoring profiles for template metadata
//!
//! Every catalog template carries the same metadata stamp (who last touched
//! it, when, and a revision tag). Rather than hardcode that per template, a
//! profile holds it once and can be swapped out via a TOML file, so one team
//! renders templates stamped with its own details.

use std::path::Path;

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Errors that can occur when loading or parsing profiles
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("failed to read profile file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse profile TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Metadata stamped into every rendered template
#[derive(Debug, Clone)]
pub struct Profile {
    /// Free-form remarks, usually empty
    pub comments: String,
    /// Date of last template revision, as the team writes dates
    pub last_updated: String,
    /// Who made that revision
    pub updated_by: String,
    /// Template revision tag
    pub version: String,
}

/// TOML structure for deserializing profiles
#[derive(Deserialize)]
struct TomlProfile {
    metadata: TomlMetadata,
}

#[derive(Deserialize)]
struct TomlMetadata {
    comments: Option<String>,
    last_updated: Option<String>,
    updated_by: Option<String>,
    version: Option<String>,
}

const DEFAULT_PROFILE: &str = r#"
[metadata]
comments = ""
last_updated = "2017 01 24"
updated_by = "infra"
version = "1"
"#;

impl Profile {
    /// Load a profile from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a profile from a TOML string. Missing fields fall back to the
    /// built-in defaults.
    pub fn from_str(content: &str) -> Result<Self, ProfileError> {
        let parsed: TomlProfile = toml::from_str(content)?;
        let base = Self::default();
        Ok(Profile {
            comments: parsed.metadata.comments.unwrap_or(base.comments),
            last_updated: parsed.metadata.last_updated.unwrap_or(base.last_updated),
            updated_by: parsed.metadata.updated_by.unwrap_or(base.updated_by),
            version: parsed.metadata.version.unwrap_or(base.version),
        })
    }

    /// The metadata bag this profile stamps into a template
    pub fn stamp(&self) -> serde_json::Value {
        json!({
            "Comments": self.comments,
            "LastUpdated": self.last_updated,
            "UpdatedBy": self.updated_by,
            "Version": self.version,
        })
    }
}

impl Default for Profile {
    fn default() -> Self {
        let parsed: TomlProfile =
            toml::from_str(DEFAULT_PROFILE).expect("default profile should be valid TOML");
        Profile {
            comments: parsed.metadata.comments.unwrap_or_default(),
            last_updated: parsed.metadata.last_updated.unwrap_or_default(),
            updated_by: parsed.metadata.updated_by.unwrap_or_default(),
            version: parsed.metadata.version.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = Profile::default();
        assert_eq!(profile.version, "1");
        assert_eq!(profile.updated_by, "infra");
    }

    #[test]
    fn test_stamp_shape() {
        let profile = Profile::default();
        let stamp = profile.stamp();
        assert_eq!(stamp["Version"], "1");
        assert_eq!(stamp["Comments"], "");
        assert!(stamp["LastUpdated"].is_string());
        assert!(stamp["UpdatedBy"].is_string());
    }

    #[test]
    fn test_parse_toml_with_overrides() {
        let toml_str = r#"
[metadata]
updated_by = "platform team"
version = "2"
"#;
        let profile = Profile::from_str(toml_str).expect("should parse");
        assert_eq!(profile.updated_by, "platform team");
        assert_eq!(profile.version, "2");
        // Unset fields keep defaults
        assert_eq!(profile.last_updated, "2017 01 24");
    }

    #[test]
    fn test_invalid_toml_error() {
        let invalid = "this is not valid toml {{{{";
        let result = Profile::from_str(invalid);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_metadata_table_error() {
        let result = Profile::from_str("");
        assert!(result.is_err());
    }
}
