//! # Keyword Requirement Levels
//!
//! A keyword's requirement level governs when its absence from a header is
//! a validation finding.

use serde::{Deserialize, Serialize};

/// Requirement level of a keyword in a FITS header.
///
/// - `All`: required in every HDU.
/// - `Primary`: required in the primary (first) HDU only.
/// - `Obs`: mandatory for fully SOLARNET-compliant Obs-HDUs.
/// - `Optional`: never required, but trackable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementLevel {
    All,
    Primary,
    Obs,
    Optional,
}

impl RequirementLevel {
    /// The schema-document spelling of this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequirementLevel::All => "all",
            RequirementLevel::Primary => "primary",
            RequirementLevel::Obs => "obs",
            RequirementLevel::Optional => "optional",
        }
    }

    /// Whether a keyword at this level is required in a header with the
    /// given HDU role.
    pub fn applies_to(&self, is_primary: bool, is_obs: bool) -> bool {
        match self {
            RequirementLevel::All => true,
            RequirementLevel::Primary => is_primary,
            RequirementLevel::Obs => is_obs,
            RequirementLevel::Optional => false,
        }
    }
}

impl std::fmt::Display for RequirementLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
