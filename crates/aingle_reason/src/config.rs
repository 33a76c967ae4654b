//! Configuration for the reasoning engines.
//!
//! Every engine is driven by a small, serializable config holding nothing but
//! resource bounds and validation switches. None of it changes the logical
//! result of a call that stays within its bounds.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-level configuration grouping the settings of all three engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReasonerConfig {
    /// Bounds for resolution saturation.
    pub resolution: ResolutionConfig,
    /// Bounds for abductive backward chaining.
    pub abduction: AbductionConfig,
    /// Settings for FOIL rule induction.
    pub induction: InductionConfig,
    /// When set, engines validate their inputs eagerly and reject malformed
    /// literals, costs and examples instead of reasoning over them.
    pub strict: bool,
}

impl ReasonerConfig {
    /// Returns the default bounds with eager input validation enabled.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Returns a configuration with tight bounds, suitable for untrusted input.
    pub fn bounded() -> Self {
        Self {
            resolution: ResolutionConfig {
                max_rounds: 16,
                max_clauses: 4_096,
            },
            abduction: AbductionConfig { max_depth: 32 },
            induction: InductionConfig {
                variable: "X".to_string(),
                max_rules: 64,
            },
            strict: true,
        }
    }

    /// Checks that every bound is usable.
    pub fn validate(&self) -> Result<()> {
        self.resolution.validate()?;
        self.abduction.validate()?;
        self.induction.validate()
    }

    /// Parses and validates a configuration from JSON. Missing fields take
    /// their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration into pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::from)
    }

    /// Loads and validates a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Bounds for the resolution entailment engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Maximum number of saturation rounds before giving up.
    pub max_rounds: usize,
    /// Maximum size of the working clause set.
    pub max_clauses: usize,
}

impl ResolutionConfig {
    /// Checks that both bounds are non-zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_rounds == 0 {
            return Err(Error::Config("resolution.max_rounds must be > 0".into()));
        }
        if self.max_clauses == 0 {
            return Err(Error::Config("resolution.max_clauses must be > 0".into()));
        }
        Ok(())
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            max_rounds: 100,
            max_clauses: 100_000,
        }
    }
}

/// Bounds for the Horn abduction engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbductionConfig {
    /// Maximum backward-chaining depth. The cycle guard already bounds depth by
    /// the number of distinct atoms; this caps it for very long rule chains.
    /// A goal whose only derivations run deeper than this is rejected with
    /// `Error::MaxDepthExceeded`, even when the chain itself is acyclic.
    pub max_depth: usize,
}

impl AbductionConfig {
    /// Checks that the depth bound is non-zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Error::Config("abduction.max_depth must be > 0".into()));
        }
        Ok(())
    }
}

impl Default for AbductionConfig {
    fn default() -> Self {
        Self { max_depth: 1_024 }
    }
}

/// Settings for the FOIL rule learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InductionConfig {
    /// Name of the single variable shared by rule heads and bodies.
    pub variable: String,
    /// Maximum number of rules a single learning run may emit.
    pub max_rules: usize,
}

impl InductionConfig {
    /// Checks that the variable is named and the rule limit is non-zero.
    pub fn validate(&self) -> Result<()> {
        if self.variable.trim().is_empty() {
            return Err(Error::Config("induction.variable must not be empty".into()));
        }
        if self.max_rules == 0 {
            return Err(Error::Config("induction.max_rules must be > 0".into()));
        }
        Ok(())
    }
}

impl Default for InductionConfig {
    fn default() -> Self {
        Self {
            variable: "X".to_string(),
            max_rules: 1_000,
        }
    }
}
