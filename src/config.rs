//! Container configuration.
//!
//! Values come from code, from `WIRING_*` environment variables, or (with the
//! `config` feature) from JSON.

use std::env;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::{ContainerError, ContainerResult};

pub const ENV_MAX_DEPTH: &str = "WIRING_MAX_DEPTH";
pub const ENV_DETECT_CYCLES: &str = "WIRING_DETECT_CYCLES";
pub const ENV_PHASE_ORDER: &str = "WIRING_PHASE_ORDER";
pub const ENV_VALIDATE_INTERFACES: &str = "WIRING_VALIDATE_INTERFACES";

const DEFAULT_MAX_DEPTH: usize = 1024;

/// Order of the post-construction phases.
///
/// Both orders start with construction and inflection and end with
/// memoization followed by the `resolved` hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "kebab-case"))]
pub enum PhaseOrder {
    /// construct, inflect, decorate, `resolving` hooks.
    #[default]
    DecorateFirst,
    /// construct, inflect, `resolving` hooks, decorate.
    HooksFirst,
}

impl fmt::Display for PhaseOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseOrder::DecorateFirst => f.write_str("decorate-first"),
            PhaseOrder::HooksFirst => f.write_str("hooks-first"),
        }
    }
}

impl FromStr for PhaseOrder {
    type Err = ContainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "decorate-first" => Ok(PhaseOrder::DecorateFirst),
            "hooks-first" => Ok(PhaseOrder::HooksFirst),
            other => Err(ContainerError::Config(format!("unknown phase order '{}'", other))),
        }
    }
}

/// Tunables for a [`Container`](crate::Container).
///
/// # Examples
///
/// ```rust
/// use wiring::{Container, ContainerConfig, PhaseOrder};
///
/// let config = ContainerConfig::default()
///     .with_max_depth(64)
///     .with_phase_order(PhaseOrder::HooksFirst);
///
/// let container = Container::builder().config(config).build();
/// assert_eq!(container.config().max_depth, 64);
/// assert!(container.config().detect_cycles);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContainerConfig {
    /// Maximum number of nested resolutions on one thread.
    pub max_depth: usize,
    /// Fail fast with `CyclicDependency` when an identifier re-enters itself.
    pub detect_cycles: bool,
    pub phase_order: PhaseOrder,
    /// Check interface bindings against the type registry at bind time.
    pub validate_interface_bindings: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            detect_cycles: true,
            phase_order: PhaseOrder::default(),
            validate_interface_bindings: true,
        }
    }
}

impl ContainerConfig {
    /// Defaults overlaid with any `WIRING_*` variables that are set.
    pub fn from_env() -> ContainerResult<Self> {
        let mut config = Self::default();

        if let Some(depth) = read_var(ENV_MAX_DEPTH)? {
            config.max_depth = depth;
        }
        if let Some(raw) = env_string(ENV_DETECT_CYCLES) {
            config.detect_cycles = parse_flag(ENV_DETECT_CYCLES, &raw)?;
        }
        if let Some(order) = read_var(ENV_PHASE_ORDER)? {
            config.phase_order = order;
        }
        if let Some(raw) = env_string(ENV_VALIDATE_INTERFACES) {
            config.validate_interface_bindings = parse_flag(ENV_VALIDATE_INTERFACES, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON object; missing fields keep their defaults.
    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> ContainerResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ContainerError::Config(format!("invalid json: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_cycle_detection(mut self, enabled: bool) -> Self {
        self.detect_cycles = enabled;
        self
    }

    pub fn with_phase_order(mut self, order: PhaseOrder) -> Self {
        self.phase_order = order;
        self
    }

    pub fn with_interface_validation(mut self, enabled: bool) -> Self {
        self.validate_interface_bindings = enabled;
        self
    }

    fn validate(&self) -> ContainerResult<()> {
        if self.max_depth == 0 {
            return Err(ContainerError::Config("max_depth must be at least 1".into()));
        }
        Ok(())
    }
}

fn env_string(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn read_var<T>(name: &str) -> ContainerResult<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    env_string(name)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ContainerError::Config(format!("{}: {}", name, e)))
        })
        .transpose()
}

fn parse_flag(name: &str, raw: &str) -> ContainerResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ContainerError::Config(format!(
            "{}: expected a boolean, got '{}'",
            name, other
        ))),
    }
}
