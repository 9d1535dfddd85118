// crates/oraplan-core/src/core/options.rs
// ============================================================================
// Module: Oraplan Option Document
// Description: Externally supplied parameter and option group definitions.
// Purpose: Model the option document with load-time validation and SSL selection.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The option document is an external JSON file supplying the parameter-group
//! parameter list and two option lists, one of which is selected by the SSL
//! flag. The document is validated once at load time and never re-parsed per
//! resource. Omitted option ports resolve to the documented defaults.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default listener port for options from the non-SSL list.
pub const DEFAULT_NON_SSL_PORT: u16 = 1521;

/// Default listener port for options from the SSL list.
pub const DEFAULT_SSL_PORT: u16 = 2484;

// ============================================================================
// SECTION: Parameter Specifications
// ============================================================================

/// Parameter apply method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplyMethod {
    /// Apply immediately.
    #[default]
    Immediate,
    /// Apply on the next reboot.
    PendingReboot,
}

/// One parameter-group parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Parameter name.
    pub name: String,
    /// Parameter value.
    pub value: String,
    /// Apply method; defaults to immediate.
    #[serde(default)]
    pub apply_method: ApplyMethod,
}

// ============================================================================
// SECTION: Option Specifications
// ============================================================================

/// Nested option setting key/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSetting {
    /// Setting name.
    pub name: String,
    /// Setting value.
    pub value: String,
}

/// One option-group option as defined in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Option name.
    pub option_name: String,
    /// Optional listener port; defaults per list when omitted.
    #[serde(default)]
    pub port: Option<u16>,
    /// Optional option version.
    #[serde(default)]
    pub version: Option<String>,
    /// Nested settings.
    #[serde(default)]
    pub settings: Vec<OptionSetting>,
}

/// Option with its port default applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedOption {
    /// Option name.
    pub option_name: String,
    /// Listener port after defaulting.
    pub port: u16,
    /// Optional option version.
    pub version: Option<String>,
    /// Nested settings.
    pub settings: Vec<OptionSetting>,
}

// ============================================================================
// SECTION: Option Document
// ============================================================================

/// Externally supplied option/parameter document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionDoc {
    /// Parameter-group parameters, consumed unconditionally.
    pub parameter_group_parameters: Vec<ParameterSpec>,
    /// Default option list, selected when SSL is disabled.
    pub option_group_options: Vec<OptionSpec>,
    /// SSL option list, selected when SSL is enabled.
    pub ssl_option: Vec<OptionSpec>,
}

impl OptionDoc {
    /// Validates the document invariants.
    ///
    /// # Errors
    ///
    /// Returns [`OptionDocError`] when validation fails.
    pub fn validate(&self) -> Result<(), OptionDocError> {
        ensure_unique_parameters(&self.parameter_group_parameters)?;
        ensure_well_formed_options("option_group_options", &self.option_group_options)?;
        ensure_well_formed_options("ssl_option", &self.ssl_option)?;
        Ok(())
    }

    /// Returns the option list selected by the SSL flag.
    #[must_use]
    pub fn select_options(&self, enable_ssl: bool) -> &[OptionSpec] {
        if enable_ssl { &self.ssl_option } else { &self.option_group_options }
    }

    /// Returns the selected option list with port defaults applied.
    #[must_use]
    pub fn resolved_options(&self, enable_ssl: bool) -> Vec<ResolvedOption> {
        let default_port = if enable_ssl { DEFAULT_SSL_PORT } else { DEFAULT_NON_SSL_PORT };
        self.select_options(enable_ssl)
            .iter()
            .map(|option| ResolvedOption {
                option_name: option.option_name.clone(),
                port: option.port.unwrap_or(default_port),
                version: option.version.clone(),
                settings: option.settings.clone(),
            })
            .collect()
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Option document validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionDocError {
    /// A parameter name is empty.
    #[error("parameter name must be non-empty")]
    EmptyParameterName,
    /// Duplicate parameter names detected.
    #[error("duplicate parameter name: {0}")]
    DuplicateParameter(String),
    /// An option name is empty.
    #[error("{0} contains an option with an empty name")]
    EmptyOptionName(String),
    /// Duplicate option names within one list.
    #[error("{list} contains duplicate option: {option}")]
    DuplicateOption {
        /// Offending list name.
        list: String,
        /// Duplicated option name.
        option: String,
    },
    /// An option setting name is empty.
    #[error("option {0} contains a setting with an empty name")]
    EmptySettingName(String),
}

// ============================================================================
// SECTION: Validation Helpers
// ============================================================================

/// Ensures parameter names are unique and non-empty.
fn ensure_unique_parameters(parameters: &[ParameterSpec]) -> Result<(), OptionDocError> {
    for (index, parameter) in parameters.iter().enumerate() {
        if parameter.name.trim().is_empty() {
            return Err(OptionDocError::EmptyParameterName);
        }
        if parameters.iter().skip(index + 1).any(|other| other.name == parameter.name) {
            return Err(OptionDocError::DuplicateParameter(parameter.name.clone()));
        }
    }
    Ok(())
}

/// Ensures option names and settings are well formed within one list.
fn ensure_well_formed_options(list: &str, options: &[OptionSpec]) -> Result<(), OptionDocError> {
    for (index, option) in options.iter().enumerate() {
        if option.option_name.trim().is_empty() {
            return Err(OptionDocError::EmptyOptionName(list.to_string()));
        }
        if options.iter().skip(index + 1).any(|other| other.option_name == option.option_name) {
            return Err(OptionDocError::DuplicateOption {
                list: list.to_string(),
                option: option.option_name.clone(),
            });
        }
        for setting in &option.settings {
            if setting.name.trim().is_empty() {
                return Err(OptionDocError::EmptySettingName(option.option_name.clone()));
            }
        }
    }
    Ok(())
}
