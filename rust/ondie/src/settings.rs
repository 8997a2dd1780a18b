// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Environment variable consulted by [`OnDieValidatorSettings::from_env`].
pub const CHECK_REVOCATIONS_ENV: &str = "ONDIE_CHECK_REVOCATIONS";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("{name} must be a boolean (true/false, 1/0, yes/no, on/off), got {value:?}")]
    InvalidFlag { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnDieValidatorSettings {
    /// If true, every certificate in the chain must pass the CRL check before
    /// the signature is looked at.
    pub(crate) check_revocations: bool,
}

impl OnDieValidatorSettings {
    pub fn new() -> Self {
        Self {
            check_revocations: true,
        }
    }

    /// Skip revocation checking. The CRL cache is never consulted.
    pub fn without_revocation_checks(mut self) -> Self {
        self.check_revocations = false;
        self
    }

    pub fn with_revocation_checks(mut self, enabled: bool) -> Self {
        self.check_revocations = enabled;
        self
    }

    pub fn check_revocations(&self) -> bool {
        self.check_revocations
    }

    /// Defaults, overridden by `ONDIE_CHECK_REVOCATIONS` when it is set.
    pub fn from_env() -> Result<Self, SettingsError> {
        match std::env::var(CHECK_REVOCATIONS_ENV) {
            Ok(value) => Self::from_env_value(Some(&value)),
            Err(std::env::VarError::NotPresent) => Self::from_env_value(None),
            Err(std::env::VarError::NotUnicode(raw)) => Err(SettingsError::InvalidFlag {
                name: CHECK_REVOCATIONS_ENV,
                value: raw.to_string_lossy().into_owned(),
            }),
        }
    }

    /// Same as [`OnDieValidatorSettings::from_env`], with the variable's value
    /// supplied by the caller.
    pub fn from_env_value(check_revocations: Option<&str>) -> Result<Self, SettingsError> {
        let settings = Self::new();
        match check_revocations {
            None => Ok(settings),
            Some(value) => Ok(settings.with_revocation_checks(parse_flag(CHECK_REVOCATIONS_ENV, value)?)),
        }
    }
}

impl Default for OnDieValidatorSettings {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(SettingsError::InvalidFlag {
            name,
            value: value.to_string(),
        }),
    }
}
