use crate::Result;
use crate::api::Policy;
use crate::store::Binding;
use crate::webhook::UnprocessedAction;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up when none is given
pub const DEFAULT_CONFIG_FILE: &str = "certpolicy.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Longest time a single review may take before it is refused as an internal error
    #[serde(default = "default_review_timeout", with = "humantime_serde")]
    pub review_timeout: Duration,

    /// What to answer when no policy applies to a request
    #[serde(default)]
    pub on_unprocessed: UnprocessedAction,

    /// The policies requests are reviewed against
    #[serde(default)]
    pub policies: Vec<Policy>,

    /// Who may use which policies
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

const fn default_review_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `certpolicy.toml` in `base_dir` is used if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading certpolicy configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading certpolicy configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is zero, a policy name is empty or repeated, or a
    /// binding grants nothing to anyone
    pub fn validate(&self) -> Result<()> {
        if self.review_timeout.is_zero() {
            return Err(app_err!("review_timeout must be greater than zero"));
        }

        let mut names = HashSet::new();
        for policy in &self.policies {
            if policy.name.is_empty() {
                return Err(app_err!("every policy must have a name"));
            }

            if !names.insert(policy.name.as_str()) {
                return Err(app_err!("policy '{}' is defined more than once", policy.name));
            }
        }

        for binding in &self.bindings {
            if binding.policy.is_empty() {
                return Err(app_err!("every binding must name a policy pattern"));
            }

            if binding.users.is_empty() && binding.groups.is_empty() {
                return Err(app_err!("binding for policy '{}' must list at least one user or group", binding.policy));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            review_timeout: default_review_timeout(),
            on_unprocessed: UnprocessedAction::default(),
            policies: Vec::new(),
            bindings: Vec::new(),
        }
    }
}
