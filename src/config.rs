// Card configuration: who the card is about, where the links point and
// how the animations are paced. Built once at startup (defaults, optionally
// overridden by a JSON file) and only ever read afterwards.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// Environment variable pointing at a JSON config file.
pub const CONFIG_ENV: &str = "DEVCARD_CONFIG";

/// What the session does after an action fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the session and exit with status 1.
    #[default]
    Abort,
    /// Report the failure and show the menu again.
    Continue,
}

pub const GITHUB_BASE: &str = "https://github.com/";
pub const LINKEDIN_BASE: &str = "https://linkedin.com/in/";

/// Text shown on the card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub handle: String,
    pub role: String,
    pub organization: String,
    pub github_user: String,
    pub linkedin_user: String,
    pub website: String,
    pub card_command: String,
    pub taglines: Vec<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            name: "Lohit Kolluri".into(),
            handle: "@lohitkolluri".into(),
            role: "Student At".into(),
            organization: "SRM University".into(),
            github_user: "lohitkolluri".into(),
            linkedin_user: "kollurilohit".into(),
            website: "https://lohitkolluri.vercel.app/".into(),
            card_command: "npx lohitkolluri".into(),
            taglines: vec![
                "🚀 Currently looking for new opportunities.".into(),
                "Feel free to reach out or say hi, I'll respond as soon as possible!".into(),
            ],
        }
    }
}

impl Profile {
    pub fn github_url(&self) -> String {
        format!("{GITHUB_BASE}{}", self.github_user)
    }

    pub fn linkedin_url(&self) -> String {
        format!("{LINKEDIN_BASE}{}", self.linkedin_user)
    }
}

/// Targets of the menu actions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Links {
    /// `mailto:` URI. A bare address is accepted and normalised.
    pub email: String,
    pub resume_url: String,
    pub meeting_url: String,
}

impl Default for Links {
    fn default() -> Self {
        Links {
            email: "mailto:lohitkolluri@gmail.com".into(),
            resume_url:
                "https://lohitcdn.blob.core.windows.net/portfoliocdn/Etc/Lohit-Kolluri-Resume-Latest.pdf"
                    .into(),
            meeting_url: "https://calendly.com/lohitkolluri/30min".into(),
        }
    }
}

/// Delays used purely for animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// Delay between characters of typed-out messages.
    pub char_delay_ms: u64,
    /// Pause after a spinner starts, so it is visible at all.
    pub step_delay_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing {
            char_delay_ms: 18,
            step_delay_ms: 400,
        }
    }
}

impl Pacing {
    pub fn char_delay(&self) -> Duration {
        Duration::from_millis(self.char_delay_ms)
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub profile: Profile,
    pub links: Links,
    /// Name of the downloaded résumé inside the working directory.
    pub resume_file_name: String,
    pub pacing: Pacing,
    pub on_failure: FailurePolicy,
}

impl Default for CardConfig {
    fn default() -> Self {
        CardConfig {
            profile: Profile::default(),
            links: Links::default(),
            resume_file_name: "Lohit-Kolluri-Resume.pdf".into(),
            pacing: Pacing::default(),
            on_failure: FailurePolicy::default(),
        }
    }
}

impl CardConfig {
    /// Load the configuration from `DEVCARD_CONFIG`, or from
    /// `<config_dir>/devcard/config.json` when that file exists, or fall
    /// back to the built-in card.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => {
                log::info!("loading card config from {}", path.display());
                Self::from_file(&path)
            }
            None => {
                log::info!("no config file found, using built-in card");
                Ok(CardConfig::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|err| match err {
            ParseOrInvalid::Parse(source) => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            ParseOrInvalid::Invalid(err) => err,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, ParseOrInvalid> {
        let config: CardConfig = serde_json::from_str(raw).map_err(ParseOrInvalid::Parse)?;
        config.normalized().map_err(ParseOrInvalid::Invalid)
    }

    /// Normalise the email link and validate every field the actions rely on.
    pub fn normalized(mut self) -> Result<Self, ConfigError> {
        let email = self.links.email.trim();
        if !email.is_empty() && !email.starts_with("mailto:") {
            self.links.email = format!("mailto:{email}");
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_empty("profile.name", &self.profile.name)?;
        check_url("links.email", &self.links.email)?;
        check_url("links.resume_url", &self.links.resume_url)?;
        check_url("links.meeting_url", &self.links.meeting_url)?;
        check_url("profile.website", &self.profile.website)?;
        non_empty("profile.github_user", &self.profile.github_user)?;

        let name = self.resume_file_name.as_str();
        non_empty("resume_file_name", name)?;
        if Path::new(name).file_name().and_then(|n| n.to_str()) != Some(name) {
            return Err(ConfigError::FileName(name.to_string()));
        }
        Ok(())
    }
}

/// Error from `CardConfig::from_json`, split so file loading can attach
/// the path to syntax errors.
#[derive(Debug)]
pub enum ParseOrInvalid {
    Parse(serde_json::Error),
    Invalid(ConfigError),
}

fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    let default = dirs::config_dir()?.join("devcard").join("config.json");
    default.is_file().then_some(default)
}

fn non_empty(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Empty { field });
    }
    Ok(())
}

fn check_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    non_empty(field, value)?;
    Url::parse(value).map_err(|source| ConfigError::Url {
        field,
        value: value.to_string(),
        source,
    })?;
    Ok(())
}
