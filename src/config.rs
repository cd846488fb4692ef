use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    description::define_gesture,
    gesture::{DEFAULT_THRESHOLD, GestureClassifier, ScoreScale},
    library::GestureLibrary,
    types::{Finger, FingerCurl, FingerDirection},
};

pub const CONFIG_ENV: &str = "FINGERSPELL_CONFIG";
pub const THRESHOLD_ENV: &str = "FINGERSPELL_THRESHOLD";

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    threshold: Option<f32>,
    score_scale: Option<ScoreScale>,
    builtin_gestures: Option<bool>,
    #[serde(default)]
    gestures: Vec<GestureFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GestureFile {
    name: String,
    #[serde(default)]
    rules: Vec<RuleFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleFile {
    fingers: Vec<Finger>,
    curl: Option<FingerCurl>,
    direction: Option<FingerDirection>,
    weight: f32,
}

/// Classifier settings: file values, then environment, then caller
/// overrides.
#[derive(Debug, Clone)]
pub struct Settings {
    pub threshold: f32,
    pub score_scale: ScoreScale,
    pub library: Arc<GestureLibrary>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            score_scale: ScoreScale::Raw,
            library: GestureLibrary::builtin(),
        }
    }
}

impl Settings {
    /// Reads the file named by `FINGERSPELL_CONFIG` (if any) and applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    pub fn load_with(env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let path = env(CONFIG_ENV)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        Self::load_from(path.as_deref(), env)
    }

    /// Reads `path` when given, otherwise starts from the defaults, then
    /// applies environment overrides.
    pub fn load_from(path: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        settings.apply_env(env)?;
        Ok(settings)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(raw)?;
        Self::from_file(file)
    }

    fn from_file(file: ConfigFile) -> Result<Self> {
        let mut library = if file.builtin_gestures.unwrap_or(true) {
            GestureLibrary::with_alphabet()?
        } else {
            GestureLibrary::new()
        };

        for gesture in file.gestures {
            let mut builder = define_gesture(gesture.name.as_str())?;
            for rule in &gesture.rules {
                if rule.curl.is_none() && rule.direction.is_none() {
                    return Err(anyhow!(
                        "rule in gesture `{}` needs a curl or a direction",
                        gesture.name
                    ));
                }
                for &finger in &rule.fingers {
                    if let Some(curl) = rule.curl {
                        builder.add_curl(finger, curl, rule.weight)?;
                    }
                    if let Some(direction) = rule.direction {
                        builder.add_direction(finger, direction, rule.weight)?;
                    }
                }
            }
            library.register(builder.build())?;
        }
        log::debug!("configured {} gestures", library.len());

        let settings = Self {
            threshold: file.threshold.unwrap_or(DEFAULT_THRESHOLD),
            score_scale: file.score_scale.unwrap_or_default(),
            library: Arc::new(library),
        };
        settings.validate()?;
        Ok(settings)
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(threshold) = env(THRESHOLD_ENV) {
            if !threshold.trim().is_empty() {
                self.threshold = threshold
                    .trim()
                    .parse()
                    .map_err(|_| anyhow!("{THRESHOLD_ENV} must be a number, got `{threshold}`"))?;
            }
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.library.is_empty() {
            return Err(anyhow!("no gestures configured"));
        }
        if !self.threshold.is_finite() {
            return Err(anyhow!("threshold must be finite, got {}", self.threshold));
        }
        Ok(())
    }

    pub fn classifier(&self) -> Result<GestureClassifier> {
        Ok(GestureClassifier::with_scale(
            self.library.clone(),
            self.threshold,
            self.score_scale,
        )?)
    }
}
