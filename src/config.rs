use crate::error::{Result, VibratorError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "vibrator_config.json";

pub const TIMED_OUTPUT_ENABLE: &str = "/sys/class/timed_output/vibrator/enable";
pub const LED_DIR: &str = "/sys/class/leds/vibrator";
pub const INPUT_DIR: &str = "/dev/input";

/// Input device names known to be vibration actuators, matched by prefix
pub const FF_VIBRATORS: &[&str] = &["sc27xx:vibrator"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VibratorConfig {
    /// timed_output control file
    pub timed_output_enable: PathBuf,
    /// LED trigger directory holding `state`, `duration` and `activate`
    pub led_dir: PathBuf,
    /// Directory scanned for `eventN` nodes
    pub input_dir: PathBuf,
    pub ff_names: Vec<String>,
}

impl Default for VibratorConfig {
    fn default() -> Self {
        Self {
            timed_output_enable: PathBuf::from(TIMED_OUTPUT_ENABLE),
            led_dir: PathBuf::from(LED_DIR),
            input_dir: PathBuf::from(INPUT_DIR),
            ff_names: FF_VIBRATORS.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl VibratorConfig {
    pub fn parse(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| VibratorError::Config(e.to_string()))
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    log::error!("Failed to parse config: {}", e);
                    None
                }
            },
            Err(e) => {
                log::error!("Failed to read config file: {}", e);
                None
            }
        }
    }

    pub fn load() -> Option<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_FILENAME)
    }
}
