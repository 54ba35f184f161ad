use crate::denomination::Denomination;
use chrono::{FixedOffset, Offset, Utc};
use std::path::PathBuf;

pub const ENV_PREFIX: &str = "CURRENCY_DETECTOR_";

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayKind {
    Gui,
    Console,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CameraKind {
    Fake,
    File(PathBuf),
    Webcam(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierKind {
    Fake,
    Tract,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AudioKind {
    Console,
    Rodio,
}

/// Where the six announcement clips live on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioAssets {
    pub dir: PathBuf,
    pub extension: String,
}

impl AudioAssets {
    pub fn path_for(&self, denomination: Denomination) -> PathBuf {
        self.dir
            .join(format!("{}.{}", denomination.audio_asset(), self.extension))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub model_path: PathBuf,
    pub audio_assets: AudioAssets,
    pub display: DisplayKind,
    pub camera: CameraKind,
    pub classifier: ClassifierKind,
    pub audio: AudioKind,
    pub logger_timezone: FixedOffset,
    /// Problems found while reading overrides, reported once logging is up.
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("assets/model.onnx"),
            audio_assets: AudioAssets {
                dir: PathBuf::from("assets/audio"),
                extension: "mp3".to_string(),
            },
            display: DisplayKind::Gui,
            camera: CameraKind::Fake,
            classifier: ClassifierKind::Tract,
            audio: AudioKind::Console,
            logger_timezone: india_standard_time(),
            warnings: vec![],
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(format!("{}{}", ENV_PREFIX, key)).ok())
    }

    /// Applies overrides on top of the defaults. `lookup` receives the key
    /// without the `CURRENCY_DETECTOR_` prefix.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = lookup("MODEL") {
            config.model_path = PathBuf::from(path);
        }

        if let Some(dir) = lookup("AUDIO_DIR") {
            config.audio_assets.dir = PathBuf::from(dir);
        }

        if let Some(ext) = lookup("AUDIO_EXT") {
            config.audio_assets.extension = ext.trim_start_matches('.').to_string();
        }

        if let Some(value) = lookup("DISPLAY") {
            match value.to_lowercase().as_str() {
                "gui" => config.display = DisplayKind::Gui,
                "console" => config.display = DisplayKind::Console,
                other => config.warn(format!("Unknown display '{}', using gui", other)),
            }
        }

        if let Some(value) = lookup("CAMERA") {
            match parse_camera(&value) {
                Some(camera) => config.camera = camera,
                None => config.warn(format!("Unknown camera '{}', using fake", value)),
            }
        }

        if let Some(value) = lookup("CLASSIFIER") {
            match value.to_lowercase().as_str() {
                "fake" => config.classifier = ClassifierKind::Fake,
                "tract" => config.classifier = ClassifierKind::Tract,
                other => config.warn(format!("Unknown classifier '{}', using tract", other)),
            }
        }

        if let Some(value) = lookup("AUDIO") {
            match value.to_lowercase().as_str() {
                "console" => config.audio = AudioKind::Console,
                "rodio" => config.audio = AudioKind::Rodio,
                other => config.warn(format!("Unknown audio backend '{}', using console", other)),
            }
        }

        if let Some(value) = lookup("TIMEZONE_OFFSET_MINUTES") {
            match value
                .trim()
                .parse::<i32>()
                .ok()
                .and_then(|minutes| minutes.checked_mul(60))
                .and_then(FixedOffset::east_opt)
            {
                Some(offset) => config.logger_timezone = offset,
                None => config.warn(format!("Invalid timezone offset '{}'", value)),
            }
        }

        config
    }

    fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }
}

fn parse_camera(value: &str) -> Option<CameraKind> {
    if value.eq_ignore_ascii_case("fake") {
        return Some(CameraKind::Fake);
    }
    if let Some(path) = value.strip_prefix("file:") {
        return (!path.is_empty()).then(|| CameraKind::File(PathBuf::from(path)));
    }
    if let Some(index) = value.strip_prefix("webcam:") {
        return index.parse().ok().map(CameraKind::Webcam);
    }
    if value.eq_ignore_ascii_case("webcam") {
        return Some(CameraKind::Webcam(0));
    }
    None
}

fn india_standard_time() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap_or_else(|| Utc.fix())
}
