use crate::device_audio::interface::{AudioHandle, DeviceAudio};
use crate::library::logger::interface::Logger;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Logs instead of making sound. Used where no audio output is available.
pub struct DeviceAudioConsole {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceAudioConsole {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("audio").with_namespace("console"),
        }
    }
}

struct ConsoleHandle {
    asset: PathBuf,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl AudioHandle for ConsoleHandle {
    fn is_finished(&self) -> bool {
        true
    }
}

impl Drop for ConsoleHandle {
    fn drop(&mut self) {
        let _ = self
            .logger
            .info(&format!("Released {}", self.asset.display()));
    }
}

impl DeviceAudio for DeviceAudioConsole {
    fn play(
        &self,
        asset: &Path,
    ) -> Result<Box<dyn AudioHandle>, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!("♪ {}", asset.display()))?;
        Ok(Box::new(ConsoleHandle {
            asset: asset.to_path_buf(),
            logger: Arc::clone(&self.logger),
        }))
    }
}
