use crate::config::AudioAssets;
use crate::denomination::Denomination;
use crate::device_audio::interface::{AudioHandle, DeviceAudio};
use crate::library::logger::interface::Logger;
use std::sync::Arc;

/// Sole owner of the playing clip.
///
/// At most one handle is alive: the previous one is released before the
/// next is created, and whatever is left is released on drop. Once closed,
/// announcements are dropped so nothing plays past teardown.
pub struct AudioController {
    device_audio: Arc<dyn DeviceAudio + Send + Sync>,
    assets: AudioAssets,
    logger: Arc<dyn Logger + Send + Sync>,
    active: Option<Box<dyn AudioHandle>>,
    closed: bool,
}

impl AudioController {
    pub fn new(
        device_audio: Arc<dyn DeviceAudio + Send + Sync>,
        assets: AudioAssets,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            device_audio,
            assets,
            logger: logger.with_namespace("audio_controller"),
            active: None,
            closed: false,
        }
    }

    pub fn announce(
        &mut self,
        denomination: Denomination,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.closed {
            let _ = self
                .logger
                .info(&format!("Screen closed, not announcing {}", denomination));
            return Ok(());
        }

        self.release();

        let asset = self.assets.path_for(denomination);
        let handle = self.device_audio.play(&asset)?;
        self.active = Some(handle);
        Ok(())
    }

    pub fn release(&mut self) {
        if let Some(handle) = self.active.take() {
            if !handle.is_finished() {
                let _ = self.logger.info("Stopping previous clip");
            }
            drop(handle);
        }
    }

    /// Releases the clip and refuses any later announcement.
    pub fn close(&mut self) {
        self.closed = true;
        self.release();
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

impl Drop for AudioController {
    fn drop(&mut self) {
        self.release();
    }
}
