use std::path::Path;

/// One clip that is (or was) playing. Dropping the handle stops playback and
/// frees the output resources behind it.
pub trait AudioHandle: Send {
    fn is_finished(&self) -> bool;
}

pub trait DeviceAudio: Send + Sync {
    /// Starts the clip at `asset` and returns at once.
    fn play(
        &self,
        asset: &Path,
    ) -> Result<Box<dyn AudioHandle>, Box<dyn std::error::Error + Send + Sync>>;
}
