use crate::device_audio::interface::{AudioHandle, DeviceAudio};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Counters {
    live: AtomicUsize,
    peak_live: AtomicUsize,
    played: Mutex<Vec<PathBuf>>,
}

/// Tracks how many handles are alive at once and which assets were played.
#[derive(Clone, Default)]
pub struct DeviceAudioFake {
    counters: Arc<Counters>,
    fail: bool,
}

impl DeviceAudioFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn live(&self) -> usize {
        self.counters.live.load(Ordering::SeqCst)
    }

    pub fn peak_live(&self) -> usize {
        self.counters.peak_live.load(Ordering::SeqCst)
    }

    pub fn played(&self) -> Vec<PathBuf> {
        self.counters.played.lock().unwrap().clone()
    }
}

struct FakeHandle {
    counters: Arc<Counters>,
}

impl AudioHandle for FakeHandle {
    fn is_finished(&self) -> bool {
        false
    }
}

impl Drop for FakeHandle {
    fn drop(&mut self) {
        self.counters.live.fetch_sub(1, Ordering::SeqCst);
    }
}

impl DeviceAudio for DeviceAudioFake {
    fn play(
        &self,
        asset: &Path,
    ) -> Result<Box<dyn AudioHandle>, Box<dyn std::error::Error + Send + Sync>> {
        if self.fail {
            return Err(format!("no output device for {}", asset.display()).into());
        }

        let live = self.counters.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.peak_live.fetch_max(live, Ordering::SeqCst);
        self.counters
            .played
            .lock()
            .map_err(|e| e.to_string())?
            .push(asset.to_path_buf());

        Ok(Box::new(FakeHandle {
            counters: Arc::clone(&self.counters),
        }))
    }
}
