use crate::config::{AudioAssets, Config};
use crate::currency_detector::main::CurrencyDetector;
use crate::device_audio::impl_fake::DeviceAudioFake;
use crate::device_camera::impl_fake::{DeviceCameraFake, FakeCapture};
use crate::device_display::impl_fake::DeviceDisplayFake;
use crate::device_input::impl_fake::DeviceInputFake;
use crate::device_input::interface::DeviceInputEvent;
use crate::image_classifier::impl_fake::{FakeResponse, ImageClassifierFake};
use crate::library::logger::impl_fake::LoggerFake;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub const FIFTY_SCORES: [f32; 6] = [0.01, 0.02, 0.90, 0.03, 0.02, 0.02];

pub struct Fixture {
    pub config: Config,
    pub logger: LoggerFake,
    pub device_camera: Arc<DeviceCameraFake>,
    pub device_display: Arc<Mutex<DeviceDisplayFake>>,
    pub device_audio: DeviceAudioFake,
    pub image_classifier: Arc<ImageClassifierFake>,
    pub input: Sender<DeviceInputEvent>,
    pub detector: Option<CurrencyDetector>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with(
            DeviceCameraFake::new(Arc::new(LoggerFake::new())),
            FakeResponse::Scores(FIFTY_SCORES.to_vec()),
        )
    }

    pub fn with(camera: DeviceCameraFake, response: FakeResponse) -> Self {
        let mut config = Config::default();
        config.audio_assets = AudioAssets {
            dir: PathBuf::from("assets/audio"),
            extension: "mp3".to_string(),
        };

        let logger = LoggerFake::new();
        let device_camera = Arc::new(camera.with_capture_delay(Duration::ZERO));
        let device_input = Arc::new(DeviceInputFake::new());
        let input = device_input.sender();
        let device_display = Arc::new(Mutex::new(DeviceDisplayFake::new()));
        let device_audio = DeviceAudioFake::new();
        let image_classifier = Arc::new(ImageClassifierFake::with_response(
            Arc::new(logger.clone()),
            response,
        ));

        let detector = CurrencyDetector::new(
            config.clone(),
            Arc::new(logger.clone()),
            device_camera.clone(),
            device_input,
            device_display.clone(),
            Arc::new(device_audio.clone()),
            image_classifier.clone(),
        );

        Self {
            config,
            logger,
            device_camera,
            device_display,
            device_audio,
            image_classifier,
            input,
            detector: Some(detector),
        }
    }

    pub fn noise_camera(width: u32, height: u32) -> DeviceCameraFake {
        DeviceCameraFake::new(Arc::new(LoggerFake::new()))
            .with_capture(FakeCapture::Noise { width, height })
    }

    pub fn wait_until<F>(&self, what: &str, condition: F)
    where
        F: Fn(&Fixture) -> bool,
    {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !condition(self) {
            if Instant::now() > deadline {
                panic!("Timed out waiting for {}", what);
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    pub fn result_text(&self) -> String {
        self.device_display
            .lock()
            .unwrap()
            .text(crate::device_display::interface::TextRegion::Result)
            .to_string()
    }

    pub fn confidence_text(&self) -> String {
        self.device_display
            .lock()
            .unwrap()
            .text(crate::device_display::interface::TextRegion::Confidence)
            .to_string()
    }
}
