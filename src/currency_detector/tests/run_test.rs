use crate::config::Config;
use crate::currency_detector::core::State;
use crate::currency_detector::main::CurrencyDetector;
use crate::currency_detector::tests::fixture::{Fixture, FIFTY_SCORES};
use crate::device_audio::impl_fake::DeviceAudioFake;
use crate::device_camera::impl_fake::{DeviceCameraFake, FakeCapture};
use crate::device_camera::interface::CaptureOutcome;
use crate::device_display::impl_fake::DeviceDisplayFake;
use crate::device_display::interface::{DeviceDisplay, TextRegion};
use crate::device_input::impl_fake::DeviceInputFake;
use crate::device_input::interface::DeviceInputEvent;
use crate::error::DetectionError;
use crate::image_classifier::impl_fake::{FakeResponse, ImageClassifierFake};
use crate::library::logger::impl_fake::LoggerFake;
use crate::library::logger::interface::LogLevel;
use image::DynamicImage;
use std::error::Error;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

fn start(f: &mut Fixture) -> JoinHandle<State> {
    let detector = f.detector.take().unwrap();
    std::thread::spawn(move || detector.run().unwrap())
}

fn close(f: &Fixture, handle: JoinHandle<State>) -> State {
    f.input.send(DeviceInputEvent::CloseRequested).unwrap();
    handle.join().unwrap()
}

#[test]
fn test_tap_to_announcement() {
    let mut f = Fixture::new();
    let handle = start(&mut f);

    f.input.send(DeviceInputEvent::CapturePressed).unwrap();
    f.wait_until("result", |f| f.result_text() == "50 Rupees");
    f.wait_until("announcement", |f| f.device_audio.played().len() == 1);

    assert!(f.confidence_text().contains("50 Rupees: 90.0%\n"));
    assert_eq!(
        f.device_audio.played(),
        vec![PathBuf::from("assets/audio/currency_50.mp3")]
    );
    assert_eq!(f.device_audio.live(), 1);
    assert_eq!(f.image_classifier.calls(), 1);

    let state = close(&f, handle);
    assert_eq!(state, State::Closed);
    assert_eq!(f.device_audio.live(), 0);
}

#[test]
fn test_repeated_scans_keep_one_clip_alive() {
    let mut f = Fixture::new();
    let handle = start(&mut f);

    for round in 1..=4 {
        f.input.send(DeviceInputEvent::CapturePressed).unwrap();
        f.wait_until("announcement", |f| f.device_audio.played().len() == round);
        assert_eq!(f.device_audio.live(), 1);
    }

    close(&f, handle);
    assert_eq!(f.device_audio.peak_live(), 1);
    assert_eq!(f.device_audio.live(), 0);
}

#[test]
fn test_unavailable_capture_skips_classifier() {
    let camera = DeviceCameraFake::new(Arc::new(LoggerFake::new()))
        .with_capture(FakeCapture::Outcome(CaptureOutcome::Unavailable));
    let mut f = Fixture::with(camera, FakeResponse::Random);
    let handle = start(&mut f);

    f.input.send(DeviceInputEvent::CapturePressed).unwrap();
    f.wait_until("failure", |f| f.result_text() == "Could not classify");

    assert_eq!(f.image_classifier.calls(), 0);
    assert!(f.device_audio.played().is_empty());
    close(&f, handle);
}

#[test]
fn test_permission_flow_needs_second_tap() {
    let camera = Fixture::noise_camera(320, 240).with_permission(false, true);
    let mut f = Fixture::with(camera, FakeResponse::Scores(vec![0.0, 0.0, 0.0, 0.9, 0.1, 0.0]));
    let handle = start(&mut f);

    f.input.send(DeviceInputEvent::CapturePressed).unwrap();
    f.wait_until("permission prompt", |f| {
        f.confidence_text().contains("permission")
    });
    // the grant alone must not trigger a capture
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(f.device_camera.captures(), 0);

    f.input.send(DeviceInputEvent::CapturePressed).unwrap();
    f.wait_until("result", |f| f.result_text() == "100 Rupees");
    assert_eq!(f.device_camera.captures(), 1);

    close(&f, handle);
}

#[test]
fn test_inference_failure_is_shown_and_logged() {
    let mut f = Fixture::with(
        Fixture::noise_camera(50, 50),
        FakeResponse::Fail(DetectionError::Inference("bad tensor".to_string())),
    );
    let handle = start(&mut f);

    f.input.send(DeviceInputEvent::CapturePressed).unwrap();
    f.wait_until("failure", |f| f.result_text() == "Could not classify");

    assert_eq!(f.confidence_text(), "Classification failed: bad tensor");
    assert!(f.logger.contains(LogLevel::Error, "bad tensor"));
    assert!(f.device_audio.played().is_empty());

    // the app keeps going after a failed request
    f.image_classifier
        .set_response(FakeResponse::Scores(vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0]));
    f.input.send(DeviceInputEvent::CapturePressed).unwrap();
    f.wait_until("result", |f| f.result_text() == "20 Rupees");

    close(&f, handle);
}

#[test]
fn test_double_tap_captures_once() {
    let camera = Fixture::noise_camera(64, 64);
    let mut f = Fixture::with(camera, FakeResponse::Scores(vec![0.9, 0.0, 0.0, 0.0, 0.0, 0.1]));
    let handle = start(&mut f);

    f.input.send(DeviceInputEvent::CapturePressed).unwrap();
    f.input.send(DeviceInputEvent::CapturePressed).unwrap();
    f.wait_until("result", |f| f.result_text() == "10 Rupees");
    std::thread::sleep(Duration::from_millis(50));

    assert_eq!(f.device_camera.captures(), 1);
    assert_eq!(f.image_classifier.calls(), 1);
    close(&f, handle);
}

/// Asks to close the screen the moment a result is written, so the close
/// races the announcement that follows the result.
struct CloseOnResult {
    inner: DeviceDisplayFake,
    input: Sender<DeviceInputEvent>,
}

impl DeviceDisplay for CloseOnResult {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.inner.clear()
    }

    fn write_text(
        &mut self,
        region: TextRegion,
        text: &str,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        if region == TextRegion::Result && text == "50 Rupees" {
            let _ = self.input.send(DeviceInputEvent::CloseRequested);
        }
        self.inner.write_text(region, text)
    }

    fn show_image(&mut self, image: &DynamicImage) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.inner.show_image(image)
    }
}

#[test]
fn test_close_during_announcement_leaves_no_clip_playing() {
    for _ in 0..50 {
        let logger = LoggerFake::new();
        let device_input = Arc::new(DeviceInputFake::new());
        let input = device_input.sender();
        let device_audio = DeviceAudioFake::new();

        let detector = CurrencyDetector::new(
            Config::default(),
            Arc::new(logger.clone()),
            Arc::new(
                DeviceCameraFake::new(Arc::new(logger.clone()))
                    .with_capture_delay(Duration::ZERO),
            ),
            device_input,
            Arc::new(Mutex::new(CloseOnResult {
                inner: DeviceDisplayFake::new(),
                input: input.clone(),
            })),
            Arc::new(device_audio.clone()),
            Arc::new(ImageClassifierFake::with_response(
                Arc::new(logger.clone()),
                FakeResponse::Scores(FIFTY_SCORES.to_vec()),
            )),
        );

        input.send(DeviceInputEvent::CapturePressed).unwrap();
        assert_eq!(detector.run().unwrap(), State::Closed);

        // give a late announcement thread time to finish
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(device_audio.live(), 0);
        assert!(device_audio.peak_live() <= 1);
    }
}
