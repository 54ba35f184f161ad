use config::{AudioKind, CameraKind, ClassifierKind, Config, DisplayKind};
use currency_detector::main::CurrencyDetector;
use device_audio::impl_console::DeviceAudioConsole;
use device_audio::interface::DeviceAudio;
use device_camera::impl_fake::DeviceCameraFake;
use device_camera::impl_file::DeviceCameraFile;
use device_camera::interface::DeviceCamera;
use device_display::impl_console::DeviceDisplayConsole;
use device_display::impl_gui::{run_window, DeviceDisplayGui, GuiScreen};
use device_input::impl_console::DeviceInputConsole;
use device_input::impl_gui::DeviceInputGui;
use device_input::interface::DeviceInputEvent;
use image_classifier::impl_fake::ImageClassifierFake;
use image_classifier::impl_tract::ImageClassifierTract;
use image_classifier::interface::ImageClassifier;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::sync::{Arc, Mutex};

mod config;
mod currency_detector;
mod denomination;
mod device_audio;
mod device_camera;
mod device_display;
mod device_input;
mod error;
mod image_classifier;
mod library;
mod preprocess;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env();

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    for warning in &config.warnings {
        logger.warn(warning)?;
    }

    let device_camera = new_device_camera(&config, &logger);
    let image_classifier = new_image_classifier(&config, &logger);
    let device_audio = new_device_audio(&config, &logger);

    let display = config.display.clone();

    match display {
        DisplayKind::Gui => {
            let screen = GuiScreen::new();
            let (device_input, window_input) = DeviceInputGui::new();

            let detector = CurrencyDetector::new(
                config,
                logger.clone(),
                device_camera,
                Arc::new(device_input),
                Arc::new(Mutex::new(DeviceDisplayGui::new(screen.clone()))),
                device_audio,
                image_classifier,
            );

            let detector_thread = std::thread::spawn(move || detector.run());

            let window_result = run_window(screen, window_input.clone());

            // closing the window ends the detector and releases the audio
            let _ = window_input.send(DeviceInputEvent::CloseRequested);
            let detector_result = detector_thread
                .join()
                .map_err(|_| "detector thread panicked")?;

            window_result?;
            detector_result?;
        }
        DisplayKind::Console => {
            let detector = CurrencyDetector::new(
                config,
                logger.clone(),
                device_camera,
                Arc::new(DeviceInputConsole::new(logger.clone())),
                Arc::new(Mutex::new(DeviceDisplayConsole::new())),
                device_audio,
                image_classifier,
            );

            detector.run()?;
        }
    }

    Ok(())
}

fn new_device_camera(
    config: &Config,
    logger: &Arc<dyn Logger + Send + Sync>,
) -> Arc<dyn DeviceCamera + Send + Sync> {
    match &config.camera {
        CameraKind::Fake => Arc::new(DeviceCameraFake::new(logger.clone())),
        CameraKind::File(path) => Arc::new(DeviceCameraFile::new(path.clone(), logger.clone())),
        #[cfg(feature = "webcam")]
        CameraKind::Webcam(index) => Arc::new(
            device_camera::impl_webcam::DeviceCameraWebcam::new(*index, logger.clone()),
        ),
        #[cfg(not(feature = "webcam"))]
        CameraKind::Webcam(index) => {
            let _ = logger.warn(&format!(
                "Webcam {} requested but built without the webcam feature, using fake camera",
                index
            ));
            Arc::new(DeviceCameraFake::new(logger.clone()))
        }
    }
}

fn new_image_classifier(
    config: &Config,
    logger: &Arc<dyn Logger + Send + Sync>,
) -> Arc<dyn ImageClassifier + Send + Sync> {
    match config.classifier {
        ClassifierKind::Fake => Arc::new(ImageClassifierFake::new(logger.clone())),
        ClassifierKind::Tract => Arc::new(ImageClassifierTract::new(
            config.model_path.clone(),
            logger.clone(),
        )),
    }
}

fn new_device_audio(
    config: &Config,
    logger: &Arc<dyn Logger + Send + Sync>,
) -> Arc<dyn DeviceAudio + Send + Sync> {
    match config.audio {
        AudioKind::Console => Arc::new(DeviceAudioConsole::new(logger.clone())),
        #[cfg(feature = "audio")]
        AudioKind::Rodio => match device_audio::impl_rodio::DeviceAudioRodio::new(logger.clone()) {
            Ok(device_audio) => Arc::new(device_audio),
            Err(e) => {
                let _ = logger.warn(&format!("Audio output unavailable ({}), logging instead", e));
                Arc::new(DeviceAudioConsole::new(logger.clone()))
            }
        },
        #[cfg(not(feature = "audio"))]
        AudioKind::Rodio => {
            let _ = logger.warn("Built without the audio feature, logging announcements instead");
            Arc::new(DeviceAudioConsole::new(logger.clone()))
        }
    }
}
