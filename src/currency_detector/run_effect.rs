use crate::currency_detector::audio_controller::AudioController;
use crate::currency_detector::core::{Effect, Event};
use crate::device_camera::interface::DeviceCamera;
use crate::device_input::interface::DeviceInput;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct RunEffect {
    logger: Arc<dyn Logger + Send + Sync>,
    device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    device_input: Arc<dyn DeviceInput + Send + Sync>,
    image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    audio_controller: Arc<Mutex<AudioController>>,
    event_sender: Sender<Event>,
}

impl RunEffect {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_input: Arc<dyn DeviceInput + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        audio_controller: Arc<Mutex<AudioController>>,
        event_sender: Sender<Event>,
    ) -> Self {
        Self {
            logger: logger.with_namespace("run_effect"),
            device_camera,
            device_input,
            image_classifier,
            audio_controller,
            event_sender,
        }
    }

    pub fn run_effect(&self, effect: Effect) {
        let _ = self
            .logger
            .info(&format!("Running effect: {}", effect.to_display_string()));

        match effect {
            Effect::SubscribeToInput => {
                let events = self.device_input.events();
                for event in events {
                    if self.event_sender.send(Event::Input(event)).is_err() {
                        return;
                    }
                }
            }
            Effect::CheckPermission => {
                let permission = self.device_camera.permission();
                let _ = self.event_sender.send(Event::PermissionChecked(permission));
            }
            Effect::RequestPermission => {
                let permission = self.device_camera.request_permission();
                let _ = self
                    .event_sender
                    .send(Event::PermissionRequestDone(permission));
            }
            Effect::CaptureImage => {
                let outcome = self.device_camera.capture();
                let _ = self.event_sender.send(Event::CaptureDone(outcome));
            }
            Effect::Classify { tensor } => {
                let scores = self.image_classifier.classify(&tensor);
                if let Err(e) = &scores {
                    let _ = self.logger.error(&format!("Classification failed: {}", e));
                }
                let _ = self.event_sender.send(Event::ClassifyDone(scores));
            }
            Effect::Announce { denomination } => {
                let announced = match self.audio_controller.lock() {
                    Ok(mut controller) => controller.announce(denomination),
                    Err(e) => Err(e.to_string().into()),
                };
                if let Err(e) = &announced {
                    let _ = self
                        .logger
                        .error(&format!("Could not play {}: {}", denomination, e));
                }
                let _ = self.event_sender.send(Event::AnnounceDone(announced));
            }
            Effect::CloseAudio => match self.audio_controller.lock() {
                Ok(mut controller) => controller.close(),
                Err(e) => {
                    let _ = self
                        .logger
                        .error(&format!("Audio controller unavailable: {}", e));
                }
            },
        }
    }
}
