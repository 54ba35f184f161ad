use crate::config::Config;
use crate::currency_detector::audio_controller::AudioController;
use crate::currency_detector::core::{init, transition, Effect, Event, State};
use crate::currency_detector::render::Render;
use crate::currency_detector::run_effect::RunEffect;
use crate::device_audio::interface::DeviceAudio;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::device_input::interface::DeviceInput;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};

pub struct CurrencyDetector {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    render: Render,
    run_effect: RunEffect,
    event_receiver: Receiver<Event>,
}

impl CurrencyDetector {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_input: Arc<dyn DeviceInput + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        device_audio: Arc<dyn DeviceAudio + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();

        let audio_controller = Arc::new(Mutex::new(AudioController::new(
            device_audio,
            config.audio_assets.clone(),
            logger.clone(),
        )));

        let run_effect = RunEffect::new(
            logger.clone(),
            device_camera,
            device_input,
            image_classifier,
            audio_controller,
            event_sender,
        );

        Self {
            render: Render::new(device_display),
            logger: logger.with_namespace("currency_detector"),
            config,
            run_effect,
            event_receiver,
        }
    }

    fn spawn_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let run_effect = self.run_effect.clone();
            std::thread::spawn(move || run_effect.run_effect(effect));
        }
    }

    /// Runs until the screen is closed. Effects produced by the closing
    /// transition run on this thread so the audio is released before return.
    pub fn run(&self) -> Result<State, Box<dyn std::error::Error + Send + Sync>> {
        let (mut state, effects) = init(&self.config);
        self.render.render(&state)?;
        self.spawn_effects(effects);

        while !matches!(state, State::Closed) {
            let event = self.event_receiver.recv()?;

            let _ = self.logger.info(&format!(
                "{} + {}",
                state.to_display_string(),
                event.to_display_string()
            ));

            let (new_state, effects) = transition(&self.config, state, event);

            let _ = self.logger.info(&format!(
                "-> {} with [{}]",
                new_state.to_display_string(),
                effects
                    .iter()
                    .map(Effect::to_display_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            ));

            state = new_state;

            if let Err(e) = self.render.render(&state) {
                let _ = self.logger.error(&format!("Render failed: {}", e));
            }

            if matches!(state, State::Closed) {
                for effect in effects {
                    self.run_effect.run_effect(effect);
                }
            } else {
                self.spawn_effects(effects);
            }
        }

        let _ = self.logger.info("Screen closed");
        Ok(state)
    }
}
