use crate::device_display::interface::{DeviceDisplay, TextRegion};
use crate::device_input::interface::DeviceInputEvent;
use eframe::egui;
use image::DynamicImage;
use std::error::Error;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const PREVIEW_SIZE: f32 = 224.0;

#[derive(Default)]
struct Photo {
    size: [usize; 2],
    rgba: Vec<u8>,
    version: u64,
}

#[derive(Default)]
struct Screen {
    result: String,
    confidence: String,
    photo: Option<Photo>,
    photo_version: u64,
}

/// Screen contents shared between the detector thread and the window.
#[derive(Clone, Default)]
pub struct GuiScreen {
    screen: Arc<Mutex<Screen>>,
}

impl GuiScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

struct DisplayWindow {
    screen: GuiScreen,
    input: Sender<DeviceInputEvent>,
    texture: Option<(u64, egui::TextureHandle)>,
}

impl DisplayWindow {
    fn refresh_texture(&mut self, ctx: &egui::Context, photo: Option<&Photo>) {
        match photo {
            Some(photo) => {
                let stale = self
                    .texture
                    .as_ref()
                    .map_or(true, |(version, _)| *version != photo.version);
                if stale {
                    let image = egui::ColorImage::from_rgba_unmultiplied(photo.size, &photo.rgba);
                    let handle = ctx.load_texture("photo", image, egui::TextureOptions::default());
                    self.texture = Some((photo.version, handle));
                }
            }
            None => self.texture = None,
        }
    }
}

impl eframe::App for DisplayWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let shared = Arc::clone(&self.screen.screen);
        let (result, confidence) = {
            let Ok(screen) = shared.lock() else {
                return;
            };
            let texts = (screen.result.clone(), screen.confidence.clone());
            let photo = screen.photo.as_ref();
            self.refresh_texture(ctx, photo);
            texts
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);

                match &self.texture {
                    Some((_, texture)) => {
                        let sized = egui::load::SizedTexture::from_handle(texture);
                        ui.add(
                            egui::Image::new(sized)
                                .max_size(egui::vec2(PREVIEW_SIZE, PREVIEW_SIZE)),
                        );
                    }
                    None => {
                        let (rect, _) = ui.allocate_exact_size(
                            egui::vec2(PREVIEW_SIZE, PREVIEW_SIZE),
                            egui::Sense::hover(),
                        );
                        ui.painter()
                            .rect_filled(rect, 4.0, egui::Color32::from_rgb(40, 40, 40));
                    }
                }

                ui.add_space(12.0);
                ui.label(egui::RichText::new(&result).size(28.0).strong());
                ui.add_space(8.0);
                ui.label(egui::RichText::new(&confidence).monospace().size(16.0));
                ui.add_space(16.0);

                let button = egui::Button::new(egui::RichText::new("Take Picture").size(20.0));
                if ui.add(button).clicked() {
                    let _ = self.input.send(DeviceInputEvent::CapturePressed);
                }
            });
        });

        // the detector thread writes without waking the window
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

/// Opens the window on the calling thread and blocks until it is closed.
pub fn run_window(
    screen: GuiScreen,
    input: Sender<DeviceInputEvent>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([360.0, 640.0])
            .with_resizable(false),
        ..Default::default()
    };

    let window = DisplayWindow {
        screen,
        input,
        texture: None,
    };

    eframe::run_native(
        "Currency Detector",
        options,
        Box::new(|_cc| Box::new(window)),
    )
    .map_err(|e| format!("window failed: {}", e))?;

    Ok(())
}

pub struct DeviceDisplayGui {
    screen: GuiScreen,
}

impl DeviceDisplayGui {
    pub fn new(screen: GuiScreen) -> Self {
        Self { screen }
    }

    fn with_screen<F>(&self, f: F) -> Result<(), Box<dyn Error + Send + Sync>>
    where
        F: FnOnce(&mut Screen),
    {
        let mut screen = self.screen.screen.lock().map_err(|e| e.to_string())?;
        f(&mut screen);
        Ok(())
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.with_screen(|screen| {
            screen.result.clear();
            screen.confidence.clear();
            screen.photo = None;
        })
    }

    fn write_text(
        &mut self,
        region: TextRegion,
        text: &str,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.with_screen(|screen| match region {
            TextRegion::Result => screen.result = text.to_string(),
            TextRegion::Confidence => screen.confidence = text.to_string(),
        })
    }

    fn show_image(&mut self, image: &DynamicImage) -> Result<(), Box<dyn Error + Send + Sync>> {
        let rgba = image.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let rgba = rgba.into_raw();

        self.with_screen(|screen| {
            let unchanged = screen
                .photo
                .as_ref()
                .is_some_and(|photo| photo.size == size && photo.rgba == rgba);
            if !unchanged {
                screen.photo_version += 1;
                screen.photo = Some(Photo {
                    size,
                    rgba,
                    version: screen.photo_version,
                });
            }
        })
    }
}
