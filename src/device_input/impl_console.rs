use crate::device_input::interface::{DeviceInput, DeviceInputEvent};
use crate::library::logger::interface::Logger;
use std::io::BufRead;
use std::sync::mpsc;
use std::sync::Arc;

/// Reads stdin: an empty line (or `c`) takes a picture, `q` or end of input
/// closes the screen.
pub struct DeviceInputConsole {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceInputConsole {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("input").with_namespace("console"),
        }
    }
}

pub fn parse_line(line: &str) -> Option<DeviceInputEvent> {
    match line.trim().to_lowercase().as_str() {
        "" | "c" | "capture" => Some(DeviceInputEvent::CapturePressed),
        "q" | "quit" | "exit" => Some(DeviceInputEvent::CloseRequested),
        _ => None,
    }
}

impl DeviceInput for DeviceInputConsole {
    fn events(&self) -> mpsc::Receiver<DeviceInputEvent> {
        let (tx, rx) = mpsc::channel();
        let logger = Arc::clone(&self.logger);

        std::thread::spawn(move || {
            let _ = logger.info("Press Enter to take a picture, q to quit");
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                match parse_line(&line) {
                    Some(event) => {
                        if tx.send(event).is_err() {
                            return;
                        }
                        if event == DeviceInputEvent::CloseRequested {
                            return;
                        }
                    }
                    None => {
                        let _ = logger.warn(&format!("Unknown command '{}'", line.trim()));
                    }
                }
            }
            let _ = tx.send(DeviceInputEvent::CloseRequested);
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line(""), Some(DeviceInputEvent::CapturePressed));
        assert_eq!(parse_line("  C \n"), Some(DeviceInputEvent::CapturePressed));
        assert_eq!(parse_line("q"), Some(DeviceInputEvent::CloseRequested));
        assert_eq!(parse_line("Quit"), Some(DeviceInputEvent::CloseRequested));
        assert_eq!(parse_line("launch"), None);
    }
}
