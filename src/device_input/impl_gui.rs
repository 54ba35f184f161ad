use crate::device_input::interface::{DeviceInput, DeviceInputEvent};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

/// Button presses coming out of the GUI window.
pub struct DeviceInputGui {
    receiver: Mutex<Option<Receiver<DeviceInputEvent>>>,
}

impl DeviceInputGui {
    /// Returns the input device and the sender the window pushes into.
    pub fn new() -> (Self, Sender<DeviceInputEvent>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                receiver: Mutex::new(Some(rx)),
            },
            tx,
        )
    }
}

impl DeviceInput for DeviceInputGui {
    fn events(&self) -> Receiver<DeviceInputEvent> {
        let taken = self.receiver.lock().ok().and_then(|mut slot| slot.take());
        taken.unwrap_or_else(|| mpsc::channel().1)
    }
}
