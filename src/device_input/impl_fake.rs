use crate::device_input::interface::{DeviceInput, DeviceInputEvent};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

/// Test input: events are pushed by hand through [`DeviceInputFake::sender`].
pub struct DeviceInputFake {
    sender: Sender<DeviceInputEvent>,
    receiver: Mutex<Option<Receiver<DeviceInputEvent>>>,
}

impl DeviceInputFake {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver: Mutex::new(Some(receiver)),
        }
    }

    pub fn sender(&self) -> Sender<DeviceInputEvent> {
        self.sender.clone()
    }
}

impl DeviceInput for DeviceInputFake {
    fn events(&self) -> Receiver<DeviceInputEvent> {
        let taken = self.receiver.lock().ok().and_then(|mut slot| slot.take());
        taken.unwrap_or_else(|| mpsc::channel().1)
    }
}
