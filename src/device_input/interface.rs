use std::sync::mpsc::Receiver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceInputEvent {
    /// The capture button was tapped.
    CapturePressed,
    /// The user is leaving the screen.
    CloseRequested,
}

pub trait DeviceInput {
    /// Stream of user gestures. Only the first caller gets the stream; later
    /// calls return a receiver that is already closed.
    fn events(&self) -> Receiver<DeviceInputEvent>;
}
