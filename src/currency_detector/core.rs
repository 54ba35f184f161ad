use crate::config::Config;
use crate::currency_detector::present::ClassificationResult;
use crate::denomination::Denomination;
use crate::device_camera::interface::{CaptureOutcome, Permission};
use crate::device_input::interface::DeviceInputEvent;
use crate::error::DetectionError;
use crate::preprocess::{preprocess, InputTensor};
use image::DynamicImage;

#[derive(Debug, Clone, PartialEq)]
pub enum State {
    Ready {
        message: Option<String>,
    },
    CheckingPermission,
    RequestingPermission,
    Capturing,
    Classifying {
        thumbnail: DynamicImage,
    },
    Showing {
        thumbnail: DynamicImage,
        result: ClassificationResult,
    },
    Failed {
        error: DetectionError,
        thumbnail: Option<DynamicImage>,
    },
    Closed,
}

impl State {
    /// States where a tap starts a new request.
    pub fn is_idle(&self) -> bool {
        matches!(
            self,
            State::Ready { .. } | State::Showing { .. } | State::Failed { .. }
        )
    }

    pub fn to_display_string(&self) -> String {
        match self {
            State::Ready { message } => format!("Ready {{ message: {:?} }}", message),
            State::CheckingPermission => "CheckingPermission".to_string(),
            State::RequestingPermission => "RequestingPermission".to_string(),
            State::Capturing => "Capturing".to_string(),
            State::Classifying { .. } => "Classifying".to_string(),
            State::Showing { result, .. } => format!("Showing({})", result.label()),
            State::Failed { error, .. } => format!("Failed({})", error),
            State::Closed => "Closed".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum Event {
    Input(DeviceInputEvent),
    PermissionChecked(Permission),
    PermissionRequestDone(Result<Permission, Box<dyn std::error::Error + Send + Sync>>),
    CaptureDone(Result<CaptureOutcome, Box<dyn std::error::Error + Send + Sync>>),
    ClassifyDone(Result<Vec<f32>, DetectionError>),
    AnnounceDone(Result<(), Box<dyn std::error::Error + Send + Sync>>),
}

impl Event {
    pub fn to_display_string(&self) -> String {
        match self {
            Event::CaptureDone(Ok(CaptureOutcome::Captured(image))) => {
                format!("CaptureDone(Captured({}x{}))", image.width(), image.height())
            }
            event => format!("{:?}", event),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SubscribeToInput,
    CheckPermission,
    RequestPermission,
    CaptureImage,
    Classify { tensor: InputTensor },
    Announce { denomination: Denomination },
    CloseAudio,
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::Classify { tensor } => {
                format!("Classify {{ tensor: {:?} }}", tensor.shape())
            }
            effect => format!("{:?}", effect),
        }
    }
}

pub const PERMISSION_MESSAGE: &str = "Camera permission is needed. Tap again once granted.";
pub const CANCELLED_MESSAGE: &str = "Capture cancelled";

pub fn init(_config: &Config) -> (State, Vec<Effect>) {
    (State::Ready { message: None }, vec![Effect::SubscribeToInput])
}

pub fn transition(_config: &Config, state: State, event: Event) -> (State, Vec<Effect>) {
    match (state, event) {
        // Closing always wins, whatever is in flight
        (State::Closed, _) => (State::Closed, vec![]),
        (_, Event::Input(DeviceInputEvent::CloseRequested)) => {
            (State::Closed, vec![Effect::CloseAudio])
        }

        // Capture trigger
        (state, Event::Input(DeviceInputEvent::CapturePressed)) if state.is_idle() => {
            (State::CheckingPermission, vec![Effect::CheckPermission])
        }
        (State::CheckingPermission, Event::PermissionChecked(Permission::Granted)) => {
            (State::Capturing, vec![Effect::CaptureImage])
        }
        (State::CheckingPermission, Event::PermissionChecked(Permission::Denied)) => {
            (State::RequestingPermission, vec![Effect::RequestPermission])
        }
        (State::RequestingPermission, Event::PermissionRequestDone(Ok(Permission::Granted))) => (
            State::Ready {
                message: Some(PERMISSION_MESSAGE.to_string()),
            },
            vec![],
        ),
        (State::RequestingPermission, Event::PermissionRequestDone(_)) => (
            State::Failed {
                error: DetectionError::PermissionDenied,
                thumbnail: None,
            },
            vec![],
        ),

        // Capture completion, then the preprocessor
        (State::Capturing, Event::CaptureDone(Ok(CaptureOutcome::Captured(image)))) => {
            match preprocess(&image) {
                Ok(preprocessed) => (
                    State::Classifying {
                        thumbnail: preprocessed.thumbnail,
                    },
                    vec![Effect::Classify {
                        tensor: preprocessed.tensor,
                    }],
                ),
                Err(error) => (
                    State::Failed {
                        error,
                        thumbnail: None,
                    },
                    vec![],
                ),
            }
        }
        (State::Capturing, Event::CaptureDone(Ok(CaptureOutcome::Cancelled))) => (
            State::Ready {
                message: Some(CANCELLED_MESSAGE.to_string()),
            },
            vec![],
        ),
        (State::Capturing, Event::CaptureDone(Ok(CaptureOutcome::Unavailable))) => (
            State::Failed {
                error: DetectionError::CaptureUnavailable(
                    "camera returned no image".to_string(),
                ),
                thumbnail: None,
            },
            vec![],
        ),
        (State::Capturing, Event::CaptureDone(Err(e))) => (
            State::Failed {
                error: DetectionError::CaptureUnavailable(e.to_string()),
                thumbnail: None,
            },
            vec![],
        ),

        // Classifier result, then the presenter
        (State::Classifying { thumbnail }, Event::ClassifyDone(result)) => {
            match result.and_then(ClassificationResult::from_scores) {
                Ok(result) => {
                    let denomination = result.denomination;
                    (
                        State::Showing { thumbnail, result },
                        vec![Effect::Announce { denomination }],
                    )
                }
                Err(error) => (
                    State::Failed {
                        error,
                        thumbnail: Some(thumbnail),
                    },
                    vec![],
                ),
            }
        }

        (state, Event::AnnounceDone(Ok(()))) => (state, vec![]),
        // logged by the runner, the result stays on screen
        (state, Event::AnnounceDone(Err(_))) => (state, vec![]),

        // Taps while busy and stale completions
        (state, _) => (state, vec![]),
    }
}
