//! Boundaries to the capture backend and to transient user notifications.

use crate::error::CaptureError;

/// Photo and video capture of the AR view.
pub trait CaptureCollaborator {
    /// Saves a still image of the current view.
    fn take_snapshot(&mut self) -> Result<(), CaptureError>;

    /// Starts recording if stopped, stops and saves if recording. Returns whether a
    /// recording is in progress afterwards.
    fn toggle_video_capture(&mut self) -> bool;
}

/// Capture backend for sessions without one; snapshots fail and recording never starts.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledCapture;

impl CaptureCollaborator for DisabledCapture {
    fn take_snapshot(&mut self) -> Result<(), CaptureError> {
        Err(CaptureError::Unavailable)
    }

    fn toggle_video_capture(&mut self) -> bool {
        false
    }
}

/// Short-lived, non-blocking messages to the user (toasts).
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Sends notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, message: &str) {
        log::info!("[notice] {}", message);
    }
}
