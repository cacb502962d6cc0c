//! # Interaction Module
//!
//! Turns host input into scene changes. Surface taps go through a double-tap gate and
//! start asynchronous loads; taps on placed models toggle their overlay; activating an
//! overlay deletes its placement. The capture button is routed to a
//! [`CaptureCollaborator`].
//!
//! ## Key Components
//!
//! - [`InteractionController`] - Routes [`InputEvent`]s and places finished loads
//! - [`PlacementGate`] - Double-tap confirmation
//! - [`CaptureCollaborator`] / [`Notifier`] - Capture backend and user messages

pub mod capture;
pub mod controller;
pub mod event;
pub mod gate;

// Re-export main types
pub use capture::{CaptureCollaborator, DisabledCapture, LogNotifier, Notifier};
pub use controller::{InteractionController, PendingLoad};
pub use event::{CaptureEvent, InputEvent, TransformGesture};
pub use gate::{Confirmed, PlacementGate, TapGateState};
