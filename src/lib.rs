// src/lib.rs
//! Perch
//!
//! Tap-to-place AR object sessions: double-tap a surface to anchor a model, tap the
//! model to show a camera-facing delete control, tap the control to remove it.
//!
//! Tracking, rendering and asset decoding backends are supplied by the host through the
//! [`tracking::TrackingService`] and [`assets::RenderableLoader`] traits.

pub mod app;
pub mod assets;
pub mod billboard;
pub mod config;
pub mod error;
pub mod interaction;
pub mod logging;
pub mod prelude;
pub mod scene;
pub mod tracking;

// Re-export main types for convenience
pub use app::{ArSession, FrameStats};
pub use config::SessionConfig;

/// Creates a session that loads OBJ models from `base_dir`
pub fn default<T: tracking::TrackingService>(
    base_dir: impl Into<std::path::PathBuf>,
    tracking: T,
) -> ArSession<assets::ObjModelLoader, T> {
    ArSession::new(
        SessionConfig::default(),
        assets::ObjModelLoader::new(base_dir),
        tracking,
    )
}
