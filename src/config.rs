//! Session configuration.

use std::time::Duration;

use crate::assets::{ModelDescriptor, OverlayDescriptor};

/// Two surface taps closer together than this place an object.
pub const DEFAULT_DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(1000);

/// Default `env_logger` filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "perch=info";

/// Settings for an [`ArSession`](crate::ArSession).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Maximum gap between the two taps of a placement gesture
    pub double_tap_window: Duration,
    /// The model placed by a confirmed gesture
    pub model: ModelDescriptor,
    /// The control attached above each placed model
    pub overlay: OverlayDescriptor,
    /// Hide plane-detection guidance once something has been placed
    pub hide_surface_guidance_after_placement: bool,
    /// Shown when a video capture is stopped and saved
    pub video_saved_message: String,
    /// Filter passed to [`logging::init`](crate::logging::init)
    pub log_filter: String,
}

impl SessionConfig {
    pub fn with_double_tap_window(mut self, window: Duration) -> Self {
        self.double_tap_window = window;
        self
    }

    pub fn with_model(mut self, model: ModelDescriptor) -> Self {
        self.model = model;
        self
    }

    pub fn with_overlay(mut self, overlay: OverlayDescriptor) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn with_surface_guidance_hiding(mut self, hide: bool) -> Self {
        self.hide_surface_guidance_after_placement = hide;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            double_tap_window: DEFAULT_DOUBLE_TAP_WINDOW,
            model: ModelDescriptor::new("Chair", "chair.obj"),
            overlay: OverlayDescriptor::delete_button(),
            hide_surface_guidance_after_placement: true,
            video_saved_message: "Saved video to gallery!".to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.double_tap_window, Duration::from_millis(1000));
        assert_eq!(config.model.name, "Chair");
        assert_eq!(config.overlay.label, "Delete");
        assert!(config.hide_surface_guidance_after_placement);
    }

    #[test]
    fn test_builder_overrides() {
        let config = SessionConfig::default()
            .with_double_tap_window(Duration::from_millis(400))
            .with_model(ModelDescriptor::new("Lamp", "lamp.obj"))
            .with_surface_guidance_hiding(false)
            .with_log_filter("perch=debug");

        assert_eq!(config.double_tap_window, Duration::from_millis(400));
        assert_eq!(config.model.asset.as_str(), "lamp.obj");
        assert!(!config.hide_surface_guidance_after_placement);
        assert_eq!(config.log_filter, "perch=debug");
    }
}
