//! Error types for asset loading, placement and capture.
//!
//! Every error here is recoverable: the component that produces it turns it into a
//! local no-op plus a single user-facing notification. Lifecycle misuse (touching a
//! deleted placement, a stale node id) is not represented here; it panics.

use thiserror::Error;

/// Failure of a single underlying renderable load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The requested asset does not exist.
    #[error("asset `{0}` not found")]
    NotFound(String),

    /// The asset exists but could not be parsed.
    #[error("failed to parse model `{asset}`: {source}")]
    Parse {
        asset: String,
        #[source]
        source: tobj::LoadError,
    },

    /// The loader backend reported a failure of its own.
    #[error("renderable loader failed: {0}")]
    Backend(String),

    /// The worker producing the asset went away before delivering it.
    #[error("load was abandoned before completing")]
    Canceled,
}

impl From<futures::channel::oneshot::Canceled> for LoadError {
    fn from(_: futures::channel::oneshot::Canceled) -> Self {
        LoadError::Canceled
    }
}

/// Failure of a placement attempt.
#[derive(Debug, Error)]
pub enum PlacementError {
    /// One of the two joined loads failed; carries the first error observed.
    #[error("asset load failed: {0}")]
    LoadFailure(#[from] LoadError),

    /// The model has no bounding volume, so the overlay cannot be positioned.
    #[error("model `{0}` has no bounding geometry")]
    GeometryUnavailable(String),
}

/// Failure reported by the external capture collaborator.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// No capture backend is installed.
    #[error("capture is not available in this session")]
    Unavailable,

    /// The backend tried and failed.
    #[error("capture failed: {0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failure_wraps_cause() {
        let err = PlacementError::from(LoadError::NotFound("chair.obj".into()));
        assert!(matches!(err, PlacementError::LoadFailure(LoadError::NotFound(_))));
        assert_eq!(err.to_string(), "asset load failed: asset `chair.obj` not found");
    }

    #[test]
    fn test_canceled_conversion() {
        let (tx, rx) = futures::channel::oneshot::channel::<u32>();
        drop(tx);
        let err: LoadError = futures::executor::block_on(rx).unwrap_err().into();
        assert!(matches!(err, LoadError::Canceled));
    }
}
