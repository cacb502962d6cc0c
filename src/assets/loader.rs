//! Joined loading of the model and overlay renderables.
//!
//! A placement needs both renderables before any node is created, so the two loads are
//! fanned in with [`try_join`]: the combined future resolves once both succeed, or with
//! the first error either of them produces. When one side fails the other side's future
//! is dropped; whatever work its loader started is left to finish on its own and the
//! result is discarded.

use std::future::Future;
use std::sync::Arc;

use futures::future::{try_join, BoxFuture, TryFutureExt};

use super::handles::{ModelHandle, ModelId, OverlayDescriptor, OverlayHandle};
use crate::error::{LoadError, PlacementError};

/// The external renderable loader.
///
/// Both methods start a load and return a future for its result. The futures are
/// driven on whatever executor the caller chooses and must not touch the scene.
pub trait RenderableLoader: Send + Sync {
    /// Loads a model. A handle with no bounds is a successful load; geometry is checked
    /// at placement time.
    fn load_model(&self, id: &ModelId) -> BoxFuture<'static, Result<ModelHandle, LoadError>>;

    /// Builds the overlay renderable from its view description.
    fn load_overlay(
        &self,
        descriptor: &OverlayDescriptor,
    ) -> BoxFuture<'static, Result<OverlayHandle, LoadError>>;
}

impl<L: RenderableLoader + ?Sized> RenderableLoader for Arc<L> {
    fn load_model(&self, id: &ModelId) -> BoxFuture<'static, Result<ModelHandle, LoadError>> {
        (**self).load_model(id)
    }

    fn load_overlay(
        &self,
        descriptor: &OverlayDescriptor,
    ) -> BoxFuture<'static, Result<OverlayHandle, LoadError>> {
        (**self).load_overlay(descriptor)
    }
}

/// Both renderables of one placement, ready for immediate attachment.
#[derive(Debug, Clone)]
pub struct LoadedAssets {
    pub model: ModelHandle,
    pub overlay: OverlayHandle,
}

impl From<(ModelHandle, OverlayHandle)> for LoadedAssets {
    fn from((model, overlay): (ModelHandle, OverlayHandle)) -> Self {
        Self { model, overlay }
    }
}

/// Fans a model load and an overlay load into one result.
pub struct AssetLoader<L> {
    loader: L,
}

impl<L: RenderableLoader> AssetLoader<L> {
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Starts both loads and returns the joined future.
    ///
    /// `build_overlay` produces the overlay's view description; it runs immediately on
    /// the calling thread.
    pub fn load<F>(
        &self,
        model: &ModelId,
        build_overlay: F,
    ) -> impl Future<Output = Result<LoadedAssets, PlacementError>> + Send + 'static
    where
        F: FnOnce() -> OverlayDescriptor,
    {
        let descriptor = build_overlay();
        log::debug!("Loading model `{}` with overlay `{}`", model, descriptor.label);

        let model_load = self.loader.load_model(model);
        let overlay_load = self.loader.load_overlay(&descriptor);

        try_join(model_load, overlay_load)
            .map_ok(LoadedAssets::from)
            .map_err(PlacementError::LoadFailure)
    }
}
