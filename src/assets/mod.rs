//! # Asset Loading Module
//!
//! Renderables arrive asynchronously from an external loader. This module defines that
//! loader's interface, the join that turns a model load and an overlay load into one
//! placement-ready result, and a file-backed loader for OBJ models.
//!
//! ## Key Components
//!
//! - [`RenderableLoader`] - The external loader seam
//! - [`AssetLoader`] - Joins the model and overlay loads
//! - [`ObjModelLoader`] - Loads OBJ models on worker threads
//! - [`WorkerSpawner`] - Runs joined loads off the scene thread
//!
//! Nothing here touches the scene graph: loaders only produce immutable handles.

pub mod executor;
pub mod handles;
pub mod loader;
pub mod obj_loader;

// Re-export main types
pub use executor::WorkerSpawner;
pub use handles::{
    ModelDescriptor, ModelHandle, ModelId, OverlayDescriptor, OverlayHandle, Renderable,
};
pub use loader::{AssetLoader, LoadedAssets, RenderableLoader};
pub use obj_loader::ObjModelLoader;
