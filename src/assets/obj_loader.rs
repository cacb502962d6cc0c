use std::path::{Path, PathBuf};

use futures::channel::oneshot;
use futures::future::{self, BoxFuture, FutureExt, TryFutureExt};

use super::handles::{ModelHandle, ModelId, OverlayDescriptor, OverlayHandle};
use super::loader::RenderableLoader;
use crate::error::LoadError;
use crate::scene::picking::Aabb;

/// Loads models from Wavefront OBJ files under a base directory.
///
/// Each model is parsed on its own worker thread; the returned future only waits for
/// the worker's result. Overlays need no I/O and resolve immediately.
#[derive(Debug, Clone)]
pub struct ObjModelLoader {
    base_dir: PathBuf,
}

impl ObjModelLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Parses an OBJ file and measures its bounds.
    ///
    /// A file without vertex positions loads successfully but has no bounds.
    pub fn load_blocking(id: &ModelId, path: &Path) -> Result<ModelHandle, LoadError> {
        if !path.is_file() {
            return Err(LoadError::NotFound(path.display().to_string()));
        }

        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|source| LoadError::Parse {
            asset: id.to_string(),
            source,
        })?;

        let bounds = models
            .iter()
            .filter_map(|m| Aabb::from_positions(&m.mesh.positions))
            .reduce(|a, b| a.union(&b));
        let vertex_count = models.iter().map(|m| m.mesh.positions.len() / 3).sum();

        log::debug!(
            "Parsed `{}`: {} meshes, {} vertices, bounds {:?}",
            id,
            models.len(),
            vertex_count,
            bounds
        );
        Ok(ModelHandle::new(id.clone(), bounds, models.len(), vertex_count))
    }
}

impl RenderableLoader for ObjModelLoader {
    fn load_model(&self, id: &ModelId) -> BoxFuture<'static, Result<ModelHandle, LoadError>> {
        let id = id.clone();
        let path = self.base_dir.join(id.as_str());
        let (tx, rx) = oneshot::channel();

        let spawned = std::thread::Builder::new()
            .name(format!("perch-load-{}", id))
            .spawn(move || {
                // The receiver may be gone if the sibling load already failed.
                let _ = tx.send(Self::load_blocking(&id, &path));
            });

        match spawned {
            Ok(_) => rx.map_err(LoadError::from).map(|r| r.and_then(|inner| inner)).boxed(),
            Err(e) => future::ready(Err(LoadError::Backend(e.to_string()))).boxed(),
        }
    }

    fn load_overlay(
        &self,
        descriptor: &OverlayDescriptor,
    ) -> BoxFuture<'static, Result<OverlayHandle, LoadError>> {
        future::ready(Ok(OverlayHandle::new(descriptor.clone()))).boxed()
    }
}
