//! # Hero Assets
//!
//! The headset model and the ambient video are opaque handles from the
//! hero's point of view. Either one may be missing; the scroll state machine
//! keeps running and the renderer simply skips what it does not have.

use std::path::{Path, PathBuf};

use crate::error::{HeroError, Result};

use super::mesh::{normalize_meshes, MeshData};

/// Largest extent of the model after loading, in world units
const MODEL_SIZE: f32 = 2.0;

/// A loaded asset, or the reason it is absent.
#[derive(Debug, Clone)]
pub enum AssetHandle<T> {
    Ready(T),
    Missing(String),
}

impl<T> AssetHandle<T> {
    /// Wraps a load result, logging failures instead of propagating them.
    pub fn from_result(kind: &str, result: Result<T>) -> Self {
        match result {
            Ok(asset) => AssetHandle::Ready(asset),
            Err(err) => {
                log::warn!("{kind} unavailable, continuing without it: {err}");
                AssetHandle::Missing(err.to_string())
            }
        }
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            AssetHandle::Ready(asset) => Some(asset),
            AssetHandle::Missing(_) => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, AssetHandle::Ready(_))
    }
}

#[derive(Debug, Clone)]
pub struct ModelData {
    pub name: String,
    pub meshes: Vec<MeshData>,
    pub base_color: [f32; 3],
}

impl ModelData {
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(MeshData::triangle_count).sum()
    }
}

/// Loads an OBJ model (and its MTL, when present), centred and scaled to a
/// fixed size.
pub fn load_model(path: &Path) -> Result<ModelData> {
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|source| HeroError::ModelLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let materials = materials.unwrap_or_else(|err| {
        log::debug!("no materials for {}: {err}", path.display());
        Vec::new()
    });

    let base_color = models
        .first()
        .and_then(|m| m.mesh.material_id)
        .and_then(|id| materials.get(id))
        .and_then(|mtl| mtl.diffuse)
        .unwrap_or([0.56, 0.0, 1.0]);

    let mut meshes: Vec<MeshData> = models
        .iter()
        .map(|m| {
            MeshData::from_flat(&m.mesh.positions, &m.mesh.normals, m.mesh.indices.clone())
        })
        .filter(|m| !m.indices.is_empty())
        .collect();

    if meshes.is_empty() {
        return Err(HeroError::EmptyModel(path.to_path_buf()));
    }
    normalize_meshes(&mut meshes, MODEL_SIZE);

    let name = models
        .first()
        .map(|m| m.name.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| path.display().to_string());

    let model = ModelData {
        name,
        meshes,
        base_color,
    };
    log::info!(
        "Loaded model '{}' ({} triangles)",
        model.name,
        model.triangle_count()
    );
    Ok(model)
}

/// The ambient video shown once the hero completes. Playback belongs to the
/// platform; the hero only needs to know whether the file exists.
#[derive(Debug, Clone)]
pub struct VideoAsset {
    pub path: PathBuf,
}

pub fn load_video(path: &Path) -> Result<VideoAsset> {
    if !path.is_file() {
        return Err(HeroError::AssetMissing(path.to_path_buf()));
    }
    Ok(VideoAsset {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_is_an_error() {
        let result = load_model(Path::new("does/not/exist.obj"));
        assert!(matches!(result, Err(HeroError::ModelLoad { .. })));
    }

    #[test]
    fn test_missing_asset_becomes_missing_handle() {
        let handle = AssetHandle::from_result("video", load_video(Path::new("nope.webm")));
        assert!(!handle.is_ready());
        assert!(handle.get().is_none());
    }

    #[test]
    fn test_loads_obj_from_disk() {
        let dir = std::env::temp_dir().join(format!("wing_hero_obj_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("quad.obj");
        std::fs::write(
            &path,
            "o quad\nv 0 0 0\nv 4 0 0\nv 4 4 0\nv 0 4 0\nf 1 2 3 4\n",
        )
        .unwrap();

        let model = load_model(&path).unwrap();
        assert_eq!(model.name, "quad");
        assert_eq!(model.triangle_count(), 2);
        let xs: Vec<f32> = model.meshes[0].vertices.iter().map(|v| v.position[0]).collect();
        assert!(xs.iter().all(|x| (-1.0..=1.0).contains(x)));

        std::fs::remove_dir_all(&dir).ok();
    }
}
