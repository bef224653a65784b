//! Error types for the hero crate.
//!
//! The scroll controller itself never fails; errors only come from the
//! ambient layers around it (configuration, asset loading, windowing and GPU setup).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeroError {
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to load model {path}: {source}")]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("model {0} contains no geometry")]
    EmptyModel(PathBuf),

    #[error("asset not found: {0}")]
    AssetMissing(PathBuf),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to request GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface is not usable: {0}")]
    UnsupportedSurface(&'static str),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

pub type Result<T> = std::result::Result<T, HeroError>;
