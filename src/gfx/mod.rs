//! # Graphics Module
//!
//! Everything that turns a [`HeroSnapshot`](crate::hero::HeroSnapshot) into
//! pixels: asset loading, the camera and per-frame uniform, the backdrop that
//! stands in for the background video, and the wgpu render engine.
//!
//! - **Assets** ([`assets`]) - OBJ model loading via `tobj`, presence-checked video handle
//! - **Meshes** ([`mesh`]) - CPU mesh data, normalization and GPU upload
//! - **Camera** ([`camera`]) - Fixed perspective camera and the shader uniform
//! - **Backdrop** ([`backdrop`]) - Clear color for the intro and video content
//! - **Render Engine** ([`render_engine`]) - Surface, pipeline and frame submission

pub mod assets;
pub mod backdrop;
pub mod camera;
pub mod mesh;
pub mod render_engine;

pub use assets::{AssetHandle, ModelData, VideoAsset};
pub use backdrop::{backdrop_animates, backdrop_color, intro_backdrop};
pub use camera::{HeroCamera, HeroUniform};
pub use render_engine::{FrameDesc, GpuModel, RenderEngine};
