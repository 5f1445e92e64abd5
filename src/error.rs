use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop the renderer from coming up or presenting a frame.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to create drawing surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture format")]
    NoSurfaceFormat,

    #[error("shader `{label}` failed validation: {message}")]
    Shader { label: &'static str, message: String },

    #[error("failed to parse font {path:?}: {message}")]
    Font { path: PathBuf, message: String },

    #[error("no usable font found")]
    NoFont,

    #[error("failed to acquire frame: {0}")]
    Frame(#[from] wgpu::SurfaceError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Whether the surface can be reconfigured and the next frame retried.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::Frame(
                wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Timeout
            )
        )
    }
}
