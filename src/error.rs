use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while setting up the page effects.
///
/// None of these reach the viewer: the worst outcome of any of them is that a
/// decorative feature is replaced by its fallback or left out.
#[derive(Error, Debug)]
pub enum EffectsError {
    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`crate::config::EffectsConfig`].
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No GPU adapter compatible with the window surface.
    #[error("no suitable GPU adapter: {0}")]
    Adapter(String),

    /// Adapter found but device creation failed.
    #[error("failed to create GPU device: {0}")]
    Device(String),

    /// Surface creation, configuration or acquisition failed.
    #[error("surface error: {0}")]
    Surface(String),

    /// Building the 3D scene or its pipeline failed.
    #[error("scene construction failed: {0}")]
    SceneConstruction(String),
}

pub type Result<T> = std::result::Result<T, EffectsError>;

impl From<wgpu::CreateSurfaceError> for EffectsError {
    fn from(err: wgpu::CreateSurfaceError) -> Self {
        EffectsError::Surface(err.to_string())
    }
}

impl From<wgpu::SurfaceError> for EffectsError {
    fn from(err: wgpu::SurfaceError) -> Self {
        EffectsError::Surface(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_stage() {
        let err = EffectsError::Adapter("none found".into());
        assert_eq!(err.to_string(), "no suitable GPU adapter: none found");

        let err = EffectsError::SceneConstruction("bad shader".into());
        assert!(err.to_string().contains("bad shader"));
    }

    #[test]
    fn config_error_keeps_path_and_source() {
        let err = EffectsError::Config {
            path: PathBuf::from("effects.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("effects.json"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
