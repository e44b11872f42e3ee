use crate::scene::LightId;
use thiserror::Error;

/// Errors raised by a scene backend when a guest request cannot be applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("light {0} does not exist")]
    UnknownLight(LightId),

    #[error("unknown light kind '{0}' (expected directional, point or spot)")]
    UnknownKind(String),

    #[error("a light named '{0}' already exists")]
    DuplicateName(String),

    #[error("light intensity must be a finite non-negative number, got {0}")]
    InvalidIntensity(f32),

    #[error("light color components must be finite and non-negative")]
    InvalidColor,

    #[error("scene has no room for more lights")]
    Full,
}
