//! Scene capabilities exposed to guest scripts
//!
//! The script host never owns scene data. API modules proxy every guest call
//! to a backend implementing these traits; the embedder decides what a light
//! actually is.

mod error;
mod store;

pub use error::SceneError;
pub use store::SceneStore;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Opaque light identifier. Zero is never handed out.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LightId(u32);

impl LightId {
    pub fn from_raw(raw: u32) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightKind {
    Directional,
    Point,
    Spot,
}

impl LightKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LightKind::Directional => "directional",
            LightKind::Point => "point",
            LightKind::Spot => "spot",
        }
    }
}

impl FromStr for LightKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "directional" => Ok(LightKind::Directional),
            "point" => Ok(LightKind::Point),
            "spot" => Ok(LightKind::Spot),
            other => Err(SceneError::UnknownKind(other.to_string())),
        }
    }
}

/// Light state as seen through the host API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub name: Option<String>,
    pub kind: LightKind,
    pub color: Vec3,
    pub intensity: f32,
}

impl Light {
    pub fn new(kind: LightKind) -> Self {
        Self {
            name: None,
            kind,
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

/// Light-object family capability.
pub trait LightBackend {
    fn create_light(&mut self, kind: LightKind, name: Option<&str>) -> Result<LightId, SceneError>;

    fn find_light(&self, name: &str) -> Option<LightId>;

    fn light(&self, id: LightId) -> Result<&Light, SceneError>;

    fn set_color(&mut self, id: LightId, color: Vec3) -> Result<(), SceneError>;

    fn set_intensity(&mut self, id: LightId, intensity: f32) -> Result<(), SceneError>;

    fn light_count(&self) -> usize;
}

/// Backend handle shared between the embedder and the script host.
///
/// Both live on the one simulation thread, so plain `Rc<RefCell<_>>` is enough.
pub type SharedLights = Rc<RefCell<dyn LightBackend>>;
