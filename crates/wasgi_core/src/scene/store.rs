//! In-memory light store
//!
//! Reference backend used by the `wasgi` runner and the test suites.

use super::{Light, LightBackend, LightId, LightKind, SceneError};
use glam::Vec3;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct SceneStore {
    lights: Vec<Light>,
    by_name: HashMap<String, LightId>,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LightId, &Light)> {
        self.lights
            .iter()
            .enumerate()
            .filter_map(|(index, light)| Some((Self::id_for(index)?, light)))
    }

    fn id_for(index: usize) -> Option<LightId> {
        u32::try_from(index + 1).ok().and_then(LightId::from_raw)
    }

    fn slot(&self, id: LightId) -> Result<usize, SceneError> {
        let index = id.raw() as usize - 1;
        if index < self.lights.len() {
            Ok(index)
        } else {
            Err(SceneError::UnknownLight(id))
        }
    }
}

impl LightBackend for SceneStore {
    fn create_light(&mut self, kind: LightKind, name: Option<&str>) -> Result<LightId, SceneError> {
        if let Some(name) = name {
            if self.by_name.contains_key(name) {
                return Err(SceneError::DuplicateName(name.to_string()));
            }
        }

        let id = Self::id_for(self.lights.len()).ok_or(SceneError::Full)?;
        let mut light = Light::new(kind);
        if let Some(name) = name {
            light.name = Some(name.to_string());
            self.by_name.insert(name.to_string(), id);
        }
        self.lights.push(light);

        tracing::debug!(%id, kind = kind.as_str(), "created light");
        Ok(id)
    }

    fn find_light(&self, name: &str) -> Option<LightId> {
        self.by_name.get(name).copied()
    }

    fn light(&self, id: LightId) -> Result<&Light, SceneError> {
        let index = self.slot(id)?;
        Ok(&self.lights[index])
    }

    fn set_color(&mut self, id: LightId, color: Vec3) -> Result<(), SceneError> {
        if !color.is_finite() || color.min_element() < 0.0 {
            return Err(SceneError::InvalidColor);
        }
        let index = self.slot(id)?;
        self.lights[index].color = color;
        Ok(())
    }

    fn set_intensity(&mut self, id: LightId, intensity: f32) -> Result<(), SceneError> {
        if !intensity.is_finite() || intensity < 0.0 {
            return Err(SceneError::InvalidIntensity(intensity));
        }
        let index = self.slot(id)?;
        self.lights[index].intensity = intensity;
        Ok(())
    }

    fn light_count(&self) -> usize {
        self.lights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_lights_get_sequential_ids() {
        let mut store = SceneStore::new();
        let a = store.create_light(LightKind::Point, None).unwrap();
        let b = store.create_light(LightKind::Spot, Some("key")).unwrap();

        assert_eq!(a.raw(), 1);
        assert_eq!(b.raw(), 2);
        assert_eq!(store.light_count(), 2);
        assert_eq!(store.find_light("key"), Some(b));
        assert_eq!(store.light(b).unwrap().kind, LightKind::Spot);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut store = SceneStore::new();
        store.create_light(LightKind::Point, Some("sun")).unwrap();
        let err = store.create_light(LightKind::Directional, Some("sun")).unwrap_err();
        assert_eq!(err, SceneError::DuplicateName("sun".into()));
        assert_eq!(store.light_count(), 1);
    }

    #[test]
    fn unknown_ids_are_errors() {
        let mut store = SceneStore::new();
        let id = LightId::from_raw(3).unwrap();
        assert_eq!(store.light(id).unwrap_err(), SceneError::UnknownLight(id));
        assert!(store.set_intensity(id, 2.0).is_err());
    }

    #[test]
    fn setters_validate_values() {
        let mut store = SceneStore::new();
        let id = store.create_light(LightKind::Point, None).unwrap();

        assert_eq!(
            store.set_intensity(id, -1.0),
            Err(SceneError::InvalidIntensity(-1.0))
        );
        assert_eq!(
            store.set_color(id, Vec3::new(f32::NAN, 0.0, 0.0)),
            Err(SceneError::InvalidColor)
        );

        store.set_color(id, Vec3::new(1.0, 0.5, 0.25)).unwrap();
        store.set_intensity(id, 4.0).unwrap();
        let light = store.light(id).unwrap();
        assert_eq!(light.color, Vec3::new(1.0, 0.5, 0.25));
        assert_eq!(light.intensity, 4.0);
    }

    #[test]
    fn iter_pairs_ids_with_lights() {
        let mut store = SceneStore::new();
        store.create_light(LightKind::Point, Some("a")).unwrap();
        store.create_light(LightKind::Spot, Some("b")).unwrap();
        let names: Vec<_> = store
            .iter()
            .map(|(id, light)| (id.raw(), light.name.clone().unwrap()))
            .collect();
        assert_eq!(names, vec![(1, "a".to_string()), (2, "b".to_string())]);
    }
}
