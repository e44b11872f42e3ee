//! Value bridge between host types and guest values
//!
//! Handle-based access to scene objects: the guest only ever sees plain
//! numbers and arrays, never host pointers.

use rquickjs::{Ctx, FromJs, IntoJs, Value};
use wasgi_core::glam::Vec3;
use wasgi_core::scene::LightId;

/// Opaque handle for script access
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScriptHandle(pub u32);

impl From<LightId> for ScriptHandle {
    fn from(id: LightId) -> Self {
        ScriptHandle(id.raw())
    }
}

impl ScriptHandle {
    /// `None` for the null handle.
    pub fn light(self) -> Option<LightId> {
        LightId::from_raw(self.0)
    }
}

impl<'js> FromJs<'js> for ScriptHandle {
    fn from_js(ctx: &Ctx<'js>, value: Value<'js>) -> rquickjs::Result<Self> {
        u32::from_js(ctx, value).map(ScriptHandle)
    }
}

impl<'js> IntoJs<'js> for ScriptHandle {
    fn into_js(self, ctx: &Ctx<'js>) -> rquickjs::Result<Value<'js>> {
        self.0.into_js(ctx)
    }
}

/// RGB color, seen by the guest as `[r, g, b]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color(pub Vec3);

impl<'js> FromJs<'js> for Color {
    fn from_js(ctx: &Ctx<'js>, value: Value<'js>) -> rquickjs::Result<Self> {
        let components = Vec::<f32>::from_js(ctx, value)?;
        match components.as_slice() {
            [r, g, b] => Ok(Color(Vec3::new(*r, *g, *b))),
            _ => Err(rquickjs::Error::new_from_js_message(
                "array",
                "color",
                format!("expected [r, g, b], got {} components", components.len()),
            )),
        }
    }
}

impl<'js> IntoJs<'js> for Color {
    fn into_js(self, ctx: &Ctx<'js>) -> rquickjs::Result<Value<'js>> {
        self.0.to_array().to_vec().into_js(ctx)
    }
}

/// Widen a tick delta to a guest number.
pub fn delta_to_js<'js>(ctx: &Ctx<'js>, delta_time: f32) -> Value<'js> {
    Value::new_float(ctx.clone(), f64::from(delta_time))
}
