//! `light` scene-object module
//!
//! Thin proxy: every function resolves a handle and forwards to the
//! embedder's [`LightBackend`]. Backend failures are thrown back into the
//! guest as regular exceptions so scripts can catch them.

use crate::bridge::{Color, ScriptHandle};
use crate::registrar::ApiModule;
use rquickjs::function::Opt;
use rquickjs::{Ctx, Exception, Function, Object};
use std::rc::Rc;
use wasgi_core::scene::{LightBackend, LightId, LightKind, SceneError, SharedLights};

pub struct LightApi {
    scene: SharedLights,
}

impl LightApi {
    pub fn new(scene: SharedLights) -> Self {
        Self { scene }
    }
}

impl ApiModule for LightApi {
    fn name(&self) -> &str {
        "light"
    }

    fn populate<'js>(&self, ctx: &Ctx<'js>, target: &Object<'js>) -> rquickjs::Result<()> {
        let scene = Rc::clone(&self.scene);
        target.set(
            "create",
            Function::new(
                ctx.clone(),
                move |ctx: Ctx<'js>, kind: String, name: Opt<String>| -> rquickjs::Result<ScriptHandle> {
                    let kind = kind
                        .parse::<LightKind>()
                        .map_err(|err| throw(&ctx, err))?;
                    let id = write(&ctx, &scene, |lights| {
                        lights.create_light(kind, name.0.as_deref())
                    })?;
                    Ok(id.into())
                },
            )?
            .with_name("create")?,
        )?;

        let scene = Rc::clone(&self.scene);
        target.set(
            "find",
            Function::new(
                ctx.clone(),
                move |ctx: Ctx<'js>, name: String| -> rquickjs::Result<Option<ScriptHandle>> {
                    read(&ctx, &scene, |lights| Ok(lights.find_light(&name).map(ScriptHandle::from)))
                },
            )?
            .with_name("find")?,
        )?;

        let scene = Rc::clone(&self.scene);
        target.set(
            "getKind",
            Function::new(
                ctx.clone(),
                move |ctx: Ctx<'js>, handle: ScriptHandle| -> rquickjs::Result<String> {
                    let id = resolve(&ctx, handle)?;
                    read(&ctx, &scene, |lights| Ok(lights.light(id)?.kind.as_str().to_string()))
                },
            )?
            .with_name("getKind")?,
        )?;

        let scene = Rc::clone(&self.scene);
        target.set(
            "getColor",
            Function::new(
                ctx.clone(),
                move |ctx: Ctx<'js>, handle: ScriptHandle| -> rquickjs::Result<Color> {
                    let id = resolve(&ctx, handle)?;
                    read(&ctx, &scene, |lights| Ok(Color(lights.light(id)?.color)))
                },
            )?
            .with_name("getColor")?,
        )?;

        let scene = Rc::clone(&self.scene);
        target.set(
            "setColor",
            Function::new(
                ctx.clone(),
                move |ctx: Ctx<'js>, handle: ScriptHandle, color: Color| -> rquickjs::Result<()> {
                    let id = resolve(&ctx, handle)?;
                    write(&ctx, &scene, |lights| lights.set_color(id, color.0))
                },
            )?
            .with_name("setColor")?,
        )?;

        let scene = Rc::clone(&self.scene);
        target.set(
            "getIntensity",
            Function::new(
                ctx.clone(),
                move |ctx: Ctx<'js>, handle: ScriptHandle| -> rquickjs::Result<f32> {
                    let id = resolve(&ctx, handle)?;
                    read(&ctx, &scene, |lights| Ok(lights.light(id)?.intensity))
                },
            )?
            .with_name("getIntensity")?,
        )?;

        let scene = Rc::clone(&self.scene);
        target.set(
            "setIntensity",
            Function::new(
                ctx.clone(),
                move |ctx: Ctx<'js>, handle: ScriptHandle, intensity: f32| -> rquickjs::Result<()> {
                    let id = resolve(&ctx, handle)?;
                    write(&ctx, &scene, |lights| lights.set_intensity(id, intensity))
                },
            )?
            .with_name("setIntensity")?,
        )?;

        let scene = Rc::clone(&self.scene);
        target.set(
            "count",
            Function::new(ctx.clone(), move |ctx: Ctx<'js>| -> rquickjs::Result<u32> {
                read(&ctx, &scene, |lights| {
                    Ok(u32::try_from(lights.light_count()).unwrap_or(u32::MAX))
                })
            })?
            .with_name("count")?,
        )?;

        Ok(())
    }
}

fn resolve(ctx: &Ctx<'_>, handle: ScriptHandle) -> rquickjs::Result<LightId> {
    handle
        .light()
        .ok_or_else(|| Exception::throw_reference(ctx, "light handle 0 is not valid"))
}

fn read<T>(
    ctx: &Ctx<'_>,
    scene: &SharedLights,
    f: impl FnOnce(&dyn LightBackend) -> Result<T, SceneError>,
) -> rquickjs::Result<T> {
    let lights = scene
        .try_borrow()
        .map_err(|_| Exception::throw_internal(ctx, "scene is being modified by the host"))?;
    f(&*lights).map_err(|err| throw(ctx, err))
}

fn write<T>(
    ctx: &Ctx<'_>,
    scene: &SharedLights,
    f: impl FnOnce(&mut dyn LightBackend) -> Result<T, SceneError>,
) -> rquickjs::Result<T> {
    let mut lights = scene
        .try_borrow_mut()
        .map_err(|_| Exception::throw_internal(ctx, "scene is borrowed by the host"))?;
    f(&mut *lights).map_err(|err| throw(ctx, err))
}

fn throw(ctx: &Ctx<'_>, err: SceneError) -> rquickjs::Error {
    let message = err.to_string();
    match err {
        SceneError::UnknownLight(_) => Exception::throw_reference(ctx, &message),
        SceneError::InvalidIntensity(_) => Exception::throw_range(ctx, &message),
        SceneError::UnknownKind(_) | SceneError::DuplicateName(_) | SceneError::InvalidColor => {
            Exception::throw_type(ctx, &message)
        }
        SceneError::Full => Exception::throw_internal(ctx, &message),
    }
}
