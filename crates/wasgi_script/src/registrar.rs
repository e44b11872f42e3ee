//! Host API namespace construction

use rquickjs::{Ctx, Object};

/// A guest-visible API module such as `console` or `light`.
///
/// Modules only fill the object they are given; they never look at their
/// parent, so they can be added or dropped without touching the registrar.
pub trait ApiModule {
    /// Property name under the namespace object.
    fn name(&self) -> &str;

    fn populate<'js>(&self, ctx: &Ctx<'js>, target: &Object<'js>) -> rquickjs::Result<()>;
}

/// Build the namespace object, populate one child per module and attach the
/// namespace to `globals` under `name`.
pub fn register_namespace<'js>(
    ctx: &Ctx<'js>,
    globals: &Object<'js>,
    name: &str,
    modules: &[Box<dyn ApiModule>],
) -> rquickjs::Result<Object<'js>> {
    let namespace = Object::new(ctx.clone())?;

    for module in modules {
        let target = Object::new(ctx.clone())?;
        module.populate(ctx, &target)?;
        namespace.set(module.name(), target)?;
        tracing::debug!(namespace = name, module = module.name(), "registered API module");
    }

    globals.set(name, namespace.clone())?;
    Ok(namespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rquickjs::{Context, Function, Runtime};

    struct Constant {
        name: &'static str,
        value: i32,
    }

    impl ApiModule for Constant {
        fn name(&self) -> &str {
            self.name
        }

        fn populate<'js>(&self, ctx: &Ctx<'js>, target: &Object<'js>) -> rquickjs::Result<()> {
            let value = self.value;
            target.set("value", value)?;
            target.set("get", Function::new(ctx.clone(), move || value)?)?;
            Ok(())
        }
    }

    #[test]
    fn modules_land_under_the_namespace() {
        let runtime = Runtime::new().unwrap();
        let context = Context::full(&runtime).unwrap();
        let modules: Vec<Box<dyn ApiModule>> = vec![
            Box::new(Constant { name: "one", value: 1 }),
            Box::new(Constant { name: "two", value: 2 }),
        ];

        context.with(|ctx| {
            register_namespace(&ctx, &ctx.globals(), "Host", &modules).unwrap();

            assert_eq!(ctx.eval::<i32, _>("Host.one.value").unwrap(), 1);
            assert_eq!(ctx.eval::<i32, _>("Host.two.get()").unwrap(), 2);
            assert_eq!(
                ctx.eval::<String, _>("Object.keys(Host).join(',')").unwrap(),
                "one,two"
            );
        });
    }

    #[test]
    fn empty_module_list_still_installs_namespace() {
        let runtime = Runtime::new().unwrap();
        let context = Context::full(&runtime).unwrap();

        context.with(|ctx| {
            let namespace = register_namespace(&ctx, &ctx.globals(), "Empty", &[]).unwrap();
            assert_eq!(namespace.keys::<String>().count(), 0);
            assert_eq!(ctx.eval::<String, _>("typeof Empty").unwrap(), "object");
        });
    }
}
