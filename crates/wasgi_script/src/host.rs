//! Script host lifecycle
//!
//! One runtime, one context, one cached update-hook atom. Creating a
//! [`ScriptHost`] leaves the guest ready to accept source; dropping it tears
//! the interpreter down.

use crate::api::{ConsoleApi, LightApi};
use crate::bridge;
use crate::error::ScriptError;
use crate::registrar::{register_namespace, ApiModule};
use crate::report::report;
use rquickjs::context::EvalOptions;
use rquickjs::{Atom, CatchResultExt, Context, Ctx, Object, Persistent, Runtime, Value};
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use wasgi_core::scene::SharedLights;
use wasgi_services::{HostConfig, LogSink, TracingSink};

const EVALUATE_LABEL: &str = "Error evaluating script";
const UPDATE_LABEL: &str = "Error calling update()";

/// Counters for the frame dispatcher.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Every `tick` call, hook or not.
    pub ticks: u64,
    /// Ticks whose hook ran to completion.
    pub hook_calls: u64,
    /// Ticks whose hook lookup or invocation raised.
    pub failures: u64,
}

/// Script execution host
///
/// Not re-entrant: `evaluate` and `tick` called while another call is still
/// running (from a log sink or an API module, say) fail with
/// [`ScriptError::Busy`].
pub struct ScriptHost {
    // Field order is drop order: the atom must be freed before its context
    // and runtime.
    update_atom: Persistent<Atom<'static>>,
    context: Context,
    runtime: Runtime,
    config: HostConfig,
    sink: Rc<dyn LogSink>,
    stats: Cell<FrameStats>,
    running: Cell<bool>,
}

/// Marks the host as running until dropped.
struct Running<'a>(&'a Cell<bool>);

impl<'a> Running<'a> {
    fn enter(flag: &'a Cell<bool>) -> Result<Self, ScriptError> {
        if flag.replace(true) {
            return Err(ScriptError::Busy);
        }
        Ok(Running(flag))
    }
}

impl Drop for Running<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl ScriptHost {
    /// Host with the default `console` and `light` modules.
    pub fn new(
        config: HostConfig,
        sink: Rc<dyn LogSink>,
        scene: SharedLights,
    ) -> Result<Self, ScriptError> {
        Self::builder(config).sink(sink).lights(scene).build()
    }

    pub fn builder(config: HostConfig) -> ScriptHostBuilder {
        ScriptHostBuilder {
            config,
            sink: Rc::new(TracingSink),
            modules: Vec::new(),
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Run `source` once in global scope, in sloppy mode unless the source
    /// opts into strict mode itself.
    ///
    /// Global declarations (including the update hook) stay visible on the
    /// global object afterwards. Calling this again re-runs the new source
    /// under the guest's own redeclaration rules.
    pub fn evaluate(&self, source: &str) -> Result<(), ScriptError> {
        let _running = Running::enter(&self.running)?;
        let mut options = EvalOptions::default();
        options.global = true;
        options.strict = false;

        self.context.with(|ctx| {
            match ctx.eval_with_options::<Value, _>(source, options).catch(&ctx) {
                Ok(_) => {
                    tracing::debug!(bytes = source.len(), "evaluated script");
                    Ok(())
                }
                Err(caught) => Err(ScriptError::Evaluation(report(
                    self.sink.as_ref(),
                    caught,
                    EVALUATE_LABEL,
                ))),
            }
        })
    }

    pub fn evaluate_file(&self, path: &Path) -> Result<(), ScriptError> {
        let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loading script");
        self.evaluate(&source)
    }

    /// Invoke the guest update hook with `delta_time` seconds.
    ///
    /// A missing or non-callable hook is a successful no-op. A raising hook is
    /// reported and returned as [`ScriptError::Invocation`]; the interpreter
    /// stays usable for the next tick.
    pub fn tick(&self, delta_time: f32) -> Result<(), ScriptError> {
        let _running = Running::enter(&self.running)?;
        let mut stats = self.stats.get();
        stats.ticks += 1;

        let result = self.context.with(|ctx| {
            match self.dispatch(&ctx, delta_time).catch(&ctx) {
                Ok(called) => {
                    if called {
                        stats.hook_calls += 1;
                    }
                    Ok(())
                }
                Err(caught) => {
                    stats.failures += 1;
                    Err(ScriptError::Invocation(report(
                        self.sink.as_ref(),
                        caught,
                        UPDATE_LABEL,
                    )))
                }
            }
        });

        self.stats.set(stats);
        result
    }

    /// Returns whether a hook was found and called.
    fn dispatch<'js>(&self, ctx: &Ctx<'js>, delta_time: f32) -> rquickjs::Result<bool> {
        let atom = self.update_atom.clone().restore(ctx)?;
        let hook: Value = ctx.globals().get(atom)?;
        let Some(hook) = hook.as_function() else {
            tracing::trace!(hook = %self.config.update_hook, "no update hook defined");
            return Ok(false);
        };

        let delta = bridge::delta_to_js(ctx, delta_time);
        hook.call::<_, Value>((delta,))?;
        Ok(true)
    }

    pub fn stats(&self) -> FrameStats {
        self.stats.get()
    }

    /// Live guest objects in the interpreter.
    pub fn object_count(&self) -> i64 {
        self.runtime.memory_usage().obj_count
    }

    /// Bytes currently allocated by the interpreter.
    pub fn memory_used(&self) -> i64 {
        self.runtime.memory_usage().memory_used_size
    }

    pub fn run_gc(&self) {
        self.runtime.run_gc();
    }

    /// Run `f` inside the guest context. Values created in `f` must not
    /// escape it, and `f` must not call back into `evaluate` or `tick`.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(Ctx<'_>) -> R,
    {
        self.context.with(f)
    }
}

/// Assembles the module list before the interpreter is created.
pub struct ScriptHostBuilder {
    config: HostConfig,
    sink: Rc<dyn LogSink>,
    modules: Vec<Box<dyn ApiModule>>,
}

impl ScriptHostBuilder {
    /// Sink for guest console output and guest failures.
    pub fn sink(mut self, sink: Rc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Expose `light` backed by `scene`.
    pub fn lights(self, scene: SharedLights) -> Self {
        self.module(LightApi::new(scene))
    }

    pub fn module(mut self, module: impl ApiModule + 'static) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    pub fn build(self) -> Result<ScriptHost, ScriptError> {
        let ScriptHostBuilder {
            config,
            sink,
            modules,
        } = self;

        let runtime = Runtime::new().map_err(ScriptError::Allocation)?;
        if let Some(limit) = config.limits.memory_limit {
            runtime.set_memory_limit(limit);
        }
        if let Some(limit) = config.limits.max_stack_size {
            runtime.set_max_stack_size(limit);
        }
        if let Some(threshold) = config.limits.gc_threshold {
            runtime.set_gc_threshold(threshold);
        }
        let context = Context::full(&runtime).map_err(ScriptError::Allocation)?;

        let mut all: Vec<Box<dyn ApiModule>> = Vec::with_capacity(modules.len() + 1);
        all.push(Box::new(ConsoleApi::new(Rc::clone(&sink))));
        all.extend(modules);

        let update_atom = context
            .with(|ctx| -> rquickjs::Result<_> {
                let atom = Atom::from_str(ctx.clone(), &config.update_hook)?;
                let globals = ctx.globals();
                let namespace = register_namespace(&ctx, &globals, &config.namespace, &all)?;
                if config.console_global {
                    if let Some(console) = namespace.get::<_, Option<Object>>("console")? {
                        globals.set("console", console)?;
                    }
                }
                Ok(Persistent::save(&ctx, atom))
            })
            .map_err(ScriptError::Registration)?;

        tracing::info!(
            namespace = %config.namespace,
            hook = %config.update_hook,
            modules = all.len(),
            "script host ready"
        );

        Ok(ScriptHost {
            update_atom,
            context,
            runtime,
            config,
            sink,
            stats: Cell::new(FrameStats::default()),
            running: Cell::new(false),
        })
    }
}
