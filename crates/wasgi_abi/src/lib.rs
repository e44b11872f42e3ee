//! WASGI embedder boundary
//!
//! The sandboxed build exports three C-ABI functions that return status
//! codes instead of structured errors:
//!
//! | export       | meaning                                      |
//! |--------------|----------------------------------------------|
//! | `initialize` | create the interpreter and host API surface  |
//! | `evalJS`     | run NUL-terminated UTF-8 source once         |
//! | `update`     | call the guest `onupdate(dt)` hook if any    |
//!
//! `0` is success; negative values are the `STATUS_*` constants in
//! [`wasgi_script::error`]. Guest failures are logged, never propagated.
//!
//! The sandbox is single-threaded, so the host lives in a thread-local slot.
//! Rust embedders linking this crate can call [`initialize_with`] to supply
//! their own config, sink and scene.

use std::cell::RefCell;
use std::ffi::{c_char, CStr};
use std::rc::Rc;
use wasgi_core::scene::{SceneStore, SharedLights};
use wasgi_script::error::STATUS_OK;
use wasgi_script::{ScriptError, ScriptHost};
use wasgi_services::{HostConfig, LogSink, TracingSink};

thread_local! {
    static HOST: RefCell<Option<ScriptHost>> = const { RefCell::new(None) };
}

/// Create the host with default config, a `tracing` sink and an in-memory scene.
///
/// Sandbox entry point only. Inside the sandbox nothing else can install a
/// subscriber, so this one does it (stderr, first caller wins). Rust embedders
/// own their logging and should call [`initialize_with`], which installs none.
#[no_mangle]
pub extern "C" fn initialize() -> i32 {
    // Fails harmlessly if the embedder already set a global subscriber.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .try_init();

    let scene: SharedLights = Rc::new(RefCell::new(SceneStore::new()));
    status(initialize_with(HostConfig::default(), Rc::new(TracingSink), scene))
}

/// Run guest source once in global scope.
///
/// # Safety
///
/// `code` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
#[export_name = "evalJS"]
pub unsafe extern "C" fn load_script(code: *const c_char) -> i32 {
    if code.is_null() {
        return status(Err(ScriptError::InvalidSource));
    }
    // SAFETY: non-null and NUL-terminated per the caller contract.
    let source = unsafe { CStr::from_ptr(code) };
    match source.to_str() {
        Ok(source) => status(with_host(|host| host.evaluate(source))),
        Err(_) => status(Err(ScriptError::InvalidSource)),
    }
}

/// Dispatch one frame to the guest update hook.
#[export_name = "update"]
pub extern "C" fn tick(delta_time: f32) -> i32 {
    status(with_host(|host| host.tick(delta_time)))
}

/// Install a host built from the given collaborators.
///
/// A second call fails with [`ScriptError::AlreadyInitialized`] and leaves the
/// existing host untouched.
pub fn initialize_with(
    config: HostConfig,
    sink: Rc<dyn LogSink>,
    scene: SharedLights,
) -> Result<(), ScriptError> {
    HOST.with(|slot| {
        let mut slot = slot.try_borrow_mut().map_err(|_| ScriptError::Busy)?;
        if slot.is_some() {
            return Err(ScriptError::AlreadyInitialized);
        }
        *slot = Some(ScriptHost::new(config, sink, scene)?);
        Ok(())
    })
}

/// Run `f` against the installed host.
///
/// Holds the slot exclusively, so a re-entrant call from inside the guest
/// fails with [`ScriptError::Busy`] instead of nesting interpreter entries.
pub fn with_host<R>(
    f: impl FnOnce(&ScriptHost) -> Result<R, ScriptError>,
) -> Result<R, ScriptError> {
    HOST.with(|slot| {
        let slot = slot.try_borrow_mut().map_err(|_| ScriptError::Busy)?;
        let host = slot.as_ref().ok_or(ScriptError::NotInitialized)?;
        f(host)
    })
}

fn status(result: Result<(), ScriptError>) -> i32 {
    match result {
        Ok(()) => STATUS_OK,
        Err(err) => {
            tracing::debug!(status = err.status(), "{err}");
            err.status()
        }
    }
}
