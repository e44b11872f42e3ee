//! WASGI Scripting Host
//!
//! Runs guest JavaScript inside QuickJS and drives it once per simulation tick.
//!
//! ## Architecture
//!
//! - **Host:** [`ScriptHost`] owns the runtime, the context and the cached
//!   update-hook atom for its whole lifetime
//! - **API surface:** [`ApiModule`]s populate one namespace object on the
//!   guest global scope (`WebSG.console`, `WebSG.light`, ...)
//! - **Loading:** [`ScriptHost::evaluate`] runs source once in global scope
//! - **Ticking:** [`ScriptHost::tick`] calls the guest `onupdate(dt)` if defined
//! - **Failures:** every guest exception is turned into log text by
//!   [`report`](report::report) and surfaced as a [`ScriptError`]
//!
//! Guest values never outlive the `Context::with` call that produced them, so
//! each one is freed exactly once when its Rust handle drops.

pub mod api;
pub mod bridge;
pub mod error;
pub mod host;
pub mod registrar;
pub mod report;

pub use error::ScriptError;
pub use host::{FrameStats, ScriptHost, ScriptHostBuilder};
pub use registrar::ApiModule;
pub use report::Diagnostic;

pub use rquickjs;
