//! WASGI Core
//!
//! Types shared between the script host and its embedder:
//! - Simulation clock (fixed tick rate)
//! - Scene capability traits the host API modules proxy to
//! - An in-memory scene for tools and tests

pub mod scene;
pub mod time;

pub use glam;

/// Host version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
