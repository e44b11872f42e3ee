//! Built-in API modules installed under the host namespace

mod console;
mod light;

pub use console::ConsoleApi;
pub use light::LightApi;
