//! WASM bindings for the page's click counter
//!
//! All counter state is held in Rust by a [`CounterApp`]; JavaScript only
//! loads the module and mounts it.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { CounterApp } from './pkg/counter_wasm.js';
//!
//! await init();
//!
//! const app = CounterApp.mount();   // binds #increment and #count
//! app.count();                      // 0
//! app.reset();                      // writes "0" into #count
//! ```

pub mod app;
pub mod surface;

use wasm_bindgen::prelude::*;

pub use app::CounterApp;
pub use surface::DomText;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        let version = get_version();
        assert!(!version.is_empty());
    }
}
