pub mod assignment;
pub mod csv_export;
pub mod dice;
pub mod error;
pub mod history;
pub mod roster;
pub mod session;
pub mod settings;
pub mod storage;
pub mod units;
pub mod web;
pub mod webhook;
pub mod wheel;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Browser entry: panics and logging go to the console. The page then builds a `web::WebWheels`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    console_log::init_with_level(log::Level::Info).map_err(|error| JsValue::from_str(&error.to_string()))
}
