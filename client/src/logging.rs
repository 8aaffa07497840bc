use log::Level;
use web_sys::Window;

use crate::settings::{debug_enabled, location_search};

/// Routes `log` records to the devtools console. `?debug=1` lowers the
/// threshold to debug.
pub fn init(window: &Window) {
    console_error_panic_hook::set_once();
    let level = if debug_enabled(&location_search(window)) {
        Level::Debug
    } else {
        Level::Info
    };
    if let Err(error) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&format!("logger already set: {error}").into());
    }
}
