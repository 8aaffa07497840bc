mod app;
mod canvas;
mod dom;
mod logging;
mod palette;
mod persistence;
mod scheduler;
mod settings;
mod util;

pub use app::run;
pub use canvas::CanvasSurface;
