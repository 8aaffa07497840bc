pub mod config;
pub mod history;
pub mod painter;
pub mod replay;
pub mod save_format;
pub mod stroke;
pub mod surface;

pub use config::{EraserShape, EraserStyle, PainterConfig};
pub use history::StrokeHistory;
pub use painter::{draw_stroke, DrawMode, EraseMode, Mode, Painter};
pub use replay::{ReplayClock, ReplayMode, ReplayTicket, ReplayToken};
pub use save_format::{decode_save_data, encode_save_data, fit_strokes, ImportError, SaveData};
pub use stroke::{stroke_time, LineCap, Point, Stroke, StrokeStyle};
pub use surface::{Surface, SurfaceError};
