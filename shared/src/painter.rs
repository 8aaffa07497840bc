use crate::config::{EraserShape, EraserStyle, PainterConfig};
use crate::history::StrokeHistory;
use crate::replay::{self, ReplayClock, ReplayMode, ReplayTicket};
use crate::save_format::{decode_save_data, encode_save_data, fit_strokes, ImportError, SaveData};
use crate::stroke::{LineCap, Point, Stroke, StrokeStyle};
use crate::surface::{Surface, SurfaceError};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawMode {
    Idle,
    Drawing { last: Point },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EraseMode {
    Idle,
    Active { last: Point },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    Draw(DrawMode),
    Erase(EraseMode),
}

/// Surface controller: captures strokes, erases, and replays the stroke
/// history onto a rendering target it owns exclusively.
pub struct Painter<S: Surface> {
    surface: S,
    history: StrokeHistory,
    pen: StrokeStyle,
    eraser: EraserStyle,
    mode: Mode,
    locked: bool,
    replay: ReplayClock,
    replay_delay_ms: u32,
    image: Option<S::Image>,
}

impl<S: Surface> Painter<S> {
    pub fn new(surface: S, config: PainterConfig) -> Self {
        Self {
            surface,
            history: StrokeHistory::new(),
            pen: config.pen,
            eraser: config.eraser,
            mode: Mode::Draw(DrawMode::Idle),
            locked: false,
            replay: ReplayClock::default(),
            replay_delay_ms: config.replay_delay_ms.max(1),
            image: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn strokes(&self) -> &[Stroke] {
        self.history.strokes()
    }

    pub fn pen(&self) -> &StrokeStyle {
        &self.pen
    }

    pub fn eraser(&self) -> &EraserStyle {
        &self.eraser
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_drawing_mode(&self) -> bool {
        matches!(self.mode, Mode::Draw(_))
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn replay_delay_ms(&self) -> u32 {
        self.replay_delay_ms
    }

    /// Pointer-down in draw mode. Returns `false` when the press is refused
    /// (locked canvas or eraser mode).
    pub fn start_draw(&mut self, point: Point, time: f64) -> bool {
        if self.locked || !self.is_drawing_mode() {
            return false;
        }
        self.history.begin_group();
        self.mode = Mode::Draw(DrawMode::Drawing { last: point });
        self.draw(point, time);
        true
    }

    pub fn draw(&mut self, point: Point, time: f64) {
        if self.locked {
            return;
        }
        let Mode::Draw(DrawMode::Drawing { last }) = self.mode else {
            return;
        };
        let end = point.nudged();
        let stroke = Stroke::segment(last, end, self.pen.clone(), time);
        draw_stroke(&mut self.surface, &stroke);
        self.history.push(stroke);
        self.mode = Mode::Draw(DrawMode::Drawing { last: end });
    }

    /// Pointer-up or pointer-leave, in either mode.
    pub fn end_draw(&mut self) {
        match self.mode {
            Mode::Draw(_) => self.mode = Mode::Draw(DrawMode::Idle),
            Mode::Erase(EraseMode::Active { .. }) => self.stop_erase(),
            Mode::Erase(EraseMode::Idle) => {}
        }
    }

    /// Switches pointer input to the eraser until the next pointer-up.
    pub fn change_mode(&mut self) {
        if self.is_drawing_mode() {
            self.mode = Mode::Erase(EraseMode::Idle);
        }
    }

    pub fn start_erase(&mut self, point: Point) {
        if self.locked || self.is_drawing_mode() {
            return;
        }
        self.mode = Mode::Erase(EraseMode::Active { last: point });
        self.clear_eraser_region(point);
    }

    pub fn erase(&mut self, point: Point) {
        if self.locked {
            return;
        }
        let Mode::Erase(EraseMode::Active { last }) = self.mode else {
            return;
        };
        self.clear_eraser_region(last);
        self.draw_eraser_outline(point);
        self.mode = Mode::Erase(EraseMode::Active { last: point });
    }

    pub fn stop_erase(&mut self) {
        if let Mode::Erase(EraseMode::Active { last }) = self.mode {
            self.clear_eraser_region(last);
        }
        self.mode = Mode::Draw(DrawMode::Idle);
    }

    pub fn undo(&mut self) -> bool {
        let Some(group) = self.history.undo() else {
            return false;
        };
        log::debug!("undo removed {} strokes", group.len());
        self.redraw_all(ReplayMode::Immediate);
        true
    }

    /// Re-appends the last undone group and paints only that group on top of
    /// what is already on the surface. An animated replay still in flight has
    /// left the surface partly drawn, so that case repaints the whole log.
    pub fn redo(&mut self) -> bool {
        let in_flight = self.replay.in_flight();
        let Some(group) = self.history.redo() else {
            return false;
        };
        log::debug!("redo restored {} strokes", group.len());
        if in_flight {
            self.redraw_all(ReplayMode::Immediate);
            return true;
        }
        self.replay.advance();
        for stroke in group {
            draw_stroke(&mut self.surface, stroke);
        }
        true
    }

    pub fn clear(&mut self) {
        self.surface.clear_all();
        self.locked = false;
        self.mode = match self.mode {
            Mode::Draw(_) => Mode::Draw(DrawMode::Idle),
            Mode::Erase(_) => Mode::Erase(EraseMode::Idle),
        };
        self.history.clear();
        self.replay.advance();
        log::debug!("canvas cleared");
    }

    /// Clears the surface and replays the whole log. In animated mode the
    /// returned tickets must be handed to [`Painter::run_ticket`] once their
    /// delay has elapsed.
    pub fn redraw_all(&mut self, mode: ReplayMode) -> Vec<ReplayTicket> {
        self.surface.clear_all();
        let token = self.replay.advance();
        let strokes = self.history.strokes();
        match mode {
            ReplayMode::Immediate => {
                for stroke in strokes {
                    draw_stroke(&mut self.surface, stroke);
                }
                Vec::new()
            }
            ReplayMode::Animated => {
                let tickets = replay::schedule(token, strokes, self.replay_delay_ms);
                self.replay.track(tickets.len());
                tickets
            }
        }
    }

    /// Draws a deferred replay stroke unless a clear or a newer replay has
    /// happened since it was issued.
    pub fn run_ticket(&mut self, ticket: &ReplayTicket) -> bool {
        if !self.replay.is_current(ticket.token) {
            return false;
        }
        draw_stroke(&mut self.surface, &ticket.stroke);
        self.replay.complete();
        true
    }

    pub fn export_save_data(&self) -> SaveData {
        SaveData {
            width: self.surface.width(),
            height: self.surface.height(),
            lines_array: self.history.strokes().to_vec(),
        }
    }

    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        encode_save_data(&self.export_save_data())
    }

    /// Replaces the log with a saved payload, rescaled to the current surface
    /// when the dimensions differ. State is untouched when validation fails.
    pub fn load_save_data(
        &mut self,
        payload: &str,
        mode: ReplayMode,
    ) -> Result<Vec<ReplayTicket>, ImportError> {
        let data = decode_save_data(payload)?;
        let (width, height) = (self.surface.width(), self.surface.height());
        log::debug!(
            "loading {} strokes saved at {}x{} onto {width}x{height}",
            data.lines_array.len(),
            data.width,
            data.height
        );
        self.clear();
        self.history.replace_log(fit_strokes(data, width, height));
        Ok(self.redraw_all(mode))
    }

    pub fn update_line_color(&mut self, color: impl Into<String>) {
        let color = color.into();
        if !color.is_empty() {
            self.pen.color = color;
        }
    }

    pub fn update_line_size(&mut self, size: f64) {
        if size.is_finite() && size > 0.0 {
            self.pen.size = size;
        }
    }

    pub fn update_line_cap(&mut self, cap: LineCap) {
        self.pen.line_cap = cap;
    }

    /// Negative or non-finite segments are dropped; the canvas would reject
    /// the whole list otherwise.
    pub fn update_line_dash(&mut self, dash: Vec<f64>) {
        self.pen.dash = dash
            .into_iter()
            .filter(|segment| segment.is_finite() && *segment >= 0.0)
            .collect();
    }

    pub fn update_line_dash_offset(&mut self, offset: f64) {
        self.pen.dash_offset = if offset.is_finite() {
            offset.trunc()
        } else {
            0.0
        };
    }

    pub fn set_eraser_style(&mut self, eraser: EraserStyle) {
        self.eraser = eraser;
    }

    /// Non-positive delays keep the current one.
    pub fn set_replay_delay(&mut self, delay_ms: f64) {
        if delay_ms.is_finite() && delay_ms >= 1.0 {
            self.replay_delay_ms = delay_ms.min(u32::MAX as f64) as u32;
        }
    }

    pub fn toggle_lock_canvas(&mut self) -> bool {
        self.locked = !self.locked;
        self.locked
    }

    pub fn capture_image(&mut self) -> bool {
        match self.surface.get_image() {
            Ok(image) => {
                self.image = Some(image);
                true
            }
            Err(error) => {
                log::warn!("capture failed: {error}");
                false
            }
        }
    }

    pub fn restore_image(&mut self) -> bool {
        let Some(image) = &self.image else {
            return false;
        };
        match self.surface.put_image(image) {
            Ok(()) => true,
            Err(error) => {
                log::warn!("restore failed: {error}");
                false
            }
        }
    }

    pub fn to_data_url(&self) -> Result<String, SurfaceError> {
        self.surface.to_data_url()
    }

    /// Applies new surface dimensions and repaints, since resizing a canvas
    /// wipes its pixels.
    pub fn resize(&mut self, width: f64, height: f64) {
        let width = floor_dimension(width);
        let height = floor_dimension(height);
        self.surface.set_size(width, height);
        self.redraw_all(ReplayMode::Immediate);
    }

    fn eraser_clear_path(&mut self, at: Point) {
        let EraserStyle {
            width,
            line_width,
            shape,
            ..
        } = self.eraser;
        self.surface.begin_path();
        match shape {
            EraserShape::Round => {
                if let Err(error) = self.surface.arc(at.x, at.y, width / 2.0 + line_width) {
                    log::warn!("eraser path failed: {error}");
                }
            }
            EraserShape::Square => self.surface.rect(
                at.x - width / 2.0 - line_width,
                at.y - width / 2.0 - line_width,
                width + line_width * 2.0,
                width + line_width * 2.0,
            ),
        }
        self.surface.clip();
    }

    fn clear_eraser_region(&mut self, at: Point) {
        self.surface.save();
        self.eraser_clear_path(at);
        self.surface.clear_all();
        self.surface.restore();
    }

    fn draw_eraser_outline(&mut self, at: Point) {
        let width = self.eraser.width;
        self.surface.save();
        self.surface.set_line_width(self.eraser.line_width);
        self.surface.set_stroke_color(&self.eraser.color);
        self.surface.begin_path();
        match self.eraser.shape {
            EraserShape::Round => {
                if let Err(error) = self.surface.arc(at.x, at.y, width / 2.0) {
                    log::warn!("eraser outline failed: {error}");
                }
            }
            EraserShape::Square => {
                self.surface
                    .rect(at.x - width / 2.0, at.y - width / 2.0, width, width)
            }
        }
        self.surface.clip();
        self.surface.stroke();
        self.surface.restore();
    }
}

fn floor_dimension(value: f64) -> u32 {
    if !value.is_finite() || value < 1.0 {
        return 1;
    }
    value.floor().min(u32::MAX as f64) as u32
}

/// Paints one stroke as a connected path with its own style snapshot.
/// Strokes saved without a point list fall back to their endpoints.
pub fn draw_stroke<S: Surface>(surface: &mut S, stroke: &Stroke) {
    let endpoints;
    let points: &[Point] = if stroke.points.is_empty() {
        endpoints = [
            Point::new(stroke.start_x, stroke.start_y),
            Point::new(stroke.end_x, stroke.end_y),
        ];
        &endpoints
    } else {
        &stroke.points
    };

    let style = &stroke.style;
    surface.save();
    surface.set_stroke_color(&style.color);
    surface.set_line_width(style.size);
    surface.set_line_cap(style.line_cap);
    if let Err(error) = surface.set_line_dash(&style.dash) {
        log::warn!("line dash rejected: {error}");
    }
    surface.set_line_dash_offset(style.dash_offset);
    surface.begin_path();
    surface.move_to(points[0].x, points[0].y);
    for point in &points[1..] {
        surface.line_to(point.x, point.y);
    }
    surface.stroke();
    surface.restore();
}
