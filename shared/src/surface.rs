use thiserror::Error;

use crate::stroke::LineCap;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("surface call `{call}` failed: {message}")]
    Call { call: &'static str, message: String },
}

impl SurfaceError {
    pub fn call(call: &'static str, message: impl Into<String>) -> Self {
        SurfaceError::Call {
            call,
            message: message.into(),
        }
    }
}

/// The 2D drawing primitives the painter needs from a rendering target.
///
/// Mirrors the browser canvas context closely enough that the canvas
/// implementation is a one-to-one forwarding layer.
pub trait Surface {
    type Image;

    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn set_size(&mut self, width: u32, height: u32);

    fn save(&mut self);
    fn restore(&mut self);

    fn set_stroke_color(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), SurfaceError>;
    fn set_line_dash_offset(&mut self, offset: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64) -> Result<(), SurfaceError>;
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke(&mut self);
    fn clip(&mut self);
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn get_image(&mut self) -> Result<Self::Image, SurfaceError>;
    fn put_image(&mut self, image: &Self::Image) -> Result<(), SurfaceError>;
    fn to_data_url(&self) -> Result<String, SurfaceError>;

    fn clear_all(&mut self) {
        let (width, height) = (self.width(), self.height());
        self.clear_rect(0.0, 0.0, width, height);
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Op {
        Save,
        Restore,
        StrokeColor(String),
        LineWidth(f64),
        LineCap(LineCap),
        LineDash(Vec<f64>),
        LineDashOffset(f64),
        BeginPath,
        MoveTo(f64, f64),
        LineTo(f64, f64),
        Arc(f64, f64, f64),
        Rect(f64, f64, f64, f64),
        Stroke,
        Clip,
        ClearRect(f64, f64, f64, f64),
        PutImage(usize),
    }

    /// Surface double that records every primitive in order.
    #[derive(Debug)]
    pub struct RecordingSurface {
        pub width: u32,
        pub height: u32,
        pub ops: Vec<Op>,
    }

    impl RecordingSurface {
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                ops: Vec::new(),
            }
        }

        pub fn take(&mut self) -> Vec<Op> {
            std::mem::take(&mut self.ops)
        }

        pub fn stroke_count(&self) -> usize {
            self.ops.iter().filter(|op| **op == Op::Stroke).count()
        }

        pub fn clear_count(&self) -> usize {
            self.ops
                .iter()
                .filter(|op| matches!(op, Op::ClearRect(..)))
                .count()
        }
    }

    impl Surface for RecordingSurface {
        type Image = usize;

        fn width(&self) -> f64 {
            self.width as f64
        }

        fn height(&self) -> f64 {
            self.height as f64
        }

        fn set_size(&mut self, width: u32, height: u32) {
            self.width = width;
            self.height = height;
        }

        fn save(&mut self) {
            self.ops.push(Op::Save);
        }

        fn restore(&mut self) {
            self.ops.push(Op::Restore);
        }

        fn set_stroke_color(&mut self, color: &str) {
            self.ops.push(Op::StrokeColor(color.to_string()));
        }

        fn set_line_width(&mut self, width: f64) {
            self.ops.push(Op::LineWidth(width));
        }

        fn set_line_cap(&mut self, cap: LineCap) {
            self.ops.push(Op::LineCap(cap));
        }

        fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), SurfaceError> {
            self.ops.push(Op::LineDash(segments.to_vec()));
            Ok(())
        }

        fn set_line_dash_offset(&mut self, offset: f64) {
            self.ops.push(Op::LineDashOffset(offset));
        }

        fn begin_path(&mut self) {
            self.ops.push(Op::BeginPath);
        }

        fn move_to(&mut self, x: f64, y: f64) {
            self.ops.push(Op::MoveTo(x, y));
        }

        fn line_to(&mut self, x: f64, y: f64) {
            self.ops.push(Op::LineTo(x, y));
        }

        fn arc(&mut self, x: f64, y: f64, radius: f64) -> Result<(), SurfaceError> {
            self.ops.push(Op::Arc(x, y, radius));
            Ok(())
        }

        fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
            self.ops.push(Op::Rect(x, y, width, height));
        }

        fn stroke(&mut self) {
            self.ops.push(Op::Stroke);
        }

        fn clip(&mut self) {
            self.ops.push(Op::Clip);
        }

        fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
            self.ops.push(Op::ClearRect(x, y, width, height));
        }

        fn get_image(&mut self) -> Result<usize, SurfaceError> {
            Ok(self.ops.len())
        }

        fn put_image(&mut self, image: &usize) -> Result<(), SurfaceError> {
            self.ops.push(Op::PutImage(*image));
            Ok(())
        }

        fn to_data_url(&self) -> Result<String, SurfaceError> {
            Ok(format!("data:image/png;base64,{}", self.ops.len()))
        }
    }
}
