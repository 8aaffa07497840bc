use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use inkpad_shared::{LineCap, Surface, SurfaceError};

pub fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// `Surface` over a browser 2D canvas context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    type Image = ImageData;

    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        // Resizing resets the whole context state.
        self.ctx.set_line_join("round");
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ctx.set_line_cap(cap.as_str());
    }

    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), SurfaceError> {
        let array = js_sys::Array::new();
        for segment in segments {
            array.push(&JsValue::from_f64(*segment));
        }
        self.ctx
            .set_line_dash(&array)
            .map_err(|error| SurfaceError::call("setLineDash", js_message(&error)))
    }

    fn set_line_dash_offset(&mut self, offset: f64) {
        self.ctx.set_line_dash_offset(offset);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64) -> Result<(), SurfaceError> {
        self.ctx
            .arc(x, y, radius, 0.0, std::f64::consts::PI * 2.0)
            .map_err(|error| SurfaceError::call("arc", js_message(&error)))
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.rect(x, y, width, height);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn clip(&mut self) {
        self.ctx.clip();
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn get_image(&mut self) -> Result<ImageData, SurfaceError> {
        self.ctx
            .get_image_data(0.0, 0.0, self.width(), self.height())
            .map_err(|error| SurfaceError::call("getImageData", js_message(&error)))
    }

    fn put_image(&mut self, image: &ImageData) -> Result<(), SurfaceError> {
        self.ctx
            .put_image_data(image, 0.0, 0.0)
            .map_err(|error| SurfaceError::call("putImageData", js_message(&error)))
    }

    fn to_data_url(&self) -> Result<String, SurfaceError> {
        self.canvas
            .to_data_url()
            .map_err(|error| SurfaceError::call("toDataURL", js_message(&error)))
    }
}
