use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlButtonElement, HtmlCanvasElement, HtmlElement,
    PointerEvent, Window,
};

use inkpad_shared::{Painter, Point};

use crate::canvas::CanvasSurface;

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

/// Attaches a handler that lives as long as the page.
pub fn listen<E, F>(target: &EventTarget, name: &str, handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let mut handler = handler;
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn set_tool_button(button: &HtmlButtonElement, active: bool) {
    let pressed = if active { "true" } else { "false" };
    let _ = button.set_attribute("aria-pressed", pressed);
}

pub fn set_status(status_el: &Element, state: &str, text: &str) {
    let _ = status_el.set_attribute("data-state", state);
    status_el.set_text_content(Some(text));
}

pub fn set_body_cursor(document: &Document, cursor: &str) {
    if let Some(body) = document.body() {
        let _ = body.style().set_property("cursor", cursor);
    }
}

/// Sizes the backing store to the element's layout box times the device
/// pixel ratio, then lets the painter repaint.
pub fn resize_canvas(window: &Window, painter: &mut Painter<CanvasSurface>) {
    let rect = painter.surface().canvas().get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return;
    }
    let dpr = window.device_pixel_ratio().max(1.0);
    let width = rect.width() * dpr;
    let height = rect.height() * dpr;
    log::debug!(
        "resizing canvas from {}x{} to {width}x{height}",
        painter.surface().canvas().width(),
        painter.surface().canvas().height()
    );
    painter.resize(width, height);
}

/// Maps a pointer position into canvas pixel space.
pub fn event_to_point(canvas: &HtmlCanvasElement, event: &PointerEvent) -> Option<Point> {
    let rect = canvas.get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    let scale_x = canvas.width() as f64 / rect.width();
    let scale_y = canvas.height() as f64 / rect.height();
    let x = (event.client_x() as f64 - rect.left()) * scale_x;
    let y = (event.client_y() as f64 - rect.top()) * scale_y;
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(Point::new(x, y))
}

pub fn element_attribute(element: &HtmlElement, name: &str) -> Option<String> {
    element
        .get_attribute(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
