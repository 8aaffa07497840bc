use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Element, Event, HtmlButtonElement, HtmlCanvasElement, HtmlElement,
    HtmlInputElement, PointerEvent,
};

use inkpad_shared::{EraserShape, LineCap, Painter, ReplayMode};

use crate::canvas::CanvasSurface;
use crate::dom::{
    element_attribute, event_to_point, get_element, listen, resize_canvas, set_body_cursor,
    set_status, set_tool_button,
};
use crate::logging;
use crate::palette::{color_from_event, mark_current, render_palette, DEFAULT_PALETTE};
use crate::persistence::{
    download_href, download_text, export_file_name, import_text, read_file_text,
    snapshot_file_name,
};
use crate::scheduler::{schedule_tickets, SharedPainter};
use crate::settings::page_config;
use crate::util::{
    current_stroke_time, now_ms, parse_dash, random_cap, random_dash, random_dash_offset,
    random_size,
};

struct Controls {
    status: Element,
    lock: HtmlButtonElement,
    eraser: HtmlButtonElement,
}

fn sync_ui(painter: &Painter<CanvasSurface>, controls: &Controls) {
    set_tool_button(&controls.lock, painter.is_locked());
    set_tool_button(&controls.eraser, !painter.is_drawing_mode());
    let (state, text) = if painter.is_locked() {
        ("locked", "Canvas locked")
    } else if !painter.is_drawing_mode() {
        ("erase", "Eraser")
    } else {
        ("ready", "Ready")
    };
    set_status(&controls.status, state, text);
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    logging::init(&window);
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    if document.ready_state() == "complete" {
        return start_app();
    }

    let started = Rc::new(Cell::new(false));
    listen(&window, "load", move |_: Event| {
        if started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            web_sys::console::error_1(&err);
        }
    })
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let canvas: HtmlCanvasElement = get_element(&document, "board")?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Missing canvas context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    ctx.set_line_join("round");

    let palette_el: HtmlElement = get_element(&document, "colors")?;
    let line_width_button: HtmlButtonElement = get_element(&document, "lineWidth")?;
    let line_dash_button: HtmlButtonElement = get_element(&document, "lineDash")?;
    let line_dash_offset_button: HtmlButtonElement = get_element(&document, "lineDashOffset")?;
    let line_cap_button: HtmlButtonElement = get_element(&document, "lineCap")?;
    let lock_button: HtmlButtonElement = get_element(&document, "lock")?;
    let eraser_button: HtmlButtonElement = get_element(&document, "eraser")?;
    let save_button: HtmlButtonElement = get_element(&document, "save")?;
    let clear_button: HtmlButtonElement = get_element(&document, "clear")?;
    let undo_button: HtmlButtonElement = get_element(&document, "undo")?;
    let redo_button: HtmlButtonElement = get_element(&document, "redo")?;
    let replay_button: HtmlButtonElement = get_element(&document, "replay")?;
    let export_button: HtmlButtonElement = get_element(&document, "exportJson")?;
    let import_button: HtmlButtonElement = get_element(&document, "importJson")?;
    let import_file: HtmlInputElement = get_element(&document, "importFile")?;
    let status = document
        .get_element_by_id("status")
        .ok_or_else(|| JsValue::from_str("Missing status element"))?;
    // Optional controls; pages without them keep the config defaults.
    let eraser_shape_button: Option<HtmlButtonElement> =
        get_element(&document, "eraserShape").ok();
    let replay_delay_input: Option<HtmlInputElement> =
        get_element(&document, "replayDelay").ok();

    let config = page_config(&window);
    log::info!(
        "inkpad starting pen={} replay_delay={}ms",
        config.pen.color,
        config.replay_delay_ms
    );
    let initial_color = config.pen.color.clone();
    let painter: SharedPainter = Rc::new(RefCell::new(Painter::new(
        CanvasSurface::new(canvas.clone(), ctx),
        config,
    )));
    let controls = Rc::new(Controls {
        status,
        lock: lock_button.clone(),
        eraser: eraser_button.clone(),
    });

    render_palette(&document, &palette_el, &DEFAULT_PALETTE, Some(initial_color.as_str()));
    resize_canvas(&window, &mut painter.borrow_mut());
    sync_ui(&painter.borrow(), &controls);

    {
        let painter = painter.clone();
        let window_cb = window.clone();
        listen(&window, "resize", move |_: Event| {
            resize_canvas(&window_cb, &mut painter.borrow_mut());
        })?;
    }

    {
        let painter = painter.clone();
        let controls = controls.clone();
        let document = document.clone();
        let canvas_cb = canvas.clone();
        listen(&canvas, "pointerdown", move |event: PointerEvent| {
            let Some(point) = event_to_point(&canvas_cb, &event) else {
                return;
            };
            event.prevent_default();
            let _ = canvas_cb.set_pointer_capture(event.pointer_id());
            let mut painter = painter.borrow_mut();
            if painter.is_drawing_mode() {
                let cursor = if painter.start_draw(point, current_stroke_time()) {
                    "crosshair"
                } else {
                    "not-allowed"
                };
                set_body_cursor(&document, cursor);
            } else {
                painter.start_erase(point);
            }
            sync_ui(&painter, &controls);
        })?;
    }

    {
        let painter = painter.clone();
        let canvas_cb = canvas.clone();
        listen(&canvas, "pointermove", move |event: PointerEvent| {
            let Some(point) = event_to_point(&canvas_cb, &event) else {
                return;
            };
            let mut painter = painter.borrow_mut();
            if painter.is_drawing_mode() {
                painter.draw(point, current_stroke_time());
            } else {
                painter.erase(point);
            }
        })?;
    }

    for name in ["pointerup", "pointerleave", "pointercancel"] {
        let painter = painter.clone();
        let controls = controls.clone();
        let document = document.clone();
        listen(&canvas, name, move |_: PointerEvent| {
            let mut painter = painter.borrow_mut();
            painter.end_draw();
            set_body_cursor(&document, "auto");
            sync_ui(&painter, &controls);
        })?;
    }

    {
        let painter = painter.clone();
        let palette_cb = palette_el.clone();
        listen(&palette_el, "click", move |event: Event| {
            let Some(color) = color_from_event(&event) else {
                return;
            };
            mark_current(&palette_cb, &color);
            painter.borrow_mut().update_line_color(color);
        })?;
    }

    {
        let painter = painter.clone();
        let button = line_width_button.clone();
        listen(&line_width_button, "click", move |_: Event| {
            let size = element_attribute(&button, "data-line-width")
                .and_then(|value| value.parse::<f64>().ok())
                .unwrap_or_else(random_size);
            log::debug!("line width {size}");
            painter.borrow_mut().update_line_size(size);
        })?;
    }

    {
        let painter = painter.clone();
        let button = line_dash_button.clone();
        listen(&line_dash_button, "click", move |_: Event| {
            let dash = element_attribute(&button, "data-line-dash")
                .and_then(|value| parse_dash(&value))
                .unwrap_or_else(random_dash);
            log::debug!("line dash {dash:?}");
            painter.borrow_mut().update_line_dash(dash);
        })?;
    }

    {
        let painter = painter.clone();
        let button = line_dash_offset_button.clone();
        listen(&line_dash_offset_button, "click", move |_: Event| {
            let offset = element_attribute(&button, "data-line-dash-offset")
                .and_then(|value| value.parse::<f64>().ok())
                .unwrap_or_else(random_dash_offset);
            log::debug!("line dash offset {offset}");
            painter.borrow_mut().update_line_dash_offset(offset);
        })?;
    }

    {
        let painter = painter.clone();
        let button = line_cap_button.clone();
        listen(&line_cap_button, "click", move |_: Event| {
            let cap = element_attribute(&button, "data-line-cap")
                .and_then(|value| LineCap::parse(&value))
                .unwrap_or_else(random_cap);
            log::debug!("line cap {}", cap.as_str());
            painter.borrow_mut().update_line_cap(cap);
        })?;
    }

    {
        let painter = painter.clone();
        let controls = controls.clone();
        listen(&lock_button, "click", move |_: Event| {
            let mut painter = painter.borrow_mut();
            let locked = painter.toggle_lock_canvas();
            log::debug!("canvas locked={locked}");
            sync_ui(&painter, &controls);
        })?;
    }

    {
        let painter = painter.clone();
        let controls = controls.clone();
        listen(&eraser_button, "click", move |_: Event| {
            let mut painter = painter.borrow_mut();
            painter.change_mode();
            sync_ui(&painter, &controls);
        })?;
    }

    if let Some(shape_button) = eraser_shape_button {
        let painter = painter.clone();
        let button = shape_button.clone();
        set_tool_button(&shape_button, painter.borrow().eraser().shape == EraserShape::Square);
        listen(&shape_button, "click", move |_: Event| {
            let mut painter = painter.borrow_mut();
            let mut style = painter.eraser().clone();
            style.shape = match style.shape {
                EraserShape::Round => EraserShape::Square,
                EraserShape::Square => EraserShape::Round,
            };
            set_tool_button(&button, style.shape == EraserShape::Square);
            log::debug!("eraser shape {:?}", style.shape);
            painter.set_eraser_style(style);
        })?;
    }

    if let Some(delay_input) = replay_delay_input {
        let painter = painter.clone();
        let input = delay_input.clone();
        delay_input.set_value(&painter.borrow().replay_delay_ms().to_string());
        listen(&delay_input, "change", move |_: Event| {
            let mut painter = painter.borrow_mut();
            painter.set_replay_delay(input.value_as_number());
            input.set_value(&painter.replay_delay_ms().to_string());
        })?;
    }

    {
        let painter = painter.clone();
        let controls = controls.clone();
        let document = document.clone();
        listen(&save_button, "click", move |_: Event| {
            let url = painter.borrow().to_data_url();
            let result = url
                .map_err(|error| JsValue::from_str(&error.to_string()))
                .and_then(|url| download_href(&document, &url, &snapshot_file_name(now_ms())));
            if let Err(error) = result {
                log::warn!("image export failed: {error:?}");
                set_status(&controls.status, "error", "Image export failed");
            }
        })?;
    }

    {
        let painter = painter.clone();
        let controls = controls.clone();
        listen(&clear_button, "click", move |_: Event| {
            let mut painter = painter.borrow_mut();
            painter.clear();
            sync_ui(&painter, &controls);
        })?;
    }

    {
        let painter = painter.clone();
        listen(&undo_button, "click", move |_: Event| {
            if !painter.borrow_mut().undo() {
                log::debug!("nothing to undo");
            }
        })?;
    }

    {
        let painter = painter.clone();
        listen(&redo_button, "click", move |_: Event| {
            if !painter.borrow_mut().redo() {
                log::debug!("nothing to redo");
            }
        })?;
    }

    {
        let painter = painter.clone();
        listen(&replay_button, "click", move |_: Event| {
            let tickets = painter.borrow_mut().redraw_all(ReplayMode::Animated);
            schedule_tickets(&painter, tickets);
        })?;
    }

    {
        let painter = painter.clone();
        let controls = controls.clone();
        let document = document.clone();
        listen(&export_button, "click", move |_: Event| {
            let file_name = export_file_name(now_ms());
            let result = painter
                .borrow()
                .export_json()
                .map_err(|error| JsValue::from_str(&error.to_string()))
                .and_then(|json| download_text(&document, &json, "application/json", &file_name));
            if let Err(error) = result {
                log::warn!("json export failed: {error:?}");
                set_status(&controls.status, "error", "Export failed");
            }
        })?;
    }

    {
        let import_file = import_file.clone();
        listen(&import_button, "click", move |_: Event| {
            import_file.click();
        })?;
    }

    {
        let painter = painter.clone();
        let controls = controls.clone();
        let input = import_file.clone();
        listen(&import_file, "change", move |_: Event| {
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            input.set_value("");
            let painter = painter.clone();
            let controls = controls.clone();
            let result = read_file_text(&file, move |value| {
                let loaded = import_text(&value).and_then(|text| {
                    painter
                        .borrow_mut()
                        .load_save_data(&text, ReplayMode::Animated)
                });
                match loaded {
                    Ok(tickets) => {
                        schedule_tickets(&painter, tickets);
                        sync_ui(&painter.borrow(), &controls);
                    }
                    Err(error) => {
                        log::warn!("import failed: {error}");
                        set_status(&controls.status, "error", &format!("Import failed: {error}"));
                    }
                }
            });
            if let Err(error) = result {
                log::warn!("file read failed: {error:?}");
            }
        })?;
    }

    log::debug!("inkpad ready");
    Ok(())
}
