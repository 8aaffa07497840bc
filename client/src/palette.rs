use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement};

pub const DEFAULT_PALETTE: [&str; 8] = [
    "cyan", "#fd1db9", "#1f1f1f", "#e64a19", "#fbc02d", "#43a047", "#1e88e5", "#8e24aa",
];

pub fn render_palette(
    document: &Document,
    palette_el: &HtmlElement,
    colors: &[&str],
    selected: Option<&str>,
) {
    palette_el.set_inner_html("");
    for color in colors {
        let Ok(element) = document.create_element("button") else {
            continue;
        };
        let Ok(button) = element.dyn_into::<HtmlButtonElement>() else {
            continue;
        };
        let _ = button.set_attribute("type", "button");
        let _ = button.set_attribute("data-color", color);
        let _ = button.set_attribute("aria-label", &format!("Use color {color}"));
        let class_name = if selected == Some(*color) {
            "swatch current"
        } else {
            "swatch"
        };
        let _ = button.set_attribute("class", class_name);
        let _ = button.style().set_property("background", color);
        let _ = palette_el.append_child(&button);
    }
}

/// Color of the swatch the click landed on, walking up from the target.
pub fn color_from_event(event: &Event) -> Option<String> {
    let mut current = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());
    while let Some(element) = current {
        if let Some(color) = element.get_attribute("data-color") {
            return Some(color);
        }
        current = element.parent_element();
    }
    None
}

pub fn mark_current(palette_el: &HtmlElement, color: &str) {
    let children = palette_el.children();
    for index in 0..children.length() {
        let Some(child) = children.item(index) else {
            continue;
        };
        let is_current = child.get_attribute("data-color").as_deref() == Some(color);
        let _ = child.class_list().toggle_with_force("current", is_current);
    }
}
