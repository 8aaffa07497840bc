use web_sys::Window;

use inkpad_shared::PainterConfig;

/// Splits a `?key=value&flag` query string. Values are left encoded.
pub fn query_pairs(search: &str) -> Vec<(String, String)> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (part.to_string(), String::new()),
        })
        .collect()
}

pub fn debug_enabled(search: &str) -> bool {
    query_pairs(search).iter().any(|(key, value)| {
        (key == "debug" || key == "log") && (value == "1" || value == "true")
    })
}

fn decode(value: &str) -> String {
    js_sys::decode_uri_component(value)
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_else(|| value.to_string())
}

pub fn location_search(window: &Window) -> String {
    window.location().search().ok().unwrap_or_default()
}

pub fn page_config(window: &Window) -> PainterConfig {
    let pairs = query_pairs(&location_search(window))
        .into_iter()
        .map(|(key, value)| (key, decode(&value)))
        .collect::<Vec<_>>();
    let mut config = PainterConfig::default();
    config.apply_overrides(pairs.iter().map(|(key, value)| (key.as_str(), value.as_str())));
    config
}
