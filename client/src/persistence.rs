use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Blob, BlobPropertyBag, Document, File, FileReader, HtmlAnchorElement, ProgressEvent, Url,
};

use inkpad_shared::ImportError;

pub fn snapshot_file_name(now_ms: f64) -> String {
    format!("snapshot-{}.png", now_ms as u64)
}

pub fn export_file_name(now_ms: f64) -> String {
    format!("inkpad-{}.json", now_ms as u64)
}

/// The save payload must arrive as text; anything else is rejected before
/// parsing.
pub fn import_text(value: &JsValue) -> Result<String, ImportError> {
    value.as_string().ok_or(ImportError::NotText)
}

pub fn download_href(document: &Document, href: &str, file_name: &str) -> Result<(), JsValue> {
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(href);
    anchor.set_download(file_name);
    let _ = anchor.set_attribute("style", "display:none");
    if let Some(body) = document.body() {
        body.append_child(&anchor)?;
        anchor.click();
        body.remove_child(&anchor)?;
    } else {
        anchor.click();
    }
    Ok(())
}

pub fn download_text(
    document: &Document,
    text: &str,
    mime: &str,
    file_name: &str,
) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;
    let result = download_href(document, &url, file_name);
    let _ = Url::revoke_object_url(&url);
    result
}

/// Reads a picked file as text and hands the raw reader result over.
pub fn read_file_text<F>(file: &File, on_load: F) -> Result<(), JsValue>
where
    F: FnOnce(JsValue) + 'static,
{
    let reader = FileReader::new()?;
    let reader_cb = reader.clone();
    let onload = Closure::once_into_js(move |_event: ProgressEvent| {
        let result = reader_cb.result().unwrap_or(JsValue::NULL);
        on_load(result);
    });
    reader.set_onload(Some(onload.unchecked_ref()));
    reader.read_as_text(file)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_carry_the_epoch_millis() {
        assert_eq!(snapshot_file_name(1_700_000_000_123.9), "snapshot-1700000000123.png");
        assert_eq!(export_file_name(42.0), "inkpad-42.json");
    }
}
