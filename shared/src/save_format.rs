use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::stroke::Stroke;

/// Canvas dimensions plus the full stroke log, as written by "export".
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    pub width: f64,
    pub height: f64,
    pub lines_array: Vec<Stroke>,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("save data must be a JSON string")]
    NotText,
    #[error("save data is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("linesArray must be an array")]
    LinesNotArray,
    #[error("stroke {index} is malformed: {source}")]
    InvalidStroke {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid canvas dimensions {width:?}x{height:?}")]
    InvalidDimensions {
        width: Option<f64>,
        height: Option<f64>,
    },
}

pub fn encode_save_data(data: &SaveData) -> Result<String, serde_json::Error> {
    serde_json::to_string(data)
}

/// Validates the payload shape field by field so each failure gets its own
/// error instead of one opaque serde message.
pub fn decode_save_data(payload: &str) -> Result<SaveData, ImportError> {
    let value: Value = serde_json::from_str(payload).map_err(ImportError::InvalidJson)?;
    let lines = match value.get("linesArray") {
        Some(Value::Array(lines)) => lines,
        _ => return Err(ImportError::LinesNotArray),
    };
    let width = value.get("width").and_then(Value::as_f64);
    let height = value.get("height").and_then(Value::as_f64);
    let (width, height) = match (width, height) {
        (Some(w), Some(h)) if valid_dimension(w) && valid_dimension(h) => (w, h),
        _ => return Err(ImportError::InvalidDimensions { width, height }),
    };
    let lines_array = lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            Stroke::deserialize(line).map_err(|source| ImportError::InvalidStroke { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SaveData {
        width,
        height,
        lines_array,
    })
}

fn valid_dimension(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Fits a save taken at `data.width`x`data.height` onto a surface of the
/// given size. Matching dimensions return the log untouched.
pub fn fit_strokes(data: SaveData, width: f64, height: f64) -> Vec<Stroke> {
    if data.width == width && data.height == height {
        return data.lines_array;
    }
    let scale_x = width / data.width;
    let scale_y = height / data.height;
    data.lines_array
        .iter()
        .map(|stroke| stroke.scaled(scale_x, scale_y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{LineCap, Point, StrokeStyle};

    fn sample(width: f64, height: f64) -> SaveData {
        SaveData {
            width,
            height,
            lines_array: vec![
                Stroke::segment(
                    Point::new(50.0, 50.0),
                    Point::new(51.0, 51.0),
                    StrokeStyle {
                        size: 4.0,
                        ..StrokeStyle::default()
                    },
                    1_500.0,
                ),
                Stroke::segment(
                    Point::new(51.0, 51.0),
                    Point::new(70.0, 10.0),
                    StrokeStyle {
                        color: "cyan".into(),
                        size: 8.0,
                        line_cap: LineCap::Butt,
                        dash: vec![5.0, 16.0],
                        dash_offset: 3.0,
                    },
                    1_900.0,
                ),
            ],
        }
    }

    #[test]
    fn same_dimensions_reproduce_the_log_exactly() {
        let data = sample(300.0, 150.0);
        let text = encode_save_data(&data).unwrap();
        let decoded = decode_save_data(&text).unwrap();
        assert_eq!(decoded, data);
        assert_eq!(fit_strokes(decoded, 300.0, 150.0), data.lines_array);
    }

    #[test]
    fn different_dimensions_rescale_positions_and_width() {
        let strokes = fit_strokes(sample(100.0, 100.0), 200.0, 100.0);
        assert_eq!(strokes[0].points[0], Point::new(100.0, 50.0));
        assert_eq!(strokes[0].style.size, 6.0);
        assert_eq!((strokes[1].end_x, strokes[1].end_y), (140.0, 10.0));
        assert_eq!(strokes[1].style.size, 12.0);
        assert_eq!(strokes[1].style.dash, vec![5.0, 16.0]);
    }

    #[test]
    fn wire_format_uses_lines_array_key() {
        let text = encode_save_data(&sample(10.0, 20.0)).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["width"], 10.0);
        assert!(value["linesArray"].is_array());
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(
            decode_save_data("not json"),
            Err(ImportError::InvalidJson(_))
        ));
    }

    #[test]
    fn rejects_lines_that_are_not_a_list() {
        for payload in [
            r#"{"width":1,"height":1}"#,
            r#"{"width":1,"height":1,"linesArray":{"0":1}}"#,
            r#"[1,2,3]"#,
        ] {
            assert!(matches!(
                decode_save_data(payload),
                Err(ImportError::LinesNotArray)
            ));
        }
    }

    #[test]
    fn rejects_zero_or_missing_dimensions() {
        assert!(matches!(
            decode_save_data(r#"{"width":0,"height":10,"linesArray":[]}"#),
            Err(ImportError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            decode_save_data(r#"{"height":10,"linesArray":[]}"#),
            Err(ImportError::InvalidDimensions { width: None, .. })
        ));
    }

    #[test]
    fn accepts_saves_with_string_typed_style_values() {
        let payload = r##"{"width":300,"height":150,"linesArray":[
            {"startX":1,"startY":1,"endX":2,"endY":2,
             "points":[{"x":1,"y":1},{"x":2,"y":2}],
             "color":"cyan","size":"5","lineCap":"round","dash":"3,15","dashOffset":0,"time":1}
        ]}"##;
        let data = decode_save_data(payload).unwrap();
        assert_eq!(data.lines_array[0].style.size, 5.0);
        assert_eq!(data.lines_array[0].style.dash, vec![3.0, 15.0]);
    }

    #[test]
    fn reports_index_of_malformed_stroke() {
        let payload = r##"{"width":1,"height":1,"linesArray":[
            {"startX":0,"startY":0,"endX":1,"endY":1,"color":"#000","size":1},
            {"startX":"left"}
        ]}"##;
        match decode_save_data(payload) {
            Err(ImportError::InvalidStroke { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
