use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_COLOR: &str = "#fd1db9";
pub const DEFAULT_SIZE: f64 = 5.0;

/// Offset applied to the end of every captured segment so that a press
/// without motion still leaves a visible dot.
pub const SEGMENT_NUDGE: f64 = 1.0;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn nudged(self) -> Self {
        Self {
            x: self.x + SEGMENT_NUDGE,
            y: self.y + SEGMENT_NUDGE,
        }
    }

    pub fn scaled(self, scale_x: f64, scale_y: f64) -> Self {
        Self {
            x: self.x * scale_x,
            y: self.y * scale_y,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    pub const ALL: [LineCap; 3] = [LineCap::Butt, LineCap::Round, LineCap::Square];

    pub fn as_str(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "butt" => Some(LineCap::Butt),
            "round" => Some(LineCap::Round),
            "square" => Some(LineCap::Square),
            _ => None,
        }
    }
}

/// Pen settings captured into a stroke when it is recorded.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StrokeStyle {
    pub color: String,
    #[serde(deserialize_with = "number_or_text")]
    pub size: f64,
    #[serde(default)]
    pub line_cap: LineCap,
    #[serde(default, deserialize_with = "dash_list")]
    pub dash: Vec<f64>,
    #[serde(default, deserialize_with = "number_or_text")]
    pub dash_offset: f64,
}

/// Older saves stored style values exactly as read from element attributes,
/// so numbers may arrive as strings and a dash list as `"4,14"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    fn value<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            LooseNumber::Number(value) => Ok(value),
            LooseNumber::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("expected a number, found {text:?}"))),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseDash {
    List(Vec<LooseNumber>),
    Text(String),
}

fn number_or_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    LooseNumber::deserialize(deserializer)?.value()
}

fn dash_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    match LooseDash::deserialize(deserializer)? {
        LooseDash::List(items) => items.into_iter().map(LooseNumber::value).collect(),
        LooseDash::Text(text) if text.trim().is_empty() => Ok(Vec::new()),
        LooseDash::Text(text) => text
            .split(',')
            .map(|part| LooseNumber::Text(part.to_string()).value())
            .collect(),
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            size: DEFAULT_SIZE,
            line_cap: LineCap::Round,
            dash: Vec::new(),
            dash_offset: 0.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(flatten)]
    pub style: StrokeStyle,
    #[serde(default)]
    pub time: f64,
}

impl Stroke {
    pub fn segment(from: Point, to: Point, style: StrokeStyle, time: f64) -> Self {
        Self {
            start_x: from.x,
            start_y: from.y,
            end_x: to.x,
            end_y: to.y,
            points: vec![from, to],
            style,
            time,
        }
    }

    /// Linear rescale used when a save was taken on a canvas of another size.
    /// Positions scale per axis, the line width by the mean of both ratios.
    pub fn scaled(&self, scale_x: f64, scale_y: f64) -> Self {
        let scale_avg = (scale_x + scale_y) / 2.0;
        Self {
            start_x: self.start_x * scale_x,
            start_y: self.start_y * scale_y,
            end_x: self.end_x * scale_x,
            end_y: self.end_y * scale_y,
            points: self
                .points
                .iter()
                .map(|point| point.scaled(scale_x, scale_y))
                .collect(),
            style: StrokeStyle {
                size: self.style.size * scale_avg,
                ..self.style.clone()
            },
            time: self.time,
        }
    }
}

/// Recording time with the 500..=1000 ms jitter the widget has always stamped.
/// `random` is expected in `[0, 1)`.
pub fn stroke_time(now_ms: f64, random: f64) -> f64 {
    let random = if random.is_finite() {
        random.clamp(0.0, 0.999_999)
    } else {
        0.0
    };
    let steps = (random * 6.0).floor() + 5.0;
    now_ms + steps * 100.0
}
