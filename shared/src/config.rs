use serde::{Deserialize, Serialize};

use crate::replay::DEFAULT_REPLAY_DELAY_MS;
use crate::stroke::StrokeStyle;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EraserShape {
    #[default]
    Round,
    Square,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EraserStyle {
    /// Diameter (round) or side (square) of the cleared area.
    pub width: f64,
    /// Outline width; the cleared area grows by this on each side.
    pub line_width: f64,
    pub shape: EraserShape,
    pub color: String,
}

impl Default for EraserStyle {
    fn default() -> Self {
        Self {
            width: 30.0,
            line_width: 1.0,
            shape: EraserShape::Round,
            color: "#00f".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PainterConfig {
    pub replay_delay_ms: u32,
    pub pen: StrokeStyle,
    pub eraser: EraserStyle,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            replay_delay_ms: DEFAULT_REPLAY_DELAY_MS,
            pen: StrokeStyle::default(),
            eraser: EraserStyle::default(),
        }
    }
}

impl PainterConfig {
    /// Applies `key=value` overrides such as the ones carried in a page's
    /// query string. Unknown keys and unparsable values are ignored.
    pub fn apply_overrides<'a>(&mut self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) {
        for (key, value) in pairs {
            match key {
                "replay_delay" => match value.parse::<u32>() {
                    Ok(delay) if delay > 0 => self.replay_delay_ms = delay,
                    _ => log::warn!("ignoring replay_delay={value}"),
                },
                "color" if !value.is_empty() => self.pen.color = value.to_string(),
                "size" => match value.parse::<f64>() {
                    Ok(size) if size.is_finite() && size > 0.0 => self.pen.size = size,
                    _ => log::warn!("ignoring size={value}"),
                },
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_widget() {
        let config = PainterConfig::default();
        assert_eq!(config.replay_delay_ms, 20);
        assert_eq!(config.pen.size, 5.0);
        assert_eq!(config.eraser.width, 30.0);
        assert_eq!(config.eraser.shape, EraserShape::Round);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: PainterConfig =
            serde_json::from_str(r#"{"replayDelayMs":50,"eraser":{"shape":"square"}}"#).unwrap();
        assert_eq!(config.replay_delay_ms, 50);
        assert_eq!(config.eraser.shape, EraserShape::Square);
        assert_eq!(config.eraser.width, 30.0);
        assert_eq!(config.pen, StrokeStyle::default());
    }

    #[test]
    fn overrides_skip_bad_values() {
        let mut config = PainterConfig::default();
        config.apply_overrides([
            ("replay_delay", "0"),
            ("color", "cyan"),
            ("size", "-3"),
            ("debug", "1"),
        ]);
        assert_eq!(config.replay_delay_ms, 20);
        assert_eq!(config.pen.color, "cyan");
        assert_eq!(config.pen.size, 5.0);

        config.apply_overrides([("replay_delay", "35"), ("size", "9")]);
        assert_eq!(config.replay_delay_ms, 35);
        assert_eq!(config.pen.size, 9.0);
    }
}
