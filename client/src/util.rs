use inkpad_shared::{stroke_time, LineCap};

fn random_unit() -> f64 {
    js_sys::Math::random()
}

/// Uniform integer in `min..=max`.
pub fn random_int(min: i32, max: i32) -> i32 {
    let span = (max - min + 1).max(1) as f64;
    min + (random_unit() * span).floor() as i32
}

pub fn random_size() -> f64 {
    random_int(1, 15) as f64
}

pub fn random_dash() -> Vec<f64> {
    vec![random_int(3, 8) as f64, random_int(13, 18) as f64]
}

pub fn random_dash_offset() -> f64 {
    random_int(-5, 5) as f64
}

pub fn random_cap() -> LineCap {
    let index = random_int(0, LineCap::ALL.len() as i32 - 1) as usize;
    LineCap::ALL[index.min(LineCap::ALL.len() - 1)]
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub fn current_stroke_time() -> f64 {
    stroke_time(now_ms(), random_unit())
}

/// Parses a dash list attribute such as `"4, 14"`.
pub fn parse_dash(value: &str) -> Option<Vec<f64>> {
    value
        .split(',')
        .map(|part| part.trim().parse::<f64>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_dash_accepts_comma_lists() {
        assert_eq!(parse_dash("4, 14"), Some(vec![4.0, 14.0]));
        assert_eq!(parse_dash("4,x"), None);
    }
}
