//! Control bounds, defaults and launch parameter parsing

use std::ops::RangeInclusive;
use url::form_urlencoded;

/// Accepted rotation speeds in revolutions per minute
pub const RPM_RANGE: RangeInclusive<f64> = 60.0..=2000.0;
/// Accepted sampling rates in frames per second
pub const FPS_RANGE: RangeInclusive<f64> = 10.0..=120.0;

pub const DEFAULT_RPM: f64 = 300.0;
pub const DEFAULT_FPS: f64 = 24.0;

pub fn clamp_rpm(rpm: f64) -> f64 {
    rpm.clamp(*RPM_RANGE.start(), *RPM_RANGE.end())
}

pub fn clamp_fps(fps: f64) -> f64 {
    fps.clamp(*FPS_RANGE.start(), *FPS_RANGE.end())
}

/// Rotation speed and sampling rate the viewer starts with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchParams {
    pub rpm: f64,
    pub fps: f64,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            rpm: DEFAULT_RPM,
            fps: DEFAULT_FPS,
        }
    }
}

impl LaunchParams {
    /// Apply `rpm`/`fps` from a URL-style query string.
    ///
    /// Pairs are form-urlencoded and only the first occurrence of each key
    /// counts, as `URLSearchParams.get` reads them. Values that don't parse or
    /// fall outside the control bounds are skipped and the current value is
    /// kept. Unknown keys are ignored.
    pub fn apply_query(&mut self, query: &str) {
        let query = query.strip_prefix('?').unwrap_or(query);
        if let Some(rpm) = first_value(query, "rpm") {
            self.apply_rpm(&rpm);
        }
        if let Some(fps) = first_value(query, "fps") {
            self.apply_fps(&fps);
        }
    }

    pub fn apply_rpm(&mut self, raw: &str) {
        if let Some(rpm) = accept(raw, &RPM_RANGE) {
            self.rpm = rpm;
        } else {
            log::debug!("Ignoring rpm parameter {:?}", raw);
        }
    }

    pub fn apply_fps(&mut self, raw: &str) {
        if let Some(fps) = accept(raw, &FPS_RANGE) {
            self.fps = fps;
        } else {
            log::debug!("Ignoring fps parameter {:?}", raw);
        }
    }
}

fn first_value(query: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| &**k == key)
        .map(|(_, v)| v.into_owned())
}

fn accept(raw: &str, range: &RangeInclusive<f64>) -> Option<f64> {
    parse_int_prefix(raw)
        .map(|v| v as f64)
        .filter(|v| range.contains(v))
}

/// Parse the leading integer of a string the way browsers read `parseInt`:
/// leading whitespace, an optional sign, then as many digits as present.
/// `"900abc"` gives 900, `"12.7"` gives 12, `"abc"` gives `None`.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
