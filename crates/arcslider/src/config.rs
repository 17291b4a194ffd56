use crate::color::{self, Color};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::f64::consts::{FRAC_PI_4, PI, TAU};
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

pub const DEFAULT_START_ANGLE: f64 = -3.0 * FRAC_PI_4;
pub const DEFAULT_END_ANGLE: f64 = 3.0 * FRAC_PI_4;
pub const DEFAULT_LINE_WIDTH: f64 = 25.0;
pub const DEFAULT_TICK_COUNT: usize = 20;
pub const DEFAULT_TICK_LENGTH: f64 = 8.0;
pub const DEFAULT_TICK_WIDTH: f64 = 2.0;
pub const DEFAULT_NEEDLE_WIDTH: f64 = 4.0;
pub const DEFAULT_REMAINING_OPACITY: f64 = 0.3;
pub const MAX_TICK_COUNT: usize = 360;

/// How a raw `atan2` angle is shifted by whole turns before it is clamped to
/// the arc.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum WrapPolicy {
    /// `+2π` below `start - π`, `-2π` above `end + π`.
    Symmetric,
    /// `+2π` below `start`, nothing above.
    Forward,
    /// Shift into the turn centred on the arc midpoint.
    #[default]
    Nearest,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum SliderMode {
    /// Taps jump straight to the touched value.
    Immediate,
    /// Taps ease towards the touched value; drags are always direct.
    #[default]
    Animated,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStops {
    pub from: Color,
    pub to: Color,
}

impl GradientStops {
    pub const fn new(from: Color, to: Color) -> Self {
        Self { from, to }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub start_angle: f64,
    pub end_angle: f64,
    pub line_width: f64,
    pub tick_count: usize,
    pub tick_length: f64,
    pub tick_width: f64,
    pub tick_color: Color,
    pub consumed: GradientStops,
    pub remaining: GradientStops,
    pub remaining_opacity: f64,
    pub needle_color: Color,
    pub needle_width: f64,
    pub wrap_policy: WrapPolicy,
    pub mode: SliderMode,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            start_angle: DEFAULT_START_ANGLE,
            end_angle: DEFAULT_END_ANGLE,
            line_width: DEFAULT_LINE_WIDTH,
            tick_count: DEFAULT_TICK_COUNT,
            tick_length: DEFAULT_TICK_LENGTH,
            tick_width: DEFAULT_TICK_WIDTH,
            tick_color: color::GRAY,
            consumed: GradientStops::new(color::BLUE, color::GREEN),
            remaining: GradientStops::new(color::GREEN, color::RED),
            remaining_opacity: DEFAULT_REMAINING_OPACITY,
            needle_color: color::DARK_GRAY,
            needle_width: DEFAULT_NEEDLE_WIDTH,
            wrap_policy: WrapPolicy::default(),
            mode: SliderMode::default(),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum SliderError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("arc span is empty: start and end are both {0}")]
    DegenerateSpan(f64),
    #[error("arc runs backwards: start {start} is after end {end}")]
    ReversedSpan { start: f64, end: f64 },
    #[error("arc span {0} must be less than a full turn")]
    SpanTooWide(f64),
    #[error("line width must be positive, got {0}")]
    LineWidth(f64),
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("remaining opacity must be within 0..=1, got {0}")]
    Opacity(f64),
    #[error("tick count must be at most {max}, got {0}", max = MAX_TICK_COUNT)]
    TickCount(usize),
}

impl SliderConfig {
    pub fn validate(&self) -> Result<(), SliderError> {
        for (field, value) in [
            ("start_angle", self.start_angle),
            ("end_angle", self.end_angle),
            ("line_width", self.line_width),
            ("tick_length", self.tick_length),
            ("tick_width", self.tick_width),
            ("needle_width", self.needle_width),
            ("remaining_opacity", self.remaining_opacity),
        ] {
            if !value.is_finite() {
                return Err(SliderError::NotFinite { field, value });
            }
        }

        ArcSpan::new(self.start_angle, self.end_angle)?;

        if self.line_width <= 0.0 {
            return Err(SliderError::LineWidth(self.line_width));
        }
        for (field, value) in [
            ("tick_length", self.tick_length),
            ("tick_width", self.tick_width),
            ("needle_width", self.needle_width),
        ] {
            if value < 0.0 {
                return Err(SliderError::Negative { field, value });
            }
        }
        if !(0.0..=1.0).contains(&self.remaining_opacity) {
            return Err(SliderError::Opacity(self.remaining_opacity));
        }
        if self.tick_count > MAX_TICK_COUNT {
            return Err(SliderError::TickCount(self.tick_count));
        }
        Ok(())
    }

    pub fn span(&self) -> Result<ArcSpan, SliderError> {
        ArcSpan::new(self.start_angle, self.end_angle)
    }
}

/// A validated angular interval: finite, non-empty, increasing and narrower
/// than one turn. At a full turn start and end are the same point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpan {
    start: f64,
    end: f64,
}

impl ArcSpan {
    pub fn new(start: f64, end: f64) -> Result<Self, SliderError> {
        if !start.is_finite() {
            return Err(SliderError::NotFinite {
                field: "start_angle",
                value: start,
            });
        }
        if !end.is_finite() {
            return Err(SliderError::NotFinite {
                field: "end_angle",
                value: end,
            });
        }
        if start == end {
            return Err(SliderError::DegenerateSpan(start));
        }
        if start > end {
            return Err(SliderError::ReversedSpan { start, end });
        }
        if end - start >= TAU {
            return Err(SliderError::SpanTooWide(end - start));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn sweep(&self) -> f64 {
        self.end - self.start
    }

    pub fn midpoint(&self) -> f64 {
        self.start + self.sweep() / 2.0
    }

    pub fn angle_at(&self, value: f64) -> f64 {
        self.start + value * self.sweep()
    }

    /// Clamps `angle` into the span and returns its fraction of the sweep.
    pub fn fraction_of(&self, angle: f64) -> f64 {
        let clamped = angle.clamp(self.start, self.end);
        ((clamped - self.start) / self.sweep()).clamp(0.0, 1.0)
    }

    pub fn lower_wrap_bound(&self) -> f64 {
        self.start - PI
    }

    pub fn upper_wrap_bound(&self) -> f64 {
        self.end + PI
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SliderConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.tick_count, 20);
        assert_eq!(config.wrap_policy, WrapPolicy::Nearest);
        assert_eq!(config.mode, SliderMode::Animated);
    }

    #[test]
    fn test_span_rejections() {
        assert_eq!(ArcSpan::new(1.0, 1.0), Err(SliderError::DegenerateSpan(1.0)));
        assert!(matches!(
            ArcSpan::new(2.0, 1.0),
            Err(SliderError::ReversedSpan { .. })
        ));
        assert!(matches!(
            ArcSpan::new(0.0, 7.0),
            Err(SliderError::SpanTooWide(_))
        ));
        assert!(matches!(
            ArcSpan::new(f64::NAN, 1.0),
            Err(SliderError::NotFinite { field: "start_angle", .. })
        ));
        assert!(ArcSpan::new(-PI, PI - 1e-6).is_ok());
    }

    #[test]
    fn test_full_turn_is_too_wide() {
        for start in [-3.0, -1.0, 0.0, 0.3, 1.0, 2.0] {
            assert!(matches!(
                ArcSpan::new(start, start + TAU),
                Err(SliderError::SpanTooWide(_))
            ));
        }

        let config = SliderConfig {
            start_angle: -PI,
            end_angle: PI,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SliderError::SpanTooWide(_))
        ));
    }

    #[test]
    fn test_tick_count_is_bounded() {
        let config = SliderConfig {
            tick_count: MAX_TICK_COUNT,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));

        let config = SliderConfig {
            tick_count: usize::MAX,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(SliderError::TickCount(usize::MAX)));
    }

    #[test]
    fn test_validate_rejects_bad_widths() {
        let config = SliderConfig {
            line_width: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(SliderError::LineWidth(0.0)));

        let config = SliderConfig {
            tick_length: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SliderError::Negative { field: "tick_length", .. })
        ));

        let config = SliderConfig {
            remaining_opacity: 1.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(SliderError::Opacity(1.5)));
    }

    #[test]
    fn test_policy_deserialization() {
        let cases = vec![
            ("\"nearest\"", WrapPolicy::Nearest),
            ("\"Symmetric\"", WrapPolicy::Symmetric),
            ("\"FORWARD\"", WrapPolicy::Forward),
        ];

        for (json, expected) in cases {
            let deserialized: WrapPolicy = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<WrapPolicy>("\"sideways\"").is_err());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r##"{
            "tick_count": 5,
            "mode": "immediate",
            "consumed": { "from": "#000000", "to": "#ffffff" }
        }"##;
        let config: SliderConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.tick_count, 5);
        assert_eq!(config.mode, SliderMode::Immediate);
        assert_eq!(config.consumed.to.components(), (1.0, 1.0, 1.0, 1.0));
        assert_eq!(config.start_angle, DEFAULT_START_ANGLE);
        assert_eq!(config.remaining, SliderConfig::default().remaining);
    }
}
