use crate::config::{ArcSpan, SliderConfig, SliderError, WrapPolicy};
use crate::geometry::Point;
use std::f64::consts::{PI, TAU};

// atan2 of a point placed exactly on an arc end can land a few ulps outside it.
const SEAM_TOLERANCE: f64 = 1e-9;

/// Converts between pointer positions, angles and normalized values for one
/// arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleValueMapper {
    span: ArcSpan,
    policy: WrapPolicy,
}

impl AngleValueMapper {
    pub fn new(span: ArcSpan, policy: WrapPolicy) -> Self {
        Self { span, policy }
    }

    pub fn from_config(config: &SliderConfig) -> Result<Self, SliderError> {
        Ok(Self::new(config.span()?, config.wrap_policy))
    }

    pub fn span(&self) -> ArcSpan {
        self.span
    }

    pub fn policy(&self) -> WrapPolicy {
        self.policy
    }

    /// Value under `point` for an arc centred on `center`, always within
    /// `0..=1`. Positions that are not finite map to `0.0`.
    pub fn point_to_value(&self, point: Point, center: Point) -> f64 {
        if !point.is_finite() || !center.is_finite() {
            return 0.0;
        }
        let angle = self.normalize(point.angle_from(center));
        self.span.fraction_of(angle)
    }

    pub fn value_to_angle(&self, value: f64) -> f64 {
        self.span.angle_at(value)
    }

    fn normalize(&self, angle: f64) -> f64 {
        match self.policy {
            WrapPolicy::Symmetric => {
                let mut angle = angle;
                if angle < self.span.lower_wrap_bound() {
                    angle += TAU;
                }
                if angle > self.span.upper_wrap_bound() {
                    angle -= TAU;
                }
                angle
            }
            WrapPolicy::Forward => {
                if angle < self.span.start() - SEAM_TOLERANCE {
                    angle + TAU
                } else {
                    angle
                }
            }
            WrapPolicy::Nearest => {
                let low = self.span.midpoint() - PI;
                low + (angle - low).rem_euclid(TAU)
            }
        }
    }
}
