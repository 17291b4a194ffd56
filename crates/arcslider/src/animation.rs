use std::time::Duration;

/// Timestamp on the host's monotonic frame clock.
pub type FrameTime = Duration;

/// Distances at or below this are written directly instead of animated.
pub const ANIMATION_EPSILON: f64 = 1e-4;
pub const BASE_DURATION_SECS: f64 = 0.25;
pub const DURATION_SECS_PER_UNIT: f64 = 0.5;

/// Per-frame callback capability provided by the host's render loop.
///
/// While registered, the host is expected to call back into the slider once
/// per display frame with the frame timestamp.
pub trait FrameScheduler {
    fn now(&self) -> FrameTime;
    fn register_frame_tick(&mut self);
    fn cancel_frame_tick(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub from: f64,
    pub to: f64,
    pub started_at: FrameTime,
    pub duration: Duration,
}

impl AnimationState {
    fn progress(&self, now: FrameTime) -> f64 {
        let elapsed = now.saturating_sub(self.started_at);
        elapsed.as_secs_f64() / self.duration.as_secs_f64()
    }

    fn sample(&self, t: f64) -> f64 {
        self.from + (self.to - self.from) * ease_out_cubic(t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Animation {
    #[default]
    Idle,
    Animating(AnimationState),
}

pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

pub fn duration_for(distance: f64) -> Duration {
    Duration::from_secs_f64(BASE_DURATION_SECS + distance.abs() * DURATION_SECS_PER_UNIT)
}

/// Eases a value towards a target, one frame tick at a time.
///
/// The frame tick is registered exactly while the driver is `Animating`; every
/// transition back to `Idle` cancels it in the same call.
pub struct InterpolationDriver<S: FrameScheduler> {
    scheduler: S,
    animation: Animation,
}

impl<S: FrameScheduler> InterpolationDriver<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            animation: Animation::Idle,
        }
    }

    pub fn state(&self) -> Animation {
        self.animation
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.animation, Animation::Animating(_))
    }

    pub fn now(&self) -> FrameTime {
        self.scheduler.now()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Starts easing `from -> to` at `now`. Returns `false`, leaving the
    /// driver idle, when the distance is within [`ANIMATION_EPSILON`].
    pub fn start(&mut self, from: f64, to: f64, now: FrameTime) -> bool {
        self.cancel();

        let distance = (to - from).abs();
        if distance <= ANIMATION_EPSILON {
            return false;
        }

        let duration = duration_for(distance);
        log::debug!(
            "Animating {:.4} -> {:.4} over {:.3}s",
            from,
            to,
            duration.as_secs_f64()
        );
        self.animation = Animation::Animating(AnimationState {
            from,
            to,
            started_at: now,
            duration,
        });
        self.scheduler.register_frame_tick();
        true
    }

    /// Value for the frame at `now`, or `None` while idle.
    pub fn tick(&mut self, now: FrameTime) -> Option<f64> {
        let Animation::Animating(state) = self.animation else {
            return None;
        };

        let t = state.progress(now);
        if t >= 1.0 {
            log::debug!("Animation reached {:.4}", state.to);
            self.finish();
            return Some(state.to);
        }
        Some(state.sample(t))
    }

    pub fn cancel(&mut self) {
        if let Animation::Animating(state) = self.animation {
            log::debug!("Animation towards {:.4} cancelled", state.to);
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.animation = Animation::Idle;
        self.scheduler.cancel_frame_tick();
    }
}

impl<S: FrameScheduler> Drop for InterpolationDriver<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}
