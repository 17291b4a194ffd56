use crate::animation::{FrameScheduler, FrameTime, InterpolationDriver};
use crate::config::{SliderConfig, SliderError, SliderMode};
use crate::geometry::{ArcGeometry, DEFAULT_SIZE, Point};
use crate::mapper::AngleValueMapper;
use crate::render::{ArcRenderer, Scene};
use derive_more::Display;

pub const DEFAULT_VALUE: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
}

/// What the host has to do after feeding the slider an input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliderAction {
    pub should_redraw: bool,
    pub value_changed: bool,
}

impl SliderAction {
    pub fn new(should_redraw: bool, value_changed: bool) -> Self {
        Self {
            should_redraw,
            value_changed,
        }
    }

    fn redraw() -> Self {
        Self::new(true, false)
    }

    fn changed() -> Self {
        Self::new(true, true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(f64)>;

/// Circular slider: owns the value and turns pointer input and frame ticks
/// into value writes.
///
/// Every effective write clamps to `0..=1`, notifies subscribers synchronously
/// and asks for a redraw. Writes that would not change the value are dropped
/// without notifying anyone.
pub struct Slider<S: FrameScheduler> {
    config: SliderConfig,
    mapper: AngleValueMapper,
    geometry: ArcGeometry,
    value: f64,
    tracking: bool,
    driver: InterpolationDriver<S>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl<S: FrameScheduler> Slider<S> {
    pub fn new(config: SliderConfig, scheduler: S) -> Result<Self, SliderError> {
        config.validate()?;
        let mapper = AngleValueMapper::from_config(&config)?;
        let geometry = ArcGeometry::from_bounds(DEFAULT_SIZE, DEFAULT_SIZE, config.line_width);

        Ok(Self {
            config,
            mapper,
            geometry,
            value: DEFAULT_VALUE,
            tracking: false,
            driver: InterpolationDriver::new(scheduler),
            listeners: Vec::new(),
            next_listener: 0,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn geometry(&self) -> ArcGeometry {
        self.geometry
    }

    pub fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn subscribe(&mut self, listener: impl FnMut(f64) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(other, _)| *other != id);
        self.listeners.len() != before
    }

    /// Swaps in a new config. On error the current config stays in place.
    pub fn set_config(&mut self, config: SliderConfig) -> Result<SliderAction, SliderError> {
        config.validate()?;
        self.mapper = AngleValueMapper::from_config(&config)?;
        self.driver.cancel();
        self.geometry =
            ArcGeometry::from_bounds(self.geometry.width, self.geometry.height, config.line_width);
        log::debug!(
            "Slider config replaced (mode: {}, wrap: {})",
            config.mode,
            config.wrap_policy
        );
        self.config = config;
        Ok(SliderAction::redraw())
    }

    pub fn resize(&mut self, width: f64, height: f64) -> SliderAction {
        let geometry = ArcGeometry::from_bounds(width, height, self.config.line_width);
        if geometry == self.geometry {
            return SliderAction::default();
        }
        self.geometry = geometry;
        SliderAction::redraw()
    }

    /// Direct write from the host; preempts a running animation.
    pub fn set_value(&mut self, value: f64) -> SliderAction {
        self.driver.cancel();
        self.write(value)
    }

    /// Eases towards `value`, or writes it directly when it is already
    /// within reach.
    pub fn animate_to(&mut self, value: f64) -> SliderAction {
        if value.is_nan() {
            return SliderAction::default();
        }
        let target = value.clamp(0.0, 1.0);
        let now = self.driver.now();
        if self.driver.start(self.value, target, now) {
            SliderAction::default()
        } else {
            self.write(target)
        }
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> SliderAction {
        match event {
            PointerEvent::Down(point) if point.is_finite() => {
                self.tracking = true;
                let target = self.value_at(point);
                match self.config.mode {
                    SliderMode::Immediate => self.set_value(target),
                    SliderMode::Animated => self.animate_to(target),
                }
            }
            PointerEvent::Move(point) if self.tracking && point.is_finite() => {
                self.driver.cancel();
                let value = self.value_at(point);
                self.write(value)
            }
            PointerEvent::Up(_) => {
                self.tracking = false;
                SliderAction::default()
            }
            _ => SliderAction::default(),
        }
    }

    /// Frame callback from the host. Stale ticks after an animation ended are
    /// ignored.
    pub fn tick(&mut self, now: FrameTime) -> SliderAction {
        match self.driver.tick(now) {
            Some(value) => self.write(value),
            None => SliderAction::default(),
        }
    }

    pub fn render(&self) -> Scene {
        ArcRenderer::with_mapper(&self.config, self.mapper, self.geometry).render(self.value)
    }

    pub fn value_at(&self, point: Point) -> f64 {
        self.mapper.point_to_value(point, self.geometry.center)
    }

    fn write(&mut self, value: f64) -> SliderAction {
        if value.is_nan() {
            return SliderAction::default();
        }
        let value = value.clamp(0.0, 1.0);
        if value == self.value {
            return SliderAction::default();
        }

        self.value = value;
        log::trace!("Slider value {:.4}", value);
        for (_, listener) in self.listeners.iter_mut() {
            listener(value);
        }
        SliderAction::changed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::tests::ManualScheduler;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    const RIGHT: Point = Point { x: 250.0, y: 150.0 };
    const DOWN: Point = Point { x: 150.0, y: 250.0 };

    fn slider(mode: SliderMode) -> (Slider<ManualScheduler>, ManualScheduler, Rc<RefCell<Vec<f64>>>) {
        let scheduler = ManualScheduler::default();
        let config = SliderConfig {
            mode,
            ..Default::default()
        };
        let mut slider = Slider::new(config, scheduler.clone()).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        slider.subscribe(move |v| sink.borrow_mut().push(v));
        (slider, scheduler, seen)
    }

    #[test]
    fn test_rejects_degenerate_span() {
        let config = SliderConfig {
            start_angle: 1.0,
            end_angle: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            Slider::new(config, ManualScheduler::default()),
            Err(SliderError::DegenerateSpan(_))
        ));
    }

    #[test]
    fn test_writes_are_clamped_before_notifying() {
        let (mut slider, _, seen) = slider(SliderMode::Immediate);

        assert_eq!(slider.set_value(3.0), SliderAction::new(true, true));
        assert_eq!(slider.value(), 1.0);
        assert_eq!(slider.set_value(-1.0), SliderAction::new(true, true));
        assert_eq!(*seen.borrow(), vec![1.0, 0.0]);

        assert_eq!(slider.set_value(f64::NAN), SliderAction::default());
        assert_eq!(slider.value(), 0.0);
    }

    #[test]
    fn test_repeated_value_notifies_once() {
        let (mut slider, _, seen) = slider(SliderMode::Immediate);

        slider.set_value(0.7);
        let first = slider.render();
        assert_eq!(slider.set_value(0.7), SliderAction::default());
        assert_eq!(slider.render(), first);
        assert_eq!(*seen.borrow(), vec![0.7]);
    }

    #[test]
    fn test_immediate_tap_jumps() {
        let (mut slider, scheduler, seen) = slider(SliderMode::Immediate);

        let action = slider.handle_pointer(PointerEvent::Down(RIGHT));
        assert!(action.value_changed);
        assert!((slider.value() - 0.5).abs() < 1e-9);
        assert_eq!(seen.borrow().len(), 1);
        assert!(scheduler.events.borrow().is_empty());
    }

    #[test]
    fn test_animated_tap_eases_to_target() {
        let (mut slider, scheduler, seen) = slider(SliderMode::Animated);
        slider.set_value(0.0);
        seen.borrow_mut().clear();

        let action = slider.handle_pointer(PointerEvent::Down(RIGHT));
        assert_eq!(action, SliderAction::default());
        assert!(slider.is_animating());
        assert!(scheduler.registered.get());
        assert_eq!(slider.value(), 0.0);

        let mut frames = 0;
        while slider.is_animating() {
            let now = scheduler.advance(Duration::from_millis(16));
            slider.tick(now);
            frames += 1;
            assert!(frames < 100, "animation never finished");
        }

        let target = slider.value_at(RIGHT);
        assert_eq!(slider.value(), target);
        assert!(!scheduler.registered.get());

        let seen = seen.borrow();
        assert!(seen.len() > 2, "intermediate frames should notify");
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*seen.last().unwrap(), target);
    }

    #[test]
    fn test_tap_on_current_value_does_not_animate() {
        let (mut slider, scheduler, _) = slider(SliderMode::Animated);
        let here = slider.value_at(RIGHT);
        slider.set_value(here);

        slider.handle_pointer(PointerEvent::Down(RIGHT));
        assert!(!slider.is_animating());
        assert!(scheduler.events.borrow().is_empty());
    }

    #[test]
    fn test_drag_preempts_animation() {
        let (mut slider, scheduler, seen) = slider(SliderMode::Animated);
        slider.set_value(0.0);

        slider.handle_pointer(PointerEvent::Down(RIGHT));
        let now = scheduler.advance(Duration::from_millis(50));
        slider.tick(now);
        assert!(slider.is_animating());

        let action = slider.handle_pointer(PointerEvent::Move(DOWN));
        assert!(action.value_changed);
        let dragged = slider.value_at(DOWN);
        assert_eq!(slider.value(), dragged);
        assert!(!slider.is_animating());
        assert!(!scheduler.registered.get());

        let notified = seen.borrow().len();
        for _ in 0..10 {
            let now = scheduler.advance(Duration::from_millis(16));
            assert_eq!(slider.tick(now), SliderAction::default());
        }
        assert_eq!(slider.value(), dragged);
        assert_eq!(seen.borrow().len(), notified);
    }

    #[test]
    fn test_moves_need_a_press() {
        let (mut slider, _, seen) = slider(SliderMode::Immediate);

        assert_eq!(
            slider.handle_pointer(PointerEvent::Move(RIGHT)),
            SliderAction::default()
        );
        slider.handle_pointer(PointerEvent::Down(DOWN));
        slider.handle_pointer(PointerEvent::Move(RIGHT));
        slider.handle_pointer(PointerEvent::Up(RIGHT));
        assert!(!slider.is_tracking());
        slider.handle_pointer(PointerEvent::Move(DOWN));

        assert!((slider.value() - 0.5).abs() < 1e-9);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_non_finite_pointer_is_ignored() {
        let (mut slider, _, seen) = slider(SliderMode::Immediate);
        let action = slider.handle_pointer(PointerEvent::Down(Point::new(f64::NAN, 0.0)));
        assert_eq!(action, SliderAction::default());
        assert!(!slider.is_tracking());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let (mut slider, _, seen) = slider(SliderMode::Immediate);
        let extra = Rc::new(RefCell::new(0));
        let counter = extra.clone();
        let id = slider.subscribe(move |_| *counter.borrow_mut() += 1);

        slider.set_value(0.1);
        assert!(slider.unsubscribe(id));
        assert!(!slider.unsubscribe(id));
        slider.set_value(0.2);

        assert_eq!(*extra.borrow(), 1);
        assert_eq!(*seen.borrow(), vec![0.1, 0.2]);
    }

    #[test]
    fn test_bad_config_keeps_previous() {
        let (mut slider, _, _) = slider(SliderMode::Immediate);
        let broken = SliderConfig {
            start_angle: 2.0,
            end_angle: 1.0,
            ..Default::default()
        };
        assert!(slider.set_config(broken).is_err());
        assert_eq!(slider.config().mode, SliderMode::Immediate);

        let crowded = SliderConfig {
            tick_count: usize::MAX,
            ..Default::default()
        };
        assert_eq!(
            slider.set_config(crowded),
            Err(SliderError::TickCount(usize::MAX))
        );
        assert_eq!(slider.config().tick_count, 20);
        assert!(!slider.render().is_empty());

        let thinner = SliderConfig {
            line_width: 10.0,
            ..Default::default()
        };
        assert_eq!(slider.set_config(thinner), Ok(SliderAction::new(true, false)));
        assert_eq!(slider.geometry().radius, 140.0);
    }

    #[test]
    fn test_config_swap_cancels_animation() {
        let (mut slider, scheduler, _) = slider(SliderMode::Animated);
        slider.animate_to(1.0);
        assert!(slider.is_animating());

        slider.set_config(SliderConfig::default()).unwrap();
        assert!(!slider.is_animating());
        assert!(!scheduler.registered.get());
    }

    #[test]
    fn test_resize_moves_center() {
        let (mut slider, _, _) = slider(SliderMode::Immediate);
        assert_eq!(slider.resize(300.0, 300.0), SliderAction::default());
        assert!(slider.resize(400.0, 200.0).should_redraw);
        assert_eq!(slider.geometry().center, Point::new(200.0, 100.0));
    }

    #[test]
    fn test_drop_releases_frame_tick() {
        let (mut slider, scheduler, _) = slider(SliderMode::Animated);
        slider.animate_to(1.0);
        assert!(scheduler.registered.get());
        drop(slider);
        assert!(!scheduler.registered.get());
    }
}
