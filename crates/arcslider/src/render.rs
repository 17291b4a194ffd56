use crate::color::Color;
use crate::config::{GradientStops, SliderConfig, SliderError};
use crate::geometry::{ArcGeometry, Point};
use crate::mapper::AngleValueMapper;

// Arcs shorter than this are not emitted.
const DRAW_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
}

/// Linear gradient along `start -> end`, painted only where the owning
/// command strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: GradientStops,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    GradientArc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        line_width: f64,
        gradient: LinearGradient,
        opacity: f64,
    },
    /// Independent segments stroked together in one pass.
    Segments {
        segments: Vec<(Point, Point)>,
        width: f64,
        color: Color,
        cap: LineCap,
    },
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Color,
        cap: LineCap,
    },
}

/// Draw commands for one frame, in paint order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

pub struct ArcRenderer<'a> {
    config: &'a SliderConfig,
    mapper: AngleValueMapper,
    geometry: ArcGeometry,
}

impl<'a> ArcRenderer<'a> {
    pub fn new(config: &'a SliderConfig, geometry: ArcGeometry) -> Result<Self, SliderError> {
        config.validate()?;
        Ok(Self::with_mapper(
            config,
            AngleValueMapper::from_config(config)?,
            geometry,
        ))
    }

    pub(crate) fn with_mapper(
        config: &'a SliderConfig,
        mapper: AngleValueMapper,
        geometry: ArcGeometry,
    ) -> Self {
        Self {
            config,
            mapper,
            geometry,
        }
    }

    pub fn render(&self, value: f64) -> Scene {
        let value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        let span = self.mapper.span();
        let current = self.mapper.value_to_angle(value);

        let mut scene = Scene::new();
        self.add_arc(
            &mut scene,
            current,
            span.end(),
            self.config.remaining,
            self.config.remaining_opacity,
        );
        self.add_arc(&mut scene, span.start(), current, self.config.consumed, 1.0);
        self.add_ticks(&mut scene);
        self.add_needle(&mut scene, current);
        scene
    }

    fn add_arc(&self, scene: &mut Scene, from: f64, to: f64, stops: GradientStops, opacity: f64) {
        if to - from < DRAW_EPSILON {
            return;
        }
        let (start, end) = self.geometry.gradient_axis();
        scene.add_command(DrawCommand::GradientArc {
            center: self.geometry.center,
            radius: self.geometry.radius,
            start_angle: from,
            end_angle: to,
            line_width: self.config.line_width,
            gradient: LinearGradient { start, end, stops },
            opacity,
        });
    }

    fn tick_angles(&self) -> Vec<f64> {
        let span = self.mapper.span();
        match self.config.tick_count {
            0 => Vec::new(),
            1 => vec![span.start()],
            n => {
                let step = span.sweep() / (n - 1) as f64;
                (0..n).map(|i| span.start() + step * i as f64).collect()
            }
        }
    }

    fn add_ticks(&self, scene: &mut Scene) {
        let angles = self.tick_angles();
        if angles.is_empty() {
            return;
        }
        let center = self.geometry.center;
        let outer = self.geometry.outer_radius;
        let inner = (outer - self.config.tick_length).max(0.0);

        let segments = angles
            .into_iter()
            .map(|a| (center.on_circle(inner, a), center.on_circle(outer, a)))
            .collect();

        scene.add_command(DrawCommand::Segments {
            segments,
            width: self.config.tick_width,
            color: self.config.tick_color,
            cap: LineCap::Butt,
        });
    }

    fn add_needle(&self, scene: &mut Scene, angle: f64) {
        let center = self.geometry.center;
        scene.add_command(DrawCommand::Line {
            from: center,
            to: center.on_circle(self.geometry.needle_radius(), angle),
            width: self.config.needle_width,
            color: self.config.needle_color,
            cap: LineCap::Round,
        });
    }
}

pub fn render(
    value: f64,
    config: &SliderConfig,
    geometry: ArcGeometry,
) -> Result<Scene, SliderError> {
    Ok(ArcRenderer::new(config, geometry)?.render(value))
}
