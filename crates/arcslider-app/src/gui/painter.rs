use arcslider::{Color, DrawCommand, LineCap, LinearGradient, Point, Scene};
use cairo::Context;

/// Replays a slider scene onto a cairo context.
pub fn paint(cr: &Context, scene: &Scene) -> Result<(), cairo::Error> {
    for command in scene {
        match command {
            DrawCommand::GradientArc {
                center,
                radius,
                start_angle,
                end_angle,
                line_width,
                gradient,
                opacity,
            } => {
                let arc = ArcStroke {
                    center: *center,
                    radius: *radius,
                    start_angle: *start_angle,
                    end_angle: *end_angle,
                    line_width: *line_width,
                };
                arc.paint(cr, gradient, *opacity)?;
            }
            DrawCommand::Segments {
                segments,
                width,
                color,
                cap,
            } => stroke_segments(cr, segments, *width, *color, *cap)?,
            DrawCommand::Line {
                from,
                to,
                width,
                color,
                cap,
            } => stroke_segments(cr, &[(*from, *to)], *width, *color, *cap)?,
        }
    }
    Ok(())
}

struct ArcStroke {
    center: Point,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    line_width: f64,
}

impl ArcStroke {
    /// Strokes with the gradient as source inside a group so the gradient
    /// only lands on the stroke, then composites the group at `opacity`.
    fn paint(
        &self,
        cr: &Context,
        gradient: &LinearGradient,
        opacity: f64,
    ) -> Result<(), cairo::Error> {
        cr.save()?;
        cr.push_group();

        let pattern = cairo::LinearGradient::new(
            gradient.start.x,
            gradient.start.y,
            gradient.end.x,
            gradient.end.y,
        );
        add_stop(&pattern, 0.0, gradient.stops.from);
        add_stop(&pattern, 1.0, gradient.stops.to);
        cr.set_source(&pattern)?;

        cr.set_line_width(self.line_width);
        cr.set_line_cap(cairo::LineCap::Butt);
        cr.new_path();
        cr.arc(
            self.center.x,
            self.center.y,
            self.radius,
            self.start_angle,
            self.end_angle,
        );
        cr.stroke()?;

        cr.pop_group_to_source()?;
        cr.paint_with_alpha(opacity)?;
        cr.restore()
    }
}

fn add_stop(pattern: &cairo::LinearGradient, offset: f64, color: Color) {
    let (r, g, b, a) = color.components();
    pattern.add_color_stop_rgba(offset, r, g, b, a);
}

fn stroke_segments(
    cr: &Context,
    segments: &[(Point, Point)],
    width: f64,
    color: Color,
    cap: LineCap,
) -> Result<(), cairo::Error> {
    let (r, g, b, a) = color.components();
    cr.save()?;
    cr.set_source_rgba(r, g, b, a);
    cr.set_line_width(width);
    cr.set_line_cap(match cap {
        LineCap::Butt => cairo::LineCap::Butt,
        LineCap::Round => cairo::LineCap::Round,
    });
    cr.new_path();
    for (from, to) in segments {
        cr.move_to(from.x, from.y);
        cr.line_to(to.x, to.y);
    }
    cr.stroke()?;
    cr.restore()
}
