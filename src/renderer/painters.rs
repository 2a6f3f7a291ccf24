//! Scene painters
//!
//! One function per scene kind. Each clears the canvas first and draws back
//! to front.

use glam::{Vec2, Vec3};

use super::canvas::{Canvas, Font, Paint, Path, Stroke};
use super::color::{Rgba, colors};
use super::shapes;
use crate::input::Interaction;
use crate::sim::functions::FunctionDescriptor;
use crate::sim::logo::LogoState;
use crate::sim::particles::{Link, ParticleField};
use crate::sim::plot::PlotState;
use crate::sim::surface::{AXIS_LABEL_AT, AXIS_LENGTH, SurfaceState};

const PLOT_GRID_SPACING: f32 = 20.0;
const HINT: &str = "Click anywhere to change function";

/// Per-path particle tint for the logo (S darker, crossbar brighter)
fn logo_tint(path: Option<usize>) -> f32 {
    match path {
        Some(0) => 0.9,
        Some(3) => 1.1,
        _ => 1.0,
    }
}

/// The "SA" monogram: S as three cubic curves, A as two strokes
pub fn logo_outline(size: f32) -> [Path; 3] {
    let p = |x: f32, y: f32| Vec2::new(x, y) * size;
    let s = Path::new()
        .move_to(p(0.25, 0.3))
        .cubic_to(p(0.25, 0.3), p(0.45, 0.25), p(0.45, 0.4))
        .cubic_to(p(0.45, 0.55), p(0.25, 0.5), p(0.25, 0.65))
        .cubic_to(p(0.25, 0.8), p(0.45, 0.75), p(0.45, 0.75));
    let a = Path::polyline(&[p(0.55, 0.75), p(0.7, 0.25), p(0.85, 0.75)]);
    let bar = Path::segment(p(0.6, 0.55), p(0.8, 0.55));
    [s, a, bar]
}

pub fn paint_logo(canvas: &mut dyn Canvas, state: &LogoState, color: Rgba) {
    canvas.clear();
    let size = state.size();

    let stroke = Stroke::solid(color, size * 0.005).rounded();
    for path in logo_outline(size) {
        canvas.stroke_path(&path, &stroke);
    }

    for p in &state.particles {
        let fill = color.scale_rgb(logo_tint(p.path)).with_alpha(p.opacity * 0.7);
        canvas.fill_circle(p.pos, p.size * 0.7, &fill.into());
    }
}

/// Free particles as filled dots
pub fn paint_field(canvas: &mut dyn Canvas, field: &ParticleField, color: Rgba) {
    canvas.clear();
    for p in &field.particles {
        canvas.fill_circle(p.pos, p.size, &color.with_alpha(p.opacity).into());
    }
}

/// Mesh links fading with distance, then the points
pub fn paint_network(
    canvas: &mut dyn Canvas,
    field: &ParticleField,
    links: &[Link],
    link_opacity: f32,
    color: Rgba,
) {
    canvas.clear();
    for link in links {
        let (a, b) = (&field.particles[link.a], &field.particles[link.b]);
        let stroke = Stroke::solid(color.with_alpha(link.strength * link_opacity), 1.0);
        canvas.stroke_path(&Path::segment(a.pos, b.pos), &stroke);
    }
    for p in &field.particles {
        canvas.fill_circle(p.pos, p.size, &color.with_alpha(p.opacity).into());
    }
}

/// 2D plot, layered grid → axes → curve → derivative → markers → links →
/// cursor → text
pub fn paint_plot(
    canvas: &mut dyn Canvas,
    state: &PlotState,
    descriptor: &FunctionDescriptor,
    interaction: &Interaction,
    show_hint: bool,
) {
    canvas.clear();
    let g = state.geometry;
    let color = descriptor.color;

    let grid = shapes::grid(canvas.size(), g.origin, PLOT_GRID_SPACING);
    canvas.stroke_path(&grid, &Stroke::solid(colors::GRID, 1.0));
    canvas.stroke_path(&shapes::axes(g.origin, g.half_axis), &Stroke::solid(colors::AXIS, 2.0));

    canvas.stroke_path(&Path::polyline(&state.curve), &Stroke::solid(color, 3.0));
    if !state.derivative.is_empty() {
        let stroke = Stroke::solid(color.with_alpha(0.6), 2.0).dashed(6.0, 4.0);
        canvas.stroke_path(&Path::polyline(&state.derivative), &stroke);
    }

    for m in &state.markers {
        let r = m.radius();
        let fill = if m.active {
            Paint::Radial {
                center: m.pos,
                radius: r * 2.0,
                inner: colors::WHITE,
                outer: color,
            }
        } else {
            Paint::Solid(color)
        };
        canvas.fill_circle(m.pos, r, &fill);
        canvas.stroke_circle(m.pos, r, &Stroke::solid(colors::MARKER_OUTLINE, 2.0));
    }

    for pair in state.markers.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let stroke = if a.active || b.active {
            Stroke::solid(colors::ACCENT, 2.0).with_paint(Paint::Linear {
                from: a.pos,
                to: b.pos,
                start: colors::ACCENT,
                end: colors::ACCENT_FADED,
            })
        } else {
            Stroke::solid(colors::MARKER_LINK, 1.0)
        };
        canvas.stroke_path(&Path::segment(a.pos, b.pos), &stroke);
    }

    if let Some(cursor) = interaction.cursor {
        canvas.fill_circle(cursor, 40.0, &colors::CURSOR_HALO.into());
        if interaction.pressed {
            canvas.stroke_circle(cursor, 60.0, &Stroke::solid(colors::CURSOR_RING, 4.0));
        }
    }

    canvas.fill_text(
        &format!("{} Function:", descriptor.name),
        Vec2::new(20.0, 30.0),
        Font::bold(16.0),
        colors::TEXT,
    );
    canvas.fill_text(descriptor.formula, Vec2::new(20.0, 55.0), Font::regular(16.0), color);
    if show_hint {
        canvas.fill_text(HINT, Vec2::new(20.0, 80.0), Font::regular(14.0), colors::TEXT_MUTED);
    }
    for m in state.markers.iter().filter(|m| m.active) {
        let v = g.to_domain(m.pos);
        canvas.fill_text(
            &format!("({:.2}, {:.2})", v.x, v.y),
            m.pos + Vec2::new(15.0, -15.0),
            Font::regular(14.0),
            colors::TEXT,
        );
    }
}

/// 3D surface: ground grid, axes, wireframe, probe, readout
pub fn paint_surface(
    canvas: &mut dyn Canvas,
    state: &SurfaceState,
    descriptor: &FunctionDescriptor,
    selected: usize,
) {
    canvas.clear();
    let projector = state.projector();

    let mut ground = Path::new();
    for (a, b) in SurfaceState::ground_lines() {
        if let (Some(a), Some(b)) = (projector.project(a), projector.project(b)) {
            ground = ground.move_to(a).line_to(b);
        }
    }
    canvas.stroke_path(&ground, &Stroke::solid(colors::SURFACE_GRID, 1.0));

    let axes = [
        (Vec3::X, colors::AXIS_X, "X"),
        (Vec3::Y, colors::AXIS_Y, "Y"),
        (Vec3::Z, colors::AXIS_Z, "Z"),
    ];
    for (dir, color, label) in axes {
        if let (Some(a), Some(b)) = (
            projector.project(Vec3::ZERO),
            projector.project(dir * AXIS_LENGTH),
        ) {
            canvas.stroke_path(&Path::segment(a, b), &Stroke::solid(color, 2.0));
        }
        if let Some(at) = projector.project(dir * AXIS_LABEL_AT) {
            canvas.fill_text(label, at, Font::bold(14.0), color);
        }
    }

    let mut wire = Path::new();
    for line in state.surface_lines(selected) {
        let run = shapes::broken_polyline(line.into_iter().map(|v| projector.project(v)));
        wire.segs.extend(run.segs);
    }
    canvas.stroke_path(&wire, &Stroke::solid(descriptor.color.with_alpha(0.55), 1.0));

    let probe = state.probe(selected);
    let foot = Vec3::new(probe.x, 0.0, 0.0);
    if let (Some(a), Some(b)) = (projector.project(foot), projector.project(probe)) {
        canvas.stroke_path(&Path::segment(a, b), &Stroke::solid(colors::PROBE, 2.0));
        canvas.fill_circle(b, 6.0, &colors::PROBE.into());
    }

    canvas.fill_text(descriptor.name, Vec2::new(20.0, 30.0), Font::bold(16.0), colors::TEXT);
    canvas.fill_text(
        &format!("f({:.4}) = {:.4}", probe.x, probe.y),
        Vec2::new(20.0, 55.0),
        Font::regular(14.0),
        descriptor.color,
    );
    canvas.fill_text(
        descriptor.description,
        Vec2::new(20.0, 80.0),
        Font::regular(12.0),
        colors::TEXT_MUTED,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Size;
    use crate::renderer::{DrawList, DrawOp};
    use crate::sim::functions::FunctionKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_logo_outline_and_tints() {
        let state = LogoState::new(300.0, Pcg32::seed_from_u64(1));
        let mut canvas = DrawList::new(Size::new(300, 300));
        paint_logo(&mut canvas, &state, Rgba::from_hex("#646464"));

        let paths = canvas.paths();
        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|(_, s)| s.round && (s.width - 1.5).abs() < 1e-4));
        assert_eq!(canvas.circles().len(), state.particles.len());

        let first = canvas.circles()[0].2;
        // S particles are darkened: 100 * 0.9
        assert!(matches!(first, Paint::Solid(c) if c.r == 90));
    }

    #[test]
    fn test_plot_layer_order() {
        let mut state = PlotState::new(FunctionKind::ALL.to_vec(), Size::new(600, 400), 100.0);
        state.sample(0, None, true);
        let mut interaction = Interaction::default();
        let cursor = state.markers[3].pos;
        interaction.cursor = Some(cursor);
        interaction.pressed = true;
        state.sample(0, Some(cursor), true);

        let mut canvas = DrawList::new(Size::new(600, 400));
        paint_plot(&mut canvas, &state, state.descriptor(0), &interaction, true);

        let ops = canvas.ops();
        assert_eq!(ops[0], DrawOp::Clear);
        // grid, axes, curve, dashed derivative
        let strokes: Vec<&Stroke> = canvas.paths().into_iter().map(|(_, s)| s).collect();
        assert_eq!(strokes[0].paint, Paint::Solid(colors::GRID));
        assert_eq!(strokes[1].paint, Paint::Solid(colors::AXIS));
        assert_eq!(strokes[2].width, 3.0);
        assert!(strokes[3].dash.is_some());

        // Text comes last
        let first_text = ops.iter().position(|op| matches!(op, DrawOp::Text { .. })).unwrap();
        assert!(ops[first_text..].iter().all(|op| matches!(op, DrawOp::Text { .. })));

        let texts = canvas.texts();
        assert_eq!(texts[0], "Sigmoid Function:");
        assert_eq!(texts[1], "f(x) = 1/(1+e^(-x))");
        assert_eq!(texts[2], HINT);
        assert!(texts[3].starts_with('(') && texts[3].contains(", "));

        // Hovered marker uses a radial gradient at radius 8
        assert!(canvas.circles().iter().any(|(_, r, p)| *r == 8.0 && matches!(p, Paint::Radial { .. })));
        // Halo and press ring
        assert!(canvas.circles().iter().any(|(c, r, _)| *c == cursor && *r == 40.0));
        assert!(ops.iter().any(|op| matches!(op, DrawOp::StrokeCircle { radius, .. } if *radius == 60.0)));
    }

    #[test]
    fn test_surface_readout() {
        let mut state = SurfaceState::new(FunctionKind::ACTIVATIONS.to_vec(), Size::new(800, 600));
        state.step(1.0 / 60.0, 0.5, 50.0, false, 2.0);
        let mut canvas = DrawList::new(Size::new(800, 600));
        paint_surface(&mut canvas, &state, state.descriptor(0), 0);

        let texts = canvas.texts();
        assert!(texts.contains(&"X") && texts.contains(&"Y") && texts.contains(&"Z"));
        assert!(texts.contains(&"ReLU"));
        assert!(texts.contains(&"f(2.0000) = 2.0000"));
        assert_eq!(canvas.circles().len(), 1);
    }
}
