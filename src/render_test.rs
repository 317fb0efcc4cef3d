#![allow(clippy::float_cmp)]

use std::convert::Infallible;

use super::*;
use crate::config::EngineConfig;

// =============================================================
// Recording surface
// =============================================================

#[derive(Debug, Clone, PartialEq)]
enum Op {
    View { scale: f64, tx: f64, ty: f64 },
    Clear(Extent),
    Stroke { style: String, width: f64 },
    Fill(String),
    Opacity(f64),
    Begin,
    MoveTo(Point),
    LineTo(Point),
    StrokePath,
    Circle(Point, f64),
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
}

impl Surface for Recorder {
    type Error = Infallible;

    fn set_view(&mut self, scale: f64, tx: f64, ty: f64) -> Result<(), Infallible> {
        self.ops.push(Op::View { scale, tx, ty });
        Ok(())
    }

    fn clear_area(&mut self, bounds: Extent) -> Result<(), Infallible> {
        self.ops.push(Op::Clear(bounds));
        Ok(())
    }

    fn set_stroke_paint(&mut self, style: &str, width: f64) -> Result<(), Infallible> {
        self.ops.push(Op::Stroke { style: style.to_owned(), width });
        Ok(())
    }

    fn set_fill_paint(&mut self, style: &str) -> Result<(), Infallible> {
        self.ops.push(Op::Fill(style.to_owned()));
        Ok(())
    }

    fn set_opacity(&mut self, alpha: f64) -> Result<(), Infallible> {
        self.ops.push(Op::Opacity(alpha));
        Ok(())
    }

    fn start_path(&mut self) -> Result<(), Infallible> {
        self.ops.push(Op::Begin);
        Ok(())
    }

    fn path_move_to(&mut self, p: Point) -> Result<(), Infallible> {
        self.ops.push(Op::MoveTo(p));
        Ok(())
    }

    fn path_line_to(&mut self, p: Point) -> Result<(), Infallible> {
        self.ops.push(Op::LineTo(p));
        Ok(())
    }

    fn stroke_path(&mut self) -> Result<(), Infallible> {
        self.ops.push(Op::StrokePath);
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f64) -> Result<(), Infallible> {
        self.ops.push(Op::Circle(center, radius));
        Ok(())
    }
}

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn engine_without_grid() -> EngineCore {
    let config = EngineConfig { show_grid: false, ..EngineConfig::default() };
    let Ok(mut core) = EngineCore::with_config(config) else {
        panic!("valid config rejected");
    };
    core.set_viewport(800.0, 600.0, 1.0);
    core
}

fn render(core: &EngineCore) -> Vec<Op> {
    let mut recorder = Recorder::default();
    let Ok(()) = draw(&mut recorder, core);
    recorder.ops
}

fn circles(ops: &[Op]) -> Vec<Point> {
    ops.iter()
        .filter_map(|op| match op {
            Op::Circle(p, _) => Some(*p),
            _ => None,
        })
        .collect()
}

fn path_points(ops: &[Op]) -> Vec<Op> {
    ops.iter()
        .filter(|op| matches!(op, Op::MoveTo(_) | Op::LineTo(_)))
        .cloned()
        .collect()
}

fn position(ops: &[Op], pred: impl Fn(&Op) -> bool) -> Option<usize> {
    ops.iter().position(pred)
}

fn rposition(ops: &[Op], pred: impl Fn(&Op) -> bool) -> Option<usize> {
    ops.iter().rposition(pred)
}

// =============================================================
// Tests
// =============================================================

#[test]
fn empty_scene_only_clears() {
    let core = engine_without_grid();
    let ops = render(&core);
    assert_eq!(ops[0], Op::View { scale: 1.0, tx: 0.0, ty: 0.0 });
    assert_eq!(ops[1], Op::Clear(Extent::new(800.0, 600.0)));
    assert!(path_points(&ops).is_empty());
    assert!(circles(&ops).is_empty());
}

#[test]
fn world_transform_follows_camera_and_dpr() {
    let mut core = engine_without_grid();
    core.set_viewport(800.0, 600.0, 2.0);
    core.begin_pan(pt(0.0, 0.0));
    core.end_pan(pt(-10.0, -20.0));
    let ops = render(&core);
    assert_eq!(ops[0], Op::View { scale: 2.0, tx: 0.0, ty: 0.0 });
    assert_eq!(ops[2], Op::View { scale: 2.0, tx: -20.0, ty: -40.0 });
}

#[test]
fn polylines_drawn_in_order_in_one_path() {
    let mut core = engine_without_grid();
    core.begin_or_extend(pt(0.0, 0.0));
    core.begin_or_extend(pt(10.0, 0.0));
    core.begin_or_extend(pt(10.0, 10.0));
    core.stop();
    core.begin_or_extend(pt(50.0, 50.0));
    core.begin_or_extend(pt(60.0, 50.0));
    core.stop();

    let ops = render(&core);
    assert_eq!(
        path_points(&ops),
        vec![
            Op::MoveTo(pt(0.0, 0.0)),
            Op::LineTo(pt(10.0, 0.0)),
            Op::LineTo(pt(10.0, 10.0)),
            Op::MoveTo(pt(50.0, 50.0)),
            Op::LineTo(pt(60.0, 50.0)),
        ]
    );
    let strokes = ops.iter().filter(|op| matches!(op, Op::StrokePath)).count();
    assert_eq!(strokes, 1);
}

#[test]
fn markers_drawn_at_every_vertex_after_lines() {
    let mut core = engine_without_grid();
    core.begin_or_extend(pt(0.0, 0.0));
    core.begin_or_extend(pt(10.0, 0.0));
    core.begin_or_extend(pt(10.0, 10.0));
    core.stop();

    let ops = render(&core);
    assert_eq!(circles(&ops), vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)]);

    let Some(last_stroke) = rposition(&ops, |op| matches!(op, Op::StrokePath)) else {
        panic!("no stroke");
    };
    let Some(first_circle) = position(&ops, |op| matches!(op, Op::Circle(..))) else {
        panic!("no marker");
    };
    assert!(last_stroke < first_circle);
}

#[test]
fn markers_use_configured_style_and_radius() {
    let config = EngineConfig { show_grid: false, marker_radius: 5.0, marker_style: "red".into(), ..EngineConfig::default() };
    let Ok(mut core) = EngineCore::with_config(config) else {
        panic!("valid config rejected");
    };
    core.begin_or_extend(pt(0.0, 0.0));
    core.begin_or_extend(pt(10.0, 0.0));

    let ops = render(&core);
    assert!(ops.contains(&Op::Fill("red".into())));
    assert!(ops.contains(&Op::Circle(pt(0.0, 0.0), 5.0)));
}

#[test]
fn stroke_width_stays_constant_on_screen() {
    let mut core = engine_without_grid();
    core.on_wheel(pt(0.0, 0.0), crate::input::WheelDelta { dx: 0.0, dy: -1000.0 });
    let zoom = core.camera().zoom;
    let ops = render(&core);
    assert!(ops.contains(&Op::Stroke { style: "orange".into(), width: 3.0 / zoom }));
}

#[test]
fn fresh_segment_shows_anchor_marker() {
    let mut core = engine_without_grid();
    core.begin_or_extend(pt(25.0, 30.0));
    let ops = render(&core);
    assert_eq!(circles(&ops), vec![pt(25.0, 30.0)]);
    assert!(path_points(&ops).is_empty());
}

#[test]
fn preview_line_runs_from_anchor_to_cursor() {
    let mut core = engine_without_grid();
    core.begin_or_extend(pt(0.0, 0.0));
    core.begin_or_extend(pt(10.0, 0.0));
    core.preview_move(pt(20.0, 5.0), 0.0);

    let ops = render(&core);
    let points = path_points(&ops);
    assert_eq!(&points[points.len() - 2..], &[Op::MoveTo(pt(10.0, 0.0)), Op::LineTo(pt(20.0, 5.0))]);
    // The preview endpoint is not a vertex.
    assert!(!circles(&ops).contains(&pt(20.0, 5.0)));
}

#[test]
fn cleared_scene_draws_nothing() {
    let mut core = engine_without_grid();
    core.begin_or_extend(pt(0.0, 0.0));
    core.begin_or_extend(pt(10.0, 0.0));
    core.stop();
    core.begin_or_extend(pt(50.0, 0.0));
    core.begin_or_extend(pt(60.0, 0.0));
    core.clear();

    let ops = render(&core);
    assert!(ops.contains(&Op::Clear(Extent::new(800.0, 600.0))));
    assert!(path_points(&ops).is_empty());
    assert!(circles(&ops).is_empty());
}

#[test]
fn uncommitted_pan_renders_with_preview_camera() {
    let mut core = engine_without_grid();
    core.begin_pan(pt(100.0, 100.0));
    core.update_pan(pt(50.0, 100.0), false);
    let ops = render(&core);
    assert_eq!(ops[2], Op::View { scale: 1.0, tx: -50.0, ty: 0.0 });
}

#[test]
fn grid_drawn_first_at_scale_spacing() {
    let mut core = EngineCore::new();
    core.set_viewport(21.0, 14.0, 1.0);
    let ops = render(&core);

    assert_eq!(ops[3], Op::Stroke { style: "black".into(), width: 1.0 });
    assert_eq!(ops[4], Op::Opacity(GRID_ALPHA));
    // Vertical lines at x = 0, 7, 14, 21; horizontal at y = 0, 7, 14.
    let moves: Vec<Point> = ops
        .iter()
        .filter_map(|op| match op {
            Op::MoveTo(p) => Some(*p),
            _ => None,
        })
        .collect();
    assert_eq!(
        moves,
        vec![pt(0.5, 0.0), pt(7.5, 0.0), pt(14.5, 0.0), pt(21.5, 0.0), pt(0.0, 0.5), pt(0.0, 7.5), pt(0.0, 14.5)]
    );
    assert!(ops.contains(&Op::Opacity(1.0)));
}

#[test]
fn grid_skipped_when_too_dense() {
    let config = EngineConfig { distance_scale_factor: 1.0, ..EngineConfig::default() };
    let Ok(mut core) = EngineCore::with_config(config) else {
        panic!("valid config rejected");
    };
    core.set_viewport(800.0, 600.0, 1.0);
    for _ in 0..50 {
        core.on_wheel(pt(0.0, 0.0), crate::input::WheelDelta { dx: 0.0, dy: 1000.0 });
    }
    let ops = render(&core);
    assert!(!ops.iter().any(|op| matches!(op, Op::Opacity(a) if *a == GRID_ALPHA)));
}
