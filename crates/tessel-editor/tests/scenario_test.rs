use std::time::{Duration, Instant};

use glam::{Mat4, Vec2, Vec3};
use tessel_editor::{
    Canvas, Command, DrawOp, Editor, EditorError, GeometryStore, PointSpec, RecordingSurface,
    RenderStyle, SceneConfig, to_model_space, to_screen_space,
};

const EPS: f32 = 1e-4;

fn close(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < EPS
}

fn square_scene() -> SceneConfig {
    SceneConfig {
        canvas: Canvas::new(400.0, 400.0),
        points: vec![
            PointSpec::new(100.0, 100.0, 255.0, 0.0, 0.0),
            PointSpec::new(300.0, 100.0, 0.0, 255.0, 0.0),
            PointSpec::new(300.0, 300.0, 0.0, 0.0, 255.0),
            PointSpec::new(100.0, 300.0, 255.0, 255.0, 0.0),
        ],
        polygons: vec![vec![0, 1, 2, 3]],
        style: RenderStyle::default(),
    }
}

#[test]
fn square_scene_builds_expected_points_and_triangles() {
    let store = GeometryStore::from_config(&square_scene()).unwrap();

    let expected = [
        (Vec2::new(-0.5, 0.5), Vec3::new(1.0, 0.0, 0.0)),
        (Vec2::new(0.5, 0.5), Vec3::new(0.0, 1.0, 0.0)),
        (Vec2::new(0.5, -0.5), Vec3::new(0.0, 0.0, 1.0)),
        (Vec2::new(-0.5, -0.5), Vec3::new(1.0, 1.0, 0.0)),
    ];
    assert_eq!(store.points().len(), expected.len());
    for (p, (pos, color)) in store.points().zip(expected) {
        assert_eq!(p.position, pos);
        assert_eq!(p.color, color);
    }

    let tris: Vec<[usize; 3]> = store
        .triangles()
        .iter()
        .map(|t| t.vertices.map(|id| store.index_of(id).unwrap()))
        .collect();
    assert_eq!(tris, vec![[0, 1, 2], [0, 2, 3]]);
    assert_eq!(store.vertex_buffer().len(), 36);
}

#[test]
fn three_index_polygon_is_invalid() {
    let mut store = GeometryStore::from_config(&square_scene()).unwrap();
    let err = store.add_polygon(&[0, 1, 2]).unwrap_err();
    assert!(matches!(err, EditorError::InvalidPolygon(_)));
    assert_eq!(store.triangle_count(), 2);
}

#[test]
fn out_of_canvas_point_in_config_is_rejected() {
    let mut cfg = square_scene();
    cfg.points.push(PointSpec::new(500.0, 10.0, 0.0, 0.0, 0.0));
    assert!(matches!(Editor::new(cfg), Err(EditorError::OutOfBounds(_))));
}

#[test]
fn pick_and_drag_with_identity_transform() {
    let mut ed = Editor::new(square_scene()).unwrap();

    let picked = ed.pointer_down(Vec2::new(300.0, 300.0)).unwrap();
    assert_eq!(picked, ed.store().point_id(2));

    assert!(ed.pointer_move(Vec2::new(250.0, 350.0)));
    ed.pointer_up();

    let points: Vec<_> = ed.store().points().copied().collect();
    assert!(close(points[2].position, Vec2::new(0.25, -0.75)));
    assert_eq!(points[0].position, Vec2::new(-0.5, 0.5));
    assert_eq!(points[1].position, Vec2::new(0.5, 0.5));
    assert_eq!(points[3].position, Vec2::new(-0.5, -0.5));

    // Releasing ends the drag; further moves do nothing.
    assert!(!ed.pointer_move(Vec2::new(10.0, 10.0)));
}

#[test]
fn drag_after_animation_uses_frozen_transform() {
    let t0 = Instant::now();
    let mut ed = Editor::new(square_scene()).unwrap();

    ed.apply(Command::ToggleAnimation, t0);
    ed.frame(t0 + Duration::from_millis(1500));
    ed.apply(Command::ToggleAnimation, t0 + Duration::from_millis(1500));

    let canvas = ed.store().canvas();
    let first = ed.store().point_id(0).unwrap();
    let position = |ed: &Editor| ed.store().point(first).unwrap().position;
    let shown = to_screen_space(ed.transform(), position(&ed));
    let device = canvas.to_device(shown);

    assert_eq!(ed.pointer_down(device).unwrap(), Some(first));

    let dest = device + Vec2::new(25.0, -15.0);
    assert!(ed.pointer_move(dest));

    // With a zero grab offset the point lands right under the pointer.
    let model = to_model_space(canvas, ed.transform(), dest);
    assert!(close(position(&ed), model));
    let shown_after = to_screen_space(ed.transform(), position(&ed));
    assert!(close(shown_after, canvas.to_normalized(dest)));
}

#[test]
fn animated_render_uploads_live_transform() {
    let t0 = Instant::now();
    let mut ed = Editor::new(square_scene()).unwrap();
    let mut surface = RecordingSurface::new();

    ed.apply(Command::ToggleAnimation, t0);
    ed.frame(t0 + Duration::from_millis(2000));
    ed.render(&mut surface);

    let m = surface
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::SetTransform(m) => Some(*m),
            _ => None,
        })
        .unwrap();
    assert_eq!(m, ed.transform().model_matrix());
    assert!(!m.abs_diff_eq(Mat4::IDENTITY, EPS));
    assert!(ed.needs_render(), "animation keeps requesting frames");
}

#[test]
fn device_round_trip_over_every_canvas_pixel() {
    for (w, h) in [(400, 400), (640, 480), (333, 777), (1000, 700)] {
        let canvas = Canvas::new(w as f32, h as f32);
        let tolerance = canvas.round_trip_tolerance();
        let mut worst = 0.0f32;

        for x in 0..=w {
            for y in 0..=h {
                let d = Vec2::new(x as f32, y as f32);
                let back = canvas.to_device(canvas.to_normalized(d));
                worst = worst.max((back - d).abs().max_element());
            }
        }

        assert!(worst <= tolerance, "{w}x{h}: worst error {worst} exceeds {tolerance}");
    }
}

#[test]
fn configured_point_displays_at_its_device_position() {
    let store = GeometryStore::from_config(&square_scene()).unwrap();
    let canvas = store.canvas();
    for (p, spec) in store.points().zip(&square_scene().points) {
        let back = canvas.to_device(p.position);
        assert!((back - Vec2::new(spec.x, spec.y)).abs().max_element() <= canvas.round_trip_tolerance());
    }
}
