use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crowd_zones::{
    count_people_in_zones, point_in_polygon, polygon_area,
    session::{replay, SessionEvent, SessionStep},
    wire::AnalyzeRequest,
    ClickOutcome, EditorState, FinishStep, NameOutcome, Point, Surface, SurfaceEditors,
    ZoneConfig, ZoneEditor, ZoneError, ZoneThresholds,
};

fn pts(raw: &[(i32, i32)]) -> Vec<Point> {
    raw.iter().copied().map(Point::from).collect()
}

fn square(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Point> {
    pts(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1)])
}

fn random_polygon(rng: &mut StdRng) -> Vec<Point> {
    let n = rng.gen_range(3..12);
    (0..n)
        .map(|_| Point::new(rng.gen_range(0..200), rng.gen_range(0..200)))
        .collect()
}

#[test]
fn reference_areas_and_containment() {
    assert_eq!(polygon_area(&pts(&[(0, 0), (10, 0), (0, 10)])), 50.0);
    assert_eq!(polygon_area(&square(0, 0, 1, 1)), 1.0);

    let sq = square(0, 0, 10, 10);
    assert!(point_in_polygon(5.0, 5.0, &sq));
    assert!(!point_in_polygon(15.0, 15.0, &sq));

    let on_edge = point_in_polygon(0.0, 5.0, &sq);
    for _ in 0..10 {
        assert_eq!(point_in_polygon(0.0, 5.0, &sq), on_edge);
    }
}

#[test]
fn containment_is_invariant_under_rotation() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let poly = random_polygon(&mut rng);
        let probes: Vec<(f64, f64)> = (0..20)
            .map(|_| (rng.gen_range(-10.0..210.0), rng.gen_range(-10.0..210.0)))
            .collect();
        let shift = rng.gen_range(1..poly.len());
        let mut rotated = poly.clone();
        rotated.rotate_left(shift);

        for &(x, y) in &probes {
            assert_eq!(
                point_in_polygon(x, y, &poly),
                point_in_polygon(x, y, &rotated),
                "probe ({x}, {y}) polygon {poly:?} shift {shift}"
            );
        }
    }
}

#[test]
fn interior_points_ignore_winding() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..100 {
        let x0 = rng.gen_range(0..100);
        let y0 = rng.gen_range(0..100);
        let x1 = x0 + rng.gen_range(2..100);
        let y1 = y0 + rng.gen_range(2..100);
        let ccw = square(x0, y0, x1, y1);
        let mut cw = ccw.clone();
        cw.reverse();

        let px = rng.gen_range(x0..x1 - 1) as f64 + 0.5;
        let py = rng.gen_range(y0..y1 - 1) as f64 + 0.5;
        assert!(point_in_polygon(px, py, &ccw));
        assert!(point_in_polygon(px, py, &cw));

        let outside = (x1 as f64 + 3.5, py);
        assert!(!point_in_polygon(outside.0, outside.1, &ccw));
        assert!(!point_in_polygon(outside.0, outside.1, &cw));
    }
}

#[test]
fn two_point_finish_keeps_drawing() {
    let mut editor = ZoneEditor::new(Surface::Video, ZoneConfig::default());
    editor.start();
    editor.click(Point::new(10, 10));
    editor.click(Point::new(90, 10));

    assert_eq!(editor.finish(), Err(ZoneError::TooFewPoints { count: 2 }));
    assert_eq!(editor.state(), &EditorState::Drawing);
    assert_eq!(editor.draft(), pts(&[(10, 10), (90, 10)]).as_slice());
}

#[test]
fn closure_click_does_not_grow_draft() {
    let mut editor = ZoneEditor::new(Surface::Webcam, ZoneConfig::default());
    editor.start();
    for p in [(50, 50), (250, 50), (250, 200)] {
        editor.click(Point::from(p));
    }
    let outcome = editor.click(Point::new(60, 62));
    assert!(matches!(
        outcome,
        ClickOutcome::Closed(FinishStep::NameRequired { .. })
    ));
    assert_eq!(editor.draft().len(), 3);
}

#[test]
fn cancelling_five_points_leaves_zones_alone() {
    let mut editor = ZoneEditor::new(Surface::Image, ZoneConfig::default());
    editor.start();
    for p in [(0, 0), (200, 0), (200, 200), (0, 200)] {
        editor.click(Point::from(p));
    }
    editor.finish().unwrap();
    editor.submit_name(Some("hall")).unwrap();
    let before = editor.zones().clone();

    editor.start();
    for p in [(300, 300), (400, 300), (450, 350), (400, 400), (300, 400)] {
        editor.click(Point::from(p));
    }
    assert_eq!(editor.draft().len(), 5);
    editor.cancel();

    assert_eq!(editor.state(), &EditorState::Idle);
    assert!(editor.draft().is_empty());
    assert_eq!(editor.zones(), &before);
}

#[test]
fn colliding_name_overwrites_in_place() {
    let mut editor = ZoneEditor::new(Surface::Image, ZoneConfig::default());
    for (name, offset) in [("a", 0), ("b", 300), ("a", 600)] {
        editor.start();
        for p in square(offset, offset, offset + 100, offset + 100) {
            editor.click(p);
        }
        editor.finish().unwrap();
        let NameOutcome::Finalized(zone) = editor.submit_name(Some(name)).unwrap() else {
            panic!("zone {name} should finalize without warnings");
        };
        assert_eq!(zone.replaced, name == "a" && offset == 600);
    }
    assert_eq!(editor.zone_count(), 2);
    assert_eq!(editor.zones().names().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(editor.zones().get("a").unwrap()[0], Point::new(600, 600));
}

#[test]
fn dashboard_flow_feeds_backend_payload() {
    let mut editors = SurfaceEditors::new(&ZoneConfig::default());
    let image = editors.editor_mut(Surface::Image);
    image.start();
    for p in [(0, 0), (320, 0), (320, 240), (0, 240)] {
        image.click(Point::from(p));
    }
    // click back on the first vertex to close
    let ClickOutcome::Closed(FinishStep::NameRequired { suggested }) =
        image.click(Point::new(4, 3))
    else {
        panic!("expected closure");
    };
    assert_eq!(suggested, "Zone 1");
    image.submit_name(Some(suggested.as_str())).unwrap();

    assert_eq!(editors.editor(Surface::Video).zone_count(), 0);

    let req = AnalyzeRequest {
        image: Some("data:image/jpeg;base64,AAAA".into()),
        zones: editors.editor(Surface::Image).zones().clone(),
        crossing_line: None,
        enable_heatmap: false,
    };
    let body = serde_json::to_value(&req).unwrap();
    assert_eq!(body["zones"]["Zone 1"].as_array().unwrap().len(), 4);
    assert_eq!(body["zones"]["Zone 1"][1]["x"], 320);
    assert!(body.get("crossing_line").is_none());

    let counts = count_people_in_zones(&[(100.0, 100.0), (500.0, 100.0)], &req.zones);
    assert_eq!(counts["Zone 1"], 1);
}

#[test]
fn replayed_session_matches_live_editing() {
    let script: Vec<SessionEvent> = serde_json::from_str(
        r#"[
            {"op": "start"},
            {"op": "click", "x": 10, "y": 10},
            {"op": "click", "x": 110, "y": 10},
            {"op": "finish"},
            {"op": "click", "x": 110, "y": 110},
            {"op": "click", "x": 12, "y": 14},
            {"op": "name", "name": "Queue"},
            {"op": "threshold", "zone": "Queue", "value": 5},
            {"op": "toggle"},
            {"op": "click", "x": 500, "y": 500},
            {"op": "click", "x": 502, "y": 500},
            {"op": "click", "x": 500, "y": 503},
            {"op": "finish"},
            {"op": "name", "name": "tiny"},
            {"op": "confirm", "proceed": false},
            {"op": "confirm", "proceed": true}
        ]"#,
    )
    .unwrap();

    let mut editor = ZoneEditor::new(Surface::Image, ZoneConfig::default());
    let mut thresholds = ZoneThresholds::new();
    let steps = replay(&mut editor, &mut thresholds, &script);

    assert!(matches!(steps[3], SessionStep::Rejected { event: 3, .. }));
    assert!(matches!(
        steps[5],
        SessionStep::Click(ClickOutcome::Closed(_))
    ));
    assert!(matches!(steps[6], SessionStep::Named(NameOutcome::Finalized(_))));
    assert!(matches!(
        steps[13],
        SessionStep::Named(NameOutcome::ConfirmationRequired(_))
    ));
    assert_eq!(steps[14], SessionStep::Named(NameOutcome::Declined));
    assert!(matches!(steps[15], SessionStep::Rejected { event: 15, .. }));

    assert_eq!(editor.zone_count(), 1);
    assert_eq!(editor.zones().get("Queue").unwrap().len(), 3);
    assert_eq!(thresholds.get("Queue"), Some(5));
    assert!(!editor.is_drawing());
}

#[test]
fn webcam_frame_request_carries_line_and_zones() {
    let mut editors = SurfaceEditors::new(&ZoneConfig::default());
    let webcam = editors.editor_mut(Surface::Webcam);
    webcam.start();
    for p in [(0, 0), (200, 0), (200, 200), (0, 200)] {
        webcam.click(Point::from(p));
    }
    webcam.finish().unwrap();
    webcam.submit_name(Some("entry")).unwrap();

    assert_eq!(webcam.toggle_line(), Ok(true));
    webcam.click(Point::new(0, 100));
    let ClickOutcome::LineSet(line) = webcam.click(Point::new(200, 100)) else {
        panic!("second click should set the line");
    };

    let req = AnalyzeRequest {
        image: None,
        zones: webcam.zones().clone(),
        crossing_line: webcam.crossing_line(),
        enable_heatmap: true,
    };
    let body = serde_json::to_value(&req).unwrap();
    assert_eq!(body["crossing_line"]["start"]["y"], 100);
    assert_eq!(body["crossing_line"]["end"]["x"], 200);
    assert_eq!(body["zones"]["entry"].as_array().unwrap().len(), 4);
    assert_eq!(req.crossing_line, Some(line));

    assert!(editors.editor_mut(Surface::Image).toggle_line().is_err());
}
