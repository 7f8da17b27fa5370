//! End-to-end drawing sessions against file-backed storage.

use doodlepad_app::{AppConfig, Script, Session};
use doodlepad_core::storage::{DEFAULT_SCENE_KEY, FileStorage, Storage};
use doodlepad_core::{EditorAction, Entry, InkColor, InputEvent, Key, Mode, Scene, ShapeKind};
use doodlepad_render::DrawCommand;
use kurbo::{Cap, Join, PathEl, Point};
use std::path::Path;
use tempfile::tempdir;

fn config(dir: &Path) -> AppConfig {
    AppConfig {
        width: 64,
        height: 48,
        storage_dir: Some(dir.to_path_buf()),
        ..AppConfig::default()
    }
}

fn open(dir: &Path) -> Session {
    let mut session = Session::open(&config(dir)).unwrap();
    session.mount();
    session
}

fn type_text(session: &mut Session, text: &str) {
    for c in text.chars() {
        session.handle_event(InputEvent::Key {
            key: Key::Character(c.to_string()),
        });
    }
}

fn stored_scene(dir: &Path) -> Scene {
    let storage = FileStorage::new(dir.to_path_buf()).unwrap();
    Scene::from_json(&storage.load(DEFAULT_SCENE_KEY).unwrap()).unwrap()
}

#[test]
fn test_red_stroke_survives_reload() {
    let dir = tempdir().unwrap();
    let mut session = open(dir.path());
    session.apply(EditorAction::SetColor(InkColor::from_hex("#FF0000").unwrap()));
    session.apply(EditorAction::SetBrushSize(5.0));
    session.handle_event(InputEvent::down(0.0, 0.0));
    session.handle_event(InputEvent::moved(10.0, 0.0));
    session.handle_event(InputEvent::moved(10.0, 10.0));
    session.handle_event(InputEvent::PointerUp);

    let expected = Entry::stroke(
        vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)],
        InkColor::RED,
        5.0,
    );
    assert_eq!(session.editor().scene().entries(), &[expected.clone()]);
    assert_eq!(stored_scene(dir.path()).entries(), &[expected]);

    let DrawCommand::Stroke { path, stroke, .. } = &session.display_list().commands()[1] else {
        panic!("expected a stroke command");
    };
    assert_eq!(stroke.join, Join::Round);
    assert_eq!(stroke.start_cap, Cap::Round);
    assert_eq!(path.elements().len(), 3);
    assert_eq!(path.elements()[2], PathEl::LineTo(Point::new(10.0, 10.0)));

    let pixels = session.export_image().unwrap();
    let commands = session.display_list().clone();
    drop(session);

    let reloaded = open(dir.path());
    assert_eq!(reloaded.display_list(), &commands);
    assert_eq!(reloaded.export_image().unwrap(), pixels);
    assert_eq!(reloaded.surface().unwrap().pixel(5, 0), Some(InkColor::RED));
}

#[test]
fn test_single_tap_is_dropped() {
    let dir = tempdir().unwrap();
    let mut session = open(dir.path());
    session.handle_event(InputEvent::down(5.0, 5.0));
    session.handle_event(InputEvent::PointerUp);
    assert!(session.editor().scene().is_empty());
}

#[test]
fn test_stamps_use_tap_time_brush() {
    let dir = tempdir().unwrap();
    let mut session = open(dir.path());
    session.apply(EditorAction::ToggleShape(ShapeKind::Star));
    session.apply(EditorAction::SetBrushSize(2.0));
    session.handle_event(InputEvent::down(10.0, 10.0));
    session.apply(EditorAction::SetBrushSize(10.0));
    session.handle_event(InputEvent::down(30.0, 30.0));

    let sizes: Vec<f64> = session
        .editor()
        .scene()
        .iter()
        .map(|e| match e {
            Entry::Shape(s) => s.size,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(sizes, vec![6.0, 30.0]);
    assert_eq!(stored_scene(dir.path()).len(), 2);
}

#[test]
fn test_text_commit_on_enter() {
    let dir = tempdir().unwrap();
    let mut session = open(dir.path());
    session.apply(EditorAction::ToggleText);
    session.handle_event(InputEvent::down(10.0, 30.0));
    type_text(&mut session, "Hi");
    session.handle_event(InputEvent::Key { key: Key::Enter });

    let entries = session.editor().scene().entries();
    assert_eq!(entries.len(), 1);
    let Entry::Text(text) = &entries[0] else {
        panic!("expected text");
    };
    assert_eq!(text.text, "Hi");
    assert_eq!(text.font_size, 20.0);
    assert_eq!(text.anchor, Point::new(10.0, 30.0));
    assert_eq!(session.editor().state().mode, Mode::Freehand);
}

#[test]
fn test_blank_text_is_dropped() {
    let dir = tempdir().unwrap();
    let mut session = open(dir.path());
    session.apply(EditorAction::ToggleText);
    session.handle_event(InputEvent::down(10.0, 30.0));
    type_text(&mut session, "  ");
    session.handle_event(InputEvent::Key { key: Key::Enter });
    assert!(session.editor().scene().is_empty());
}

#[test]
fn test_mode_switch_commits_pending_text() {
    let dir = tempdir().unwrap();
    let mut session = open(dir.path());
    session.apply(EditorAction::ToggleText);
    session.handle_event(InputEvent::down(10.0, 30.0));
    type_text(&mut session, "Bye");
    session.apply(EditorAction::ToggleEraser);

    assert_eq!(session.editor().state().mode, Mode::Eraser);
    let entries = stored_scene(dir.path());
    assert!(matches!(&entries.entries()[0], Entry::Text(t) if t.text == "Bye"));
}

#[test]
fn test_caret_blink_changes_overlay_only() {
    let dir = tempdir().unwrap();
    let mut session = open(dir.path());
    session.apply(EditorAction::ToggleText);
    session.handle_event(InputEvent::down(10.0, 30.0));
    type_text(&mut session, "a");
    let visible = session.display_list().len();

    session.handle_event(InputEvent::Tick);
    assert_eq!(session.display_list().len(), visible - 1);
    session.handle_event(InputEvent::Tick);
    assert_eq!(session.display_list().len(), visible);
    assert!(session.editor().scene().is_empty());
}

#[test]
fn test_clear_persists_empty_scene() {
    let dir = tempdir().unwrap();
    let mut session = open(dir.path());
    session.handle_event(InputEvent::down(0.0, 0.0));
    session.handle_event(InputEvent::moved(10.0, 10.0));
    session.handle_event(InputEvent::PointerUp);
    session.apply(EditorAction::Clear);

    assert!(session.editor().scene().is_empty());
    assert!(stored_scene(dir.path()).is_empty());
    assert_eq!(session.surface().unwrap().pixel(5, 5), Some(InkColor::WHITE));

    drop(session);
    assert!(open(dir.path()).editor().scene().is_empty());
}

#[test]
fn test_corrupt_save_opens_empty() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
    storage.save(DEFAULT_SCENE_KEY, "not json").unwrap();

    let session = open(dir.path());
    assert!(session.editor().scene().is_empty());
}

#[test]
fn test_legacy_save_opens() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
    storage
        .save(
            DEFAULT_SCENE_KEY,
            r##"{"paths":[{"points":[{"x":1,"y":1},{"x":9,"y":9}],"color":"#0000FF","size":3}]}"##,
        )
        .unwrap();

    let session = open(dir.path());
    assert_eq!(session.editor().scene().len(), 1);
}

#[test]
fn test_declare_love_places_hearts_and_captions() {
    let dir = tempdir().unwrap();
    let mut session = open(dir.path());
    session.apply(EditorAction::DeclareLove);

    let scene = session.editor().scene();
    let hearts = scene
        .iter()
        .filter(|e| matches!(e, Entry::Shape(s) if s.kind == ShapeKind::Heart))
        .count();
    let captions: Vec<&str> = scene
        .iter()
        .filter_map(|e| match e {
            Entry::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(hearts, 30);
    assert_eq!(captions, vec!["TE AMO", "ISABELA LUETKEMEYER"]);
}

#[test]
fn test_script_replay() {
    let dir = tempdir().unwrap();
    let mut session = open(dir.path());
    let script = Script::from_json(
        r##"[
            {"action": "set_color", "value": "#FF0000"},
            {"event": "pointer_down", "position": {"x": 0, "y": 0}},
            {"event": "pointer_move", "position": {"x": 10, "y": 0}},
            {"event": "pointer_move", "position": {"x": 10, "y": 10}},
            {"event": "pointer_up"},
            {"action": "toggle_shape", "value": "heart"},
            {"event": "pointer_down", "position": {"x": 40, "y": 30}},
            {"action": "toggle_text"},
            {"event": "pointer_down", "position": {"x": 5, "y": 40}},
            {"text": "Hi"},
            {"event": "key", "key": "enter"}
        ]"##,
    )
    .unwrap();
    session.run_script(&script);

    let kinds: Vec<&str> = session
        .editor()
        .scene()
        .iter()
        .map(|e| match e {
            Entry::Stroke(_) => "stroke",
            Entry::Shape(_) => "shape",
            Entry::Text(_) => "text",
        })
        .collect();
    assert_eq!(kinds, vec!["stroke", "shape", "text"]);
    assert_eq!(stored_scene(dir.path()), *session.editor().scene());
}

#[test]
fn test_resize_keeps_drawing() {
    let dir = tempdir().unwrap();
    let mut session = open(dir.path());
    session.handle_event(InputEvent::down(0.0, 0.0));
    session.handle_event(InputEvent::moved(20.0, 0.0));
    session.handle_event(InputEvent::PointerUp);

    session.handle_event(InputEvent::Resize {
        size: kurbo::Size::new(32.0, 32.0),
        scale_factor: 2.0,
    });
    let surface = session.surface().unwrap();
    assert_eq!(surface.pixel_size(), (64, 64));
    assert_eq!(surface.pixel(20, 1), Some(InkColor::BLACK));
}

#[test]
fn test_scripted_wait_blinks_caret() {
    let dir = tempdir().unwrap();
    let mut session = open(dir.path());
    let script = Script::from_json(
        r##"[
            {"action": "toggle_text"},
            {"event": "pointer_down", "position": {"x": 5, "y": 40}},
            {"text": "Hi"}
        ]"##,
    )
    .unwrap();
    session.run_script(&script);
    let visible = session.display_list().len();

    session.run_script(&Script::from_json(r#"[{"wait_ms": 500}]"#).unwrap());
    assert_eq!(session.display_list().len(), visible - 1);
    session.run_script(&Script::from_json(r#"[{"wait_ms": 1000}]"#).unwrap());
    assert_eq!(session.display_list().len(), visible - 1);
    assert!(session.editor().scene().is_empty());
}

#[test]
fn test_non_finite_pointer_keeps_save_readable() {
    let dir = tempdir().unwrap();
    let mut session = open(dir.path());
    session.apply(EditorAction::ToggleShape(ShapeKind::Star));
    session.handle_event(InputEvent::down(20.0, 20.0));
    session.apply(EditorAction::SelectFreehand);
    session.handle_event(InputEvent::down(0.0, 0.0));
    session.handle_event(InputEvent::moved(f64::NAN, 5.0));
    session.handle_event(InputEvent::PointerUp);
    drop(session);

    let reloaded = open(dir.path());
    let entries = reloaded.editor().scene().entries();
    assert_eq!(entries.len(), 1);
    assert!(matches!(&entries[0], Entry::Shape(s) if s.kind == ShapeKind::Star));
    assert_eq!(stored_scene(dir.path()).len(), 1);
}
