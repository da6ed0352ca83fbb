use inkboard::history::History;
use inkboard::model::{Point, Rgb, Stroke, Tool};

fn stroke(tag: u8) -> Stroke {
    Stroke {
        points: vec![Point::new(tag as f32, 0.0), Point::new(tag as f32, 9.0)],
        color: Rgb::rgb(tag, tag, tag),
        tool: Tool::Pen,
        line_width: 4.0,
        opacity: 100,
    }
}

#[test]
fn drawing_after_undo_discards_the_redo_tail() {
    let mut history = History::default();
    history.append(stroke(1));
    history.append(stroke(2));
    history.append(stroke(3));

    assert!(history.undo());
    assert!(history.undo());
    history.append(stroke(4));

    assert_eq!(history.len(), 2);
    assert!(!history.can_redo());
    let colors: Vec<Rgb> = history.active_strokes().iter().map(|s| s.color).collect();
    assert_eq!(colors, vec![Rgb::rgb(1, 1, 1), Rgb::rgb(4, 4, 4)]);
}

#[test]
fn undo_then_redo_restores_identical_content() {
    let mut history = History::default();
    let originals = vec![stroke(10), stroke(20), stroke(30)];
    for s in &originals {
        history.append(s.clone());
    }

    while history.undo() {}
    assert!(history.active_strokes().is_empty());

    while history.redo() {}
    assert_eq!(history.active_strokes(), originals.as_slice());
}

#[test]
fn undo_at_the_bottom_and_redo_at_the_top_are_no_ops() {
    let mut history = History::default();
    history.append(stroke(1));

    assert!(history.undo());
    assert!(!history.undo());
    assert!(!history.undo());
    assert!(history.active_strokes().is_empty());

    assert!(history.redo());
    assert!(!history.redo());
    assert_eq!(history.active_len(), 1);
}

#[test]
fn clear_cannot_be_redone() {
    let mut history = History::default();
    history.append(stroke(1));
    history.append(stroke(2));

    history.clear();
    assert!(history.is_empty());
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert!(!history.redo());
}

#[test]
fn stroke_state_survives_an_undo_redo_cycle() {
    let mut history = History::default();
    let original = Stroke {
        points: vec![
            Point::new(1.5, 2.5),
            Point::new(8.0, 3.0),
            Point::new(12.25, 9.75),
        ],
        color: Rgb::rgb(0, 168, 255),
        tool: Tool::Highlighter,
        line_width: 12.0,
        opacity: 45,
    };
    history.append(original.clone());

    assert!(history.undo());
    assert!(history.redo());
    assert_eq!(history.active_strokes(), &[original]);
}
