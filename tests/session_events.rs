mod common;

use std::sync::Arc;

use common::{MemoryStorage, draw_stroke, mouse, session};
use egui::Color32;
use parking_lot::Mutex;
use sketchpad::{PaintEvent, ToolColor};

fn record(session: &sketchpad::PaintSession<common::RecordingSurface>) -> Arc<Mutex<Vec<PaintEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    session.subscribe(Box::new(move |event: &PaintEvent| sink.lock().push(event.clone())));
    events
}

#[test]
fn test_tool_mutators_notify() {
    let mut session = session();
    let events = record(&session);

    session.set_color(ToolColor::Rainbow);
    session.set_size(9.0);
    session.set_color(ToolColor::Solid(Color32::RED));

    assert_eq!(
        *events.lock(),
        vec![
            PaintEvent::ColorChanged(ToolColor::Rainbow),
            PaintEvent::SizeChanged(9.0),
            PaintEvent::ColorChanged(ToolColor::Solid(Color32::RED)),
        ]
    );
}

#[test]
fn test_stroke_lifecycle_notifies() {
    let mut session = session();
    let events = record(&session);

    session.start(&mouse(1.0, 1.0)).unwrap();
    session.draw(&mouse(2.0, 2.0), false).unwrap();
    session.stop();

    assert_eq!(
        *events.lock(),
        vec![
            PaintEvent::DrawingChanged(true),
            PaintEvent::DrawingChanged(false),
            PaintEvent::HistoryChanged {
                undo_len: 1,
                redo_len: 0
            },
        ]
    );
}

#[test]
fn test_undo_and_redo_notify_stack_sizes() {
    let mut session = session();
    draw_stroke(&mut session, &[(1.0, 1.0)]);
    let events = record(&session);

    session.undo().unwrap();
    session.redo().unwrap();
    session.undo().unwrap();
    // Starting a stroke drops the redo buffer.
    session.start(&mouse(5.0, 5.0)).unwrap();

    assert_eq!(
        *events.lock(),
        vec![
            PaintEvent::HistoryChanged { undo_len: 0, redo_len: 1 },
            PaintEvent::HistoryChanged { undo_len: 1, redo_len: 0 },
            PaintEvent::HistoryChanged { undo_len: 0, redo_len: 1 },
            PaintEvent::DrawingChanged(true),
            PaintEvent::HistoryChanged { undo_len: 0, redo_len: 0 },
        ]
    );
}

#[test]
fn test_save_and_load_notify() {
    let mut storage = MemoryStorage::default();
    let mut session = session();
    draw_stroke(&mut session, &[(1.0, 1.0), (2.0, 2.0)]);
    let events = record(&session);

    session.save(&mut storage).unwrap();
    session.load(&storage).unwrap();

    let events = events.lock();
    assert_eq!(events.first(), Some(&PaintEvent::Saved { segments: 2 }));
    assert!(events.contains(&PaintEvent::Reset));
    assert_eq!(events.last(), Some(&PaintEvent::Loaded { segments: 2 }));
}
