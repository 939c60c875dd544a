//! End-to-end pointer scenarios driven through the gesture controller.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use strokepad_core::observer;
use strokepad_core::{
    GestureController, PixelOffset, Point, PointerEvent, Scene, StatusBar, Stroke, ToolbarState,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A scene with a notification counter, reset after registration.
fn observed_scene() -> (Scene, Rc<Cell<usize>>) {
    init_logging();
    let count = Rc::new(Cell::new(0));
    let sink = count.clone();
    let mut scene = Scene::new();
    scene.register_observer(observer::from_fn(move |_: &Scene| sink.set(sink.get() + 1)));
    count.set(0);
    (scene, count)
}

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn draw_gesture_adds_one_stroke_and_notifies_once() {
    let (mut scene, count) = observed_scene();
    let mut gestures = GestureController::new();

    gestures.pointer_pressed(&mut scene, p(10.0, 10.0));
    gestures.pointer_dragged(&mut scene, p(12.0, 11.0));
    gestures.pointer_dragged(&mut scene, p(15.0, 20.0));
    assert_eq!(count.get(), 0);
    assert_eq!(gestures.cursor(), Some(p(15.0, 20.0)));

    gestures.pointer_released(&mut scene, p(15.0, 20.0));
    assert_eq!(count.get(), 1);
    assert_eq!(scene.len(), 1);

    // The press point only anchors the gesture; it is not part of the stroke.
    let stroke = scene.shapes_ordered().next().unwrap();
    assert_eq!(stroke.points(), &[p(12.0, 11.0), p(15.0, 20.0)]);
    assert!(scene.highlighted().is_none());
    assert_eq!((scene.bounding_right(), scene.bounding_bottom()), (15, 20));
}

#[test]
fn click_without_drag_selects_instead_of_drawing() {
    let (mut scene, count) = observed_scene();
    let existing = scene.add_shape(Stroke::from_points(vec![p(40.0, 40.0), p(60.0, 60.0)]));
    let mut gestures = GestureController::new();

    for event in [
        PointerEvent::Pressed(p(41.0, 39.0)),
        PointerEvent::Released(p(41.0, 39.0)),
        PointerEvent::Clicked(p(41.0, 39.0)),
    ] {
        gestures.handle_event(&mut scene, event);
    }

    assert_eq!(scene.len(), 1);
    assert_eq!(scene.highlighted(), Some(existing));
    // One for the release, one for the click.
    assert_eq!(count.get(), 2);
}

#[test]
fn click_on_empty_space_clears_selection() {
    let (mut scene, _) = observed_scene();
    let id = scene.add_shape(Stroke::from_points(vec![p(5.0, 5.0)]));
    scene.set_highlighted(Some(id)).unwrap();
    let mut gestures = GestureController::new();

    gestures.handle_event(&mut scene, PointerEvent::Pressed(p(200.0, 200.0)));
    gestures.handle_event(&mut scene, PointerEvent::Released(p(200.0, 200.0)));
    gestures.handle_event(&mut scene, PointerEvent::Clicked(p(200.0, 200.0)));

    assert!(scene.highlighted().is_none());
    assert_eq!(scene.len(), 1);
}

#[test]
fn dragging_the_selection_commits_translation_on_release() {
    let (mut scene, count) = observed_scene();
    let id = scene.add_shape(Stroke::from_points(vec![p(10.0, 10.0), p(20.0, 10.0)]));
    scene.set_highlighted(Some(id)).unwrap();
    count.set(0);
    let mut gestures = GestureController::new();

    gestures.pointer_pressed(&mut scene, p(10.0, 10.0));
    gestures.pointer_dragged(&mut scene, p(20.0, 15.0));
    gestures.pointer_dragged(&mut scene, p(30.0, 25.0));
    assert_eq!(count.get(), 0);
    assert_eq!(
        scene.get_shape(id).unwrap().pending_translation(),
        PixelOffset::new(20, 15)
    );

    gestures.pointer_released(&mut scene, p(30.0, 25.0));
    assert_eq!(count.get(), 1);
    assert_eq!(scene.len(), 1);

    let shape = scene.get_shape(id).unwrap();
    assert_eq!(shape.committed_translation(), PixelOffset::new(20, 15));
    assert_eq!(shape.pending_translation(), PixelOffset::ZERO);
    assert_eq!(scene.hit_test(p(30.0, 25.0)), Some(id));
    assert_eq!(scene.hit_test(p(10.0, 10.0)), None);

    // A second drag adds to the committed translation.
    gestures.pointer_pressed(&mut scene, p(0.0, 0.0));
    gestures.pointer_dragged(&mut scene, p(-5.0, 0.0));
    gestures.pointer_released(&mut scene, p(-5.0, 0.0));
    assert_eq!(
        scene.get_shape(id).unwrap().effective_translation(),
        PixelOffset::new(15, 15)
    );
}

#[test]
fn panels_follow_a_full_editing_session() {
    init_logging();
    let mut scene = Scene::new();
    let toolbar = Rc::new(RefCell::new(ToolbarState::default()));
    let status = Rc::new(RefCell::new(StatusBar::default()));
    scene.register_observer(toolbar.clone());
    scene.register_observer(status.clone());
    let mut gestures = GestureController::new();

    // Draw two strokes.
    for (from, to) in [((0.0, 0.0), (50.0, 50.0)), ((100.0, 0.0), (150.0, 50.0))] {
        gestures.pointer_pressed(&mut scene, p(from.0, from.1));
        gestures.pointer_dragged(&mut scene, p(from.0, from.1));
        gestures.pointer_dragged(&mut scene, p(to.0, to.1));
        gestures.pointer_released(&mut scene, p(to.0, to.1));
    }
    assert_eq!(status.borrow().text, "2 Strokes");
    assert!(!toolbar.borrow().delete_enabled);

    gestures.pointer_clicked(&mut scene, p(150.0, 50.0));
    assert!(toolbar.borrow().delete_enabled);
    assert_eq!(
        status.borrow().text,
        "2 Strokes, Selection (2 points, scale: 1.0, rotation 0)"
    );

    let action = toolbar.borrow_mut().rotate_slider_moved(90).unwrap();
    scene.apply_toolbar_action(action).unwrap();
    assert_eq!(
        status.borrow().text,
        "2 Strokes, Selection (2 points, scale: 1.0, rotation 90)"
    );

    let action = toolbar.borrow().delete_pressed().unwrap();
    scene.apply_toolbar_action(action).unwrap();
    assert_eq!(status.borrow().text, "1 Stroke");
    assert!(!toolbar.borrow().delete_enabled);
    assert!(scene.highlighted().is_none());
}
