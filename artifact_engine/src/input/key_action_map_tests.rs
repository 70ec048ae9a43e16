/// Tests for KeyActionMap

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use crate::error::Error;
use crate::input::{Key, KeyActionMap, KeyChord};
use crate::renderer::mock_backend::MockInput;

fn counter() -> Rc<Cell<u32>> {
    Rc::new(Cell::new(0))
}

fn setup() -> (Rc<MockInput>, KeyActionMap) {
    let input = Rc::new(MockInput::new());
    let map = KeyActionMap::new(input.clone());
    (input, map)
}

#[test]
fn test_full_chord_fires_once_per_poll() {
    let (input, mut map) = setup();
    let fired = counter();
    let f = fired.clone();
    map.bind(Key::LeftControl.with(Key::Q), move || f.set(f.get() + 1));

    input.press(Key::LeftControl);
    input.press(Key::Q);

    assert_eq!(map.poll().unwrap(), 1);
    assert_eq!(fired.get(), 1);

    // Held across ticks: once per tick
    assert_eq!(map.poll().unwrap(), 1);
    assert_eq!(fired.get(), 2);
}

#[test]
fn test_partial_chord_never_fires() {
    let (input, mut map) = setup();
    let fired = counter();
    let f = fired.clone();
    map.bind(Key::LeftControl.with(Key::Q), move || f.set(f.get() + 1));

    input.press(Key::Q);
    assert_eq!(map.poll().unwrap(), 0);

    input.release(Key::Q);
    input.press(Key::LeftControl);
    assert_eq!(map.poll().unwrap(), 0);
    assert_eq!(fired.get(), 0);
}

#[test]
fn test_rebinding_chord_keeps_only_latest_action() {
    let (input, mut map) = setup();
    let first = counter();
    let second = counter();
    let f1 = first.clone();
    let f2 = second.clone();

    map.bind(Key::LeftControl.with(Key::Q), move || f1.set(f1.get() + 1));
    map.bind(Key::Q.with(Key::LeftControl), move || f2.set(f2.get() + 1));
    assert_eq!(map.len(), 1);

    input.press(Key::LeftControl);
    input.press(Key::Q);
    assert_eq!(map.poll().unwrap(), 1);

    assert_eq!(first.get(), 0);
    assert_eq!(second.get(), 1);
}

#[test]
fn test_actions_fire_in_registration_order() {
    let (input, mut map) = setup();
    let order = Rc::new(RefCell::new(Vec::new()));

    let o = order.clone();
    map.bind(Key::S, move || o.borrow_mut().push("save"));
    let o = order.clone();
    map.bind(Key::LeftControl.with(Key::Z), move || o.borrow_mut().push("undo"));
    let o = order.clone();
    map.bind(Key::A, move || o.borrow_mut().push("select"));
    // Rebinding keeps the original slot
    let o = order.clone();
    map.bind(Key::S, move || o.borrow_mut().push("save-as"));

    input.press(Key::A);
    input.press(Key::S);
    input.press(Key::LeftControl);
    input.press(Key::Z);

    assert_eq!(map.poll().unwrap(), 3);
    assert_eq!(*order.borrow(), vec!["save-as", "undo", "select"]);
}

#[test]
fn test_overlapping_chords_each_fire() {
    let (input, mut map) = setup();
    let q = counter();
    let ctrl_q = counter();
    let fq = q.clone();
    let fcq = ctrl_q.clone();
    map.bind(Key::Q, move || fq.set(fq.get() + 1));
    map.bind(Key::LeftControl.with(Key::Q), move || fcq.set(fcq.get() + 1));

    input.press(Key::LeftControl);
    input.press(Key::Q);
    assert_eq!(map.poll().unwrap(), 2);
    assert_eq!(q.get(), 1);
    assert_eq!(ctrl_q.get(), 1);
}

#[test]
fn test_empty_chord_never_fires() {
    let (input, mut map) = setup();
    let fired = counter();
    let f = fired.clone();
    map.bind(KeyChord::new([]), move || f.set(f.get() + 1));

    input.press(Key::A);
    assert_eq!(map.poll().unwrap(), 0);
    assert_eq!(fired.get(), 0);
    assert_eq!(map.len(), 1);
}

#[test]
fn test_input_failure_aborts_before_any_action() {
    let (input, mut map) = setup();
    let fired = counter();
    let f = fired.clone();
    map.bind(Key::A, move || f.set(f.get() + 1));
    let f = fired.clone();
    map.bind(Key::B, move || f.set(f.get() + 1));

    input.press(Key::A);
    input.press(Key::B);
    input.set_failing(true);

    assert!(matches!(map.poll(), Err(Error::BackendError(_))));
    assert_eq!(fired.get(), 0);
}

#[test]
fn test_poll_without_bindings() {
    let (input, map) = setup();
    assert!(map.is_empty());
    assert_eq!(map.poll().unwrap(), 0);
    assert_eq!(input.query_count(), 0);
}

#[test]
fn test_contains_and_chords() {
    let (_input, mut map) = setup();
    map.bind(Key::F1, || {});
    map.bind(Key::LeftControl.with(Key::Q), || {});

    assert!(map.contains(&KeyChord::from(Key::F1)));
    assert!(map.contains(&Key::Q.with(Key::LeftControl)));
    assert!(!map.contains(&KeyChord::from(Key::Q)));

    let chords: Vec<String> = map.chords().map(|c| c.to_string()).collect();
    assert_eq!(chords, vec!["F1".to_string(), "LeftControl+Q".to_string()]);
}
