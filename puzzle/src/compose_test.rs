use super::*;

fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

#[test]
fn starts_empty_and_inactive() {
    let composition = Composition::new();
    assert!(!composition.is_active());
    assert!(composition.current().is_none());
}

#[test]
fn start_then_update_keeps_last_char() {
    let mut composition = Composition::new();
    composition.start(pos(1, 2));
    assert!(composition.is_active());
    assert_eq!(composition.current().unwrap().value, "");

    composition.update("ㄱ");
    assert_eq!(composition.current().unwrap().value, "ㄱ");
    composition.update("가");
    assert_eq!(composition.current().unwrap().value, "가");
    // The platform may report multiple chars; only the last one counts.
    composition.update("가나");
    assert_eq!(composition.current().unwrap().value, "나");
}

#[test]
fn update_with_empty_data_keeps_previous_glyph() {
    let mut composition = Composition::new();
    composition.start(pos(0, 0));
    composition.update("가");
    composition.update("");
    assert_eq!(composition.current().unwrap().value, "가");
}

#[test]
fn update_without_start_is_noop() {
    let mut composition = Composition::new();
    composition.update("가");
    assert!(!composition.is_active());
}

#[test]
fn overlay_only_on_target_cell_with_glyph() {
    let mut composition = Composition::new();
    composition.start(pos(2, 3));
    assert_eq!(composition.overlay(pos(2, 3)), None, "no glyph yet");

    composition.update("가");
    assert_eq!(composition.overlay(pos(2, 3)), Some("가"));
    assert_eq!(composition.overlay(pos(2, 4)), None);
}

#[test]
fn take_ends_the_composition() {
    let mut composition = Composition::new();
    composition.start(pos(1, 1));
    composition.update("가");
    let composing = composition.take().unwrap();
    assert_eq!(composing.position, pos(1, 1));
    assert_eq!(composing.value, "가");
    assert!(!composition.is_active());
    assert!(composition.take().is_none());
}

#[test]
fn discard_drops_everything() {
    let mut composition = Composition::new();
    composition.start(pos(1, 1));
    composition.update("가");
    composition.discard();
    assert!(!composition.is_active());
}

#[test]
fn restart_replaces_previous_target() {
    let mut composition = Composition::new();
    composition.start(pos(1, 1));
    composition.update("가");
    composition.start(pos(3, 3));
    let current = composition.current().unwrap();
    assert_eq!(current.position, pos(3, 3));
    assert_eq!(current.value, "");
}
