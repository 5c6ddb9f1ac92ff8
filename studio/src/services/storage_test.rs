use super::*;

use puzzle::model::PuzzleSize;

fn sample(title: &str) -> Puzzle {
    Puzzle::new_blank(PuzzleSize::new(5, 5), title)
}

#[test]
fn save_then_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let storage = PuzzleStorage::new(dir.path().join("puzzles.json"));

    let puzzle = sample("첫 퍼즐");
    storage.save(&puzzle).unwrap();

    let loaded = storage.load(&puzzle.id).unwrap();
    assert_eq!(loaded.title, "첫 퍼즐");
    assert_eq!(loaded.size, puzzle.size);
    assert_eq!(storage.load_all().len(), 1);
}

#[test]
fn save_upserts_by_id() {
    let dir = tempfile::tempdir().unwrap();
    let storage = PuzzleStorage::new(dir.path().join("puzzles.json"));

    let mut puzzle = sample("before");
    storage.save(&puzzle).unwrap();
    puzzle.title = "after".to_string();
    storage.save(&puzzle).unwrap();

    let all = storage.load_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "after");
}

#[test]
fn delete_removes_only_the_target() {
    let dir = tempfile::tempdir().unwrap();
    let storage = PuzzleStorage::new(dir.path().join("puzzles.json"));

    let keep = sample("keep");
    let drop = sample("drop");
    storage.save(&keep).unwrap();
    storage.save(&drop).unwrap();

    storage.delete(&drop.id).unwrap();
    let all = storage.load_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, keep.id);
}

#[test]
fn delete_unknown_id_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let storage = PuzzleStorage::new(dir.path().join("puzzles.json"));
    storage.save(&sample("only")).unwrap();

    storage.delete("missing").unwrap();
    assert_eq!(storage.load_all().len(), 1);
}

#[test]
fn missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = PuzzleStorage::new(dir.path().join("nope.json"));
    assert!(storage.load_all().is_empty());
    assert!(storage.load("anything").is_none());
}

#[test]
fn corrupt_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("puzzles.json");
    std::fs::write(&path, "not json at all").unwrap();

    let storage = PuzzleStorage::new(path);
    assert!(storage.load_all().is_empty());
}

#[test]
fn save_recovers_a_corrupt_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("puzzles.json");
    std::fs::write(&path, "{broken").unwrap();

    let storage = PuzzleStorage::new(path);
    let puzzle = sample("fresh");
    storage.save(&puzzle).unwrap();
    assert_eq!(storage.load_all().len(), 1);
}
