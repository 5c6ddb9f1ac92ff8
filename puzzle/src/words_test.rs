use super::*;

use crate::model::{Position, PuzzleSize};

fn grid_from_rows(rows: &[&str]) -> Grid {
    let size = PuzzleSize::new(rows.len(), rows[0].chars().count());
    let mut grid = Grid::new_empty(size, false);
    for (r, row) in rows.iter().enumerate() {
        for (c, ch) in row.chars().enumerate() {
            let cell = grid.get_mut(Position::new(r, c)).unwrap();
            match ch {
                '#' => cell.is_black = true,
                '.' => {}
                glyph => cell.value = glyph.to_string(),
            }
        }
    }
    grid.assign_cell_numbers()
}

// =============================================================
// Extraction
// =============================================================

#[test]
fn single_across_word() {
    let grid = grid_from_rows(&["WHITE", "#####", "#####", "#####", "#####"]);
    let words = extract_words(&grid);
    assert_eq!(words.len(), 1);
    let word = &words[0];
    assert_eq!(word.id, "across-1");
    assert_eq!(word.number, 1);
    assert_eq!(word.direction, Direction::Across);
    assert_eq!(word.text, "WHITE");
    assert_eq!(word.length, 5);
    assert_eq!(word.start_position, Position::new(0, 0));
    assert_eq!(word.clue, "");
}

#[test]
fn crossing_words_share_a_number() {
    // "AB" across and "AC" down both anchor at (0,0).
    let grid = grid_from_rows(&["AB###", "C####", "#####", "#####", "#####"]);
    let words = extract_words(&grid);
    assert_eq!(words.len(), 2);
    assert_eq!(words[0].id, "across-1");
    assert_eq!(words[1].id, "down-1");
    assert_eq!(words[0].text, "AB");
    assert_eq!(words[1].text, "AC");
}

#[test]
fn numbered_cell_mid_run_in_other_direction_emits_one_word() {
    // (0,1) anchors a down run but sits mid-run across.
    let grid = grid_from_rows(&["AB###", "#D###", "#####", "#####", "#####"]);
    let words = extract_words(&grid);
    let ids: Vec<&str> = words.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["across-1", "down-2"]);
}

#[test]
fn incomplete_word_text_has_missing_letters() {
    let grid = grid_from_rows(&["A.C##", "#####", "#####", "#####", "#####"]);
    let words = extract_words(&grid);
    assert_eq!(words[0].text, "AC");
    assert_eq!(words[0].length, 3);
}

#[test]
fn single_cell_runs_emit_nothing() {
    let grid = grid_from_rows(&["#####", "##A##", "#####", "#####", "#####"]);
    assert!(extract_words(&grid).is_empty());
}

#[test]
fn all_black_grid_has_no_words() {
    let grid = grid_from_rows(&["#####", "#####", "#####", "#####", "#####"]);
    assert!(extract_words(&grid).is_empty());
}

// =============================================================
// Clue merge
// =============================================================

#[test]
fn merge_clues_by_id() {
    let grid = grid_from_rows(&["WHITE", "#####", "#####", "#####", "#####"]);
    let mut previous = extract_words(&grid);
    previous[0].clue = "Not black".to_string();

    let mut fresh = extract_words(&grid);
    merge_clues(&mut fresh, &previous);
    assert_eq!(fresh[0].clue, "Not black");
}

#[test]
fn merge_ignores_words_that_no_longer_exist() {
    let before = grid_from_rows(&["WHITE", "#####", "#####", "#####", "#####"]);
    let mut previous = extract_words(&before);
    previous[0].clue = "Gone soon".to_string();

    let after = grid_from_rows(&["#####", "#####", "##AB#", "#####", "#####"]);
    let mut fresh = extract_words(&after);
    merge_clues(&mut fresh, &previous);
    assert!(fresh.iter().all(|w| w.clue.is_empty()));
}

#[test]
fn merge_does_not_overwrite_with_empty() {
    let grid = grid_from_rows(&["WHITE", "#####", "#####", "#####", "#####"]);
    let previous = extract_words(&grid); // all clues empty
    let mut fresh = extract_words(&grid);
    fresh[0].clue = "Kept".to_string();
    merge_clues(&mut fresh, &previous);
    assert_eq!(fresh[0].clue, "Kept");
}

// =============================================================
// Normalize
// =============================================================

#[test]
fn normalize_renumbers_and_keeps_clues() {
    let mut puzzle = Puzzle::new_blank(PuzzleSize::new(5, 5), "test");
    let grid = grid_from_rows(&["WHITE", "#####", "#####", "#####", "#####"]);
    normalize(&mut puzzle, grid.clone());
    assert_eq!(puzzle.words.len(), 1);

    puzzle.words[0].clue = "Snow color".to_string();
    normalize(&mut puzzle, grid);
    assert_eq!(puzzle.words[0].clue, "Snow color");
    assert_eq!(puzzle.grid.get(Position::new(0, 0)).unwrap().number, Some(1));
}

#[test]
fn renumber_and_extract_rebuilds_positions() {
    let mut puzzle = Puzzle::new_blank(PuzzleSize::new(5, 5), "imported");
    puzzle.grid = grid_from_rows(&["#####", "#AB##", "#####", "#####", "#####"]);
    // Simulate an import that left words with default positions.
    puzzle.words = vec![Word {
        id: "across-1".to_string(),
        number: 1,
        direction: Direction::Across,
        text: "AB".to_string(),
        clue: "First two".to_string(),
        start_position: Position::new(0, 0),
        length: 2,
    }];

    renumber_and_extract(&mut puzzle);
    assert_eq!(puzzle.words.len(), 1);
    assert_eq!(puzzle.words[0].start_position, Position::new(1, 1));
    assert_eq!(puzzle.words[0].clue, "First two");
}
