use super::*;

use puzzle::words;

fn sample_puzzle() -> Puzzle {
    let mut puzzle = Puzzle::new_blank(PuzzleSize::new(5, 5), "연습 퍼즐");
    let mut grid = Grid::new_empty(PuzzleSize::new(5, 5), true);
    for ((row, col), glyph) in [((0, 0), "수"), ((0, 1), "박"), ((1, 0), "수")] {
        let cell = grid.get_mut(Position::new(row, col)).unwrap();
        cell.is_black = false;
        cell.value = glyph.to_string();
    }
    words::normalize(&mut puzzle, grid);
    // across-1 "수박" gets a clue; down-1 "수수" stays blank.
    puzzle.words[0].clue = "여름 과일".to_string();
    puzzle
}

fn all_lines(document: &Document) -> Vec<String> {
    document.pages.iter().flat_map(|page| page.lines.clone()).collect()
}

#[test]
fn document_starts_with_the_title() {
    let document = render_document(&sample_puzzle(), false);
    assert_eq!(document.title, "연습 퍼즐");
    assert_eq!(document.pages[0].lines[0], "연습 퍼즐");
}

#[test]
fn grid_shows_numbers_and_black_cells() {
    let lines = all_lines(&render_document(&sample_puzzle(), false));
    assert!(lines.iter().any(|l| l.contains("####")), "black cells are filled");
    assert!(lines.iter().any(|l| l.starts_with("|1 ")), "anchor number rendered");
}

#[test]
fn answers_appear_only_when_requested() {
    let without = all_lines(&render_document(&sample_puzzle(), false));
    assert!(!without.iter().any(|l| l.contains('수')));

    let with = all_lines(&render_document(&sample_puzzle(), true));
    assert!(with.iter().any(|l| l.contains('수')));
    assert!(with.iter().any(|l| l.contains('박')));
}

#[test]
fn answer_glyphs_keep_grid_columns_aligned() {
    let lines = all_lines(&render_document(&sample_puzzle(), true));
    let border_width = lines.iter().find(|l| l.starts_with('+')).unwrap().as_str().width();
    // First grid value line: double-width glyphs must not widen the row.
    let value_line = lines.iter().find(|l| l.contains('수')).unwrap();
    assert_eq!(value_line.as_str(), "| 수 | 박 |####|####|####|");
    assert_eq!(value_line.as_str().width(), border_width);
}

#[test]
fn clue_sections_list_across_then_down() {
    let lines = all_lines(&render_document(&sample_puzzle(), false));
    let across = lines.iter().position(|l| l == "Across").unwrap();
    let down = lines.iter().position(|l| l == "Down").unwrap();
    assert!(across < down);
    assert!(lines.contains(&"  1. 여름 과일".to_string()));
    assert!(lines.contains(&"  1. (no clue)".to_string()));
}

#[test]
fn missing_clue_falls_back_to_answer_in_answer_key() {
    let lines = all_lines(&render_document(&sample_puzzle(), true));
    assert!(lines.contains(&"  1. 수수".to_string()));
    assert!(!lines.contains(&"  1. (no clue)".to_string()));
}

#[test]
fn export_both_produces_puzzle_and_answer_key() {
    let (puzzle_doc, answers_doc) = export_both(&sample_puzzle());
    assert!(!all_lines(&puzzle_doc).iter().any(|l| l.contains('수')));
    assert!(all_lines(&answers_doc).iter().any(|l| l.contains('수')));
}

#[test]
fn long_documents_paginate() {
    let lines: Vec<String> = (0..130).map(|i| format!("line {i}")).collect();
    let pages = paginate(lines);
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0].lines.len(), LINES_PER_PAGE);
    assert!(pages.iter().all(|p| p.lines.len() <= LINES_PER_PAGE));
}

#[test]
fn render_text_joins_pages_with_form_feeds() {
    let document = Document {
        title: "t".to_string(),
        pages: vec![
            Page { lines: vec!["a".to_string()] },
            Page { lines: vec!["b".to_string()] },
        ],
    };
    assert_eq!(render_text(&document), "a\n\u{000C}\nb");
}

#[test]
fn filenames_distinguish_variants() {
    assert_eq!(document_filename("퍼즐", false), "퍼즐_puzzle.txt");
    assert_eq!(document_filename("퍼즐", true), "퍼즐_answers.txt");
}
