//! Grid tests - generation, lookup and live iteration

use tui_apples::core::{Grid, ScriptedValues, SimpleRng};
use tui_apples::types::{CoreError, ValueRange, DEFAULT_COLS, DEFAULT_ROWS};

#[test]
fn test_generated_grid_is_full_and_in_range() {
    for seed in [1u32, 7, 42, 2024, 99_999] {
        let mut rng = SimpleRng::new(seed);
        let grid = Grid::generate(DEFAULT_ROWS, DEFAULT_COLS, ValueRange::default(), &mut rng).unwrap();

        assert_eq!(grid.len(), 120);
        assert_eq!(grid.live_count(), 120);
        for t in grid.tokens() {
            assert!((1..=9).contains(&t.value()), "seed {seed}: value {}", t.value());
            assert!(!t.removed());
            assert!(!t.selected());
        }
    }
}

#[test]
fn test_every_value_shows_up() {
    let mut rng = SimpleRng::new(3);
    let grid = Grid::generate(DEFAULT_ROWS, DEFAULT_COLS, ValueRange::default(), &mut rng).unwrap();
    let mut seen = [false; 10];
    for t in grid.tokens() {
        seen[t.value() as usize] = true;
    }
    assert!(seen[1..=9].iter().all(|&s| s), "{seen:?}");
}

#[test]
fn test_tokens_know_their_position() {
    let mut values = ScriptedValues::new(vec![1, 2, 3, 4, 5, 6]);
    let grid = Grid::generate(2, 3, ValueRange::default(), &mut values).unwrap();

    let t = grid.token_at(1, 2).unwrap();
    assert_eq!((t.row(), t.col(), t.value()), (1, 2, 6));
    assert_eq!(grid.token_at(0, 1).unwrap().value(), 2);
}

#[test]
fn test_token_at_out_of_bounds() {
    let mut values = ScriptedValues::new(vec![5]);
    let grid = Grid::generate(2, 3, ValueRange::default(), &mut values).unwrap();

    assert_eq!(
        grid.token_at(2, 0).unwrap_err(),
        CoreError::OutOfBounds {
            row: 2,
            col: 0,
            rows: 2,
            cols: 3
        }
    );
    assert!(grid.token_at(0, 3).is_err());
}

#[test]
fn test_live_tokens_row_major_and_restartable() {
    let mut values = ScriptedValues::new(vec![1, 2, 3, 4]);
    let grid = Grid::generate(2, 2, ValueRange::default(), &mut values).unwrap();

    let first: Vec<(u16, u16)> = grid.live_tokens().map(|t| (t.row(), t.col())).collect();
    let second: Vec<(u16, u16)> = grid.live_tokens().map(|t| (t.row(), t.col())).collect();
    assert_eq!(first, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    assert_eq!(first, second);
}

#[test]
fn test_regenerate_discards_previous_state() {
    let mut rng = SimpleRng::new(11);
    let mut grid = Grid::generate(4, 4, ValueRange::default(), &mut rng).unwrap();
    let before: Vec<u8> = grid.tokens().iter().map(|t| t.value()).collect();

    grid.regenerate(&mut rng);
    let after: Vec<u8> = grid.tokens().iter().map(|t| t.value()).collect();

    assert_eq!(grid.len(), 16);
    assert_eq!(grid.live_count(), 16);
    assert_ne!(before, after);
}

#[test]
fn test_zero_dimensions_rejected() {
    let mut rng = SimpleRng::new(1);
    assert!(matches!(
        Grid::generate(0, 15, ValueRange::default(), &mut rng),
        Err(CoreError::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        Grid::generate(8, 0, ValueRange::default(), &mut rng),
        Err(CoreError::InvalidConfiguration { .. })
    ));
}
