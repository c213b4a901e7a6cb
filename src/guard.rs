//! Semantic checks run around a geometric placement.
//!
//! A word search is only fair if every hidden word can be found in exactly one place. Two things break that:
//! a new word that is already spelled inside an accepted word, and a placement that makes the word readable
//! a second time somewhere else in the grid.

use std::collections::BTreeSet;

use crate::{grid::{Cell, Grid}, utils::{contains_run, SuchselChar}, word::{Position, Rule}};

/// Returns the accepted word that already contains `word` as a literal run, if any
pub fn find_superstring<'a, CharT: SuchselChar>(word: &[CharT], accepted: &'a [Vec<CharT>]) -> Option<&'a [CharT]>
{
    accepted.iter().map(Vec::as_slice).find(|a| contains_run(a, word))
}

/// Checks whether `word` can be read starting at `start` and stepping along `rule`
fn reads_along<CharT: SuchselChar>(grid: &Grid<CharT>, word: &[CharT], start: Position, rule: Rule) -> bool
{
    word.iter()
        .zip(rule.walk(start))
        .all(|(c, pos)| grid.get(pos) == Cell::Letter(*c))
}

/// Collects every run of cells in which `word` can be read, in any of the eight directions
///
/// A run is identified by its two end cells, so a palindrome read forwards and backwards over the same
/// cells (or a single letter read in every direction) counts once.
pub fn occurrences<CharT: SuchselChar>(grid: &Grid<CharT>, word: &[CharT]) -> BTreeSet<(Position, Position)>
{
    let mut found = BTreeSet::new();
    let Some(first) = word.first() else { return found; };
    let last_step = word.len() as i32 - 1;

    for start in grid.positions().filter(|pos| grid.get(*pos) == Cell::Letter(*first))
    {
        for rule in Rule::ALL
        {
            if reads_along(grid, word, start, rule)
            {
                let (dx, dy) = rule.delta();
                let end = start.offset((dx * last_step, dy * last_step));
                found.insert((start.min(end), start.max(end)));
            }
        }
    }

    found
}

/// Number of distinct places `word` can be read in the grid
pub fn count_occurrences<CharT: SuchselChar>(grid: &Grid<CharT>, word: &[CharT]) -> usize
{
    occurrences(grid, word).len()
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn grid_from_rows(rows: &[&str]) -> Grid<u8>
    {
        let mut grid = Grid::new(rows[0].len() as u16, rows.len() as u16);
        for (y, row) in rows.iter().enumerate()
        {
            for (x, c) in row.bytes().enumerate()
            {
                if c != b' '
                {
                    grid.set(Position::new(x as i32, y as i32), Cell::Letter(c));
                }
            }
        }
        grid
    }

    #[test]
    fn test_find_superstring()
    {
        let accepted = vec![b"SUN".to_vec(), b"CATCH".to_vec()];
        assert_eq!(find_superstring(b"CAT", &accepted), Some(&b"CATCH"[..]));
        assert_eq!(find_superstring(b"SUN", &accepted), Some(&b"SUN"[..]));
        assert_eq!(find_superstring(b"MOON", &accepted), None);
    }

    #[test]
    fn test_occurrences_in_all_directions()
    {
        let grid = grid_from_rows(&[
            "CAT  ",
            " A   ",
            "  T  ",
            "TAC  ",
            "     ",
        ]);
        // CAT left to right, TAC read right to left, and the diagonal down right
        assert_eq!(count_occurrences(&grid, b"CAT"), 3);
        assert_eq!(count_occurrences(&grid, b"DOG"), 0);
    }

    #[test]
    fn test_occurrences_in_one_row()
    {
        let grid = grid_from_rows(&["CATCAT"]);
        assert_eq!(count_occurrences(&grid, b"CAT"), 2);
        assert_eq!(count_occurrences(&grid, b"TCA"), 1);
    }

    #[test]
    fn test_palindromes_and_single_letters_count_once()
    {
        let grid = grid_from_rows(&[
            "ABA",
            "   ",
        ]);
        assert_eq!(count_occurrences(&grid, b"ABA"), 1);
        assert_eq!(count_occurrences(&grid, b"B"), 1);
        assert_eq!(count_occurrences(&grid, b"A"), 2);
    }

    #[test]
    fn test_arrows_and_void_cells_are_not_letters()
    {
        let mut grid = grid_from_rows(&["  AT"]);
        grid.set(Position::new(0, 0), Cell::Void);
        assert_eq!(count_occurrences(&grid, b"AT"), 1);
        assert_eq!(count_occurrences(&grid, b"CAT"), 0);
    }
}
