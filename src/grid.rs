use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use crate::{utils::SuchselChar, word::{ArrowDirection, Position}};

/// Marks the first cell of a crossword word, the `marking` is what the solution word is spelled from
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
pub struct ArrowMarker<CharT: SuchselChar>
{
    pub marking: CharT,
    pub direction: ArrowDirection,
}

/// Content of a single [grid](Grid) cell
///
/// `Void` reserves the cell right after a crossword word, it blocks letters but is not
/// occupied content when checking the neighbourhood of a crossword word.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Default, Debug, Hash, Serialize, Deserialize)]
pub enum Cell<CharT: SuchselChar>
{
    #[default]
    Empty,
    Letter(CharT),
    Arrow(ArrowMarker<CharT>),
    Void,
}

impl<CharT: SuchselChar> Cell<CharT>
{
    pub fn is_empty(&self) -> bool
    {
        matches!(self, Cell::Empty)
    }

    pub fn is_letter(&self) -> bool
    {
        matches!(self, Cell::Letter(_))
    }

    /// Letters and arrows, the content a crossword word may not run alongside
    pub fn is_solid(&self) -> bool
    {
        matches!(self, Cell::Letter(_) | Cell::Arrow(_))
    }

    pub fn letter(&self) -> Option<CharT>
    {
        match *self
        {
            Cell::Letter(c) => Some(c),
            _ => None,
        }
    }

    fn glyph(&self) -> char
    {
        match *self
        {
            Cell::Empty => ' ',
            Cell::Letter(c) => c.into(),
            Cell::Arrow(arrow) => arrow.direction.glyph(),
            Cell::Void => '.',
        }
    }
}

/// # Represents the letter grid of a suchsel
///
/// Stored as a row-major flat buffer. Reading outside of the grid yields [Cell::Empty],
/// writing outside of it is refused.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Grid<CharT: SuchselChar>
{
    width: u16,
    height: u16,
    cells: Vec<Cell<CharT>>,
}

impl<CharT: SuchselChar> Grid<CharT>
{
    /// Creates a new empty grid
    pub fn new(width: u16, height: u16) -> Grid<CharT>
    {
        Grid { width, height, cells: vec![Cell::Empty; width as usize * height as usize] }
    }

    pub fn width(&self) -> u16
    {
        self.width
    }

    pub fn height(&self) -> u16
    {
        self.height
    }

    fn index(&self, pos: Position) -> Option<usize>
    {
        self.contains(pos).then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Returns true if the position lies within `[0, width) x [0, height)`
    pub fn contains(&self, pos: Position) -> bool
    {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    pub fn get(&self, pos: Position) -> Cell<CharT>
    {
        self.index(pos).map(|i| self.cells[i]).unwrap_or_default()
    }

    /// Writes the cell and returns what was there before, `None` if the position is outside of the grid
    pub fn set(&mut self, pos: Position, cell: Cell<CharT>) -> Option<Cell<CharT>>
    {
        let i = self.index(pos)?;
        Some(std::mem::replace(&mut self.cells[i], cell))
    }

    /// All positions of the grid in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position>
    {
        (0..self.height as i32).cartesian_product(0..self.width as i32).map(|(y, x)| Position { x, y })
    }

    pub fn is_empty(&self) -> bool
    {
        self.cells.iter().all(Cell::is_empty)
    }

    pub fn total_cells(&self) -> usize
    {
        self.cells.len()
    }

    /// Number of cells holding any content, [void cells](Cell::Void) included
    pub fn occupied_count(&self) -> usize
    {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Number of cells that are still [empty](Cell::Empty)
    pub fn void_count(&self) -> usize
    {
        self.total_cells() - self.occupied_count()
    }

    /// Returns the cells as rows, top row first
    pub fn rows(&self) -> Vec<Vec<Cell<CharT>>>
    {
        if self.width == 0 { return vec![Vec::new(); self.height as usize]; }
        self.cells.chunks(self.width as usize).map(|row| row.to_vec()).collect()
    }
}

impl<CharT: SuchselChar> Display for Grid<CharT>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        let border = format!("+-{}-+", "-".repeat(2 * self.width as usize));
        writeln!(f, "{border}")?;
        for row in self.rows()
        {
            writeln!(f, "| {}  |", row.iter().map(Cell::glyph).join(" "))?;
        }
        write!(f, "{border}")
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_grid_get_set()
    {
        let mut grid = Grid::<u8>::new(3, 2);
        assert!(grid.is_empty());
        assert_eq!(grid.set(Position::new(2, 1), Cell::Letter(b'A')), Some(Cell::Empty));
        assert_eq!(grid.get(Position::new(2, 1)), Cell::Letter(b'A'));
        assert_eq!(grid.set(Position::new(3, 0), Cell::Letter(b'B')), None);
        assert_eq!(grid.set(Position::new(-1, 0), Cell::Letter(b'B')), None);
        assert_eq!(grid.get(Position::new(-1, 0)), Cell::Empty);
        assert_eq!(grid.get(Position::new(0, 2)), Cell::Empty);
        assert_eq!(grid.occupied_count(), 1);
        assert_eq!(grid.void_count(), 5);
    }

    #[test]
    fn test_grid_positions_row_major()
    {
        let grid = Grid::<u8>::new(2, 2);
        assert_eq!(grid.positions().collect::<Vec<_>>(),
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(0, 1), Position::new(1, 1)]);
    }

    #[test]
    fn test_grid_dump()
    {
        let mut grid = Grid::<char>::new(3, 1);
        grid.set(Position::new(0, 0), Cell::Arrow(ArrowMarker { marking: '1', direction: ArrowDirection::Right }));
        grid.set(Position::new(1, 0), Cell::Letter('O'));
        grid.set(Position::new(2, 0), Cell::Void);

        assert_eq!(grid.to_string(), "+--------+\n| > O .  |\n+--------+");
    }

    #[test]
    fn test_void_cells_count_as_occupied()
    {
        let mut grid = Grid::<u8>::new(2, 1);
        grid.set(Position::new(0, 0), Cell::Void);
        assert!(!grid.get(Position::new(0, 0)).is_solid());
        assert_eq!(grid.void_count(), 1);
    }
}
