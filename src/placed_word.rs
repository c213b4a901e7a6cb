use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use crate::{grid::{ArrowMarker, Cell}, utils::SuchselChar, word::{Position, Rule, RuleFamily, RuleRange}};


/// Size of the box a [word](PlacedWord) needs in the grid, anchored at its top left corner
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Default, Debug, Serialize, Deserialize)]
pub struct WordBoundingBox
{
    pub w: usize,
    pub h: usize,
}

impl WordBoundingBox
{
    /// Largest top left corner that keeps the box inside a `width` x `height` grid, `None` if it doesn't fit at all
    pub fn max_origin(&self, width: u16, height: u16) -> Option<Position>
    {
        let max_x = (width as usize).checked_sub(self.w)?;
        let max_y = (height as usize).checked_sub(self.h)?;
        Some(Position { x: max_x as i32, y: max_y as i32 })
    }
}

/// # Represents a word normalized for one rule draw
///
/// The word is turned into the exact sequence of cells that gets written: for crossword words it is wrapped
/// into an [arrow marker](ArrowMarker) and a trailing [void cell](Cell::Void), and for the reverse rules
/// (`rl`, `bt`) the sequence is reversed and walked with the canonical rule instead.
///
/// ```text
///  rule rl, "CAT"  --->  rule lr, "TAC"
///
///  rule tb, "SEA", marker 1  --->  >1 S E A .
/// ```
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct PlacedWord<CharT: SuchselChar>
{
    pub cells: Vec<Cell<CharT>>,
    /// The rule the caller drew, before canonicalization
    pub drawn_rule: Rule,
    /// The rule the cells are walked with
    pub rule: Rule,
    pub bounding_box: WordBoundingBox,
}

impl<CharT: SuchselChar> PlacedWord<CharT>
{
    pub fn new(word: &[CharT], drawn_rule: Rule, crossword_marker: Option<CharT>) -> PlacedWord<CharT>
    {
        let mut cells: Vec<Cell<CharT>> = Vec::with_capacity(word.len() + 2);
        if let Some(marking) = crossword_marker
        {
            cells.push(Cell::Arrow(ArrowMarker { marking, direction: drawn_rule.arrow_direction() }));
        }
        cells.extend(word.iter().map(|c| Cell::Letter(*c)));
        if crossword_marker.is_some()
        {
            cells.push(Cell::Void);
        }

        let len = cells.len();
        let bounding_box = match drawn_rule.family()
        {
            RuleFamily::Row => WordBoundingBox { w: len, h: 1 },
            RuleFamily::Column => WordBoundingBox { w: 1, h: len },
            RuleFamily::Diagonal => WordBoundingBox { w: len, h: len },
        };

        let (rule, reverse) = drawn_rule.canonical();
        if reverse
        {
            cells.reverse();
        }

        PlacedWord { cells, drawn_rule, rule, bounding_box }
    }

    pub fn len(&self) -> usize
    {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.cells.is_empty()
    }

    /// Turns a top left corner of the [bounding box](WordBoundingBox) into the cell the walk starts from
    ///
    /// Left going rules start at the rightmost column of the box, up going rules at its bottom row.
    pub fn start_from_corner(&self, corner: Position) -> Position
    {
        let last = self.len().saturating_sub(1) as i32;
        let (dx, dy) = self.rule.delta();
        Position
        {
            x: if dx < 0 { corner.x + last } else { corner.x },
            y: if dy < 0 { corner.y + last } else { corner.y },
        }
    }

    /// Draws a uniformly random start cell so that the whole word lies inside the grid
    ///
    /// Returns `None` if the word can't fit with this rule at all.
    pub fn sample_start(&self, width: u16, height: u16, rng: &mut dyn RngCore) -> Option<Position>
    {
        let max = self.bounding_box.max_origin(width, height)?;
        let corner = Position { x: rng.random_range(0..=max.x), y: rng.random_range(0..=max.y) };
        Some(self.start_from_corner(corner))
    }

    /// Pairs every cell with the position it's written to
    pub fn cells_from(&self, start: Position) -> impl Iterator<Item = (Cell<CharT>, Position)> + '_
    {
        self.cells.iter().copied().zip(self.walk(start))
    }

    pub fn walk(&self, start: Position) -> RuleRange
    {
        self.rule.walk(start)
    }
}

#[cfg(test)]
mod tests
{
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::word::ArrowDirection;

    #[test]
    fn test_reverse_rules_are_canonicalized()
    {
        let rl = PlacedWord::new(b"CAT", Rule::Rl, None);
        let lr = PlacedWord::new(b"TAC", Rule::Lr, None);
        assert_eq!(rl.rule, Rule::Lr);
        assert_eq!(rl.cells, lr.cells);
        assert_eq!(rl.bounding_box, WordBoundingBox { w: 3, h: 1 });

        let bt = PlacedWord::new(b"SEA", Rule::Bt, None);
        assert_eq!(bt.rule, Rule::Tb);
        assert_eq!(bt.cells, vec![Cell::Letter(b'A'), Cell::Letter(b'E'), Cell::Letter(b'S')]);
        assert_eq!(bt.bounding_box, WordBoundingBox { w: 1, h: 3 });

        let dtl = PlacedWord::new(b"SEA", Rule::Dtl, None);
        assert_eq!(dtl.rule, Rule::Dtl);
        assert_eq!(dtl.bounding_box, WordBoundingBox { w: 3, h: 3 });
    }

    #[test]
    fn test_crossword_word_is_wrapped()
    {
        let word = PlacedWord::new(b"OCEAN", Rule::Tb, Some(b'1'));
        assert_eq!(word.len(), 7);
        assert_eq!(word.bounding_box, WordBoundingBox { w: 1, h: 7 });
        assert_eq!(word.cells[0], Cell::Arrow(ArrowMarker { marking: b'1', direction: ArrowDirection::Down }));
        assert_eq!(word.cells[6], Cell::Void);

        // the arrow keeps the drawn direction even though the cells are reversed
        let reversed = PlacedWord::new(b"OCEAN", Rule::Rl, Some(b'1'));
        assert_eq!(reversed.cells[0], Cell::Void);
        assert_eq!(reversed.cells[6], Cell::Arrow(ArrowMarker { marking: b'1', direction: ArrowDirection::Left }));
    }

    #[test]
    fn test_start_from_corner()
    {
        let corner = Position::new(1, 2);
        assert_eq!(PlacedWord::new(b"ABCD", Rule::Dbr, None).start_from_corner(corner), Position::new(1, 2));
        assert_eq!(PlacedWord::new(b"ABCD", Rule::Dbl, None).start_from_corner(corner), Position::new(4, 2));
        assert_eq!(PlacedWord::new(b"ABCD", Rule::Dtr, None).start_from_corner(corner), Position::new(1, 5));
        assert_eq!(PlacedWord::new(b"ABCD", Rule::Dtl, None).start_from_corner(corner), Position::new(4, 5));
        assert_eq!(PlacedWord::new(b"ABCD", Rule::Rl, None).start_from_corner(corner), Position::new(1, 2));
    }

    #[test]
    fn test_sampled_words_stay_inside_the_grid()
    {
        let mut rng = StdRng::seed_from_u64(7);
        for rule in Rule::ALL
        {
            let word = PlacedWord::new(b"WORD", rule, None);
            for _ in 0..200
            {
                let start = word.sample_start(6, 5, &mut rng).unwrap();
                for (_, pos) in word.cells_from(start)
                {
                    assert!((0..6).contains(&pos.x) && (0..5).contains(&pos.y), "{rule} left the grid at {pos:?}");
                }
            }
        }
    }

    #[test]
    fn test_wide_grids_keep_their_origins()
    {
        assert_eq!(WordBoundingBox { w: 3, h: 1 }.max_origin(u16::MAX, 1), Some(Position::new(65532, 0)));
        assert_eq!(WordBoundingBox { w: 1, h: 70000 }.max_origin(1, u16::MAX), None);

        let mut rng = StdRng::seed_from_u64(7);
        let word = PlacedWord::new(b"WORD", Rule::Rl, None);
        for _ in 0..200
        {
            let start = word.sample_start(40000, 1, &mut rng).unwrap();
            assert!((3..40000).contains(&start.x), "{start:?}");
        }
    }

    #[test]
    fn test_word_does_not_fit()
    {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(PlacedWord::new(b"TOOLONG", Rule::Lr, None).sample_start(6, 6, &mut rng), None);
        assert_eq!(PlacedWord::new(b"OCEAN", Rule::Tb, Some(b'1')).sample_start(6, 6, &mut rng), None);
        assert_eq!(PlacedWord::new(b"SIX", Rule::Dbr, None).sample_start(6, 2, &mut rng), None);
        assert!(PlacedWord::new(b"OCEAN", Rule::Tb, Some(b'1')).sample_start(1, 7, &mut rng).is_some());
    }
}
