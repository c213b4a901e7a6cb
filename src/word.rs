use std::{fmt::Display, str::FromStr};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for rule symbols that don't name one of the eight [placement rules](Rule)
///
/// This is a configuration error of the [direction sampler](crate::sampler::DirectionSampler), not a placement outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError
{
    #[error("Unrecognized placement rule {0:?}.")]
    Unrecognized(String),
}

/// Represents a cell coordinate in a [grid](crate::grid::Grid), x grows to the right and y grows downwards
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Default, Debug, Hash, Serialize, Deserialize)]
pub struct Position
{
    pub x: i32,
    pub y: i32,
}

impl Position
{
    pub fn new(x: i32, y: i32) -> Position
    {
        Position { x, y }
    }

    pub fn offset(&self, (dx, dy): (i32, i32)) -> Position
    {
        Position { x: self.x + dx, y: self.y + dy }
    }
}

/// Represents the shape of the bounding box a [rule](Rule) needs
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum RuleFamily
{
    Row,
    Column,
    Diagonal,
}

/// Represents the direction a word is read in a [suchsel](crate::suchsel::Suchsel)
///
/// ```text
///  dtl   bt   dtr
///      \  |  /
///  rl  -  +  -  lr
///      /  |  \
///  dbl   tb   dbr
/// ```
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Default, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rule
{
    /// left to right
    #[default]
    Lr,
    /// right to left
    Rl,
    /// top to bottom
    Tb,
    /// bottom to top
    Bt,
    /// diagonal, bottom right
    Dbr,
    /// diagonal, bottom left
    Dbl,
    /// diagonal, top right
    Dtr,
    /// diagonal, top left
    Dtl,
}

impl Rule
{
    pub const ALL: [Rule; 8] = [Rule::Lr, Rule::Rl, Rule::Tb, Rule::Bt, Rule::Dbr, Rule::Dbl, Rule::Dtr, Rule::Dtl];

    pub fn symbol(&self) -> &'static str
    {
        match *self
        {
            Rule::Lr => "lr",
            Rule::Rl => "rl",
            Rule::Tb => "tb",
            Rule::Bt => "bt",
            Rule::Dbr => "dbr",
            Rule::Dbl => "dbl",
            Rule::Dtr => "dtr",
            Rule::Dtl => "dtl",
        }
    }

    /// The step between two consecutive letters of a word placed with this rule
    pub fn delta(&self) -> (i32, i32)
    {
        match *self
        {
            Rule::Lr => (1, 0),
            Rule::Rl => (-1, 0),
            Rule::Tb => (0, 1),
            Rule::Bt => (0, -1),
            Rule::Dbr => (1, 1),
            Rule::Dbl => (-1, 1),
            Rule::Dtr => (1, -1),
            Rule::Dtl => (-1, -1),
        }
    }

    pub fn family(&self) -> RuleFamily
    {
        match *self
        {
            Rule::Lr | Rule::Rl => RuleFamily::Row,
            Rule::Tb | Rule::Bt => RuleFamily::Column,
            Rule::Dbr | Rule::Dbl | Rule::Dtr | Rule::Dtl => RuleFamily::Diagonal,
        }
    }

    /// Returns the rule actually walked on the grid and whether the word must be reversed for it
    ///
    /// Only the straight reverse rules collapse, diagonals keep their own walking direction.
    pub fn canonical(&self) -> (Rule, bool)
    {
        match *self
        {
            Rule::Rl => (Rule::Lr, true),
            Rule::Bt => (Rule::Tb, true),
            rule => (rule, false),
        }
    }

    /// The presentational direction of the [arrow marker](crate::grid::ArrowMarker) for this rule
    pub fn arrow_direction(&self) -> ArrowDirection
    {
        match *self
        {
            Rule::Lr => ArrowDirection::Right,
            Rule::Rl => ArrowDirection::Left,
            Rule::Tb => ArrowDirection::Down,
            Rule::Bt => ArrowDirection::Up,
            Rule::Dbr => ArrowDirection::DownRight,
            Rule::Dbl => ArrowDirection::DownLeft,
            Rule::Dtr => ArrowDirection::UpRight,
            Rule::Dtl => ArrowDirection::UpLeft,
        }
    }

    /// The two cells flanking `pos` that a crossword word must keep free
    pub fn adjacent_fields(&self, pos: Position) -> [Position; 2]
    {
        let (dx, dy) = self.delta();
        match self.family()
        {
            RuleFamily::Row => [pos.offset((0, -1)), pos.offset((0, 1))],
            RuleFamily::Column => [pos.offset((-1, 0)), pos.offset((1, 0))],
            RuleFamily::Diagonal => [pos.offset((dx, 0)), pos.offset((0, dy))],
        }
    }

    /// Walks the grid from `origin` one [delta](Rule::delta) at a time, forever
    pub fn walk(&self, origin: Position) -> RuleRange
    {
        RuleRange { next: origin, delta: self.delta() }
    }
}

impl Display for Rule
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        f.write_str(self.symbol())
    }
}

impl FromStr for Rule
{
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        Rule::ALL.iter()
            .find(|rule| rule.symbol() == s)
            .copied()
            .ok_or_else(|| RuleError::Unrecognized(s.to_owned()))
    }
}

/// Human readable direction stored in an [arrow marker](crate::grid::ArrowMarker), has no influence on geometry
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrowDirection
{
    Right,
    Left,
    Down,
    Up,
    DownRight,
    DownLeft,
    UpRight,
    UpLeft,
}

impl ArrowDirection
{
    pub fn glyph(&self) -> char
    {
        match *self
        {
            ArrowDirection::Right => '>',
            ArrowDirection::Left => '<',
            ArrowDirection::Down => 'v',
            ArrowDirection::Up => '^',
            ArrowDirection::DownRight | ArrowDirection::UpLeft => '\\',
            ArrowDirection::DownLeft | ArrowDirection::UpRight => '/',
        }
    }
}

/// Lazy, infinite sequence of [positions](Position) along a [rule](Rule), restart it by calling [Rule::walk] again
#[derive(Clone, Debug)]
pub struct RuleRange
{
    next: Position,
    delta: (i32, i32),
}

impl Iterator for RuleRange
{
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item>
    {
        let current = self.next;
        self.next = current.offset(self.delta);
        Some(current)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_rule_symbols_roundtrip()
    {
        for rule in Rule::ALL
        {
            assert_eq!(rule.symbol().parse::<Rule>(), Ok(rule));
        }
        assert_eq!("up".parse::<Rule>(), Err(RuleError::Unrecognized("up".to_owned())));
    }

    #[test]
    fn test_rule_canonical()
    {
        assert_eq!(Rule::Rl.canonical(), (Rule::Lr, true));
        assert_eq!(Rule::Bt.canonical(), (Rule::Tb, true));
        assert_eq!(Rule::Dtl.canonical(), (Rule::Dtl, false));
        assert_eq!(Rule::Dbl.canonical(), (Rule::Dbl, false));
    }

    #[test]
    fn test_rule_walk()
    {
        let walked: Vec<Position> = Rule::Dbl.walk(Position::new(3, 0)).take(3).collect();
        assert_eq!(walked, vec![Position::new(3, 0), Position::new(2, 1), Position::new(1, 2)]);

        // restarting gives the same stream again
        let first: Vec<Position> = Rule::Dtr.walk(Position::new(0, 4)).take(4).collect();
        let second: Vec<Position> = Rule::Dtr.walk(Position::new(0, 4)).take(4).collect();
        assert_eq!(first, second);
        assert_eq!(first[3], Position::new(3, 1));
    }

    #[test]
    fn test_adjacent_fields()
    {
        let pos = Position::new(2, 2);
        assert_eq!(Rule::Lr.adjacent_fields(pos), [Position::new(2, 1), Position::new(2, 3)]);
        assert_eq!(Rule::Tb.adjacent_fields(pos), [Position::new(1, 2), Position::new(3, 2)]);
        assert_eq!(Rule::Dbr.adjacent_fields(pos), [Position::new(3, 2), Position::new(2, 3)]);
    }

    #[test]
    fn test_rule_serde()
    {
        assert_eq!(serde_json::to_string(&Rule::Dtl).unwrap(), "\"dtl\"");
        assert_eq!(serde_json::from_str::<Rule>("\"rl\"").unwrap(), Rule::Rl);
        assert_eq!(serde_json::to_string(&ArrowDirection::DownRight).unwrap(), "\"down-right\"");
    }
}
