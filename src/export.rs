use std::{collections::BTreeMap, io::Write};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use crate::{grid::{Cell, Grid}, utils::SuchselChar, word::Rule};

/// Something that turns a finished [puzzle](PuzzleSnapshot) into an artifact (a drawing, a spreadsheet, a text file)
pub trait Exporter<CharT: SuchselChar>
{
    type Error;

    fn export(&mut self, puzzle: &PuzzleSnapshot<CharT>) -> Result<(), Self::Error>;
}

pub(crate) fn to_string<CharT: SuchselChar>(word: &[CharT]) -> String
{
    word.iter().map(|c| Into::<char>::into(*c)).collect()
}

/// # Represents a finished puzzle, detached from the engine that built it
///
/// Holds everything an [exporter](Exporter) needs: the grid, the accepted words (also grouped by their first
/// letter), and the solution word, either spelled by the crossword markers or hidden in the leftover cells.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct PuzzleSnapshot<CharT: SuchselChar>
{
    pub grid: Grid<CharT>,
    pub words: Vec<String>,
    pub words_by_letter: BTreeMap<char, Vec<String>>,
    pub markers: String,
    pub hidden_word: Option<String>,
    pub rule_usage: BTreeMap<Rule, usize>,
    /// Words the generator gave up on
    #[serde(default)]
    pub skipped: Vec<String>,
}

impl<CharT: SuchselChar> PuzzleSnapshot<CharT>
{
    pub fn new(grid: &Grid<CharT>, words: &[Vec<CharT>], markers: &[CharT], hidden_word: Option<&[CharT]>, rule_usage: &BTreeMap<Rule, usize>) -> PuzzleSnapshot<CharT>
    {
        let words: Vec<String> = words.iter().map(|w| to_string(w.as_slice())).collect();
        let words_by_letter = words.iter()
            .filter_map(|w| w.chars().next().map(|first| (first, w.clone())))
            .into_group_map()
            .into_iter()
            .map(|(first, mut group)| { group.sort(); (first, group) })
            .collect();

        PuzzleSnapshot
        {
            grid: grid.clone(),
            words,
            words_by_letter,
            markers: to_string(markers),
            hidden_word: hidden_word.map(to_string),
            rule_usage: rule_usage.clone(),
            skipped: Vec::new(),
        }
    }

    /// The designated solution word, the hidden word wins over the markers
    pub fn solution(&self) -> Option<&str>
    {
        match &self.hidden_word
        {
            Some(hidden) => Some(hidden),
            None if !self.markers.is_empty() => Some(&self.markers),
            None => None,
        }
    }
}

impl<CharT: SuchselChar + Serialize> PuzzleSnapshot<CharT>
{
    pub fn to_json(&self) -> serde_json::Result<String>
    {
        serde_json::to_string_pretty(self)
    }
}

/// Writes a puzzle as plain text: the grid, the word list by first letter, and the solution
///
/// ```text
/// +------------+
/// | S U N X Q  |
/// ...
/// +------------+
/// S: STAR, SUN
/// Solution: MOON
/// ```
pub struct TextExporter<W: Write>
{
    pub out: W,
}

impl<CharT: SuchselChar, W: Write> Exporter<CharT> for TextExporter<W>
{
    type Error = std::io::Error;

    fn export(&mut self, puzzle: &PuzzleSnapshot<CharT>) -> Result<(), Self::Error>
    {
        writeln!(self.out, "{}", puzzle.grid)?;

        let arrows = puzzle.grid.positions()
            .filter_map(|pos| match puzzle.grid.get(pos) { Cell::Arrow(arrow) => Some((pos, arrow)), _ => None })
            .map(|(pos, arrow)| format!("{}{} at {},{}", Into::<char>::into(arrow.marking), arrow.direction.glyph(), pos.x, pos.y))
            .join(", ");
        if !arrows.is_empty()
        {
            writeln!(self.out, "Markers: {arrows}")?;
        }

        for (first, group) in &puzzle.words_by_letter
        {
            writeln!(self.out, "{first}: {}", group.join(", "))?;
        }
        if let Some(solution) = puzzle.solution()
        {
            writeln!(self.out, "Solution: {solution}")?;
        }
        Ok(())
    }
}
