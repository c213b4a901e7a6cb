use std::{collections::BTreeMap, ops::RangeInclusive};

use log::{debug, info, trace};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::{export::{Exporter, PuzzleSnapshot}, grid::{Cell, Grid}, guard, placed_word::PlacedWord, sampler::{DirectionSampler, FillerSource}, utils::SuchselChar, word::{Position, Rule}};

/// Error type for words that could not be placed into a [suchsel](Suchsel)
///
/// None of these are fatal, the caller decides whether to skip the word, retry with a bigger grid or give up on the puzzle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SuchselError
{
    #[error("Cannot place an empty word.")]
    EmptyWord,
    #[error("The word is already spelled inside an accepted word.")]
    RejectedAsSubstring,
    #[error("The word could be read {occurrences} times in the grid.")]
    RejectedAsAmbiguous { occurrences: usize },
    #[error("No placement found within {0} attempts.")]
    AttemptsExhausted(u32),
    #[error("Cannot hide a word of length {len} in {void} empty cells.")]
    CannotHide { void: usize, len: usize },
}

/// Reason a single placement attempt was refused, the engine simply draws again
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptError
{
    #[error("The word does not fit into the grid with the drawn rule.")]
    DoesNotFit,
    #[error("Cell {0:?} is already occupied by different content.")]
    Occupied(Position),
    #[error("Cell {0:?} next to the crossword word is not empty.")]
    AdjacencyViolation(Position),
    #[error("The word does not share a letter with the grid.")]
    NotContiguous,
}

/// Represents all settings for a [suchsel](Suchsel)
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SuchselSettings
{
    pub width: u16,
    pub height: u16,
    /// How many rule and origin draws a word gets per placement phase
    pub attempts: u32,
    /// Above 0 the grid is logged after every commit
    pub verbose: u8,
    /// Seed for the random generator, `None` seeds from the operating system
    pub seed: Option<u64>,
}

impl SuchselSettings
{
    pub fn from_json(json: &str) -> serde_json::Result<SuchselSettings>
    {
        serde_json::from_str(json)
    }
}

impl Default for SuchselSettings
{
    fn default() -> Self
    {
        SuchselSettings
        {
            width: 15,
            height: 15,
            attempts: 50,
            verbose: 0,
            seed: None,
        }
    }
}

/// Cells written by a placement together with their previous content
#[derive(Debug)]
struct Journal<CharT: SuchselChar>
{
    rule: Rule,
    previous: Vec<(Position, Cell<CharT>)>,
}

/// # Represents a word-search puzzle being built
///
/// Words are placed one at a time along rules drawn from the [direction sampler](DirectionSampler). Every
/// placement is validated against the whole grid before anything is written, and a written placement that
/// turns out to make its word readable twice is undone again, so a failed [Suchsel::place] never leaves a trace.
///
/// ```
/// # use suchsel::suchsel::Suchsel;
/// # use suchsel::sampler::{AlphabetFiller, FixedRule};
/// # use suchsel::word::Rule;
/// let mut suchsel = Suchsel::<u8>::new(8, 8, FixedRule(Rule::Lr), 50, 0).with_seed(3);
///
/// assert!(suchsel.place(b"SUN", false));
/// assert!(!suchsel.place(b"SU", false)); // already spelled inside SUN
///
/// suchsel.fill(&mut AlphabetFiller::<u8>::uppercase());
/// assert_eq!(suchsel.void_count(), 0);
/// ```
pub struct Suchsel<CharT: SuchselChar>
{
    grid: Grid<CharT>,
    sampler: Box<dyn DirectionSampler>,
    rng: StdRng,
    attempts: u32,
    verbose: u8,
    words: Vec<Vec<CharT>>,
    markers: Vec<CharT>,
    hidden_word: Option<Vec<CharT>>,
    rules: BTreeMap<Rule, usize>,
}

impl<CharT: SuchselChar> Suchsel<CharT>
{
    /// Creates a new empty suchsel, randomness is seeded from the operating system
    pub fn new(width: u16, height: u16, sampler: impl DirectionSampler + 'static, attempts: u32, verbose: u8) -> Suchsel<CharT>
    {
        Suchsel
        {
            grid: Grid::new(width, height),
            sampler: Box::new(sampler),
            rng: StdRng::from_os_rng(),
            attempts,
            verbose,
            words: Vec::new(),
            markers: Vec::new(),
            hidden_word: None,
            rules: BTreeMap::new(),
        }
    }

    /// Creates a new empty suchsel from [settings](SuchselSettings)
    pub fn from_settings(settings: &SuchselSettings, sampler: impl DirectionSampler + 'static) -> Suchsel<CharT>
    {
        let suchsel = Suchsel::new(settings.width, settings.height, sampler, settings.attempts, settings.verbose);
        match settings.seed
        {
            Some(seed) => suchsel.with_seed(seed),
            None => suchsel,
        }
    }

    /// Replaces the random generator with a seeded one, making the puzzle reproducible
    pub fn with_seed(self, seed: u64) -> Suchsel<CharT>
    {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(mut self, rng: StdRng) -> Suchsel<CharT>
    {
        self.rng = rng;
        self
    }

    /// Validates a placement of `word` starting at `start` without touching the grid
    ///
    /// Returns the number of letters the word shares with the grid.
    ///
    /// # Errors
    ///
    /// [AttemptError::Occupied] - a cell on the path holds different content (or any arrow)
    /// [AttemptError::AdjacencyViolation] - a crossword word would run directly alongside a letter or arrow
    /// [AttemptError::NotContiguous] - `must_be_contiguous` is set but no letter is shared
    pub fn check(&self, word: &PlacedWord<CharT>, start: Position, must_be_contiguous: bool) -> Result<usize, AttemptError>
    {
        let crossword = word.cells.iter().any(|c| matches!(c, Cell::Arrow(_)));
        let mut contiguous_letters = 0;

        for (wanted, pos) in word.cells_from(start)
        {
            if !self.grid.contains(pos) { return Err(AttemptError::DoesNotFit); }

            let present = self.grid.get(pos);
            if present == wanted && wanted.is_letter()
            {
                contiguous_letters += 1;
            }
            // arrows never share a cell, even with an identical arrow
            if !present.is_empty() && (present != wanted || matches!(present, Cell::Arrow(_)))
            {
                return Err(AttemptError::Occupied(pos));
            }

            if present.is_empty() && crossword
            {
                if let Some(adjacent) = word.rule.adjacent_fields(pos).into_iter().find(|adj| self.grid.get(*adj).is_solid())
                {
                    return Err(AttemptError::AdjacencyViolation(adjacent));
                }
            }
        }

        if must_be_contiguous && contiguous_letters == 0 { return Err(AttemptError::NotContiguous); }
        Ok(contiguous_letters)
    }

    fn write(&mut self, word: &PlacedWord<CharT>, start: Position) -> Journal<CharT>
    {
        let previous = word.cells_from(start)
            .filter_map(|(cell, pos)| self.grid.set(pos, cell).map(|old| (pos, old)))
            .collect();
        Journal { rule: word.rule, previous }
    }

    fn rollback(&mut self, journal: Journal<CharT>)
    {
        for (pos, old) in journal.previous.into_iter().rev()
        {
            self.grid.set(pos, old);
        }
    }

    fn commit(&mut self, journal: Journal<CharT>)
    {
        *self.rules.entry(journal.rule).or_insert(0) += 1;
        if self.verbose > 0
        {
            info!("\n{}", self.grid);
        }
    }

    /// One rule draw, one origin draw, and the write if everything fits
    fn attempt_place(&mut self, word: &[CharT], must_be_contiguous: bool, crossword_marker: Option<CharT>) -> Result<Journal<CharT>, AttemptError>
    {
        let rule = self.sampler.next_rule(&mut self.rng);
        let placed = PlacedWord::new(word, rule, crossword_marker);
        let start = placed.sample_start(self.grid.width(), self.grid.height(), &mut self.rng).ok_or(AttemptError::DoesNotFit)?;

        self.check(&placed, start, must_be_contiguous)?;
        trace!("Placing {:?} with rule {} at {:?}", word, rule, start);
        Ok(self.write(&placed, start))
    }

    fn attempt_repeatedly(&mut self, word: &[CharT], must_be_contiguous: bool, crossword_marker: Option<CharT>) -> Option<Journal<CharT>>
    {
        for attempt in 0..self.attempts
        {
            match self.attempt_place(word, must_be_contiguous, crossword_marker)
            {
                Ok(journal) => return Some(journal),
                Err(e) => trace!("Attempt {} for {:?} failed: {}", attempt, word, e),
            }
        }
        None
    }

    /// Places the word somewhere in the grid
    ///
    /// With `contiguous` set (and a non empty grid) the word first gets the full attempt budget to cross
    /// an already placed letter, then the same budget again without that requirement.
    ///
    /// # Errors
    ///
    /// [SuchselError::EmptyWord] - nothing to place
    /// [SuchselError::RejectedAsSubstring] - the word is already spelled inside an accepted word, the grid is not touched
    /// [SuchselError::AttemptsExhausted] - no fitting placement was drawn
    /// [SuchselError::RejectedAsAmbiguous] - the placement made the word readable more than once, it was undone
    pub fn try_place(&mut self, word: impl AsRef<[CharT]>, contiguous: bool) -> Result<(), SuchselError>
    {
        let word = word.as_ref();
        if word.is_empty() { return Err(SuchselError::EmptyWord); }

        if let Some(accepted) = guard::find_superstring(word, &self.words)
        {
            debug!("Rejecting {:?}, it is contained in {:?}", word, accepted);
            return Err(SuchselError::RejectedAsSubstring);
        }

        let mut journal = None;
        if contiguous && !self.grid.is_empty()
        {
            journal = self.attempt_repeatedly(word, true, None);
        }
        if journal.is_none()
        {
            journal = self.attempt_repeatedly(word, false, None);
        }
        let Some(journal) = journal else
        {
            debug!("Giving up on {:?} after {} attempts", word, self.attempts);
            return Err(SuchselError::AttemptsExhausted(self.attempts));
        };

        let occurrences = guard::count_occurrences(&self.grid, word);
        if occurrences > 1
        {
            debug!("Rolling back {:?}, it can be read {} times", word, occurrences);
            self.rollback(journal);
            return Err(SuchselError::RejectedAsAmbiguous { occurrences });
        }

        self.commit(journal);
        self.words.push(word.to_vec());
        Ok(())
    }

    /// Same as [Suchsel::try_place], returns true if the word was placed
    pub fn place(&mut self, word: impl AsRef<[CharT]>, contiguous: bool) -> bool
    {
        self.try_place(word, contiguous).is_ok()
    }

    /// Places a crossword word: an arrow holding `marker` in front of it, and a reserved void cell after it
    ///
    /// The word may not run alongside other content and, unless the grid is still empty, must cross an
    /// already placed letter. No substring or ambiguity checks are made.
    ///
    /// # Errors
    ///
    /// [SuchselError::EmptyWord] - nothing to place
    /// [SuchselError::AttemptsExhausted] - no fitting placement was drawn
    pub fn try_place_crossword(&mut self, word: impl AsRef<[CharT]>, marker: CharT) -> Result<(), SuchselError>
    {
        let word = word.as_ref();
        if word.is_empty() { return Err(SuchselError::EmptyWord); }

        let contiguous = !self.grid.is_empty();
        match self.attempt_repeatedly(word, contiguous, Some(marker))
        {
            Some(journal) =>
            {
                self.commit(journal);
                self.markers.push(marker);
                Ok(())
            }
            None =>
            {
                debug!("Giving up on crossword word {:?} after {} attempts", word, self.attempts);
                Err(SuchselError::AttemptsExhausted(self.attempts))
            }
        }
    }

    /// Same as [Suchsel::try_place_crossword], returns true if the word was placed
    pub fn place_crossword(&mut self, word: impl AsRef<[CharT]>, marker: CharT) -> bool
    {
        self.try_place_crossword(word, marker).is_ok()
    }

    /// Returns true if the empty cells left are exactly as many as the word has letters
    pub fn can_hide(&self, word: impl AsRef<[CharT]>) -> bool
    {
        let can_hide = self.void_count() == word.as_ref().len();
        if can_hide && self.verbose > 0
        {
            info!("Can hide {:?}", word.as_ref());
        }
        can_hide
    }

    /// Writes the word into the remaining empty cells, in reading order
    ///
    /// # Errors
    ///
    /// [SuchselError::CannotHide] - [Suchsel::can_hide] does not hold
    pub fn hide_word(&mut self, word: impl AsRef<[CharT]>) -> Result<(), SuchselError>
    {
        let word = word.as_ref();
        if !self.can_hide(word)
        {
            return Err(SuchselError::CannotHide { void: self.void_count(), len: word.len() });
        }

        let empty: Vec<Position> = self.grid.positions().filter(|pos| self.grid.get(*pos).is_empty()).collect();
        for (pos, c) in empty.into_iter().zip(word)
        {
            self.grid.set(pos, Cell::Letter(*c));
        }
        self.hidden_word = Some(word.to_vec());
        Ok(())
    }

    /// Puts a filler letter into every cell that is still empty, in reading order
    pub fn fill(&mut self, filler: &mut impl FillerSource<CharT>)
    {
        let empty: Vec<Position> = self.grid.positions().filter(|pos| self.grid.get(*pos).is_empty()).collect();
        debug!("Filling {} empty cells", empty.len());
        for pos in empty
        {
            let letter = filler.next_filler(&mut self.rng);
            self.grid.set(pos, Cell::Letter(letter));
        }
    }

    pub fn grid(&self) -> &Grid<CharT>
    {
        &self.grid
    }

    pub fn get(&self, pos: Position) -> Cell<CharT>
    {
        self.grid.get(pos)
    }

    /// Accepted words in the order they were placed
    pub fn words(&self) -> &[Vec<CharT>]
    {
        &self.words
    }

    /// Markers of the placed crossword words in the order they were placed
    pub fn markers(&self) -> &[CharT]
    {
        &self.markers
    }

    pub fn hidden_word(&self) -> Option<&[CharT]>
    {
        self.hidden_word.as_deref()
    }

    /// How often each rule was used by a committed placement
    pub fn rule_usage(&self) -> &BTreeMap<Rule, usize>
    {
        &self.rules
    }

    /// Number of cells that are still empty
    pub fn void_count(&self) -> usize
    {
        self.grid.void_count()
    }

    pub fn void_count_within(&self, range: RangeInclusive<usize>) -> bool
    {
        range.contains(&self.void_count())
    }

    pub fn snapshot(&self) -> PuzzleSnapshot<CharT>
    {
        PuzzleSnapshot::new(&self.grid, &self.words, &self.markers, self.hidden_word.as_deref(), &self.rules)
    }

    pub fn export<E: Exporter<CharT>>(&self, exporter: &mut E) -> Result<(), E::Error>
    {
        exporter.export(&self.snapshot())
    }
}
