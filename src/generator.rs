use std::{future::Future, pin::Pin, task::{Context, Poll}};

use log::debug;
use serde::{Deserialize, Serialize};
use tokio::{sync::mpsc::{self, error::{SendError, TryRecvError}, Receiver, Sender}, task};
use tokio_stream::Stream;

use crate::{export::{self, PuzzleSnapshot}, sampler::{AlphabetFiller, UniformRules}, suchsel::{Suchsel, SuchselSettings}, utils::SuchselChar, word::Rule};

/// Represents all settings for a [generator](SuchselGenerator).
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SuchselGeneratorSettings
{
    pub suchsel_settings: SuchselSettings,
    /// Rules the words may be placed with, drawn uniformly, empty means all eight
    pub rules: Vec<Rule>,
    /// Whether words should first try to cross already placed letters
    pub contiguous: bool,
}

impl Default for SuchselGeneratorSettings
{
    fn default() -> Self
    {
        SuchselGeneratorSettings
        {
            suchsel_settings: SuchselSettings::default(),
            rules: Vec::new(),
            contiguous: true,
        }
    }
}

/// Represents a suchsel generator, runs in an async runtime.
///
/// Every generated puzzle is built from scratch: crossword words first (each with its marker), then the plain
/// words, then the hidden word if it fits exactly into the leftover cells, and finally the filler letters.
/// Words that can't be placed are skipped and listed in [PuzzleSnapshot::skipped].
///
/// # Example
/// ```
/// use suchsel::generator::{SuchselGenerator, SuchselGeneratorSettings, PuzzleRequest};
///
/// use tokio_stream::StreamExt;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main()
/// {
///     let mut generator = SuchselGenerator::<u8>::default();
///     generator.settings = SuchselGeneratorSettings::default();
///     generator.settings.suchsel_settings.seed = Some(1);
///     generator.words = vec!["SUN", "MOON", "STAR"].into_iter().map(|w| w.as_bytes().to_vec()).collect();
///
///     let str = generator.puzzle_stream();
///     str.request_puzzle(PuzzleRequest::Count(2)).await.unwrap();
///     str.request_puzzle(PuzzleRequest::Stop).await.unwrap();
///     let puzzles: Vec<_> = str.collect().await;
///
///     assert_eq!(puzzles.len(), 2);
///     assert!(puzzles.iter().all(|p| p.grid.void_count() == 0));
/// }
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct SuchselGenerator<CharT: SuchselChar>
{
    pub words: Vec<Vec<CharT>>,
    /// Words placed with an arrow marker, the markers in order spell the solution
    pub crossword_words: Vec<(Vec<CharT>, CharT)>,
    pub hidden_word: Option<Vec<CharT>>,
    pub filler: Vec<CharT>,
    pub settings: SuchselGeneratorSettings,
}

impl Default for SuchselGenerator<u8>
{
    fn default() -> Self
    {
        SuchselGenerator
        {
            words: Vec::new(),
            crossword_words: Vec::new(),
            hidden_word: None,
            filler: (b'A'..=b'Z').collect(),
            settings: SuchselGeneratorSettings::default(),
        }
    }
}

impl<CharT: SuchselChar> SuchselGenerator<CharT>
{
    /// Builds one finished puzzle, `seed` overrides the seed of the settings
    pub fn generate(&self, seed: Option<u64>) -> PuzzleSnapshot<CharT>
    {
        let mut settings = self.settings.suchsel_settings.clone();
        settings.seed = seed;
        let mut suchsel = Suchsel::from_settings(&settings, UniformRules::new(self.settings.rules.clone()));
        let mut skipped = Vec::new();

        for (word, marker) in self.crossword_words.iter()
        {
            if let Err(e) = suchsel.try_place_crossword(word, *marker)
            {
                debug!("Skipping crossword word {:?}: {}", word, e);
                skipped.push(word);
            }
        }
        for word in self.words.iter()
        {
            if let Err(e) = suchsel.try_place(word, self.settings.contiguous)
            {
                debug!("Skipping word {:?}: {}", word, e);
                skipped.push(word);
            }
        }
        if let Some(hidden) = &self.hidden_word
        {
            if let Err(e) = suchsel.hide_word(hidden)
            {
                debug!("Not hiding {:?}: {}", hidden, e);
            }
        }
        suchsel.fill(&mut AlphabetFiller::new(self.filler.clone()));

        let mut snapshot = suchsel.snapshot();
        snapshot.skipped = skipped.into_iter().map(|w| export::to_string(w.as_slice())).collect();
        snapshot
    }

    pub fn puzzle_stream(&self) -> SuchselStream<CharT>
    {
        let gen = self.clone();

        let gen_func = move |mut rr: Receiver<PuzzleRequest>, cs: Sender<PuzzleSnapshot<CharT>>| async move
        {
            let mut current_request = PuzzleRequest::Count(0);
            let mut index = 0u64;

            loop
            {
                while let PuzzleRequest::Count(0) = current_request
                {
                    match rr.recv().await
                    {
                        None | Some(PuzzleRequest::Stop) => return,
                        Some(req) => current_request = req
                    }
                }
                // a count runs to completion, endless generation listens for the next request in between puzzles
                if current_request == PuzzleRequest::Endless
                {
                    match rr.try_recv()
                    {
                        Ok(PuzzleRequest::Stop) | Err(TryRecvError::Disconnected) => return,
                        Ok(req) => current_request = req,
                        Err(TryRecvError::Empty) => {}
                    }
                }
                match current_request
                {
                    PuzzleRequest::Stop => return,
                    PuzzleRequest::Count(0) => continue,
                    _ => {}
                }

                let seed = gen.settings.suchsel_settings.seed.map(|s| s.wrapping_add(index));
                index += 1;
                if cs.send(gen.generate(seed)).await.is_err() { return; }
                if let PuzzleRequest::Count(count) = current_request { current_request = PuzzleRequest::Count(count.saturating_sub(1)) }
            }
        };

        SuchselStream::new(gen_func)
    }
}


/// Represents a request to [SuchselStream] for generating puzzles.
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Default, Debug, Serialize, Deserialize)]
pub enum PuzzleRequest
{
    /// Request to stop the puzzle generation.
    #[default]
    Stop,
    /// Request for some count of puzzles to generate.
    Count(u32),
    /// Request for puzzles until a [PuzzleRequest::Stop] arrives or the stream is dropped.
    Endless
}

pub struct SuchselStream<CharT: SuchselChar>
{
    request_sender: Sender<PuzzleRequest>,
    puzzle_reciever: Receiver<PuzzleSnapshot<CharT>>
}

impl<CharT: SuchselChar> SuchselStream<CharT>
{

    pub fn new<F,Fut>(gen_func: F) -> SuchselStream<CharT>
    where
        F: FnOnce(Receiver<PuzzleRequest>, Sender<PuzzleSnapshot<CharT>>) -> Fut,
        Fut: Future<Output=()> + Send + 'static
    {
        let (rs, rr) = mpsc::channel(100);
        let (cs, cr) = mpsc::channel(100);

        task::spawn(gen_func(rr, cs));

        SuchselStream { request_sender: rs, puzzle_reciever: cr }
    }

    /// Requests puzzles to generate with function like next or take.
    ///
    /// After the requested count of puzzles is generated the stream waits for other requests, so to only generate
    /// for example 10 puzzles, request that, and then request a [PuzzleRequest::Stop] to stop the generator.
    ///
    /// # Errors
    ///
    /// Returns the request back if the generator already stopped.
    pub async fn request_puzzle(&self, req: PuzzleRequest) -> Result<(), SendError<PuzzleRequest>>
    {
        self.request_sender.send(req).await.inspect_err(|e| debug!("Generator is gone, dropping request {:?}", e.0))
    }
}

impl<CharT: SuchselChar> Stream for SuchselStream<CharT>
{
    type Item = PuzzleSnapshot<CharT>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context) -> Poll<Option<Self::Item>>
    {
        self.puzzle_reciever.poll_recv(cx)
    }
}
