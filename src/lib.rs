pub mod utils;
pub mod word;
pub mod grid;
pub mod placed_word;
pub mod guard;
pub mod sampler;
pub mod suchsel;
pub mod export;
pub mod generator;

#[cfg(test)]
mod tests {
    use self::{export::{Exporter, TextExporter}, generator::{PuzzleRequest, SuchselGenerator, SuchselGeneratorSettings}};
    use tokio_stream::StreamExt;

    use super::*;

    #[tokio::test]
    async fn it_works() {
        let mut gen = SuchselGenerator::<u8>::default();
        gen.settings = SuchselGeneratorSettings::default();
        gen.settings.suchsel_settings.seed = Some(12);
        gen.crossword_words = vec![(b"RIVER".to_vec(), b'1'), (b"VALLEY".to_vec(), b'2')];
        gen.words = ["HILL", "LAKE", "MEADOW", "FOREST", "STREAM"].iter().map(|w| w.as_bytes().to_vec()).collect();

        let mut str = gen.puzzle_stream();
        str.request_puzzle(PuzzleRequest::Count(10)).await.unwrap();
        str.request_puzzle(PuzzleRequest::Stop).await.unwrap();

        let mut puzzles = vec![];
        while let Some(puzzle) = str.next().await
        {
            puzzles.push(puzzle);
        }

        assert_eq!(puzzles.len(), 10);
        for puzzle in puzzles.iter()
        {
            assert_eq!(puzzle.words.len() + puzzle.skipped.len(), 5 + 2 - puzzle.markers.len());
            let mut exporter = TextExporter { out: Vec::new() };
            exporter.export(puzzle).unwrap();
            assert!(!exporter.out.is_empty());
        }

        println!("{}", serde_json::to_string_pretty(&puzzles).unwrap());
    }
}
