use rand::{seq::IndexedRandom, RngCore};
use serde::{Deserialize, Serialize};
use crate::{utils::SuchselChar, word::{Rule, RuleError}};

/// Source of [placement rules](Rule), called once per placement attempt
///
/// The distribution is entirely up to the implementor, the engine only hands over its random generator so
/// that a seeded engine stays reproducible.
pub trait DirectionSampler: Send
{
    fn next_rule(&mut self, rng: &mut dyn RngCore) -> Rule;
}

/// Source of letters for the cells no word ended up in
pub trait FillerSource<CharT: SuchselChar>
{
    fn next_filler(&mut self, rng: &mut dyn RngCore) -> CharT;
}

impl<F: FnMut(&mut dyn RngCore) -> Rule + Send> DirectionSampler for F
{
    fn next_rule(&mut self, rng: &mut dyn RngCore) -> Rule
    {
        self(rng)
    }
}

impl<CharT: SuchselChar, F: FnMut(&mut dyn RngCore) -> CharT> FillerSource<CharT> for F
{
    fn next_filler(&mut self, rng: &mut dyn RngCore) -> CharT
    {
        self(rng)
    }
}

/// Always returns the same rule
#[derive(Clone, Copy, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct FixedRule(pub Rule);

impl DirectionSampler for FixedRule
{
    fn next_rule(&mut self, _rng: &mut dyn RngCore) -> Rule
    {
        self.0
    }
}

/// Picks uniformly among a set of allowed rules
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct UniformRules
{
    rules: Vec<Rule>,
}

impl UniformRules
{
    /// Creates the sampler, an empty rule list means all eight rules
    pub fn new(rules: Vec<Rule>) -> UniformRules
    {
        if rules.is_empty() { UniformRules { rules: Rule::ALL.to_vec() } }
        else { UniformRules { rules } }
    }

    /// Creates the sampler from rule symbols like `"lr"` or `"dtl"`
    ///
    /// # Errors
    ///
    /// [RuleError::Unrecognized] - one of the symbols doesn't name a rule
    pub fn from_symbols<'a>(symbols: impl IntoIterator<Item = &'a str>) -> Result<UniformRules, RuleError>
    {
        let rules = symbols.into_iter().map(|s| s.parse::<Rule>()).collect::<Result<Vec<Rule>, RuleError>>()?;
        Ok(UniformRules::new(rules))
    }

    pub fn rules(&self) -> &[Rule]
    {
        &self.rules
    }
}

impl Default for UniformRules
{
    fn default() -> Self
    {
        UniformRules::new(Vec::new())
    }
}

impl DirectionSampler for UniformRules
{
    fn next_rule(&mut self, rng: &mut dyn RngCore) -> Rule
    {
        // never empty, see UniformRules::new
        self.rules.choose(rng).copied().unwrap_or_default()
    }
}

/// Picks uniformly among the letters of an alphabet
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct AlphabetFiller<CharT: SuchselChar>
{
    alphabet: Vec<CharT>,
}

impl<CharT: SuchselChar> AlphabetFiller<CharT>
{
    /// Creates the filler, an empty alphabet always yields the default character
    pub fn new(alphabet: Vec<CharT>) -> AlphabetFiller<CharT>
    {
        AlphabetFiller { alphabet }
    }
}

impl AlphabetFiller<u8>
{
    pub fn uppercase() -> AlphabetFiller<u8>
    {
        AlphabetFiller::new((b'A'..=b'Z').collect())
    }
}

impl AlphabetFiller<char>
{
    pub fn uppercase() -> AlphabetFiller<char>
    {
        AlphabetFiller::new(('A'..='Z').collect())
    }
}

impl<CharT: SuchselChar> FillerSource<CharT> for AlphabetFiller<CharT>
{
    fn next_filler(&mut self, rng: &mut dyn RngCore) -> CharT
    {
        self.alphabet.choose(rng).copied().unwrap_or_default()
    }
}
