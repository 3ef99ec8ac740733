use crate::entropy::EntropyModel;
use anyhow::Result;
use rand::{CryptoRng, Rng};
use zeroize::Zeroizing;

/// Alphabet for `--digits` splicing. Excludes 0 and 1, which read as O and l.
pub const DIGITS: &str = "23456789";

/// Alphabet for `--special` splicing.
pub const SPECIALS: &str = "!=$%-*./";

/// Uniform, independent draws from the power-of-two prefix of a word list.
///
/// The randomness source is injected at construction and must be
/// cryptographically secure; the `CryptoRng` bound rejects plain PRNGs at
/// compile time.
pub struct WordSource<R> {
    words: Vec<String>,
    model: EntropyModel,
    rng: R,
}

impl<R: Rng + CryptoRng> WordSource<R> {
    pub fn new(words: Vec<String>, rng: R) -> Result<Self> {
        let model = EntropyModel::new(words.len())?;
        if model.entropy_per_word() == 0 {
            anyhow::bail!("Word list must contain at least two words");
        }
        Ok(Self { words, model, rng })
    }

    /// A source with one single-character token per character of `alphabet`.
    pub fn from_alphabet(alphabet: &str, rng: R) -> Result<Self> {
        Self::new(alphabet.chars().map(String::from).collect(), rng)
    }

    pub fn model(&self) -> EntropyModel {
        self.model
    }

    /// Draws one token, sampling with replacement. Words beyond the
    /// power-of-two boundary are never selected.
    pub fn next_token(&mut self) -> String {
        let index = self
            .rng
            .random_range(0..self.model.effective_word_list_size());
        self.words[index].clone()
    }

    fn next_position(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}

/// An ordered token sequence, joined with single spaces for display.
pub struct Passphrase {
    tokens: Zeroizing<Vec<String>>,
}

impl Passphrase {
    fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens: Zeroizing::new(tokens),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn join(&self) -> Zeroizing<String> {
        Zeroizing::new(self.tokens.join(" "))
    }
}

struct Splice<R> {
    source: WordSource<R>,
    count: usize,
}

/// Builds passphrases of N words from a primary source, with optional
/// extra tokens spliced in at uniformly random positions.
pub struct PassphraseGenerator<R> {
    primary: WordSource<R>,
    extras: Vec<Splice<R>>,
}

impl<R: Rng + CryptoRng> PassphraseGenerator<R> {
    pub fn new(primary: WordSource<R>) -> Self {
        Self {
            primary,
            extras: Vec::new(),
        }
    }

    pub fn model(&self) -> EntropyModel {
        self.primary.model()
    }

    /// Registers a secondary source whose tokens are inserted into every
    /// generated passphrase, `count` per phrase.
    pub fn splice(&mut self, source: WordSource<R>, count: usize) {
        if count > 0 {
            self.extras.push(Splice { source, count });
        }
    }

    /// Generates one passphrase of exactly `word_count` words plus any
    /// spliced extras. A zero word count is rejected rather than producing
    /// an empty phrase.
    pub fn generate(&mut self, word_count: usize) -> Result<Passphrase> {
        if word_count == 0 {
            anyhow::bail!("Passphrase must contain at least one word");
        }

        let extra_count: usize = self.extras.iter().map(|splice| splice.count).sum();
        let mut tokens = Vec::with_capacity(word_count + extra_count);
        for _ in 0..word_count {
            tokens.push(self.primary.next_token());
        }

        // Each insertion picks a position in [0, len] of the sequence as it
        // stands, so later insertions can land on either side of earlier
        // ones. Existing tokens keep their relative order.
        for splice in &mut self.extras {
            for _ in 0..splice.count {
                let token = splice.source.next_token();
                let position = splice.source.next_position(tokens.len() + 1);
                tokens.insert(position, token);
            }
        }

        Ok(Passphrase::new(tokens))
    }

    /// Lazily yields exactly `count` independent passphrases.
    pub fn generate_many(
        &mut self,
        count: usize,
        word_count: usize,
    ) -> impl Iterator<Item = Result<Passphrase>> + '_ {
        (0..count).map(move |_| self.generate(word_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn test_words(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("word{:03}", i)).collect()
    }

    #[test]
    fn test_generate_token_count() {
        let source = WordSource::new(test_words(1024), StdRng::seed_from_u64(1)).unwrap();
        let mut generator = PassphraseGenerator::new(source);
        for word_count in [1, 4, 8, 24] {
            assert_eq!(generator.generate(word_count).unwrap().len(), word_count);
        }
    }

    #[test]
    fn test_tokens_stay_inside_effective_prefix() {
        // 37 words round down to an effective size of 32.
        let source = WordSource::new(test_words(37), StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(source.model().effective_word_list_size(), 32);

        let prefix: HashSet<String> = test_words(32).into_iter().collect();
        let mut generator = PassphraseGenerator::new(source);
        for result in generator.generate_many(50, 8) {
            for token in result.unwrap().tokens() {
                assert!(prefix.contains(token), "token {} beyond prefix", token);
            }
        }
    }

    #[test]
    fn test_same_seed_same_phrase() {
        let mut first = PassphraseGenerator::new(
            WordSource::new(test_words(1024), StdRng::seed_from_u64(42)).unwrap(),
        );
        let mut second = PassphraseGenerator::new(
            WordSource::new(test_words(1024), StdRng::seed_from_u64(42)).unwrap(),
        );
        assert_eq!(
            first.generate(8).unwrap().tokens(),
            second.generate(8).unwrap().tokens()
        );
    }

    #[test]
    fn test_generate_many_yields_exact_count() {
        let source = WordSource::new(test_words(64), StdRng::seed_from_u64(3)).unwrap();
        let mut generator = PassphraseGenerator::new(source);
        let phrases: Vec<_> = generator
            .generate_many(20, 6)
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(phrases.len(), 20);
        assert!(phrases.iter().all(|phrase| phrase.len() == 6));
    }

    #[test]
    fn test_zero_word_count_rejected() {
        let source = WordSource::new(test_words(64), StdRng::seed_from_u64(4)).unwrap();
        let mut generator = PassphraseGenerator::new(source);
        assert!(generator.generate(0).is_err());
    }

    #[test]
    fn test_empty_word_list_rejected() {
        assert!(WordSource::new(Vec::new(), StdRng::seed_from_u64(5)).is_err());
    }

    #[test]
    fn test_single_word_list_rejected() {
        let result = WordSource::new(vec!["only".to_string()], StdRng::seed_from_u64(6));
        assert!(result.is_err());
    }

    #[test]
    fn test_draws_are_uniform() {
        // Chi-square over repeated generate() calls. Seeded, so the
        // statistic is fixed; 50 sits well past the df=15 p=0.001
        // critical value of 37.7.
        let source =
            WordSource::from_alphabet("abcdefghijklmnop", StdRng::seed_from_u64(7)).unwrap();
        let mut generator = PassphraseGenerator::new(source);

        let mut counts = [0usize; 16];
        let phrases = 2_000;
        let words_per_phrase = 8;
        for result in generator.generate_many(phrases, words_per_phrase) {
            for token in result.unwrap().tokens() {
                let index = (token.as_bytes()[0] - b'a') as usize;
                counts[index] += 1;
            }
        }

        let expected = (phrases * words_per_phrase) as f64 / 16.0;
        let chi_square: f64 = counts
            .iter()
            .map(|&count| {
                let delta = count as f64 - expected;
                delta * delta / expected
            })
            .sum();
        assert!(chi_square < 50.0, "chi-square {:.1} too high", chi_square);
    }

    #[test]
    fn test_splice_extends_length() {
        let source = WordSource::new(test_words(64), StdRng::seed_from_u64(8)).unwrap();
        let mut generator = PassphraseGenerator::new(source);
        generator.splice(
            WordSource::from_alphabet(DIGITS, StdRng::seed_from_u64(9)).unwrap(),
            2,
        );
        generator.splice(
            WordSource::from_alphabet(SPECIALS, StdRng::seed_from_u64(10)).unwrap(),
            1,
        );

        let phrase = generator.generate(6).unwrap();
        assert_eq!(phrase.len(), 6 + 2 + 1);

        let digits: usize = phrase
            .tokens()
            .iter()
            .filter(|token| token.len() == 1 && DIGITS.contains(token.as_str()))
            .count();
        let specials: usize = phrase
            .tokens()
            .iter()
            .filter(|token| token.len() == 1 && SPECIALS.contains(token.as_str()))
            .count();
        assert_eq!(digits, 2);
        assert_eq!(specials, 1);
    }

    #[test]
    fn test_splice_preserves_word_order() {
        // A generator seeded identically but without splices draws the
        // same primary sequence, since extras use their own source.
        let mut plain = PassphraseGenerator::new(
            WordSource::new(test_words(64), StdRng::seed_from_u64(11)).unwrap(),
        );
        let expected = plain.generate(8).unwrap();

        let mut spliced = PassphraseGenerator::new(
            WordSource::new(test_words(64), StdRng::seed_from_u64(11)).unwrap(),
        );
        spliced.splice(
            WordSource::from_alphabet(DIGITS, StdRng::seed_from_u64(12)).unwrap(),
            4,
        );
        let phrase = spliced.generate(8).unwrap();

        let kept: Vec<&String> = phrase
            .tokens()
            .iter()
            .filter(|token| token.len() > 1)
            .collect();
        let original: Vec<&String> = expected.tokens().iter().collect();
        assert_eq!(kept, original);
    }

    #[test]
    fn test_splice_reaches_every_position() {
        let mut seen = HashSet::new();
        for seed in 0..200 {
            let source = WordSource::new(test_words(64), StdRng::seed_from_u64(seed)).unwrap();
            let mut generator = PassphraseGenerator::new(source);
            generator.splice(
                WordSource::from_alphabet(DIGITS, StdRng::seed_from_u64(seed + 1000)).unwrap(),
                1,
            );
            let phrase = generator.generate(3).unwrap();
            let position = phrase
                .tokens()
                .iter()
                .position(|token| token.len() == 1)
                .unwrap();
            seen.insert(position);
        }
        assert_eq!(seen, HashSet::from([0, 1, 2, 3]));
    }

    #[test]
    fn test_from_alphabet_tokens() {
        let mut source = WordSource::from_alphabet(DIGITS, StdRng::seed_from_u64(13)).unwrap();
        assert_eq!(source.model().dictionary_size(), 8);
        assert_eq!(source.model().entropy_per_word(), 3);
        for _ in 0..100 {
            let token = source.next_token();
            assert_eq!(token.chars().count(), 1);
            assert!(DIGITS.contains(&token));
        }
    }

    #[test]
    fn test_join_uses_single_spaces() {
        let source = WordSource::new(test_words(64), StdRng::seed_from_u64(14)).unwrap();
        let mut generator = PassphraseGenerator::new(source);
        let phrase = generator.generate(5).unwrap();
        let joined = phrase.join();
        assert_eq!(joined.split(' ').count(), 5);
        assert_eq!(phrase.tokens().join(" "), *joined);
    }
}
