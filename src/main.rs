mod ui;

use anyhow::Result;
use clap::Parser;
use passim::generator::{DIGITS, PassphraseGenerator, SPECIALS, WordSource};
use passim::wordlist::WordList;
use std::path::PathBuf;

const DEFAULT_TARGET_ENTROPY: f64 = 75.0;

const AFTER_HELP: &str = "\
The default number of words per passphrase depends on the size of the
word list, targeting 75 bits of entropy:

      # of words in list   # of words in passphrase
      ------------------   ------------------------
                    1024                          8
                    2048                          7
                    4096                          7
                    8192                          6";

#[derive(Parser)]
#[command(
    name = "passim",
    version,
    author,
    about = "Generates memorable passphrases from a word list using the diceware method",
    after_help = AFTER_HELP
)]
struct Cli {
    /// Word file, one word per line; the built-in 1024-word list when omitted
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Number of passphrases to generate
    #[arg(short, long, default_value_t = 20)]
    count: usize,

    /// Number of words in each passphrase
    #[arg(short, long)]
    words: Option<usize>,

    /// Number of digit tokens to splice into each passphrase at random positions
    #[arg(short, long, default_value_t = 0)]
    digits: usize,

    /// Number of special-character tokens to splice into each passphrase
    #[arg(short, long, default_value_t = 0)]
    special: usize,

    /// Print passphrases only, without the settings summary
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.count == 0 {
        anyhow::bail!("Number of passphrases must be at least 1");
    }

    let (list, source_label) = match &cli.file {
        Some(path) => (WordList::from_path(path)?, path.display().to_string()),
        None => (WordList::bundled(), String::from("built-in")),
    };

    let mut generator = PassphraseGenerator::new(WordSource::new(list.into_words(), rand::rng())?);
    let model = generator.model();

    let word_count = match cli.words {
        Some(0) => anyhow::bail!("Passphrase must contain at least one word"),
        Some(count) => count,
        None => model.word_count_for(DEFAULT_TARGET_ENTROPY)?,
    };

    let mut extra_bits = 0.0;
    if cli.digits > 0 {
        let source = WordSource::from_alphabet(DIGITS, rand::rng())?;
        extra_bits += cli.digits as f64 * f64::from(source.model().entropy_per_word());
        generator.splice(source, cli.digits);
    }
    if cli.special > 0 {
        let source = WordSource::from_alphabet(SPECIALS, rand::rng())?;
        extra_bits += cli.special as f64 * f64::from(source.model().entropy_per_word());
        generator.splice(source, cli.special);
    }

    for result in generator.generate_many(cli.count, word_count) {
        let passphrase = result?;
        println!("{}", passphrase.join().as_str());
    }

    if !cli.quiet {
        let config = ui::OutputConfig {
            source_label,
            wordlist_size: model.dictionary_size(),
            effective_size: model.effective_word_list_size(),
            entropy_per_word: model.entropy_per_word(),
            word_count,
            digit_count: cli.digits,
            special_count: cli.special,
            count: cli.count,
            entropy_bits: word_count as f64 * f64::from(model.entropy_per_word()) + extra_bits,
        };
        let options = ui::DisplayOptions {
            unicode_support: ui::detect_unicode_support(),
            color_support: ui::detect_color_support(),
        };
        ui::display_summary(&config, &options);
    }

    Ok(())
}
