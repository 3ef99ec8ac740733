pub mod entropy;
pub mod generator;
pub mod wordlist;

pub use entropy::EntropyModel;
pub use generator::{DIGITS, Passphrase, PassphraseGenerator, SPECIALS, WordSource};
pub use wordlist::WordList;
