// This file is part of Passim.
//
// Copyright (c) 2025  René Coignard <contact@renecoignard.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

const BUNDLED_DATA: &str = include_str!("../assets/wordlist.txt");

const BUNDLED_WORD_COUNT: usize = 1024;

#[cfg(test)]
const EXPECTED_SHA256: &str = "81833769f1b6fcd10f9b4780f5a18e82dfeb53780d307eea8c1df1d1f3b7379a";

/// An ordered word list, loaded once and immutable afterwards.
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// The built-in list: 1024 common English words, 10 bits per word.
    pub fn bundled() -> Self {
        let words = parse_words(BUNDLED_DATA);
        assert_eq!(
            words.len(),
            BUNDLED_WORD_COUNT,
            "Bundled word list must contain exactly {} words",
            BUNDLED_WORD_COUNT
        );
        Self { words }
    }

    /// Reads a UTF-8 word file, one word per line. Lines in the diceware
    /// format (`11116\tabacus`) have their dice-roll prefix dropped.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read word file {}", path.display()))?;
        let words = parse_words(&text);
        if words.is_empty() {
            anyhow::bail!("Word file {} contains no words", path.display());
        }
        Ok(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn into_words(self) -> Vec<String> {
        self.words
    }
}

fn parse_words(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once('\t') {
            Some((_, word)) => word.trim(),
            None => line,
        })
        .map(|word| word.nfc().collect())
        .collect()
}
