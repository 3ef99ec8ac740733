use anyhow::Result;

/// Entropy carried by uniform draws from a dictionary of a given size.
///
/// Only the largest power-of-two prefix of a dictionary is usable for
/// unbiased selection, so a 1100-word list contributes the same 10 bits
/// per word as a 1024-word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntropyModel {
    dictionary_size: usize,
}

impl EntropyModel {
    pub fn new(dictionary_size: usize) -> Result<Self> {
        if dictionary_size == 0 {
            anyhow::bail!("Word list cannot be empty");
        }
        Ok(Self { dictionary_size })
    }

    pub fn dictionary_size(&self) -> usize {
        self.dictionary_size
    }

    /// Whole bits contributed by one draw from the effective list.
    pub fn entropy_per_word(&self) -> u32 {
        self.dictionary_size.ilog2()
    }

    /// Largest power of two no bigger than the dictionary size.
    pub fn effective_word_list_size(&self) -> usize {
        1 << self.entropy_per_word()
    }

    /// Words needed to reach `target_bits` of entropy, rounded up.
    pub fn word_count_for(&self, target_bits: f64) -> Result<usize> {
        if !target_bits.is_finite() || target_bits <= 0.0 {
            anyhow::bail!("Target entropy must be a positive number of bits");
        }
        let bits = self.entropy_per_word();
        if bits == 0 {
            anyhow::bail!("A one-word list carries no entropy per draw");
        }
        Ok((target_bits / f64::from(bits)).ceil() as usize)
    }
}
