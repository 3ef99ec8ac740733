use console::Style;

pub const MIN_SAFE_ENTROPY: f64 = 75.0;
pub const PARANOID_ENTROPY: f64 = 128.0;

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
}

pub struct OutputConfig {
    pub source_label: String,
    pub wordlist_size: usize,
    pub effective_size: usize,
    pub entropy_per_word: u32,
    pub word_count: usize,
    pub digit_count: usize,
    pub special_count: usize,
    pub count: usize,
    pub entropy_bits: f64,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

pub fn strength_tier(entropy: f64) -> &'static str {
    if entropy >= PARANOID_ENTROPY {
        "Paranoid"
    } else if entropy >= MIN_SAFE_ENTROPY {
        "Strong"
    } else {
        "Weak"
    }
}

pub fn display_summary(config: &OutputConfig, options: &DisplayOptions) {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);

    let secure = config.entropy_bits >= MIN_SAFE_ENTROPY;
    let entropy_style = if options.color_support {
        if secure {
            Style::new().green()
        } else {
            Style::new().yellow()
        }
    } else {
        Style::new()
    };
    let status = if secure { check_ok } else { check_warn };

    println!();
    println!("Settings:");

    println!(
        "  ├─ Wordlist   {} ({} {})",
        config.source_label,
        config.wordlist_size,
        if config.wordlist_size == 1 {
            "word"
        } else {
            "words"
        }
    );

    println!(
        "  ├─ Effective  {} words ({} bits per word)",
        config.effective_size, config.entropy_per_word
    );

    println!("  ├─ Sampling   Uniform over power-of-two prefix");

    if config.digit_count > 0 || config.special_count > 0 {
        println!(
            "  ├─ Extras     {} digit {}, {} special {}",
            config.digit_count,
            if config.digit_count == 1 {
                "token"
            } else {
                "tokens"
            },
            config.special_count,
            if config.special_count == 1 {
                "token"
            } else {
                "tokens"
            }
        );
    }

    println!(
        "  └─ Output     {} {} of {} {}",
        config.count,
        if config.count == 1 {
            "passphrase"
        } else {
            "passphrases"
        },
        config.word_count,
        if config.word_count == 1 {
            "word"
        } else {
            "words"
        }
    );

    println!();
    println!("Stats:");

    print!(
        "  ├─ Entropy    {} ",
        entropy_style.apply_to(format!("[{}]", status))
    );
    print!(
        "{}",
        entropy_style.apply_to(format!("{:.1}", config.entropy_bits))
    );
    print!(" bits per passphrase");
    println!();

    println!(
        "  └─ Security   {}",
        entropy_style.apply_to(strength_tier(config.entropy_bits))
    );
}
