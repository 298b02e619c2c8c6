//! Input normalization
//!
//! Pure text shaping shared by every stage validator and the keyword router.

/// Normalized view of one inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedInput {
    /// Lower-cased, punctuation stripped, whitespace collapsed.
    /// Hyphens survive so that hyphenated keywords still match.
    pub text: String,
    /// Maximal runs of ASCII digits, left to right
    pub digit_runs: Vec<String>,
    /// The subset of `digit_runs` with no letter directly before or after
    pub standalone_runs: Vec<String>,
}

impl NormalizedInput {
    /// Whole message is a reset command
    pub fn is_reset(&self) -> bool {
        matches!(self.text.as_str(), "reset" | "restart")
    }

    /// Normalized text split on whitespace
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }
}

pub fn normalize(raw: &str) -> NormalizedInput {
    let (digit_runs, standalone_runs) = digit_runs(raw);
    NormalizedInput {
        text: normalize_text(raw),
        digit_runs,
        standalone_runs,
    }
}

fn normalize_text(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' => '-',
            c => c,
        })
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-')
        .flat_map(char::to_lowercase)
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All digit runs, and those not glued to a letter (`90210` but not `abc90210`)
fn digit_runs(raw: &str) -> (Vec<String>, Vec<String>) {
    let mut runs = Vec::new();
    let mut standalone = Vec::new();
    let mut current = String::new();
    let mut letter_before = false;
    let mut prev_is_letter = false;

    for c in raw.chars() {
        if c.is_ascii_digit() {
            if current.is_empty() {
                letter_before = prev_is_letter;
            }
            current.push(c);
        } else if !current.is_empty() {
            if !letter_before && !c.is_alphabetic() {
                standalone.push(current.clone());
            }
            runs.push(std::mem::take(&mut current));
        }
        prev_is_letter = c.is_alphabetic();
    }
    if !current.is_empty() {
        if !letter_before {
            standalone.push(current.clone());
        }
        runs.push(current);
    }

    (runs, standalone)
}
