//! Word tokenizer used on both sides of a comparison

/// Split text into comparison tokens.
///
/// The text is lower-cased, then every maximal run of ASCII letters and
/// digits becomes one token. Punctuation, whitespace and any other character
/// only separates tokens. Empty or punctuation-only input yields no tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|run| !run.is_empty())
        .map(str::to_owned)
        .collect()
}
