//! Name normalization: exact and family keys.
//!
//! Both functions are pure, deterministic, and total on any string input;
//! the empty string yields the empty key.

/// Key for Tier-1 grouping: byte-identical names modulo case and
/// surrounding whitespace.
pub fn exact_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Coarse, order-independent fingerprint of a name: the first three
/// informative tokens, sorted.
///
/// Used only for optional pre-bucketing, never as a clustering decision.
pub fn family_key(name: &str) -> String {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();

    let mut tokens: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|t| t.len() > 2)
        .collect();
    tokens.sort_unstable();
    tokens.truncate(3);
    tokens.join(" ")
}
