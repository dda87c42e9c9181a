pub const DEFAULT_QUERY: &str = "cricket";
pub const DEFAULT_MAX: u32 = 10;

/// Reduce free text (often a match or series title) to a GNews search term:
/// punctuation is dropped and words are joined with `+`.
pub fn to_search_query(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("+")
}
