//! Name-based scoping for discovered places.

/// Case-insensitive substring allow-list over venue names.
///
/// Tokens are lowercased once at construction; [`NameFilter::matches`] is a
/// pure function of the name.
#[derive(Debug, Clone)]
pub struct NameFilter {
    tokens: Vec<String>,
}

impl NameFilter {
    #[must_use]
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = tokens
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { tokens }
    }

    /// Returns `true` if `name` contains any allow-listed token.
    ///
    /// Blank names never match.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let lower = name.to_lowercase();
        self.tokens.iter().any(|t| lower.contains(t.as_str()))
    }
}
