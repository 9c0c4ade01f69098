//! Module-name inclusion filter.

/// Requested module names. Empty means "everything".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter {
    names: Vec<String>,
}

impl NameFilter {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn matches(&self, name: &str) -> bool {
        self.names.is_empty() || self.names.iter().any(|n| n == name)
    }

    /// Items whose name passes, in source order.
    ///
    /// Requested names that match nothing are ignored.
    pub fn apply<'a, T, F>(&self, items: &'a [T], name_of: F) -> Vec<&'a T>
    where
        F: Fn(&T) -> &str,
    {
        items
            .iter()
            .filter(|item| self.matches(name_of(item)))
            .collect()
    }
}
