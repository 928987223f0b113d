//! Selection store: the services a visitor has picked, keyed by name.
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A selected service and the price it was selected at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub name: String,
    pub price: Money,
}

/// What a toggle did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

impl Toggle {
    #[must_use]
    pub const fn is_selected(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Insertion-ordered mapping from service name to price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionStore {
    entries: Vec<SelectionEntry>,
}

impl SelectionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `name` if present, otherwise add it at `price`.
    pub fn toggle(&mut self, name: &str, price: Money) -> Toggle {
        if let Some(pos) = self.position(name) {
            self.entries.remove(pos);
            Toggle::Removed
        } else {
            self.entries.push(SelectionEntry {
                name: name.to_string(),
                price,
            });
            Toggle::Added
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    #[must_use]
    pub fn price_of(&self, name: &str) -> Option<Money> {
        self.position(name).map(|pos| self.entries[pos].price)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Sum of every selected price.
    #[must_use]
    pub fn total(&self) -> Money {
        self.entries.iter().map(|entry| entry.price).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.iter()
    }

    /// Names joined with `", "` in selection order.
    #[must_use]
    pub fn joined_names(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<'a> IntoIterator for &'a SelectionStore {
    type Item = &'a SelectionEntry;
    type IntoIter = std::slice::Iter<'a, SelectionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
