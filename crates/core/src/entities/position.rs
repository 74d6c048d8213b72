use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Bond;

/// Signed position per trading book for one instrument.
///
/// The aggregate position is always the sum of the per-book values.
/// Books iterate in first-seen order so printed output is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub bond: Bond,
    books: IndexMap<String, i64>,
}

impl Position {
    pub fn new(bond: Bond) -> Self {
        Self {
            bond,
            books: IndexMap::new(),
        }
    }

    /// Apply a signed quantity to a book, creating it on first sight.
    pub fn add(&mut self, book: &str, signed_quantity: i64) {
        *self.books.entry(book.to_string()).or_insert(0) += signed_quantity;
    }

    pub fn quantity_in(&self, book: &str) -> i64 {
        self.books.get(book).copied().unwrap_or(0)
    }

    /// Sum of the position across all books.
    pub fn aggregate(&self) -> i64 {
        self.books.values().sum()
    }

    pub fn books(&self) -> impl Iterator<Item = (&str, i64)> {
        self.books.iter().map(|(book, qty)| (book.as_str(), *qty))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CUSIP: {}, ", self.bond.cusip)?;
        for (book, quantity) in &self.books {
            write!(f, "{}: {}, ", book, quantity)?;
        }
        write!(f, "Aggregate: {}", self.aggregate())
    }
}
