//! # Header Model
//!
//! A FITS header is an ordered sequence of cards, each a keyword/value/
//! comment triple. Keyword uniqueness is not assumed; pattern-matched
//! keyword families rely on multiple distinct keys. Membership tests are
//! by exact key match only.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One keyword/value/comment triple.
///
/// The comment is carried as a `Value` so that non-string comments coming
/// from untyped sources can be detected and reported by validation rather
/// than rejected at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub keyword: String,
    pub value: Value,
    pub comment: Value,
}

impl Card {
    /// Create a card with an optional string comment.
    pub fn new(keyword: impl Into<String>, value: impl Into<Value>, comment: Option<&str>) -> Self {
        Card {
            keyword: keyword.into(),
            value: value.into(),
            comment: comment.map_or(Value::Null, |c| Value::String(c.to_string())),
        }
    }
}

/// An ordered FITS header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    cards: Vec<Card>,
}

impl Header {
    pub fn new() -> Self {
        Header::default()
    }

    /// Append a card, preserving order. Duplicate keywords are allowed.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Append a keyword/value/comment triple.
    pub fn set(&mut self, keyword: impl Into<String>, value: impl Into<Value>, comment: Option<&str>) {
        self.push(Card::new(keyword, value, comment));
    }

    /// Exact-key membership test.
    pub fn contains_key(&self, keyword: &str) -> bool {
        self.cards.iter().any(|c| c.keyword == keyword)
    }

    /// Value of the first card with the given keyword.
    pub fn get(&self, keyword: &str) -> Option<&Value> {
        self.cards
            .iter()
            .find(|c| c.keyword == keyword)
            .map(|c| &c.value)
    }

    /// Value of the first card with the given keyword, as an integer.
    pub fn get_int(&self, keyword: &str) -> Option<i64> {
        self.get(keyword).and_then(Value::as_i64)
    }

    /// All keywords, in card order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cards.iter().map(|c| c.keyword.as_str())
    }

    /// All cards, in order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl<'a> IntoIterator for &'a Header {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

impl FromIterator<Card> for Header {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        Header {
            cards: iter.into_iter().collect(),
        }
    }
}
