//! Cards and card collections.
//!
//! A [`CardCollection`] is the in-memory source of truth for one card kind.
//! It owns its cards in insertion order and knows nothing about storage or
//! rendering; the planner persists and renders it after every mutation.

use serde::Serialize;
use tracing::warn;

use crate::error::{Error, Result};
use crate::fields::FieldMap;
use crate::registry::{CardKind, CardSpec};

/// Session-local card handle.
///
/// Ids are never persisted; a card restored on the next run gets a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CardId(u64);

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One flight, hotel stay or booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    id: CardId,
    kind: CardKind,
    values: Vec<String>,
}

impl Card {
    fn blank(id: CardId, kind: CardKind) -> Self {
        Self {
            id,
            kind,
            values: vec![String::new(); kind.spec().field_count()],
        }
    }

    /// Session handle of this card.
    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    /// Variant of this card.
    #[must_use]
    pub fn kind(&self) -> CardKind {
        self.kind
    }

    /// Registry entry describing this card's template.
    #[must_use]
    pub fn spec(&self) -> &'static CardSpec {
        self.kind.spec()
    }

    /// Field values in template order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Value of the field named `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        let index = self.spec().index_of(name)?;
        self.values.get(index).map(String::as_str)
    }

    /// Set the field named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if the template has no such field and
    /// [`Error::InvalidOption`] if a select field is given a value outside
    /// its options.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let spec = self.spec();
        let index = spec
            .index_of(name)
            .ok_or_else(|| Error::unknown_field(self.kind, name))?;
        let field = &spec.fields[index];
        let value = value.into();
        if !field.accepts(&value) {
            return Err(Error::InvalidOption {
                kind: self.kind,
                field: field.name,
                value,
            });
        }
        self.values[index] = value;
        Ok(())
    }

    /// Positional mapping of this card's values.
    #[must_use]
    pub fn to_field_map(&self) -> FieldMap {
        FieldMap::from_values(&self.values)
    }

    /// Overwrite this card's values from a stored mapping.
    ///
    /// Returns the number of stored positions the template has no room for.
    /// A select field holding a value outside its options falls back to
    /// empty.
    pub fn apply_field_map(&mut self, map: &FieldMap) -> usize {
        let overflow = map.apply_to(&mut self.values);
        for (field, value) in self.kind.spec().fields.iter().zip(&mut self.values) {
            if !field.accepts(value) {
                warn!(
                    "Ignoring stored {} '{}' on a {} card",
                    field.name, value, self.kind
                );
                value.clear();
            }
        }
        overflow
    }
}

/// Ordered cards of one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardCollection {
    kind: CardKind,
    cards: Vec<Card>,
    next_id: u64,
}

impl CardCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new(kind: CardKind) -> Self {
        Self {
            kind,
            cards: Vec::new(),
            next_id: 1,
        }
    }

    /// Kind of the cards held.
    #[must_use]
    pub fn kind(&self) -> CardKind {
        self.kind
    }

    /// Cards in insertion order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the collection holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Empty-state text, present exactly when the collection is empty.
    #[must_use]
    pub fn placeholder(&self) -> Option<&'static str> {
        self.is_empty().then(|| self.kind.spec().empty_state)
    }

    /// Append a blank card and return a handle to it.
    pub fn push_blank(&mut self) -> &mut Card {
        let id = CardId(self.next_id);
        self.next_id += 1;
        let index = self.cards.len();
        self.cards.push(Card::blank(id, self.kind));
        &mut self.cards[index]
    }

    /// Mutable card with the given id.
    pub fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.id == id)
    }

    /// Id of the card at a 1-based position.
    #[must_use]
    pub fn id_at(&self, position: usize) -> Option<CardId> {
        position
            .checked_sub(1)
            .and_then(|index| self.cards.get(index))
            .map(Card::id)
    }

    /// Detach a card.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CardNotFound`] if no card has this id.
    pub fn remove(&mut self, id: CardId) -> Result<Card> {
        let index = self
            .cards
            .iter()
            .position(|card| card.id == id)
            .ok_or_else(|| Error::CardNotFound {
                kind: self.kind,
                reference: format!("with id {id}"),
            })?;
        Ok(self.cards.remove(index))
    }

    /// Positional mappings of every card, in order.
    #[must_use]
    pub fn to_records(&self) -> Vec<FieldMap> {
        self.cards.iter().map(Card::to_field_map).collect()
    }
}
