//! Packing checklist. Session only, never stored.

use serde::Serialize;

/// One packing item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    /// Session-local id.
    pub id: u64,
    /// Item name.
    pub name: String,
    /// Whether it is packed.
    pub checked: bool,
}

/// Ordered packing items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checklist {
    items: Vec<ChecklistItem>,
    #[serde(skip)]
    next_id: u64,
}

impl Default for Checklist {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }
}

impl Checklist {
    /// Add an item. Blank names are ignored.
    pub fn add(&mut self, name: &str) -> Option<u64> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(ChecklistItem {
            id,
            name: name.to_string(),
            checked: false,
        });
        Some(id)
    }

    /// Remove an item. Returns whether it existed.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Flip an item's checked state. Returns the new state.
    pub fn toggle(&mut self, id: u64) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.checked = !item.checked;
        Some(item.checked)
    }

    /// Items in order.
    #[must_use]
    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_and_rejects_blank() {
        let mut list = Checklist::default();
        assert!(list.add("   ").is_none());
        let id = list.add("  Passport ").unwrap();
        assert_eq!(list.items()[0].name, "Passport");
        assert_eq!(list.items()[0].id, id);
    }

    #[test]
    fn test_toggle_and_remove() {
        let mut list = Checklist::default();
        let id = list.add("Charger").unwrap();
        assert_eq!(list.toggle(id), Some(true));
        assert_eq!(list.toggle(id), Some(false));
        assert!(list.remove(id));
        assert!(!list.remove(id));
        assert_eq!(list.toggle(id), None);
    }
}
