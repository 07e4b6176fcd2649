//! The in-memory item registry.
//!
//! An ordered sequence of [`Item`]s plus the next-id counter. Ids are
//! assigned strictly in increasing order and are never reused, even after a
//! deletion. Listing returns insertion order, and removing an item leaves
//! the relative order of the survivors untouched.
//!
//! The registry itself is plain synchronous state. [`App`](crate::App) wraps
//! it in a mutex so every operation runs as one short critical section;
//! nothing here awaits, so the lock is never held across I/O.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single inventory record.
///
/// The full JSON representation (returned by registration, field updates,
/// and deletion) exposes the raw stored photo path under the `photo` key,
/// `null` until a photo is uploaded. Listings project items through a
/// URL-bearing view instead; see [`routes`](crate::routes).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub description: String,
    #[serde(rename = "photo")]
    pub photo_path: Option<PathBuf>,
}

/// Partial-update input for [`Registry::update`].
///
/// A field that is absent, or present but empty, leaves the current value
/// unchanged. This is patch semantics, not replace semantics.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateFields {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// The authoritative ordered collection of items plus the id counter.
#[derive(Debug, Default)]
pub struct Registry {
    items: Vec<Item>,
    next_id: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an item and appends it to the end of the sequence.
    ///
    /// Fails with [`Error::Validation`] when `name` is empty; in that case
    /// the id counter is not advanced.
    pub fn create(&mut self, name: &str, description: &str) -> Result<Item> {
        if name.is_empty() {
            return Err(Error::Validation("inventory_name is required".into()));
        }
        let item = Item {
            id: self.next_id,
            name: name.to_owned(),
            description: description.to_owned(),
            photo_path: None,
        };
        self.next_id += 1;
        self.items.push(item.clone());
        Ok(item)
    }

    /// Linear scan by id.
    pub fn find(&self, id: u64) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Applies the present-and-non-empty fields to the matching item and
    /// returns the mutated item.
    pub fn update(&mut self, id: u64, fields: UpdateFields) -> Result<Item> {
        let item = self.find_mut(id)?;
        if let Some(name) = fields.name
            && !name.is_empty()
        {
            item.name = name;
        }
        if let Some(description) = fields.description
            && !description.is_empty()
        {
            item.description = description;
        }
        Ok(item.clone())
    }

    /// Points the matching item at a new photo file (or clears it) and
    /// returns the mutated item.
    pub fn set_photo(&mut self, id: u64, path: Option<PathBuf>) -> Result<Item> {
        let item = self.find_mut(id)?;
        item.photo_path = path;
        Ok(item.clone())
    }

    /// Excises the matching item, preserving the order of the rest.
    pub fn remove(&mut self, id: u64) -> Result<Item> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| Error::NotFound(format!("no item with id {id}")))?;
        Ok(self.items.remove(index))
    }

    /// A snapshot of every item in insertion order, safe to iterate without
    /// holding the registry.
    pub fn list(&self) -> Vec<Item> {
        self.items.clone()
    }

    fn find_mut(&mut self, id: u64) -> Result<&mut Item> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| Error::NotFound(format!("no item with id {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_strictly_increase_even_after_deletions() {
        let mut reg = Registry::new();
        let a = reg.create("hammer", "").unwrap();
        let b = reg.create("drill", "cordless").unwrap();
        assert_eq!((a.id, b.id), (0, 1));

        reg.remove(0).unwrap();
        let c = reg.create("wrench", "").unwrap();
        assert_eq!(c.id, 2);
    }

    #[test]
    fn empty_name_is_rejected_without_advancing_the_counter() {
        let mut reg = Registry::new();
        assert!(matches!(reg.create("", "desc"), Err(Error::Validation(_))));
        let item = reg.create("hammer", "").unwrap();
        assert_eq!(item.id, 0);
    }

    #[test]
    fn listing_preserves_insertion_order() {
        let mut reg = Registry::new();
        for name in ["a", "b", "c"] {
            reg.create(name, "").unwrap();
        }
        reg.update(1, UpdateFields { name: None, description: Some("changed".into()) })
            .unwrap();

        let names: Vec<_> = reg.list().into_iter().map(|i| i.name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn removal_keeps_the_order_of_survivors() {
        let mut reg = Registry::new();
        for name in ["a", "b", "c"] {
            reg.create(name, "").unwrap();
        }
        let removed = reg.remove(1).unwrap();
        assert_eq!(removed.name, "b");

        let ids: Vec<_> = reg.list().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, [0, 2]);
    }

    #[test]
    fn update_applies_only_non_empty_fields() {
        let mut reg = Registry::new();
        reg.create("hammer", "claw").unwrap();

        let item = reg
            .update(0, UpdateFields { name: Some("sledgehammer".into()), description: None })
            .unwrap();
        assert_eq!(item.name, "sledgehammer");
        assert_eq!(item.description, "claw");

        // Empty strings behave like absent fields.
        let item = reg
            .update(0, UpdateFields { name: Some(String::new()), description: Some("heavy".into()) })
            .unwrap();
        assert_eq!(item.name, "sledgehammer");
        assert_eq!(item.description, "heavy");
    }

    #[test]
    fn update_and_remove_report_unknown_ids() {
        let mut reg = Registry::new();
        assert!(matches!(reg.update(9, UpdateFields::default()), Err(Error::NotFound(_))));
        assert!(matches!(reg.remove(9), Err(Error::NotFound(_))));
        assert!(reg.find(9).is_none());
    }

    #[test]
    fn full_item_serializes_with_a_photo_key() {
        let mut reg = Registry::new();
        let item = reg.create("hammer", "").unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 0, "name": "hammer", "description": "", "photo": null})
        );
    }
}
