use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::DocId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    /// Stored for display, never indexed.
    pub title: String,
    /// Body text that gets indexed.
    pub description: String,
}

impl Document {
    /// Non-string bodies are stored as their string representation.
    pub fn new(id: DocId, title: impl Into<String>, description: impl ToString) -> Self {
        Self { id, title: title.into(), description: description.to_string() }
    }
}

/// Insertion-ordered mapping from document id to document.
///
/// Re-inserting an id replaces the stored document but keeps its original slot,
/// so iteration order is the order in which ids were first seen.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    docs: Vec<Document>,
    slots: HashMap<DocId, usize>,
}

impl Collection {
    pub fn new() -> Self { Self::default() }

    /// Returns the replaced document, if any.
    pub fn insert(&mut self, doc: Document) -> Option<Document> {
        match self.slots.get(&doc.id) {
            Some(&slot) => Some(std::mem::replace(&mut self.docs[slot], doc)),
            None => {
                self.slots.insert(doc.id, self.docs.len());
                self.docs.push(doc);
                None
            }
        }
    }

    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.slots.get(&id).map(|&slot| &self.docs[slot])
    }

    pub fn contains(&self, id: DocId) -> bool { self.slots.contains_key(&id) }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> { self.docs.iter() }

    pub fn as_slice(&self) -> &[Document] { &self.docs }

    pub fn ids(&self) -> impl Iterator<Item = DocId> + '_ { self.docs.iter().map(|d| d.id) }
}

impl FromIterator<Document> for Collection {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        let mut collection = Collection::new();
        for doc in iter {
            collection.insert(doc);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter { self.docs.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_seen_order_on_replace() {
        let mut c = Collection::new();
        c.insert(Document::new(7, "a", "first"));
        c.insert(Document::new(3, "b", "second"));
        let old = c.insert(Document::new(7, "c", "third"));
        assert_eq!(old.map(|d| d.description), Some("first".to_string()));
        assert_eq!(c.ids().collect::<Vec<_>>(), vec![7, 3]);
        assert_eq!(c.get(7).map(|d| d.title.as_str()), Some("c"));
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn coerces_non_string_body() {
        let d = Document::new(1, "numbers", 42);
        assert_eq!(d.description, "42");
    }
}
