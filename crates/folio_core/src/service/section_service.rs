//! List CRUD for one section of the document.
//!
//! # Responsibility
//! - Apply save/delete operations to a collection through the store.
//!
//! # Invariants
//! - Every save or delete re-persists the full document and marks it dirty.
//! - Save replaces in place when the id matches, otherwise appends.
//! - Delete removes every record sharing the target's resolved key value;
//!   duplicates of a natural key are all removed.

use crate::ids::IdClock;
use crate::model::section::{resolve_natural_key, KeyValue, SectionRecord};
use crate::storage::LocalStorage;
use crate::store::{DocumentSource, PortfolioStore, StoreResult};
use log::info;

/// Where a saved record ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Replaced { index: usize },
    Appended { index: usize },
}

impl SaveOutcome {
    pub fn index(self) -> usize {
        match self {
            Self::Replaced { index } | Self::Appended { index } => index,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Replaced { .. } => "replaced",
            Self::Appended { .. } => "appended",
        }
    }
}

/// Saves `record` into `items`.
///
/// A matching id replaces in place. Otherwise the record is appended, taking
/// a fresh id first when its type has ids and none is set.
pub fn save_into<R: SectionRecord>(items: &mut Vec<R>, mut record: R, ids: &dyn IdClock) -> SaveOutcome {
    match record.record_id() {
        Some(id) => {
            if let Some(index) = items.iter().position(|item| item.record_id() == Some(id)) {
                items[index] = record;
                return SaveOutcome::Replaced { index };
            }
        }
        None if R::HAS_ID => record.assign_id(ids.next_id()),
        None => {}
    }
    items.push(record);
    SaveOutcome::Appended {
        index: items.len() - 1,
    }
}

/// Removes every item whose value at the target's resolved key field equals
/// the target's value. Returns how many were removed.
pub fn delete_from<R: SectionRecord>(items: &mut Vec<R>, target: &R) -> usize {
    let Some((field, value)) = resolve_natural_key(target) else {
        return 0;
    };
    let before = items.len();
    items.retain(|item| item.key_value(field).as_ref() != Some(&value));
    before - items.len()
}

/// Finds the first record whose resolved key renders as `key`.
pub fn find_by_key<'a, R: SectionRecord>(items: &'a [R], key: &str) -> Option<&'a R> {
    items.iter().find(|item| {
        resolve_natural_key(*item).is_some_and(|(_, value)| match value {
            KeyValue::Id(id) => key.trim().parse::<i64>().is_ok_and(|wanted| wanted == id),
            KeyValue::Text(text) => text == key,
        })
    })
}

/// Section CRUD entry point bound to one store.
pub struct SectionService<'s, S: LocalStorage, D: DocumentSource> {
    store: &'s mut PortfolioStore<S, D>,
}

impl<'s, S: LocalStorage, D: DocumentSource> SectionService<'s, S, D> {
    pub fn new(store: &'s mut PortfolioStore<S, D>) -> Self {
        Self { store }
    }

    pub fn list<R: SectionRecord>(&self) -> &[R] {
        R::collection(self.store.document())
    }

    pub fn find<R: SectionRecord>(&self, key: &str) -> Option<&R> {
        find_by_key(self.list::<R>(), key)
    }

    /// Saves one record and persists the document.
    pub fn save<R: SectionRecord>(&mut self, record: R) -> StoreResult<SaveOutcome> {
        let outcome = self
            .store
            .mutate(|doc, ids| save_into(R::collection_mut(doc), record, ids))?;
        info!(
            "event=section_save module=service status=ok section={} outcome={} index={}",
            R::SECTION.slug(),
            outcome.as_str(),
            outcome.index()
        );
        Ok(outcome)
    }

    /// Replaces `original` with `updated` at the original's position.
    ///
    /// Used for records without ids, where [`Self::save`] would append.
    /// Falls back to `save` when `original` is no longer present.
    pub fn update<R: SectionRecord>(&mut self, original: &R, updated: R) -> StoreResult<SaveOutcome> {
        let Some(index) = self.list::<R>().iter().position(|item| item == original) else {
            return self.save(updated);
        };
        self.store
            .mutate(|doc, _| R::collection_mut(doc)[index] = updated)?;
        info!(
            "event=section_save module=service status=ok section={} outcome=replaced index={}",
            R::SECTION.slug(),
            index
        );
        Ok(SaveOutcome::Replaced { index })
    }

    /// Deletes by natural key and persists the document.
    pub fn delete<R: SectionRecord>(&mut self, target: &R) -> StoreResult<usize> {
        let removed = self
            .store
            .mutate(|doc, _| delete_from(R::collection_mut(doc), target))?;
        info!(
            "event=section_delete module=service status=ok section={} removed={}",
            R::SECTION.slug(),
            removed
        );
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::{delete_from, find_by_key, save_into, SaveOutcome};
    use crate::ids::SequenceIdClock;
    use crate::model::portfolio::{BlogPost, Credential};

    fn post(id: i64, title: &str) -> BlogPost {
        BlogPost {
            id,
            title: title.to_string(),
            ..BlogPost::default()
        }
    }

    #[test]
    fn save_without_id_assigns_fresh_id() {
        let ids = SequenceIdClock::starting_at(500);
        let mut posts = vec![post(1, "a")];
        let outcome = save_into(&mut posts, post(0, "b"), &ids);
        assert_eq!(outcome, SaveOutcome::Appended { index: 1 });
        assert_eq!(posts[1].id, 500);
    }

    #[test]
    fn delete_without_resolvable_key_removes_nothing() {
        let mut credentials = vec![Credential {
            name: "P.E.".to_string(),
        }];
        assert_eq!(delete_from(&mut credentials, &Credential::default()), 0);
        assert_eq!(credentials.len(), 1);
    }

    #[test]
    fn find_by_key_matches_numeric_ids() {
        let posts = vec![post(9, "nine"), post(10, "ten")];
        assert_eq!(find_by_key(&posts, "10").unwrap().title, "ten");
        assert!(find_by_key(&posts, "ten").is_none());
    }
}
