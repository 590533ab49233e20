//! Typed repositories over the record store.

use crate::domain::{Note, NotePatch, Snippet, SnippetPatch, Todo, TodoPatch, ValidationError};
use crate::store::entity::Entity;
use crate::store::filter::{ListOptions, ResolvedQuery, resolve};
use crate::store::{Store, StoreError, StoreResult};
use log::info;
use std::marker::PhantomData;

/// Create, read, update, delete and list records of one kind.
///
/// A repository is a thin borrowed view of a [`Store`]; obtain one with
/// [`Store::notes`], [`Store::snippets`] or [`Store::todos`].
pub struct Repository<'s, E> {
    store: &'s Store,
    entity: PhantomData<E>,
}

pub type NoteRepository<'s> = Repository<'s, Note>;
pub type SnippetRepository<'s> = Repository<'s, Snippet>;
pub type TodoRepository<'s> = Repository<'s, Todo>;

impl Store {
    pub fn notes(&self) -> NoteRepository<'_> {
        Repository::new(self)
    }

    pub fn snippets(&self) -> SnippetRepository<'_> {
        Repository::new(self)
    }

    pub fn todos(&self) -> TodoRepository<'_> {
        Repository::new(self)
    }
}

impl<'s, E: Entity> Repository<'s, E> {
    pub fn new(store: &'s Store) -> Self {
        Self {
            store,
            entity: PhantomData,
        }
    }

    /// Validates and stores a new record, returning it as stored.
    ///
    /// Nothing is written if validation fails.
    pub fn create(&self, new: E::New) -> StoreResult<E> {
        let fields = E::insert_fields(new)?;
        let id = self.store.insert_record(E::KIND, fields)?;
        info!("created {} #{}", E::KIND, id);
        self.get(id)
    }

    /// Loads a record, failing with `NotFound` if it does not exist.
    pub fn get(&self, id: i64) -> StoreResult<E> {
        self.find(id)?
            .ok_or_else(|| StoreError::not_found(E::KIND, id))
    }

    pub fn find(&self, id: i64) -> StoreResult<Option<E>> {
        self.store.fetch_record(E::KIND, E::COLUMNS, id, E::from_row)
    }

    /// Applies a partial update and returns the updated record.
    ///
    /// Only the fields set on the patch are written. `updated_at` moves
    /// forward even for an empty patch.
    pub fn update(&self, id: i64, patch: E::Patch) -> StoreResult<E> {
        let fields = E::patch_fields(patch)?;
        self.store.update_record(E::KIND, id, fields)?;
        info!("updated {} #{}", E::KIND, id);
        self.get(id)
    }

    /// Deletes the given ids, returning how many existed.
    pub fn delete(&self, ids: &[i64]) -> StoreResult<usize> {
        let removed = self.store.delete_records(E::KIND, ids)?;
        info!("deleted {} {}", removed, E::KIND.plural());
        Ok(removed)
    }

    /// Lists records matching `options`.
    pub fn list(&self, options: &ListOptions) -> StoreResult<Vec<E>> {
        let query = resolve(E::KIND, options)?;
        self.run(&query)
    }

    /// Runs an already resolved query against this kind's table.
    ///
    /// A query resolved for another kind is rejected.
    pub fn run(&self, query: &ResolvedQuery) -> StoreResult<Vec<E>> {
        if query.kind != E::KIND {
            return Err(ValidationError::new(format!(
                "a query for {} cannot run against {}",
                query.kind.plural(),
                E::KIND.plural()
            ))
            .into());
        }
        self.store
            .select_records(query, E::COLUMNS, E::TEXT_COLUMNS, E::from_row)
    }

    pub fn count(&self) -> StoreResult<usize> {
        self.store.count_records(E::KIND)
    }
}

// ===========================================
// Kind-specific operations
// ===========================================

impl Repository<'_, Todo> {
    /// Marks a todo completed.
    pub fn mark_done(&self, id: i64) -> StoreResult<Todo> {
        self.update(id, TodoPatch::new().completed(true))
    }

    /// Marks a todo pending again.
    pub fn mark_undone(&self, id: i64) -> StoreResult<Todo> {
        self.update(id, TodoPatch::new().completed(false))
    }
}

impl Repository<'_, Note> {
    pub fn set_starred(&self, id: i64, starred: bool) -> StoreResult<Note> {
        self.update(id, NotePatch::new().starred(starred))
    }
}

impl Repository<'_, Snippet> {
    pub fn set_starred(&self, id: i64, starred: bool) -> StoreResult<Snippet> {
        self.update(id, SnippetPatch::new().starred(starred))
    }
}
