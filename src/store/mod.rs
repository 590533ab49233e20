//! Record storage, filtering and search.
//!
//! [`Store`] owns the SQLite connection. Typed access goes through the
//! repositories returned by [`Store::notes`], [`Store::snippets`] and
//! [`Store::todos`]; cross-kind text search is [`Store::search`].

mod clock;
mod entity;
mod error;
pub mod filter;
mod repository;
mod schema;
mod search;
pub(crate) mod sqlite;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entity::{Entity, Fields};
pub use error::{StoreError, StoreResult};
pub use filter::{
    DEFAULT_LIMIT, DateRange, Direction, ListOptions, Predicate, ResolvedQuery, Sort, SortKey,
    Status, resolve,
};
pub use repository::{NoteRepository, Repository, SnippetRepository, TodoRepository};
pub use schema::{SCHEMA_VERSION, create_schema, get_schema_version};
pub use search::{SearchHit, SearchQuery, SearchScope, rank};
pub use sqlite::{Store, Transaction};
