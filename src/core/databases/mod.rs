//! The persistence module.
//!
//! Persistence is currently implemented with one [`Database`] trait.
//!
//! There are two implementations of the trait (two drivers):
//!
//! - [`Mysql`](crate::core::databases::mysql::Mysql)
//! - [`Sqlite`](crate::core::databases::sqlite::Sqlite)
//!
//! The production dataset lives in `MySQL`; the `SQLite3` driver backs the
//! integration tests with an ephemeral store.
//!
//! The only persistent object is the conflict-event table. The gateway reads
//! it with a single fixed query (`SELECT * FROM <events_table>`) and treats
//! every column except `region` as an opaque scalar:
//!
//!  Field        | Sample data       | Description
//! ---|---|---
//!  `region`     | `Middle East`     | The grouping key. String or null.
//!  (any other)  | `1`, `2025-06-01` | Carried through untouched.
//!
//! > **NOTICE**: There are no database migrations. The schema bootstrap only
//! creates the events table when it does not exist yet.
pub mod driver;
pub mod error;
pub mod mysql;
pub mod sqlite;

use std::marker::PhantomData;

use conflict_gateway_primitives::ConflictEvent;

use self::error::Error;

struct Builder<T>
where
    T: Database,
{
    phantom: PhantomData<T>,
}

impl<T> Builder<T>
where
    T: Database + 'static,
{
    /// .
    ///
    /// # Errors
    ///
    /// Will return `r2d2::Error` if `db_path` is not able to create a database.
    pub(self) fn build(db_path: &str, pool_size: u32) -> Result<Box<dyn Database>, Error> {
        Ok(Box::new(T::new(db_path, pool_size)?))
    }
}

/// The persistence trait. It contains all the methods to interact with the database.
pub trait Database: Sync + Send {
    /// It instantiates a new database driver with its connection pool.
    ///
    /// The pool is built eagerly: the driver does not come into existence
    /// unless the store is reachable.
    ///
    /// # Errors
    ///
    /// Will return `r2d2::Error` if `db_path` is not able to create a database.
    fn new(db_path: &str, pool_size: u32) -> Result<Self, Error>
    where
        Self: std::marker::Sized;

    // Schema

    /// It generates the database tables. SQL queries are hardcoded in the trait
    /// implementation.
    ///
    /// # Context: Schema
    ///
    /// # Errors
    ///
    /// Will return `Error` if unable to create own tables.
    fn create_database_tables(&self, events_table: &str) -> Result<(), Error>;

    /// It drops the database tables.
    ///
    /// # Context: Schema
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to drop tables.
    fn drop_database_tables(&self, events_table: &str) -> Result<(), Error>;

    // Conflict events

    /// It loads the whole conflict-event table, in the order the store
    /// returns it.
    ///
    /// # Context: Conflict Events
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to load.
    fn load_conflict_events(&self, events_table: &str) -> Result<Vec<ConflictEvent>, Error>;

    /// It adds a conflict event to the table. Used to seed stores (tests,
    /// import tooling); the HTTP surface never writes.
    ///
    /// # Context: Conflict Events
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to save.
    fn add_conflict_event(&self, events_table: &str, event: &ConflictEvent) -> Result<usize, Error>;
}
