//! The `SQLite3` database driver.
use conflict_gateway_configuration::DEFAULT_TIMEOUT;
use conflict_gateway_primitives::{ConflictEvent, DatabaseDriver, REGION_COLUMN};
use r2d2::Pool;
use r2d2_sqlite::rusqlite;
use r2d2_sqlite::rusqlite::types::ValueRef;
use r2d2_sqlite::SqliteConnectionManager;

use super::{Database, Error};

const DRIVER: DatabaseDriver = DatabaseDriver::Sqlite3;

pub struct Sqlite {
    pool: Pool<SqliteConnectionManager>,
}

impl Database for Sqlite {
    /// It instantiates a new `SQLite3` database driver.
    ///
    /// Refer to [`databases::Database::new`](crate::core::databases::Database::new).
    ///
    /// # Errors
    ///
    /// Will return `r2d2::Error` if `db_path` is not able to create `SqLite` database.
    fn new(db_path: &str, pool_size: u32) -> Result<Sqlite, Error> {
        let cm = SqliteConnectionManager::file(db_path);

        Pool::builder()
            .max_size(pool_size)
            .connection_timeout(DEFAULT_TIMEOUT)
            .build(cm)
            .map_or_else(|err| Err((err, DRIVER).into()), |pool| Ok(Sqlite { pool }))
    }

    /// Refer to [`databases::Database::create_database_tables`](crate::core::databases::Database::create_database_tables).
    fn create_database_tables(&self, events_table: &str) -> Result<(), Error> {
        let create_events_table = format!(
            "
        CREATE TABLE IF NOT EXISTS \"{events_table}\" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            event_date TEXT,
            region TEXT,
            country TEXT,
            event_type TEXT,
            fatalities INTEGER
        );"
        );

        let conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        conn.execute(&create_events_table, [])?;

        Ok(())
    }

    /// Refer to [`databases::Database::drop_database_tables`](crate::core::databases::Database::drop_database_tables).
    fn drop_database_tables(&self, events_table: &str) -> Result<(), Error> {
        let drop_events_table = format!(
            "
        DROP TABLE \"{events_table}\";"
        );

        let conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        conn.execute(&drop_events_table, [])?;

        Ok(())
    }

    /// Refer to [`databases::Database::load_conflict_events`](crate::core::databases::Database::load_conflict_events).
    fn load_conflict_events(&self, events_table: &str) -> Result<Vec<ConflictEvent>, Error> {
        let conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        let mut stmt = conn.prepare(&format!("SELECT * FROM \"{events_table}\""))?;

        let column_names: Vec<String> = stmt.column_names().into_iter().map(ToString::to_string).collect();

        let mut rows = stmt.query([])?;

        let mut events = Vec::new();

        while let Some(row) = rows.next()? {
            let mut region = None;
            let mut fields = serde_json::Map::new();

            for (index, name) in column_names.iter().enumerate() {
                let value = scalar_to_json(row.get_ref(index)?);

                if name == REGION_COLUMN {
                    region = region_from_json(value);
                } else {
                    fields.insert(name.clone(), value);
                }
            }

            events.push(ConflictEvent::new(region, fields));
        }

        Ok(events)
    }

    /// Refer to [`databases::Database::add_conflict_event`](crate::core::databases::Database::add_conflict_event).
    fn add_conflict_event(&self, events_table: &str, event: &ConflictEvent) -> Result<usize, Error> {
        let conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        let mut columns: Vec<String> = vec![format!("\"{REGION_COLUMN}\"")];
        let mut values: Vec<rusqlite::types::Value> = vec![match &event.region {
            Some(region) => rusqlite::types::Value::Text(region.clone()),
            None => rusqlite::types::Value::Null,
        }];

        for (name, value) in &event.fields {
            columns.push(format!("\"{name}\""));
            values.push(json_to_scalar(value));
        }

        let placeholders = vec!["?"; values.len()].join(", ");
        let statement = format!(
            "INSERT INTO \"{events_table}\" ({}) VALUES ({placeholders})",
            columns.join(", ")
        );

        let updated = conn.execute(&statement, rusqlite::params_from_iter(values))?;

        if updated > 0 {
            return Ok(updated);
        }

        Err(Error::InsertFailed {
            location: std::panic::Location::caller(),
            driver: DRIVER,
        })
    }
}

/// It maps a `SQLite3` scalar to its JSON counterpart. Blobs are not
/// scalars and degrade to null.
fn scalar_to_json(value: ValueRef<'_>) -> serde_json::Value {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => serde_json::Value::Null,
        ValueRef::Integer(int) => serde_json::Value::Number(int.into()),
        ValueRef::Real(real) => serde_json::Number::from_f64(real).map_or(serde_json::Value::Null, serde_json::Value::Number),
        ValueRef::Text(text) => serde_json::Value::String(String::from_utf8_lossy(text).into_owned()),
    }
}

/// It maps a JSON scalar back to a `SQLite3` value, for inserts.
fn json_to_scalar(value: &serde_json::Value) -> rusqlite::types::Value {
    match value {
        serde_json::Value::Null => rusqlite::types::Value::Null,
        serde_json::Value::Bool(boolean) => rusqlite::types::Value::Integer(i64::from(*boolean)),
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                rusqlite::types::Value::Integer(int)
            } else {
                rusqlite::types::Value::Real(number.as_f64().unwrap_or_default())
            }
        }
        serde_json::Value::String(string) => rusqlite::types::Value::Text(string.clone()),
        // Compound values are not expected in scalar rows.
        other => rusqlite::types::Value::Text(other.to_string()),
    }
}

/// The grouping key is a string-or-null column; anything else is rendered.
fn region_from_json(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(region) => Some(region),
        other => Some(other.to_string()),
    }
}
