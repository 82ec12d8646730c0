//! The `MySQL` database driver.
use conflict_gateway_configuration::DEFAULT_TIMEOUT;
use conflict_gateway_primitives::{ConflictEvent, DatabaseDriver, REGION_COLUMN};
use r2d2::Pool;
use r2d2_mysql::mysql::prelude::Queryable;
use r2d2_mysql::mysql::{Opts, OptsBuilder, Row, Value};
use r2d2_mysql::MySqlConnectionManager;

use super::{Database, Error};

const DRIVER: DatabaseDriver = DatabaseDriver::MySQL;

pub struct Mysql {
    pool: Pool<MySqlConnectionManager>,
}

impl Database for Mysql {
    /// It instantiates a new `MySQL` database driver.
    ///
    /// Refer to [`databases::Database::new`](crate::core::databases::Database::new).
    ///
    /// # Errors
    ///
    /// Will return `r2d2::Error` if `db_path` is not able to create `MySQL` database.
    fn new(db_path: &str, pool_size: u32) -> Result<Self, Error> {
        let opts = Opts::from_url(db_path)?;
        let builder = OptsBuilder::from_opts(opts);
        let manager = MySqlConnectionManager::new(builder);
        let pool = r2d2::Pool::builder()
            .max_size(pool_size)
            .connection_timeout(DEFAULT_TIMEOUT)
            .build(manager)
            .map_err(|e| (e, DRIVER))?;

        Ok(Self { pool })
    }

    /// Refer to [`databases::Database::create_database_tables`](crate::core::databases::Database::create_database_tables).
    fn create_database_tables(&self, events_table: &str) -> Result<(), Error> {
        let create_events_table = format!(
            "
        CREATE TABLE IF NOT EXISTS `{events_table}` (
            id INTEGER PRIMARY KEY AUTO_INCREMENT,
            event_date VARCHAR(32),
            region VARCHAR(255),
            country VARCHAR(255),
            event_type VARCHAR(255),
            fatalities INTEGER
        );"
        );

        let mut conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        conn.query_drop(&create_events_table)?;

        Ok(())
    }

    /// Refer to [`databases::Database::drop_database_tables`](crate::core::databases::Database::drop_database_tables).
    fn drop_database_tables(&self, events_table: &str) -> Result<(), Error> {
        let drop_events_table = format!(
            "
        DROP TABLE `{events_table}`;"
        );

        let mut conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        conn.query_drop(&drop_events_table)?;

        Ok(())
    }

    /// Refer to [`databases::Database::load_conflict_events`](crate::core::databases::Database::load_conflict_events).
    fn load_conflict_events(&self, events_table: &str) -> Result<Vec<ConflictEvent>, Error> {
        let mut conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        let rows: Vec<Row> = conn.query(format!("SELECT * FROM `{events_table}`"))?;

        let mut events = Vec::with_capacity(rows.len());

        for row in &rows {
            let mut region = None;
            let mut fields = serde_json::Map::new();

            for (index, column) in row.columns_ref().iter().enumerate() {
                let name = column.name_str();
                let value = scalar_to_json(row.as_ref(index).unwrap_or(&Value::NULL));

                if name == REGION_COLUMN {
                    region = region_from_json(value);
                } else {
                    fields.insert(name.into_owned(), value);
                }
            }

            events.push(ConflictEvent::new(region, fields));
        }

        Ok(events)
    }

    /// Refer to [`databases::Database::add_conflict_event`](crate::core::databases::Database::add_conflict_event).
    fn add_conflict_event(&self, events_table: &str, event: &ConflictEvent) -> Result<usize, Error> {
        let mut conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        let mut columns: Vec<String> = vec![format!("`{REGION_COLUMN}`")];
        let mut values: Vec<Value> = vec![match &event.region {
            Some(region) => Value::Bytes(region.clone().into_bytes()),
            None => Value::NULL,
        }];

        for (name, value) in &event.fields {
            columns.push(format!("`{name}`"));
            values.push(json_to_scalar(value));
        }

        let placeholders = vec!["?"; values.len()].join(", ");
        let statement = format!(
            "INSERT INTO `{events_table}` ({}) VALUES ({placeholders})",
            columns.join(", ")
        );

        conn.exec_drop(&statement, values)?;

        Ok(1)
    }
}

/// It maps a `MySQL` scalar to its JSON counterpart. Temporal values are
/// rendered as strings; non-finite floats degrade to null.
fn scalar_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::NULL => serde_json::Value::Null,
        Value::Bytes(bytes) => serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned()),
        Value::Int(int) => serde_json::Value::Number((*int).into()),
        Value::UInt(uint) => serde_json::Value::Number((*uint).into()),
        Value::Float(float) => serde_json::Number::from_f64(f64::from(*float)).map_or(serde_json::Value::Null, serde_json::Value::Number),
        Value::Double(double) => serde_json::Number::from_f64(*double).map_or(serde_json::Value::Null, serde_json::Value::Number),
        Value::Date(year, month, day, hour, minute, second, _micros) => serde_json::Value::String(format!(
            "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
        )),
        Value::Time(negative, days, hours, minutes, seconds, _micros) => {
            let sign = if *negative { "-" } else { "" };
            let total_hours = u32::from(*hours) + days * 24;
            serde_json::Value::String(format!("{sign}{total_hours:02}:{minutes:02}:{seconds:02}"))
        }
    }
}

/// It maps a JSON scalar back to a `MySQL` value, for inserts.
fn json_to_scalar(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::NULL,
        serde_json::Value::Bool(boolean) => Value::Int(i64::from(*boolean)),
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Value::Int(int)
            } else if let Some(uint) = number.as_u64() {
                Value::UInt(uint)
            } else {
                Value::Double(number.as_f64().unwrap_or_default())
            }
        }
        serde_json::Value::String(string) => Value::Bytes(string.clone().into_bytes()),
        // Compound values are not expected in scalar rows.
        other => Value::Bytes(other.to_string().into_bytes()),
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
