use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, params_from_iter, types::Type, types::Value, Connection, OptionalExtension};
use std::{path::Path, time::Duration};
use uuid::Uuid;

use super::{
    query,
    traits::{Page, Storage, StorageRead, StorageTx, StorageWrite},
};
use crate::types::{money, AggregateBy, AggregatedSales, Product, SalesFilter, SalesRecord};

const DB_SCHEMA_VERSION: i64 = 1;

#[derive(Clone)]
pub struct SqliteStorage {
    pub path: String,
    log_sql: bool,
}

pub struct SqliteTx {
    conn: Connection,
}

impl StorageTx for SqliteTx {
    fn commit(self) -> Result<()> {
        self.conn.execute("COMMIT", [])?;
        Ok(())
    }
}

fn log_sql_statement(sql: &str, elapsed: Duration) {
    log::debug!("SQL Query: {} | Time: {:.3}s", sql.trim(), elapsed.as_secs_f64());
}

/// Fixed-width UTC timestamp; lexical order matches chronological order.
fn encode_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

fn decode_uuid(idx: usize, raw: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

fn invalid_value(idx: usize, err: crate::types::SalesError) -> rusqlite::Error {
    rusqlite::Error::ToSqlConversionFailure(Box::new(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        format!("column {idx}: {err}"),
    )))
}

fn map_product_row(row: &rusqlite::Row<'_>, first: usize) -> rusqlite::Result<Product> {
    let id: String = row.get(first)?;
    let price_cents: i64 = row.get(first + 3)?;
    Ok(Product {
        id: decode_uuid(first, &id)?,
        name: row.get(first + 1)?,
        category: row.get(first + 2)?,
        price: money::from_cents(price_cents),
    })
}

fn map_sales_record_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SalesRecord> {
    let id: String = row.get(0)?;
    let total_sales_cents: i64 = row.get(2)?;
    let date_of_sale: String = row.get(3)?;
    Ok(SalesRecord {
        id: decode_uuid(0, &id)?,
        quantity_sold: row.get(1)?,
        total_sales_amount: money::from_cents(total_sales_cents),
        date_of_sale: decode_timestamp(3, &date_of_sale)?,
        product: map_product_row(row, 4)?,
    })
}

fn db_load_product(conn: &Connection, id: &Uuid) -> rusqlite::Result<Option<Product>> {
    conn.query_row(
        "SELECT id, name, category, price_cents FROM products WHERE id = ?1",
        params![id.to_string()],
        |row| map_product_row(row, 0),
    )
    .optional()
}

fn db_list_products(conn: &Connection) -> rusqlite::Result<Vec<Product>> {
    let mut stmt = conn.prepare("SELECT id, name, category, price_cents FROM products ORDER BY id")?;
    let mapped = stmt
        .query_map([], |row| map_product_row(row, 0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(mapped)
}

fn db_count_sales_records(conn: &Connection, filter: &SalesFilter) -> rusqlite::Result<u64> {
    let clause = query::where_clause(filter);
    let count: i64 = conn.query_row(
        &query::count_sql(&clause),
        params_from_iter(clause.params.iter()),
        |row| row.get(0),
    )?;
    Ok(count as u64)
}

fn db_list_sales_records(
    conn: &Connection,
    filter: &SalesFilter,
    page: Option<Page>,
) -> rusqlite::Result<Vec<SalesRecord>> {
    let clause = query::where_clause(filter);
    let sql = query::list_sql(&clause, page.is_some());
    let mut values = clause.params.clone();
    if let Some(page) = page {
        values.push(Value::Integer(page.limit.min(i64::MAX as u64) as i64));
        values.push(Value::Integer(page.offset.min(i64::MAX as u64) as i64));
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(values.iter()), map_sales_record_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn db_aggregate_sales(
    conn: &Connection,
    filter: &SalesFilter,
    aggregate_by: AggregateBy,
) -> rusqlite::Result<Vec<AggregatedSales>> {
    let clause = query::where_clause(filter);
    let mut stmt = conn.prepare(&query::aggregate_sql(&clause, aggregate_by))?;
    let rows = stmt
        .query_map(params_from_iter(clause.params.iter()), |row| {
            let group: Option<String> = row.get(0)?;
            let total_cents: i64 = row.get(1)?;
            let total_quantity: i64 = row.get(2)?;
            Ok(AggregatedSales::from_totals(group, total_cents, total_quantity))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn db_save_product(conn: &Connection, product: &Product) -> rusqlite::Result<()> {
    let price_cents = product.price_cents().map_err(|err| invalid_value(3, err))?;
    conn.execute(
        "INSERT INTO products (id, name, category, price_cents) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET name=excluded.name, category=excluded.category, price_cents=excluded.price_cents",
        params![
            product.id.to_string(),
            product.name,
            product.category,
            price_cents
        ],
    )?;
    Ok(())
}

fn db_save_sales_record(conn: &Connection, record: &SalesRecord) -> rusqlite::Result<()> {
    let total_sales_cents = record.amount_cents().map_err(|err| invalid_value(3, err))?;
    conn.execute(
        r#"
        INSERT INTO sales_records (id, product_id, quantity_sold, total_sales_cents, date_of_sale)
        VALUES (?1, ?2, ?3, ?4, ?5)
        ON CONFLICT(id) DO UPDATE SET
            product_id=excluded.product_id,
            quantity_sold=excluded.quantity_sold,
            total_sales_cents=excluded.total_sales_cents,
            date_of_sale=excluded.date_of_sale
        "#,
        params![
            record.id.to_string(),
            record.product.id.to_string(),
            record.quantity_sold,
            total_sales_cents,
            encode_timestamp(&record.date_of_sale)
        ],
    )?;
    Ok(())
}

fn db_delete_product(conn: &Connection, id: &Uuid) -> rusqlite::Result<bool> {
    let rows = conn.execute("DELETE FROM products WHERE id = ?1", params![id.to_string()])?;
    Ok(rows > 0)
}

impl StorageRead for SqliteTx {
    fn load_product(&self, id: &Uuid) -> Result<Option<Product>> {
        Ok(db_load_product(&self.conn, id)?)
    }

    fn list_products(&self) -> Result<Vec<Product>> {
        Ok(db_list_products(&self.conn)?)
    }

    fn count_sales_records(&self, filter: &SalesFilter) -> Result<u64> {
        Ok(db_count_sales_records(&self.conn, filter)?)
    }

    fn list_sales_records(&self, filter: &SalesFilter, page: Option<Page>) -> Result<Vec<SalesRecord>> {
        Ok(db_list_sales_records(&self.conn, filter, page)?)
    }

    fn aggregate_sales(
        &self,
        filter: &SalesFilter,
        aggregate_by: AggregateBy,
    ) -> Result<Vec<AggregatedSales>> {
        Ok(db_aggregate_sales(&self.conn, filter, aggregate_by)?)
    }
}

impl StorageWrite for SqliteTx {
    fn save_product(&self, product: &Product) -> Result<()> {
        Ok(db_save_product(&self.conn, product)?)
    }

    fn save_sales_record(&self, record: &SalesRecord) -> Result<()> {
        Ok(db_save_sales_record(&self.conn, record)?)
    }

    fn delete_product(&self, id: &Uuid) -> Result<bool> {
        Ok(db_delete_product(&self.conn, id)?)
    }
}

impl Storage for SqliteStorage {
    type Tx = SqliteTx;

    fn begin_tx(&self) -> Result<Self::Tx> {
        let conn = self.open()?;
        conn.execute("BEGIN IMMEDIATE", [])?;
        Ok(SqliteTx { conn })
    }
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().to_string(),
            log_sql: false,
        }
    }

    /// Logs every executed statement with its duration at debug level.
    pub fn with_sql_logging(mut self, enabled: bool) -> Self {
        self.log_sql = enabled;
        self
    }

    pub fn reset_all(&self) -> Result<()> {
        if !std::path::Path::new(&self.path).exists() {
            return Ok(());
        }
        std::fs::remove_file(&self.path)?;
        Ok(())
    }

    pub fn init(&self) -> Result<()> {
        self.with_conn(|_conn| Ok(()))?;
        Ok(())
    }

    fn open(&self) -> rusqlite::Result<Connection> {
        let mut conn = Connection::open(&self.path)?;
        if self.log_sql {
            conn.profile(Some(log_sql_statement));
        }
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(std::time::Duration::from_millis(500))?;
        Ok(conn)
    }

    fn with_conn<F, T>(&self, f: F) -> rusqlite::Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.open()?;
        Self::migrate(&conn)?;
        f(&conn)
    }

    fn migrate(conn: &Connection) -> rusqlite::Result<()> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version == DB_SCHEMA_VERSION {
            return Ok(());
        }

        log::info!(
            "SQLite schema migration: {} -> {}",
            version,
            DB_SCHEMA_VERSION
        );

        if version == 0 {
            conn.execute_batch(
                r#"
            CREATE TABLE products (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL CHECK (length(name) BETWEEN 1 AND 128),
                category TEXT CHECK (category IS NULL OR length(category) <= 64),
                price_cents INTEGER NOT NULL
            );
            CREATE INDEX products_category_idx ON products(category);
            CREATE TABLE sales_records (
                id TEXT PRIMARY KEY,
                product_id TEXT NOT NULL REFERENCES products(id) ON DELETE CASCADE,
                quantity_sold INTEGER NOT NULL,
                total_sales_cents INTEGER NOT NULL,
                date_of_sale TEXT NOT NULL
            );
            CREATE INDEX sales_records_product_idx ON sales_records(product_id);
            CREATE INDEX sales_records_date_idx ON sales_records(date_of_sale);
        "#,
            )?;
            conn.pragma_update(None, "user_version", DB_SCHEMA_VERSION)?;
            return Ok(());
        }

        Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::ErrorCode::SchemaChanged as i32),
            Some("database schema version mismatch; please run with --reset option".to_string()),
        ))
    }
}

impl StorageRead for SqliteStorage {
    fn load_product(&self, id: &Uuid) -> Result<Option<Product>> {
        let row = self.with_conn(|conn| db_load_product(conn, id))?;
        Ok(row)
    }

    fn list_products(&self) -> Result<Vec<Product>> {
        let rows = self.with_conn(db_list_products)?;
        Ok(rows)
    }

    fn count_sales_records(&self, filter: &SalesFilter) -> Result<u64> {
        let count = self.with_conn(|conn| db_count_sales_records(conn, filter))?;
        Ok(count)
    }

    fn list_sales_records(&self, filter: &SalesFilter, page: Option<Page>) -> Result<Vec<SalesRecord>> {
        let rows = self.with_conn(|conn| db_list_sales_records(conn, filter, page))?;
        Ok(rows)
    }

    fn aggregate_sales(
        &self,
        filter: &SalesFilter,
        aggregate_by: AggregateBy,
    ) -> Result<Vec<AggregatedSales>> {
        let rows = self.with_conn(|conn| db_aggregate_sales(conn, filter, aggregate_by))?;
        Ok(rows)
    }
}
