use rusqlite::types::Value;

use crate::types::{AggregateBy, CategoryFilter, SalesFilter};

/// Length of the `YYYY-MM` prefix of a stored timestamp.
const MONTH_PREFIX_LEN: usize = 7;

const FROM_SALES: &str =
    "FROM sales_records s JOIN products p ON p.id = s.product_id";

#[derive(Debug, Default, PartialEq)]
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Builds the WHERE clause for a filter over `sales_records s` joined with
/// `products p`. Returns an empty clause when the filter is empty.
pub fn where_clause(filter: &SalesFilter) -> WhereClause {
    let mut conditions: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    // Bare column comparisons keep sales_records_date_idx usable; stored
    // timestamps are fixed width, so a `YYYY-MM-DD` bound compares lexically.
    if let Some(start) = filter.start_date {
        params.push(Value::Text(start.format("%Y-%m-%d").to_string()));
        conditions.push(format!("s.date_of_sale >= ?{}", params.len()));
    }
    if let Some(next_day) = filter.end_date.and_then(|end| end.succ_opt()) {
        params.push(Value::Text(next_day.format("%Y-%m-%d").to_string()));
        conditions.push(format!("s.date_of_sale < ?{}", params.len()));
    }
    match &filter.category {
        Some(CategoryFilter::Exact(category)) => {
            params.push(Value::Text(category.clone()));
            conditions.push(format!("p.category = ?{}", params.len()));
        }
        Some(CategoryFilter::Empty) => conditions.push("p.category = ''".to_string()),
        Some(CategoryFilter::Null) => conditions.push("p.category IS NULL".to_string()),
        None => {}
    }

    if conditions.is_empty() {
        return WhereClause::default();
    }
    WhereClause {
        sql: format!(" WHERE {}", conditions.join(" AND ")),
        params,
    }
}

pub fn count_sql(clause: &WhereClause) -> String {
    format!("SELECT COUNT(*) {FROM_SALES}{}", clause.sql)
}

/// Select for listing; paging placeholders follow the filter parameters.
pub fn list_sql(clause: &WhereClause, paged: bool) -> String {
    let mut sql = format!(
        r#"SELECT s.id, s.quantity_sold, s.total_sales_cents, s.date_of_sale,
               p.id, p.name, p.category, p.price_cents
        {FROM_SALES}{}
        ORDER BY s.date_of_sale, s.id"#,
        clause.sql
    );
    if paged {
        let n = clause.params.len();
        sql.push_str(&format!(" LIMIT ?{} OFFSET ?{}", n + 1, n + 2));
    }
    sql
}

fn group_expr(aggregate_by: AggregateBy) -> String {
    match aggregate_by {
        AggregateBy::Category => "p.category".to_string(),
        AggregateBy::Month => format!("substr(s.date_of_sale, 1, {MONTH_PREFIX_LEN})"),
    }
}

/// Sums amount (in cents) and quantity per group, ordered by group with the
/// NULL group last. Plain `ORDER BY grp` on SQLite would sort NULL first.
pub fn aggregate_sql(clause: &WhereClause, aggregate_by: AggregateBy) -> String {
    format!(
        r#"SELECT {group} AS grp, SUM(s.total_sales_cents), SUM(s.quantity_sold)
        {FROM_SALES}{where_sql}
        GROUP BY grp
        ORDER BY grp IS NULL, grp"#,
        group = group_expr(aggregate_by),
        where_sql = clause.sql,
    )
}
