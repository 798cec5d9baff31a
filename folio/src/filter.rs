//! # Filter Module
//!
//! This module translates filter specifications into SQL conditions. Each
//! filter is a tagged variant ([`Filter`]) over a closed scalar value set
//! ([`Value`]), so unsupported shapes are rejected when the filter is
//! built instead of degrading to broken SQL at render time.
//!
//! Filters render two ways:
//!
//! - **Parameterized** (structured path): SQL text with driver-aware
//!   placeholders plus values bound into `AnyArguments`.
//! - **Literal** (raw path): a ` WHERE … AND …` clause with the values
//!   formatted inline (strings quoted, embedded quotes doubled).
//!
//! ## Example
//!
//! ```rust,ignore
//! use folio::{Filter, Op};
//!
//! let set: FilterSet = [
//!     Filter::compare("status", Op::Eq, "active"),
//!     Filter::is_null("deleted_at"),
//!     Filter::raw("score > 50"),
//! ].into_iter().collect();
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Arguments, any::AnyArguments};
use uuid::Uuid;

use crate::{database::Drivers, errors::Error};

/// The fixed set of comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// `=`
    Eq,
    /// `<>` (accepted spellings: `!=`, `<>`)
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `LIKE`
    Like,
}

impl Op {
    /// The SQL token for this operator.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "<>",
            Op::Gt => ">",
            Op::Ge => ">=",
            Op::Lt => "<",
            Op::Le => "<=",
            Op::Like => "LIKE",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl std::str::FromStr for Op {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" | "==" => Ok(Op::Eq),
            "!=" | "<>" => Ok(Op::Ne),
            ">" => Ok(Op::Gt),
            ">=" => Ok(Op::Ge),
            "<" => Ok(Op::Lt),
            "<=" => Ok(Op::Le),
            _ if s.eq_ignore_ascii_case("like") => Ok(Op::Like),
            _ => Err(Error::unknown_operator(s)),
        }
    }
}

/// A scalar filter value.
///
/// The set is closed: anything outside it (JSON arrays, objects) is an
/// [`Error::UnsupportedValue`] at construction time.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// Converts a loosely-typed JSON value into a scalar.
    ///
    /// Numbers prefer `Int` and fall back to `Float`; `null`, arrays and
    /// objects are rejected.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, Error> {
        match value {
            serde_json::Value::Bool(v) => Ok(Value::Bool(*v)),
            serde_json::Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    Ok(Value::Int(v))
                } else if let Some(v) = n.as_f64() {
                    Ok(Value::Float(v))
                } else {
                    Err(Error::unsupported_value(&n.to_string()))
                }
            }
            serde_json::Value::String(v) => Ok(Value::Text(v.clone())),
            serde_json::Value::Null => Err(Error::unsupported_value("null is not a scalar; use an IS NULL filter")),
            serde_json::Value::Array(_) => Err(Error::unsupported_value("JSON array")),
            serde_json::Value::Object(_) => Err(Error::unsupported_value("JSON object")),
        }
    }

    /// Binds the value into the argument list for a parameterized statement.
    ///
    /// UUIDs bind as hyphenated text on every driver; timestamps use the
    /// driver's expected format.
    pub(crate) fn bind<'q>(&self, args: &mut AnyArguments<'q>, driver: &Drivers) {
        match self {
            Value::Bool(v) => {
                let _ = args.add(*v);
            }
            Value::Int(v) => {
                let _ = args.add(*v);
            }
            Value::Float(v) => {
                let _ = args.add(*v);
            }
            Value::Text(v) => {
                let _ = args.add(v.clone());
            }
            Value::Uuid(v) => {
                let _ = args.add(v.hyphenated().to_string());
            }
            Value::Timestamp(v) => {
                let _ = args.add(format_timestamp(v, driver));
            }
        }
    }

    /// Renders the value as an inline SQL literal for the raw path.
    ///
    /// Strings are single-quoted with embedded quotes doubled. Formatting is
    /// total over the variant set, so the raw path never emits an empty
    /// fragment.
    pub(crate) fn literal(&self, driver: &Drivers) -> String {
        match self {
            Value::Bool(true) => "TRUE".to_string(),
            Value::Bool(false) => "FALSE".to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Text(v) => quote_literal(v),
            Value::Uuid(v) => quote_literal(&v.hyphenated().to_string()),
            Value::Timestamp(v) => quote_literal(&format_timestamp(v, driver)),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> Self {
        match v {
            Value::Bool(v) => serde_json::Value::Bool(*v),
            Value::Int(v) => serde_json::Value::from(*v),
            Value::Float(v) => serde_json::Value::from(*v),
            Value::Text(v) => serde_json::Value::String(v.clone()),
            Value::Uuid(v) => serde_json::Value::String(v.hyphenated().to_string()),
            Value::Timestamp(v) => serde_json::Value::String(v.to_rfc3339()),
        }
    }
}

/// Formats a timestamp the way the driver expects it.
///
/// PostgreSQL and SQLite take RFC 3339; MySQL wants its DATETIME format.
pub(crate) fn format_timestamp(value: &DateTime<Utc>, driver: &Drivers) -> String {
    match driver {
        Drivers::Postgres | Drivers::SQLite => value.to_rfc3339(),
        Drivers::MySQL => value.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
    }
}

fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// A single filter condition.
///
/// The wire shape is a `{field, op, value}` triple; see
/// [`Filter::from_parts`] for the mapping rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FilterParts", into = "FilterParts")]
pub enum Filter {
    /// `<field> <op> <value>`, parameterized on the structured path.
    Compare { field: String, op: Op, value: Value },
    /// `<field> IS NULL`.
    IsNull { field: String },
    /// A caller-trusted SQL fragment, inserted verbatim (no escaping).
    /// Parenthesized when AND-joined with other conditions.
    Raw(String),
}

impl Filter {
    /// A comparison filter.
    pub fn compare(field: impl Into<String>, op: Op, value: impl Into<Value>) -> Self {
        Filter::Compare { field: field.into(), op, value: value.into() }
    }

    /// An `IS NULL` filter.
    pub fn is_null(field: impl Into<String>) -> Self {
        Filter::IsNull { field: field.into() }
    }

    /// A verbatim SQL condition.
    pub fn raw(sql: impl Into<String>) -> Self {
        Filter::Raw(sql.into())
    }

    /// Builds a filter from a loosely-typed `{field, op, value}` triple.
    ///
    /// Rules:
    /// - a JSON `null` value yields [`Filter::IsNull`] no matter the operator;
    /// - operator `raw` requires a string value, inserted verbatim;
    /// - otherwise the operator must parse as an [`Op`] and the value as a
    ///   scalar [`Value`].
    pub fn from_parts(field: &str, op: &str, value: serde_json::Value) -> Result<Self, Error> {
        if value.is_null() {
            if field.is_empty() {
                return Err(Error::invalid_filter("filter field is empty"));
            }
            return Ok(Filter::IsNull { field: field.to_string() });
        }

        if op.eq_ignore_ascii_case("raw") {
            return match value {
                serde_json::Value::String(sql) => Ok(Filter::Raw(sql)),
                other => {
                    Err(Error::InvalidFilter(format!("raw filter value must be a string, got {}", other)))
                }
            };
        }

        if field.is_empty() {
            return Err(Error::invalid_filter("filter field is empty"));
        }

        let op = op.parse::<Op>()?;
        Ok(Filter::Compare { field: field.to_string(), op, value: Value::from_json(&value)? })
    }
}

/// The `{field, op, value}` triple a [`Filter`] serializes as.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FilterParts {
    #[serde(default)]
    field: String,
    #[serde(default = "default_op")]
    op: String,
    #[serde(default)]
    value: serde_json::Value,
}

fn default_op() -> String {
    "=".to_string()
}

impl TryFrom<FilterParts> for Filter {
    type Error = Error;

    fn try_from(parts: FilterParts) -> Result<Self, Self::Error> {
        Filter::from_parts(&parts.field, &parts.op, parts.value)
    }
}

impl From<Filter> for FilterParts {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Compare { field, op, value } => FilterParts {
                field,
                op: op.as_sql().to_string(),
                value: serde_json::Value::from(&value),
            },
            Filter::IsNull { field } => {
                FilterParts { field, op: default_op(), value: serde_json::Value::Null }
            }
            Filter::Raw(sql) => FilterParts {
                field: String::new(),
                op: "raw".to_string(),
                value: serde_json::Value::String(sql),
            },
        }
    }
}

/// An ordered list of filters, AND-joined in insertion order.
///
/// Deserializes from a JSON array of `{field, op, value}` triples; the
/// generated SQL is deterministic because the order is the list order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(Vec<Filter>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, filter: Filter) {
        self.0.push(filter);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.0.iter()
    }

    /// Appends ` AND <condition>` per filter to a statement that already
    /// carries a `WHERE 1=1` anchor, binding compared values into `args`.
    pub(crate) fn push_conditions<'q>(
        &self,
        sql: &mut String,
        args: &mut AnyArguments<'q>,
        driver: &Drivers,
        arg_counter: &mut usize,
    ) {
        for filter in &self.0 {
            match filter {
                Filter::Compare { field, op, value } => {
                    sql.push_str(" AND ");
                    sql.push_str(field);
                    sql.push(' ');
                    sql.push_str(op.as_sql());
                    sql.push(' ');
                    driver.push_placeholder(sql, arg_counter);
                    value.bind(args, driver);
                }
                Filter::IsNull { field } => {
                    sql.push_str(" AND ");
                    sql.push_str(field);
                    sql.push_str(" IS NULL");
                }
                Filter::Raw(fragment) => {
                    sql.push_str(" AND (");
                    sql.push_str(fragment);
                    sql.push(')');
                }
            }
        }
    }

    /// Renders a literal ` WHERE … AND …` clause for the raw path.
    ///
    /// Returns an empty string when there are no filters. A lone raw
    /// fragment is kept unwrapped; fragments only gain parentheses when
    /// joined with other conditions.
    pub(crate) fn literal_clause(&self, driver: &Drivers) -> String {
        if self.0.is_empty() {
            return String::new();
        }

        let joined = self.0.len() > 1;
        let conditions: Vec<String> = self
            .0
            .iter()
            .map(|filter| match filter {
                Filter::Compare { field, op, value } => {
                    format!("{} {} {}", field, op.as_sql(), value.literal(driver))
                }
                Filter::IsNull { field } => format!("{} IS NULL", field),
                Filter::Raw(fragment) if joined => format!("({})", fragment),
                Filter::Raw(fragment) => fragment.clone(),
            })
            .collect();

        format!(" WHERE {}", conditions.join(" AND "))
    }
}

impl FromIterator<Filter> for FilterSet {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        FilterSet(iter.into_iter().collect())
    }
}

impl IntoIterator for FilterSet {
    type Item = Filter;
    type IntoIter = std::vec::IntoIter<Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(set: &FilterSet, driver: Drivers) -> (String, AnyArguments<'static>) {
        let mut sql = String::from("SELECT * FROM t WHERE 1=1");
        let mut args = AnyArguments::default();
        let mut counter = 1;
        set.push_conditions(&mut sql, &mut args, &driver, &mut counter);
        (sql, args)
    }

    #[test]
    fn compare_uses_driver_placeholders() {
        let set: FilterSet = [Filter::compare("status", Op::Eq, "active")].into_iter().collect();

        let (sqlite, _) = render(&set, Drivers::SQLite);
        assert_eq!(sqlite, "SELECT * FROM t WHERE 1=1 AND status = ?");

        let (postgres, _) = render(&set, Drivers::Postgres);
        assert_eq!(postgres, "SELECT * FROM t WHERE 1=1 AND status = $1");
    }

    #[test]
    fn placeholder_counter_advances_per_filter() {
        let set: FilterSet = [
            Filter::compare("status", Op::Eq, "active"),
            Filter::is_null("deleted_at"),
            Filter::compare("score", Op::Gt, 50i64),
        ]
        .into_iter()
        .collect();

        let (sql, _) = render(&set, Drivers::Postgres);
        assert_eq!(sql, "SELECT * FROM t WHERE 1=1 AND status = $1 AND deleted_at IS NULL AND score > $2");
    }

    #[test]
    fn literal_clause_joins_in_insertion_order() {
        let set: FilterSet = [
            Filter::compare("status", Op::Ne, "archived"),
            Filter::is_null("deleted_at"),
            Filter::raw("score > 50"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            set.literal_clause(&Drivers::SQLite),
            " WHERE status <> 'archived' AND deleted_at IS NULL AND (score > 50)"
        );
    }

    #[test]
    fn lone_raw_fragment_is_verbatim() {
        let set: FilterSet = [Filter::raw("score > 50 OR featured = 1")].into_iter().collect();
        assert_eq!(set.literal_clause(&Drivers::SQLite), " WHERE score > 50 OR featured = 1");
    }

    #[test]
    fn empty_set_renders_nothing() {
        assert_eq!(FilterSet::new().literal_clause(&Drivers::SQLite), "");
    }

    #[test]
    fn string_literals_double_embedded_quotes() {
        let set: FilterSet = [Filter::compare("name", Op::Eq, "O'Brien")].into_iter().collect();
        assert_eq!(set.literal_clause(&Drivers::SQLite), " WHERE name = 'O''Brien'");
    }

    #[test]
    fn scalar_literals_per_variant() {
        assert_eq!(Value::Bool(true).literal(&Drivers::SQLite), "TRUE");
        assert_eq!(Value::Int(-7).literal(&Drivers::SQLite), "-7");
        assert_eq!(Value::Float(2.5).literal(&Drivers::SQLite), "2.5");

        let id = Uuid::nil();
        assert_eq!(Value::Uuid(id).literal(&Drivers::SQLite), "'00000000-0000-0000-0000-000000000000'");
    }

    #[test]
    fn timestamp_format_depends_on_driver() {
        let ts: DateTime<Utc> = "2024-01-15T14:30:00Z".parse().unwrap();
        assert_eq!(format_timestamp(&ts, &Drivers::SQLite), "2024-01-15T14:30:00+00:00");
        assert_eq!(format_timestamp(&ts, &Drivers::MySQL), "2024-01-15 14:30:00.000000");
    }

    #[test]
    fn null_value_becomes_is_null_regardless_of_operator() {
        let filter = Filter::from_parts("deleted_at", ">", serde_json::Value::Null).unwrap();
        assert_eq!(filter, Filter::is_null("deleted_at"));
    }

    #[test]
    fn raw_operator_takes_the_value_verbatim() {
        let filter = Filter::from_parts("", "raw", json!("price BETWEEN 10 AND 20")).unwrap();
        assert_eq!(filter, Filter::raw("price BETWEEN 10 AND 20"));
    }

    #[test]
    fn raw_operator_rejects_non_string_values() {
        let err = Filter::from_parts("", "raw", json!(42)).unwrap_err();
        assert!(matches!(err, Error::InvalidFilter(_)));
    }

    #[test]
    fn unknown_operator_is_an_error() {
        let err = Filter::from_parts("age", "~", json!(3)).unwrap_err();
        assert!(matches!(err, Error::UnknownOperator(_)));
    }

    #[test]
    fn non_scalar_values_are_rejected() {
        let err = Filter::from_parts("tags", "=", json!(["a", "b"])).unwrap_err();
        assert!(matches!(err, Error::UnsupportedValue(_)));

        let err = Filter::from_parts("meta", "=", json!({"k": 1})).unwrap_err();
        assert!(matches!(err, Error::UnsupportedValue(_)));
    }

    #[test]
    fn empty_field_is_rejected() {
        let err = Filter::from_parts("", "=", json!(1)).unwrap_err();
        assert!(matches!(err, Error::InvalidFilter(_)));
    }

    #[test]
    fn operator_spellings() {
        assert_eq!("==".parse::<Op>().unwrap(), Op::Eq);
        assert_eq!("!=".parse::<Op>().unwrap(), Op::Ne);
        assert_eq!("<>".parse::<Op>().unwrap(), Op::Ne);
        assert_eq!("LIKE".parse::<Op>().unwrap(), Op::Like);
        assert_eq!("like".parse::<Op>().unwrap(), Op::Like);
    }

    #[test]
    fn filter_set_deserializes_from_triples() {
        let set: FilterSet = serde_json::from_value(json!([
            {"field": "status", "op": "=", "value": "active"},
            {"field": "deleted_at", "value": null},
            {"op": "raw", "value": "score > 50"},
        ]))
        .unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().next().unwrap(), &Filter::compare("status", Op::Eq, "active"));
        assert_eq!(
            set.literal_clause(&Drivers::SQLite),
            " WHERE status = 'active' AND deleted_at IS NULL AND (score > 50)"
        );
    }

    #[test]
    fn filter_serialization_round_trips() {
        let set: FilterSet = [
            Filter::compare("age", Op::Ge, 21i64),
            Filter::is_null("deleted_at"),
            Filter::raw("1 = 1"),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_value(&set).unwrap();
        let back: FilterSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }
}
