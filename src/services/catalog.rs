use std::path::Path;

use serde_json::{Map, Value};

use crate::{
    error::CatalogError,
    models::{Catalog, Movie},
};

const TITLE_COLUMN: &str = "title";
const TAGS_COLUMN: &str = "tags";
const ID_COLUMN: &str = "movie_id";

/// One column reduced to `(row key, value)` pairs in row order
type Column = Vec<(u64, Value)>;

/// Loads the movie catalog from a JSON column mapping on disk
///
/// The file is read exactly once at startup. Any failure is fatal to the
/// caller; there is no retry.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_catalog(&raw)?;

    tracing::info!(
        path = %path.display(),
        movies = catalog.len(),
        "Catalog loaded"
    );

    Ok(catalog)
}

/// Parses a catalog from its serialized column mapping
///
/// Each column is either a JSON array or an object keyed by row index
/// (`{"0": ..., "1": ...}`). Columns must be row-aligned with `title`.
pub fn parse_catalog(raw: &str) -> Result<Catalog, CatalogError> {
    let mut columns: Map<String, Value> = serde_json::from_str(raw)?;

    let titles = take_column(&mut columns, TITLE_COLUMN)?
        .ok_or(CatalogError::MissingColumn(TITLE_COLUMN))?;
    let tags = take_column(&mut columns, TAGS_COLUMN)?
        .ok_or(CatalogError::MissingColumn(TAGS_COLUMN))?;
    let ids = take_column(&mut columns, ID_COLUMN)?;

    if titles.is_empty() {
        return Err(CatalogError::Empty);
    }

    check_aligned(&titles, &tags, TAGS_COLUMN)?;
    if let Some(ids) = &ids {
        check_aligned(&titles, ids, ID_COLUMN)?;
    }

    let movies = titles
        .into_iter()
        .zip(tags)
        .enumerate()
        .map(|(position, ((key, title), (_, tags)))| {
            let id = match &ids {
                Some(ids) => coerce_id(key, &ids[position].1)?,
                None => position as i64,
            };
            let title = coerce_title(key, title)?;
            let tags = coerce_tags(key, tags)?;
            Ok(Movie::new(id, title, tags))
        })
        .collect::<Result<Vec<_>, CatalogError>>()?;

    Ok(Catalog::new(movies))
}

/// Removes a column from the mapping and puts its rows in index order
fn take_column(
    columns: &mut Map<String, Value>,
    name: &'static str,
) -> Result<Option<Column>, CatalogError> {
    let Some(value) = columns.remove(name) else {
        return Ok(None);
    };

    let column = match value {
        Value::Array(values) => values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i as u64, v))
            .collect(),
        Value::Object(rows) => {
            let mut column = rows
                .into_iter()
                .map(|(key, v)| {
                    key.trim()
                        .parse::<u64>()
                        .map(|index| (index, v))
                        .map_err(|_| CatalogError::InvalidValue {
                            column: name.to_string(),
                            row: key.clone(),
                            reason: "row index is not a non-negative integer".to_string(),
                        })
                })
                .collect::<Result<Column, _>>()?;
            column.sort_by_key(|(index, _)| *index);
            column
        }
        other => {
            return Err(CatalogError::InvalidValue {
                column: name.to_string(),
                row: "*".to_string(),
                reason: format!("expected an array or object, found {}", kind(&other)),
            })
        }
    };

    Ok(Some(column))
}

fn check_aligned(reference: &Column, other: &Column, name: &str) -> Result<(), CatalogError> {
    if reference.len() != other.len() {
        return Err(CatalogError::Misaligned {
            column: name.to_string(),
            expected: reference.len(),
            found: other.len(),
        });
    }

    if let Some(((key, _), _)) = other
        .iter()
        .zip(reference)
        .find(|((a, _), (b, _))| a != b)
    {
        return Err(CatalogError::InvalidValue {
            column: name.to_string(),
            row: key.to_string(),
            reason: format!("row index has no counterpart in '{}'", TITLE_COLUMN),
        });
    }

    Ok(())
}

/// Titles are coerced to text: numbers and booleans are rendered, null is rejected
fn coerce_title(row: u64, value: Value) -> Result<String, CatalogError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(invalid(TITLE_COLUMN, row, &other)),
    }
}

fn coerce_tags(row: u64, value: Value) -> Result<String, CatalogError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(invalid(TAGS_COLUMN, row, &other)),
    }
}

fn coerce_id(row: u64, value: &Value) -> Result<i64, CatalogError> {
    value.as_i64().ok_or_else(|| invalid(ID_COLUMN, row, value))
}

fn invalid(column: &str, row: u64, value: &Value) -> CatalogError {
    CatalogError::InvalidValue {
        column: column.to_string(),
        row: row.to_string(),
        reason: format!("unexpected {}", kind(value)),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
