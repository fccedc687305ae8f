//! Operation naming strategies and identifier case helpers.
//!
//! The generator never decides on its own how an operation is called.
//! Callers supply an [`OperationNaming`] implementation; the generator only
//! appends the media-type and asynchronous suffixes.
//!
//! # Examples
//!
//! ```
//! use sdkgen_codegen::description::Operation;
//! use sdkgen_codegen::naming::{OperationIdNaming, OperationNaming};
//! use sdkgen_core::HttpMethod;
//!
//! let operation = Operation {
//!     operation_id: Some("Catalogs_GetAll".to_string()),
//!     ..Default::default()
//! };
//!
//! let name = OperationIdNaming
//!     .resolve_operation_name("/catalogs", HttpMethod::Get, &operation)
//!     .unwrap();
//! assert_eq!(name, "GetAll");
//! ```

use crate::description::Operation;
use indexmap::IndexMap;
use sdkgen_core::{Error, HttpMethod, Result};

/// Derives the base method name of an operation.
pub trait OperationNaming {
    /// Returns the base method name for `method` on `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationNameUnavailable`] when no name can be derived.
    fn resolve_operation_name(
        &self,
        path: &str,
        method: HttpMethod,
        operation: &Operation,
    ) -> Result<String>;
}

impl<F> OperationNaming for F
where
    F: Fn(&str, HttpMethod, &Operation) -> Result<String>,
{
    fn resolve_operation_name(
        &self,
        path: &str,
        method: HttpMethod,
        operation: &Operation,
    ) -> Result<String> {
        self(path, method, operation)
    }
}

/// Names operations after their `operationId`.
///
/// Grouped identifiers of the form `<Group>_<Name>` lose their group prefix,
/// since the sub-client already carries the group.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationIdNaming;

impl OperationNaming for OperationIdNaming {
    fn resolve_operation_name(
        &self,
        path: &str,
        method: HttpMethod,
        operation: &Operation,
    ) -> Result<String> {
        let id = operation
            .operation_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::OperationNameUnavailable {
                path: path.to_string(),
                verb: method.to_string(),
                reason: "operation has no operationId".to_string(),
            })?;

        let name = match id.split_once('_') {
            Some((_, rest)) if !rest.is_empty() => rest,
            _ => id,
        };

        Ok(to_pascal_case(name))
    }
}

/// Names operations from a caller-supplied table.
///
/// Keys are either `"<VERB>:<path>"` (verb-specific) or `"<path>"`; the
/// verb-specific entry wins. The resulting name is prefixed with the verb,
/// so `"/catalogs/{id}" -> "Catalog"` yields `GetCatalog`, `PutCatalog`, ...
///
/// # Examples
///
/// ```
/// use sdkgen_codegen::description::Operation;
/// use sdkgen_codegen::naming::{OperationNaming, PathTableNaming};
/// use sdkgen_core::HttpMethod;
///
/// let naming = PathTableNaming::new()
///     .with_entry("/catalogs", "Catalogs")
///     .with_entry("POST:/catalogs", "CatalogItem");
///
/// let operation = Operation::default();
/// assert_eq!(
///     naming.resolve_operation_name("/catalogs", HttpMethod::Get, &operation).unwrap(),
///     "GetCatalogs"
/// );
/// assert_eq!(
///     naming.resolve_operation_name("/catalogs", HttpMethod::Post, &operation).unwrap(),
///     "PostCatalogItem"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathTableNaming {
    table: IndexMap<String, String>,
}

impl PathTableNaming {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one entry and returns the table.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, name: impl Into<String>) -> Self {
        self.table.insert(key.into(), name.into());
        self
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl From<IndexMap<String, String>> for PathTableNaming {
    fn from(table: IndexMap<String, String>) -> Self {
        Self { table }
    }
}

impl OperationNaming for PathTableNaming {
    fn resolve_operation_name(
        &self,
        path: &str,
        method: HttpMethod,
        _operation: &Operation,
    ) -> Result<String> {
        let verb_key = format!("{}:{path}", method.as_str());

        let name = self
            .table
            .get(&verb_key)
            .or_else(|| self.table.get(path))
            .ok_or_else(|| Error::OperationNameUnavailable {
                path: path.to_string(),
                verb: method.to_string(),
                reason: "path is not present in the naming table".to_string(),
            })?;

        Ok(format!("{}{}", method.pascal_name(), to_pascal_case(name)))
    }
}

/// Converts an identifier to PascalCase.
///
/// Splits on every character that is not ASCII alphanumeric and keeps
/// inner capitals, so camelCase input stays readable.
///
/// # Examples
///
/// ```
/// use sdkgen_codegen::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("send_message"), "SendMessage");
/// assert_eq!(to_pascal_case("catalogItems"), "CatalogItems");
/// assert_eq!(to_pascal_case("job-status"), "JobStatus");
/// ```
#[must_use]
pub fn to_pascal_case(value: &str) -> String {
    value
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|segment| !segment.is_empty())
        .map(first_char_to_upper)
        .collect()
}

/// Converts an identifier to camelCase.
///
/// # Examples
///
/// ```
/// use sdkgen_codegen::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("send_message"), "sendMessage");
/// assert_eq!(to_camel_case("CatalogId"), "catalogId");
/// ```
#[must_use]
pub fn to_camel_case(value: &str) -> String {
    first_char_to_lower(&to_pascal_case(value))
}

/// Converts an identifier to snake_case.
///
/// Acronyms stay together: `HTTPServer` becomes `http_server`.
///
/// # Examples
///
/// ```
/// use sdkgen_codegen::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("catalogItemId"), "catalog_item_id");
/// assert_eq!(to_snake_case("GetAllAsync"), "get_all_async");
/// assert_eq!(to_snake_case("HTTPServer"), "http_server");
/// assert_eq!(to_snake_case("job-status"), "job_status");
/// ```
#[must_use]
pub fn to_snake_case(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut result = String::with_capacity(value.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_ascii_alphanumeric() {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }

        if ch.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower);

            if boundary && !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
        }

        result.push(ch.to_ascii_lowercase());
    }

    while result.ends_with('_') {
        result.pop();
    }

    result
}

/// Upper-cases the first character.
#[must_use]
pub fn first_char_to_upper(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Lower-cases the first character.
#[must_use]
pub fn first_char_to_lower(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Returns the first non-blank line of a description, trimmed.
#[must_use]
pub fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}
