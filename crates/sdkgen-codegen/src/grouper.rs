//! Partitioning of paths into sub-client groups.

use crate::description::PathItem;
use indexmap::IndexMap;
use sdkgen_core::{Error, Result};

/// Paths that share one sub-client.
#[derive(Debug, Clone, PartialEq)]
pub struct SubClientGroup<'a> {
    /// Tag the group is keyed by
    pub name: String,
    /// `(path, item)` pairs in document order
    pub paths: Vec<(&'a str, &'a PathItem)>,
}

impl SubClientGroup<'_> {
    /// Number of operations over all paths of the group.
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.paths.iter().map(|(_, item)| item.operations.len()).sum()
    }
}

/// Groups paths by the first tag of their first operation.
///
/// Every verb on a path joins the group of the path's first operation, even
/// when later verbs carry other tags. Groups appear in order of first
/// occurrence and keep document order inside. Paths without operations are
/// skipped.
///
/// # Errors
///
/// Returns [`Error::UntaggedPath`] when the first operation of a path has no tag.
///
/// # Examples
///
/// ```
/// use sdkgen_codegen::description::Document;
/// use sdkgen_codegen::grouper::group;
///
/// let document = Document::from_json_str(r#"{
///     "info": {"version": "v1"},
///     "paths": {
///         "/jobs": {"get": {"tags": ["Jobs"], "responses": {}}},
///         "/users": {"get": {"tags": ["Users"], "responses": {}}},
///         "/jobs/{id}": {"get": {"tags": ["Jobs"], "responses": {}}}
///     }
/// }"#).unwrap();
///
/// let groups = group(&document.paths).unwrap();
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].name, "Jobs");
/// assert_eq!(groups[0].paths.len(), 2);
/// ```
pub fn group(paths: &IndexMap<String, PathItem>) -> Result<Vec<SubClientGroup<'_>>> {
    let mut groups: IndexMap<&str, Vec<(&str, &PathItem)>> = IndexMap::new();

    for (path, item) in paths {
        let Some((_, first)) = item.operations.first() else {
            tracing::debug!("Skipping path without operations: {}", path);
            continue;
        };

        let tag = first
            .tags
            .first()
            .ok_or_else(|| Error::UntaggedPath { path: path.clone() })?;

        groups
            .entry(tag.as_str())
            .or_default()
            .push((path.as_str(), item));
    }

    Ok(groups
        .into_iter()
        .map(|(name, paths)| SubClientGroup {
            name: name.to_string(),
            paths,
        })
        .collect())
}
