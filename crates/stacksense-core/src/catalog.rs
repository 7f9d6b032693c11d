//! # Catalog Module
//!
//! Loading and validation of the technology knowledge base.
//!
//! - The catalog is a trusted, version-controlled JSON asset
//! - A missing file is not an error: it yields an empty catalog tagged
//!   `CatalogSource::Missing`, and the engine degrades to "no recommendations"
//! - A malformed record is fatal and names the offending record
//! - Once built, a `Catalog` is an immutable snapshot; share it behind `Arc`

use crate::primitives::MAX_CATALOG_BYTES;
use crate::types::{Category, StackError, Technology};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where a catalog snapshot came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Parsed from this file.
    File(PathBuf),
    /// The configured file did not exist; the catalog is empty.
    Missing(PathBuf),
    /// Built from in-memory data.
    Inline,
}

impl CatalogSource {
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, CatalogSource::Missing(_))
    }

    /// The backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            CatalogSource::File(p) | CatalogSource::Missing(p) => Some(p),
            CatalogSource::Inline => None,
        }
    }
}

/// Immutable snapshot of the technology catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    technologies: Vec<Arc<Technology>>,
    source: CatalogSource,
    fingerprint: Option<String>,
}

impl Catalog {
    /// Load the catalog from a JSON file.
    ///
    /// A missing file yields an empty catalog whose source is
    /// `CatalogSource::Missing`.
    ///
    /// # Errors
    /// - `StackError::Io` if the file exists but cannot be read, or exceeds
    ///   `MAX_CATALOG_BYTES`
    /// - `StackError::CatalogSyntax` if the file is not a JSON array
    /// - `StackError::CatalogMalformed` if any record is invalid
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StackError> {
        let path = path.as_ref();

        let metadata = match std::fs::metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self {
                    technologies: Vec::new(),
                    source: CatalogSource::Missing(path.to_path_buf()),
                    fingerprint: None,
                });
            }
            Err(e) => {
                return Err(StackError::Io(format!(
                    "Cannot stat catalog '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        if metadata.len() > MAX_CATALOG_BYTES {
            return Err(StackError::Io(format!(
                "Catalog '{}' is {} bytes, maximum is {} bytes",
                path.display(),
                metadata.len(),
                MAX_CATALOG_BYTES
            )));
        }

        let raw = std::fs::read_to_string(path).map_err(|e| {
            StackError::Io(format!("Cannot read catalog '{}': {}", path.display(), e))
        })?;

        Self::parse(&raw, CatalogSource::File(path.to_path_buf()))
    }

    /// Parse a catalog from an in-memory JSON array.
    pub fn from_json_str(json: &str) -> Result<Self, StackError> {
        Self::parse(json, CatalogSource::Inline)
    }

    /// Build a catalog from already-constructed records, enforcing the same
    /// invariants as the file loader.
    pub fn from_technologies(technologies: Vec<Technology>) -> Result<Self, StackError> {
        validate(&technologies)?;
        Ok(Self {
            technologies: technologies.into_iter().map(Arc::new).collect(),
            source: CatalogSource::Inline,
            fingerprint: None,
        })
    }

    /// An empty catalog.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            technologies: Vec::new(),
            source: CatalogSource::Inline,
            fingerprint: None,
        }
    }

    fn parse(raw: &str, source: CatalogSource) -> Result<Self, StackError> {
        let records: Vec<serde_json::Value> =
            serde_json::from_str(raw).map_err(|e| StackError::CatalogSyntax(e.to_string()))?;

        let technologies = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                serde_json::from_value::<Technology>(record).map_err(|e| {
                    StackError::CatalogMalformed {
                        index,
                        reason: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        validate(&technologies)?;

        Ok(Self {
            technologies: technologies.into_iter().map(Arc::new).collect(),
            source,
            fingerprint: fingerprint_of(raw.as_bytes()),
        })
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// All technologies, in catalog order.
    #[must_use]
    pub fn technologies(&self) -> &[Arc<Technology>] {
        &self.technologies
    }

    /// Technologies of one category, in catalog order.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Arc<Technology>> {
        self.technologies.iter().filter(move |t| t.category == category)
    }

    /// Lookup by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<Technology>> {
        self.technologies.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.technologies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.technologies.is_empty()
    }

    #[must_use]
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Hex BLAKE3 digest of the raw catalog bytes.
    ///
    /// `None` for missing catalogs, catalogs built from records, or without
    /// the `crypto-hash` feature.
    #[must_use]
    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    /// Number of technologies per category.
    #[must_use]
    pub fn count_by_category(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for tech in &self.technologies {
            *counts.entry(tech.category).or_insert(0usize) += 1;
        }
        counts
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Enforce catalog invariants beyond the record schema:
/// - ids are non-empty, trimmed and unique
/// - names are non-empty
/// - tags are non-empty lowercase keywords
fn validate(technologies: &[Technology]) -> Result<(), StackError> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    for (index, tech) in technologies.iter().enumerate() {
        let malformed = |reason: String| StackError::CatalogMalformed { index, reason };

        if tech.id.is_empty() || tech.id.trim() != tech.id {
            return Err(malformed(format!("invalid id '{}'", tech.id)));
        }
        if !seen.insert(tech.id.as_str()) {
            return Err(malformed(format!("duplicate id '{}'", tech.id)));
        }
        if tech.name.trim().is_empty() {
            return Err(malformed(format!("technology '{}' has no name", tech.id)));
        }
        if let Some(tag) = tech
            .tags
            .iter()
            .find(|t| t.is_empty() || t.chars().any(char::is_uppercase))
        {
            return Err(malformed(format!(
                "technology '{}' has non-lowercase tag '{}'",
                tech.id, tag
            )));
        }
    }

    Ok(())
}

#[cfg(feature = "crypto-hash")]
fn fingerprint_of(raw: &[u8]) -> Option<String> {
    Some(blake3::hash(raw).to_hex().to_string())
}

#[cfg(not(feature = "crypto-hash"))]
fn fingerprint_of(_raw: &[u8]) -> Option<String> {
    None
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"[
        {"id": "react", "name": "React", "category": "Frontend", "description": "UI library",
         "tags": ["web", "popular"]},
        {"id": "postgresql", "name": "PostgreSQL", "category": "Database", "description": "RDBMS",
         "tags": ["sql"], "attributes": {"data_integrity": true}},
        {"id": "vue", "name": "Vue.js", "category": "Frontend", "description": "Progressive framework"}
    ]"#;

    fn write_catalog(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[test]
    fn missing_file_yields_empty_catalog() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.json");

        let catalog = Catalog::load(&path).expect("missing is not an error");
        assert!(catalog.is_empty());
        assert!(catalog.source().is_missing());
        assert_eq!(catalog.source().path(), Some(path.as_path()));
    }

    #[test]
    fn load_valid_file() {
        let file = write_catalog(SAMPLE);
        let catalog = Catalog::load(file.path()).expect("load");

        assert_eq!(catalog.len(), 3);
        assert!(matches!(catalog.source(), CatalogSource::File(_)));
        assert_eq!(
            catalog.get("postgresql").map(|t| t.name.as_str()),
            Some("PostgreSQL")
        );
    }

    #[test]
    fn in_category_preserves_catalog_order() {
        let catalog = Catalog::from_json_str(SAMPLE).expect("parse");
        let ids: Vec<&str> = catalog
            .in_category(Category::Frontend)
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["react", "vue"]);
        assert_eq!(catalog.in_category(Category::Hardware).count(), 0);
    }

    #[test]
    fn count_by_category() {
        let catalog = Catalog::from_json_str(SAMPLE).expect("parse");
        let counts = catalog.count_by_category();
        assert_eq!(counts.get(&Category::Frontend), Some(&2));
        assert_eq!(counts.get(&Category::Database), Some(&1));
        assert_eq!(counts.get(&Category::DevOps), None);
    }

    #[test]
    fn non_array_is_syntax_error() {
        let result = Catalog::from_json_str(r#"{"id": "react"}"#);
        assert!(matches!(result, Err(StackError::CatalogSyntax(_))));
    }

    #[test]
    fn malformed_record_reports_index() {
        let json = r#"[
            {"id": "react", "name": "React", "category": "Frontend", "description": ""},
            {"id": "bad", "name": "Bad", "category": "Frontend"}
        ]"#;
        match Catalog::from_json_str(json) {
            Err(StackError::CatalogMalformed { index, reason }) => {
                assert_eq!(index, 1);
                assert!(reason.contains("description"));
            }
            other => unreachable!("expected CatalogMalformed, got {other:?}"),
        }
    }

    #[test]
    fn unknown_min_scale_is_malformed() {
        let json = r#"[{"id": "x", "name": "X", "category": "Backend", "description": "",
                        "min_scale": "Galactic"}]"#;
        assert!(matches!(
            Catalog::from_json_str(json),
            Err(StackError::CatalogMalformed { index: 0, .. })
        ));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let json = r#"[
            {"id": "react", "name": "React", "category": "Frontend", "description": ""},
            {"id": "react", "name": "React again", "category": "Frontend", "description": ""}
        ]"#;
        assert!(matches!(
            Catalog::from_json_str(json),
            Err(StackError::CatalogMalformed { index: 1, .. })
        ));
    }

    #[test]
    fn uppercase_tags_rejected() {
        let json = r#"[{"id": "x", "name": "X", "category": "Backend", "description": "",
                        "tags": ["Python"]}]"#;
        assert!(Catalog::from_json_str(json).is_err());
    }

    #[test]
    fn malformed_file_fails_loudly() {
        let file = write_catalog("[{\"id\": 42}]");
        assert!(Catalog::load(file.path()).is_err());
    }

    #[test]
    fn empty_array_is_valid() {
        let catalog = Catalog::from_json_str("[]").expect("parse");
        assert!(catalog.is_empty());
        assert!(!catalog.source().is_missing());
    }

    #[cfg(feature = "crypto-hash")]
    #[test]
    fn fingerprint_is_stable() {
        let a = Catalog::from_json_str(SAMPLE).expect("parse");
        let b = Catalog::from_json_str(SAMPLE).expect("parse");
        assert!(a.fingerprint().is_some());
        assert_eq!(a.fingerprint(), b.fingerprint());
    }
}
