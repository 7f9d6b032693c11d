//! # Engine Primitives
//!
//! Compiled-in constants for the StackSense CORE.
//!
//! The catalog is data; the limits and the category order below are logic
//! and are immutable at runtime.

use crate::types::Category;

/// Order in which categories are evaluated and reported.
///
/// Results always follow this order; categories with no catalog entries are
/// omitted, never reordered.
pub const CATEGORY_ORDER: [Category; 5] = [
    Category::Frontend,
    Category::Backend,
    Category::Database,
    Category::DevOps,
    Category::Hardware,
];

/// Default location of the technology catalog, relative to the working directory.
pub const DEFAULT_CATALOG_PATH: &str = "data/knowledge_base.json";

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length of any free-form requirement label.
///
/// Longer labels are rejected at the API boundary before parsing.
pub const MAX_LABEL_LENGTH: usize = 256;

/// Maximum number of priority labels in a single request.
pub const MAX_PRIORITIES: usize = 32;

/// Maximum size of a catalog file (8 MB).
///
/// The catalog is a trusted asset, but an accidental multi-gigabyte file
/// should fail fast rather than exhaust memory.
pub const MAX_CATALOG_BYTES: u64 = 8 * 1024 * 1024;
