//! # Gophex Metadata
//!
//! Lifecycle metadata engine for scaffolded projects.
//!
//! ## Pipeline
//!
//! ```text
//! Project directory
//!     │
//!     ├──> Hierarchy Scanner (dotfile-pruned, classify-labeled)
//!     │      └─> Nested tree snapshot
//!     │
//!     ├──> Feature Detector (fixed indicator paths)
//!     │      └─> Feature flags
//!     │
//!     ├──> Endpoint/Command Inventory (kind + handler presence)
//!     │      └─> Static operation list
//!     │
//!     └──> Store (markdown-embedded JSON)
//!            └─> <root>/gophex.md
//! ```
//!
//! After generation, independent commands go through the store's
//! load-mutate-save helpers to record progress (installs, migrations, test
//! runs) in the same file.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! fn main() -> gophex_metadata::Result<()> {
//!     let root = Path::new("/path/to/project");
//!     let metadata = gophex_metadata::generate(root, "myapi", "api", None, None, "1.0.0")?;
//!     gophex_metadata::save(root, &metadata)?;
//!
//!     gophex_metadata::update_activity(root, "tests_executed", true)?;
//!     Ok(())
//! }
//! ```

mod document;
mod error;
mod features;
mod generate;
mod inventory;
mod scanner;
mod store;

pub use document::{
    Activity, Command, DatabaseSummary, Endpoint, Hierarchy, HierarchyNode, ProjectInfo,
    ProjectKind, ProjectMetadata, RedisSummary,
};
pub use error::{MetadataError, Result};
pub use features::detect_features;
pub use generate::{generate, CacheConfig, DatabaseConfig};
pub use inventory::{derive_commands, derive_endpoints};
pub use scanner::scan_hierarchy;
pub use store::{
    activity_prefix, is_activity_completed, load, metadata_path, save, update_activity,
    update_database_status, METADATA_FILE_NAME,
};
