use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Nested snapshot of a project tree: directories are nested maps, files are
/// semantic labels from `gophex_classify`.
pub type Hierarchy = BTreeMap<String, HierarchyNode>;

/// One node of the hierarchy snapshot.
///
/// Serializes to the original nested-object wire shape: a file is a bare
/// JSON string (its label), a directory is a JSON object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum HierarchyNode {
    File(String),
    Directory(Hierarchy),
}

impl HierarchyNode {
    #[must_use]
    pub fn is_directory(&self) -> bool {
        matches!(self, HierarchyNode::Directory(_))
    }
}

/// Closed set of scaffold template categories. Drives which activities and
/// endpoint/command inventories a generated document carries; the document
/// itself stores the raw kind string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    Api,
    Cli,
    Webapp,
    Microservice,
    Other,
}

impl ProjectKind {
    /// Parse the generator's kind string; unknown kinds are treated
    /// generically.
    #[must_use]
    pub fn parse(kind: &str) -> Self {
        match kind {
            "api" => ProjectKind::Api,
            "cli" => ProjectKind::Cli,
            "webapp" => ProjectKind::Webapp,
            "microservice" => ProjectKind::Microservice,
            _ => ProjectKind::Other,
        }
    }
}

/// Identity block of the document. Immutable after generation except
/// `last_updated`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Semantic version of the scaffolded project itself.
    pub version: String,
    pub generator_version: String,
    pub generated_at: String,
    pub last_updated: String,
}

/// Database configuration summary, derived once at generation time.
/// `migrations_executed` and `schema_initialized` are flipped later by the
/// migrate command through the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseSummary {
    pub configured: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_type: Option<String>,
    pub is_clustered: bool,
    pub has_read_write_split: bool,
    pub ssl_enabled: bool,
    pub migrations_executed: bool,
    pub schema_initialized: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RedisSummary {
    pub configured: bool,
    pub enabled: bool,
}

/// A trackable post-generation milestone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Activity {
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub can_repeat: bool,
}

/// One HTTP route exposed by an api-kind project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Endpoint {
    pub method: String,
    pub path: String,
    pub description: String,
    pub protected: bool,
}

impl Endpoint {
    #[must_use]
    pub fn new(method: &str, path: &str, description: &str, protected: bool) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            description: description.to_string(),
            protected,
        }
    }
}

/// One command exposed by a cli-kind project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub subcommands: Vec<String>,
}

/// Root aggregate persisted to `gophex.md`. One per scaffolded project.
///
/// Unknown keys from older or newer generator versions are tolerated on
/// load; maps use `BTreeMap` so serialized output is stable across runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectMetadata {
    pub project: ProjectInfo,
    pub hierarchy: Hierarchy,
    pub database: DatabaseSummary,
    pub redis: RedisSummary,
    pub activities: BTreeMap<String, Activity>,
    pub features: BTreeMap<String, bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<Endpoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<Command>>,
}

impl ProjectMetadata {
    /// Refresh `project.last_updated`. Every mutation path must call this
    /// before persisting.
    pub fn touch(&mut self) {
        self.project.last_updated = now_rfc3339();
    }
}

/// Current UTC time as an RFC 3339 string, second precision.
pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
