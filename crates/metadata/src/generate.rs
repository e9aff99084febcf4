use crate::document::{
    now_rfc3339, Activity, DatabaseSummary, ProjectInfo, ProjectKind, ProjectMetadata,
    RedisSummary,
};
use crate::features::detect_features;
use crate::inventory::{derive_commands, derive_endpoints};
use crate::scanner::scan_hierarchy;
use crate::Result;
use std::collections::BTreeMap;
use std::path::Path;

/// Database configuration handed in by the generator. This crate reads only
/// `engine`, `config_type` and `ssl_mode`; the connection fields belong to
/// the generated project's own config.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub engine: String,
    /// Topology: `"single"`, `"cluster"` or `"read-write"`.
    pub config_type: String,
    pub ssl_mode: Option<String>,
    pub host: String,
    pub port: u16,
    pub name: String,
}

/// Cache configuration handed in by the generator.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
}

const BASELINE_ACTIVITIES: &[&str] = &[
    "dependencies_installed",
    "tests_executed",
    "project_opened",
    "documentation_viewed",
];

const API_ACTIVITIES: &[&str] = &[
    "database_migrated",
    "application_started",
    "change_detection_run",
];

/// Build the metadata document for a freshly scaffolded project.
///
/// Called exactly once per project, right after the generator has written
/// the tree under `root`. Scans the hierarchy, probes features, derives the
/// endpoint/command inventory for the kind, and seeds the activity map. Any
/// scan error aborts with no partial document.
pub fn generate(
    root: &Path,
    project_name: &str,
    project_kind: &str,
    database: Option<&DatabaseConfig>,
    cache: Option<&CacheConfig>,
    generator_version: &str,
) -> Result<ProjectMetadata> {
    let kind = ProjectKind::parse(project_kind);
    let now = now_rfc3339();

    let hierarchy = scan_hierarchy(root)?;
    let features = detect_features(root);
    let endpoints = derive_endpoints(root, kind);
    let commands = derive_commands(project_name, kind);

    let metadata = ProjectMetadata {
        project: ProjectInfo {
            name: project_name.to_string(),
            kind: project_kind.to_string(),
            version: "0.1.0".to_string(),
            generator_version: generator_version.to_string(),
            generated_at: now.clone(),
            last_updated: now.clone(),
        },
        hierarchy,
        database: database_summary(database),
        redis: redis_summary(cache),
        activities: seed_activities(kind, &now),
        features,
        endpoints,
        commands,
    };

    log::info!(
        "generated metadata for {project_name} ({project_kind}): {} features, {} activities",
        metadata.features.len(),
        metadata.activities.len()
    );
    Ok(metadata)
}

fn database_summary(config: Option<&DatabaseConfig>) -> DatabaseSummary {
    let Some(config) = config else {
        return DatabaseSummary::default();
    };
    DatabaseSummary {
        configured: true,
        engine: Some(config.engine.clone()),
        config_type: Some(config.config_type.clone()),
        is_clustered: config.config_type == "cluster",
        has_read_write_split: config.config_type == "read-write",
        ssl_enabled: config
            .ssl_mode
            .as_deref()
            .is_some_and(|mode| mode != "disable"),
        migrations_executed: false,
        schema_initialized: false,
    }
}

fn redis_summary(config: Option<&CacheConfig>) -> RedisSummary {
    match config {
        Some(config) => RedisSummary {
            configured: true,
            enabled: config.enabled,
        },
        None => RedisSummary::default(),
    }
}

/// Seed the activity map: the baseline set plus kind-specific entries.
/// `project_generated` is completed up front and can never repeat.
fn seed_activities(kind: ProjectKind, now: &str) -> BTreeMap<String, Activity> {
    let mut activities = BTreeMap::new();
    activities.insert(
        "project_generated".to_string(),
        Activity {
            completed: true,
            timestamp: Some(now.to_string()),
            can_repeat: false,
        },
    );
    for name in BASELINE_ACTIVITIES {
        activities.insert(
            (*name).to_string(),
            Activity {
                completed: false,
                timestamp: None,
                can_repeat: true,
            },
        );
    }
    if kind == ProjectKind::Api {
        for name in API_ACTIVITIES {
            activities.insert(
                (*name).to_string(),
                Activity {
                    completed: false,
                    timestamp: None,
                    can_repeat: true,
                },
            );
        }
    }
    activities
}
