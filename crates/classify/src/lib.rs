//! # Gophex Classify
//!
//! Pure path classification for scaffolded project trees.
//!
//! Maps a relative file path to a semantic label (`"database_migration"`,
//! `"request_handler"`, ...) using filename tables and path patterns only.
//! File contents are never read; classification is deterministic and total
//! (unrecognized paths fall back to `"source_file"`).

/// Exact scaffold filenames and their labels. First resolution step; a hit
/// here wins over every pattern and directory rule.
///
/// Kept in sync with the files the generator's templates emit.
const KNOWN_FILE_NAMES: &[(&str, &str)] = &[
    ("main.go", "application_entry_point"),
    ("go.mod", "go_module_definition"),
    ("go.sum", "go_module_checksums"),
    (".env", "environment_variables"),
    (".env.example", "environment_variables_template"),
    ("Dockerfile", "container_definition"),
    ("docker-compose.yml", "container_orchestration"),
    ("Makefile", "build_automation"),
    ("README.md", "project_documentation"),
    ("auth.go", "authentication_logic"),
    ("config.go", "configuration_loader"),
    ("database.go", "database_connection"),
    ("redis.go", "cache_connection"),
    ("routes.go", "route_definitions"),
    ("gophex.md", "project_metadata"),
];

/// Directory-name substrings and their labels, checked against the
/// containing directories of a path in this priority order. A path under
/// both `handlers/` and a `service/` parent classifies by the first hit.
const DIRECTORY_LABELS: &[(&str, &str)] = &[
    ("handlers", "request_handler"),
    ("middleware", "http_middleware"),
    ("repository", "data_repository"),
    ("repo", "data_repository"),
    ("service", "business_logic"),
    ("model", "data_model"),
];

const FALLBACK_LABEL: &str = "source_file";

/// Classify a relative file path into a semantic label.
///
/// Resolution order: exact filename, then suffix/pattern rules, then
/// containing-directory substrings, then [`FALLBACK_LABEL`]. Accepts both
/// `/` and `\` separators.
#[must_use]
pub fn classify(relative_path: &str) -> &'static str {
    let normalized = relative_path.replace('\\', "/");
    let file_name = normalized.rsplit('/').next().unwrap_or(&normalized);

    for (name, label) in KNOWN_FILE_NAMES {
        if file_name == *name {
            return label;
        }
    }

    if let Some(label) = classify_by_pattern(&normalized, file_name) {
        return label;
    }

    if let Some(label) = classify_by_directory(&normalized) {
        return label;
    }

    FALLBACK_LABEL
}

fn classify_by_pattern(path: &str, file_name: &str) -> Option<&'static str> {
    if file_name.ends_with("_test.go") {
        return Some("test_file");
    }
    if file_name.ends_with("_repository.go") {
        return Some("repository_implementation");
    }
    if file_name.ends_with(".sql") {
        if file_name.contains(".up.") {
            return Some("database_migration");
        }
        if file_name.contains(".down.") {
            return Some("migration_rollback");
        }
        return Some("sql_script");
    }
    if file_name.ends_with(".sh") {
        return Some("shell_script");
    }
    if file_name.ends_with(".bat") || file_name.ends_with(".cmd") {
        return Some("batch_script");
    }
    // Mongo seed scripts live under migrations/ as .js files.
    if file_name.ends_with(".js") && directory_components(path).any(|dir| dir == "migrations") {
        return Some("mongodb_initialization");
    }
    None
}

fn classify_by_directory(path: &str) -> Option<&'static str> {
    for (needle, label) in DIRECTORY_LABELS {
        if directory_components(path).any(|dir| dir.contains(needle)) {
            return Some(label);
        }
    }
    None
}

/// Directory segments of a slash-normalized path, excluding the file name.
fn directory_components(path: &str) -> impl Iterator<Item = &str> {
    let dir_end = path.rfind('/').unwrap_or(0);
    path[..dir_end].split('/').filter(|s| !s.is_empty())
}
