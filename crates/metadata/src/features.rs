use std::collections::BTreeMap;
use std::path::Path;

/// Feature-indicator paths, relative to the project root. A feature is
/// reported only when its indicator exists; existence is the whole check.
///
/// Kept in sync with the generator's scaffold templates.
const FEATURE_PATHS: &[(&str, &str)] = &[
    ("authentication", "internal/api/handlers/auth.go"),
    ("user_management", "internal/api/handlers/users.go"),
    ("posts_api", "internal/api/handlers/posts.go"),
    ("database_migrations", "migrations"),
    ("docker_support", "Dockerfile"),
    ("docker_compose", "docker-compose.yml"),
    ("environment_template", ".env.example"),
    ("build_automation", "Makefile"),
    ("redis_cache", "internal/cache/redis.go"),
];

/// Probe the feature-indicator table against a project root.
///
/// Purely additive: present indicators produce `true` entries, absent ones
/// are omitted entirely. Callers treat a missing key as `false`.
#[must_use]
pub fn detect_features(root: &Path) -> BTreeMap<String, bool> {
    let mut features = BTreeMap::new();
    for (feature, indicator) in FEATURE_PATHS {
        if root.join(indicator).exists() {
            features.insert((*feature).to_string(), true);
        }
    }
    features
}
