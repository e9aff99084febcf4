use crate::document::{Command, Endpoint, ProjectKind};
use std::path::Path;

const AUTH_HANDLERS: &str = "internal/api/handlers/auth.go";
const USER_HANDLERS: &str = "internal/api/handlers/users.go";
const POST_HANDLERS: &str = "internal/api/handlers/posts.go";

/// Derive the endpoint inventory for a project.
///
/// Best-effort and intentionally shallow: endpoint groups are appended based
/// on handler-file presence at fixed scaffold paths, not parsed from route
/// declarations. The append order (health, auth, users, posts) and the order
/// within each group are a stability contract for the persisted document.
/// Non-api kinds carry no endpoint inventory.
#[must_use]
pub fn derive_endpoints(root: &Path, kind: ProjectKind) -> Option<Vec<Endpoint>> {
    if kind != ProjectKind::Api {
        return None;
    }

    let mut endpoints = vec![Endpoint::new(
        "GET",
        "/api/v1/health",
        "Health check",
        false,
    )];

    if root.join(AUTH_HANDLERS).exists() {
        endpoints.push(Endpoint::new(
            "POST",
            "/api/v1/auth/register",
            "Register a new user",
            false,
        ));
        endpoints.push(Endpoint::new(
            "POST",
            "/api/v1/auth/login",
            "Log in and obtain a token",
            false,
        ));
    }

    if root.join(USER_HANDLERS).exists() {
        endpoints.push(Endpoint::new("GET", "/api/v1/users", "List users", true));
        endpoints.push(Endpoint::new(
            "GET",
            "/api/v1/users/{id}",
            "Get a user",
            true,
        ));
        endpoints.push(Endpoint::new(
            "PUT",
            "/api/v1/users/{id}",
            "Update a user",
            true,
        ));
        endpoints.push(Endpoint::new(
            "DELETE",
            "/api/v1/users/{id}",
            "Delete a user",
            true,
        ));
    }

    if root.join(POST_HANDLERS).exists() {
        endpoints.push(Endpoint::new("GET", "/api/v1/posts", "List posts", false));
        endpoints.push(Endpoint::new(
            "GET",
            "/api/v1/posts/{id}",
            "Get a post",
            false,
        ));
        endpoints.push(Endpoint::new(
            "POST",
            "/api/v1/posts",
            "Create a post",
            true,
        ));
        endpoints.push(Endpoint::new(
            "PUT",
            "/api/v1/posts/{id}",
            "Update a post",
            true,
        ));
        endpoints.push(Endpoint::new(
            "DELETE",
            "/api/v1/posts/{id}",
            "Delete a post",
            true,
        ));
    }

    Some(endpoints)
}

/// Derive the command inventory. Only cli-kind projects carry one: a single
/// root command with no subcommands derived.
#[must_use]
pub fn derive_commands(project_name: &str, kind: ProjectKind) -> Option<Vec<Command>> {
    if kind != ProjectKind::Cli {
        return None;
    }
    Some(vec![Command {
        name: project_name.to_string(),
        description: "Root command".to_string(),
        subcommands: Vec::new(),
    }])
}
