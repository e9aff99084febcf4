use crate::document::{now_rfc3339, ProjectMetadata};
use crate::{MetadataError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed name of the metadata file at the project root. The markdown shape
/// around the JSON payload is a compatibility contract; older gophex
/// versions and humans both read this file.
pub const METADATA_FILE_NAME: &str = "gophex.md";

const HEADER: &str = "# Gophex Project Metadata\n\n\
This file tracks the state of your generated project: what was scaffolded, \
which features are present, and which post-generation steps have run. It is \
maintained by gophex; do not edit it by hand.\n\n";

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";
const LINE_FENCE_CLOSE: &str = "\n```";

/// Path of the metadata file for a project root.
#[must_use]
pub fn metadata_path(root: &Path) -> PathBuf {
    root.join(METADATA_FILE_NAME)
}

/// Serialize the document and write `gophex.md`, replacing any prior
/// content. Writes through a sibling temp file and renames, so a crashed
/// save never leaves a truncated file.
///
/// The load-mutate-save cycle is not atomic against concurrent processes:
/// two overlapping cycles are last-writer-wins. The surrounding tool is
/// single-user and single-process, so this is accepted and not locked.
pub fn save(root: &Path, metadata: &ProjectMetadata) -> Result<()> {
    let json = serde_json::to_string_pretty(metadata)?;
    let content = format!("{HEADER}{FENCE_OPEN}\n{json}\n{FENCE_CLOSE}\n");

    let path = metadata_path(root);
    let tmp = path.with_extension("md.tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, &path)?;
    log::debug!("saved metadata to {}", path.display());
    Ok(())
}

/// Read `gophex.md`, extract the first fenced JSON block, and deserialize
/// it. A file without such a block is a distinct
/// [`MetadataError::MissingPayload`]; a block that is not valid JSON for the
/// schema surfaces as a JSON error.
pub fn load(root: &Path) -> Result<ProjectMetadata> {
    let path = metadata_path(root);
    let content = fs::read_to_string(&path)?;
    let payload =
        extract_json_block(&content).ok_or_else(|| MetadataError::MissingPayload(path))?;
    Ok(serde_json::from_str(payload)?)
}

/// Locate the payload of the first ```json fenced block.
///
/// Two steps on purpose: find the tagged opening fence and the end of its
/// line, then find the closing fence. Keeps "no block at all" separate from
/// "block with bad JSON" for diagnostics.
///
/// The closing fence must start a line. Backticks are legal in filenames
/// and land verbatim in hierarchy keys, but pretty-printed JSON never puts
/// a raw newline inside a string, so a line-anchored fence cannot match
/// inside the payload.
fn extract_json_block(content: &str) -> Option<&str> {
    let open = content.find(FENCE_OPEN)?;
    let after_tag = &content[open + FENCE_OPEN.len()..];
    let newline = after_tag.find('\n')?;
    let payload = &after_tag[newline + 1..];

    let close = payload.find(LINE_FENCE_CLOSE)?;
    Some(payload[..close].trim_end())
}

/// Mark an activity (in)complete through a full load-mutate-save cycle.
///
/// The entry is created if absent. Completing stamps a fresh timestamp;
/// un-completing leaves any prior timestamp in place so the last completion
/// time stays visible.
pub fn update_activity(root: &Path, activity: &str, completed: bool) -> Result<()> {
    let mut metadata = load(root)?;
    let entry = metadata.activities.entry(activity.to_string()).or_default();
    entry.completed = completed;
    if completed {
        entry.timestamp = Some(now_rfc3339());
    }
    metadata.touch();
    save(root, &metadata)
}

/// Record migration/schema progress on the database summary.
pub fn update_database_status(
    root: &Path,
    migrations_executed: bool,
    schema_initialized: bool,
) -> Result<()> {
    let mut metadata = load(root)?;
    metadata.database.migrations_executed = migrations_executed;
    metadata.database.schema_initialized = schema_initialized;
    metadata.touch();
    save(root, &metadata)
}

/// Advisory query for display logic: whether an activity has completed.
/// Swallows load errors and reports `false`; callers must not use this for
/// anything correctness-critical.
#[must_use]
pub fn is_activity_completed(root: &Path, activity: &str) -> bool {
    match load(root) {
        Ok(metadata) => metadata
            .activities
            .get(activity)
            .is_some_and(|entry| entry.completed),
        Err(err) => {
            log::debug!("treating {activity} as incomplete: {err}");
            false
        }
    }
}

/// `"re-"` when the activity already ran, for "re-run" phrasing in
/// user-facing messages. Empty otherwise.
#[must_use]
pub fn activity_prefix(root: &Path, activity: &str) -> &'static str {
    if is_activity_completed(root, activity) {
        "re-"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::generate;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn generated(root: &Path) -> ProjectMetadata {
        let metadata = generate(root, "myapi", "api", None, None, "1.0.0").unwrap();
        save(root, &metadata).unwrap();
        metadata
    }

    #[test]
    fn save_load_round_trips() {
        let temp = tempdir().unwrap();
        let metadata = generated(temp.path());

        let loaded = load(temp.path()).unwrap();
        assert_eq!(loaded, metadata);
    }

    #[test]
    fn saved_file_is_markdown_with_one_json_fence() {
        let temp = tempdir().unwrap();
        generated(temp.path());

        let content = fs::read_to_string(metadata_path(temp.path())).unwrap();
        assert!(content.starts_with("# Gophex Project Metadata"));
        assert_eq!(content.matches("```json").count(), 1);
        assert!(content.trim_end().ends_with("```"));
        // 2-space pretty printing.
        assert!(content.contains("\n  \"project\""));
    }

    #[test]
    fn update_activity_stamps_timestamp_and_last_updated() {
        let temp = tempdir().unwrap();
        let before = generated(temp.path());

        update_activity(temp.path(), "tests_executed", true).unwrap();
        let after = load(temp.path()).unwrap();

        let entry = &after.activities["tests_executed"];
        assert!(entry.completed);
        assert!(entry.timestamp.as_deref().is_some_and(|t| !t.is_empty()));
        assert!(after.project.last_updated >= before.project.last_updated);
        assert_eq!(after.project.generated_at, before.project.generated_at);
    }

    #[test]
    fn uncompleting_keeps_the_previous_timestamp() {
        let temp = tempdir().unwrap();
        generated(temp.path());

        update_activity(temp.path(), "tests_executed", true).unwrap();
        let stamped = load(temp.path()).unwrap().activities["tests_executed"]
            .timestamp
            .clone();

        update_activity(temp.path(), "tests_executed", false).unwrap();
        let entry = load(temp.path()).unwrap().activities["tests_executed"].clone();
        assert!(!entry.completed);
        assert_eq!(entry.timestamp, stamped);
    }

    #[test]
    fn update_activity_creates_missing_entries() {
        let temp = tempdir().unwrap();
        generated(temp.path());

        update_activity(temp.path(), "custom_step", true).unwrap();
        let loaded = load(temp.path()).unwrap();
        assert!(loaded.activities["custom_step"].completed);
        assert!(!loaded.activities["custom_step"].can_repeat);
    }

    #[test]
    fn update_database_status_flips_both_flags() {
        let temp = tempdir().unwrap();
        generated(temp.path());

        update_database_status(temp.path(), true, true).unwrap();
        let loaded = load(temp.path()).unwrap();
        assert!(loaded.database.migrations_executed);
        assert!(loaded.database.schema_initialized);
    }

    #[test]
    fn load_without_fence_is_a_format_error() {
        let temp = tempdir().unwrap();
        fs::write(
            metadata_path(temp.path()),
            "# Gophex Project Metadata\n\nNothing here.\n",
        )
        .unwrap();

        let err = load(temp.path()).unwrap_err();
        assert!(matches!(err, MetadataError::MissingPayload(_)));
    }

    #[test]
    fn load_with_invalid_json_is_a_json_error() {
        let temp = tempdir().unwrap();
        fs::write(
            metadata_path(temp.path()),
            "# Gophex Project Metadata\n\n```json\n{not json}\n```\n",
        )
        .unwrap();

        let err = load(temp.path()).unwrap_err();
        assert!(matches!(err, MetadataError::Json(_)));
    }

    #[test]
    fn advisory_queries_swallow_load_errors() {
        let temp = tempdir().unwrap();
        // No gophex.md at all.
        assert!(!is_activity_completed(temp.path(), "tests_executed"));
        assert_eq!(activity_prefix(temp.path(), "tests_executed"), "");

        // Corrupt file.
        fs::write(metadata_path(temp.path()), "no fence\n").unwrap();
        assert!(!is_activity_completed(temp.path(), "tests_executed"));
    }

    #[test]
    fn activity_prefix_marks_reruns() {
        let temp = tempdir().unwrap();
        generated(temp.path());

        assert_eq!(activity_prefix(temp.path(), "tests_executed"), "");
        update_activity(temp.path(), "tests_executed", true).unwrap();
        assert_eq!(activity_prefix(temp.path(), "tests_executed"), "re-");
    }

    #[test]
    fn extract_json_block_needs_tagged_fence() {
        assert_eq!(extract_json_block("```json\n{}\n```\n"), Some("{}"));
        assert_eq!(extract_json_block("text\n```\n{}\n```\n"), None);
        assert_eq!(extract_json_block("```json\n{}"), None);
    }

    #[test]
    fn extract_json_block_ignores_backticks_inside_strings() {
        let content = "```json\n{\n  \"a`b.go\": \"source_file\",\n  \"tri```ple\": \"x\"\n}\n```\n";
        assert_eq!(
            extract_json_block(content),
            Some("{\n  \"a`b.go\": \"source_file\",\n  \"tri```ple\": \"x\"\n}")
        );
    }

    #[test]
    fn filenames_with_backticks_round_trip() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a`b.go"), b"package main").unwrap();
        fs::write(temp.path().join("tri```ple.go"), b"package main").unwrap();

        let metadata = generate(temp.path(), "myapi", "api", None, None, "1.0.0").unwrap();
        save(temp.path(), &metadata).unwrap();

        let loaded = load(temp.path()).unwrap();
        assert_eq!(loaded, metadata);
        assert!(loaded.hierarchy.contains_key("a`b.go"));
        assert!(loaded.hierarchy.contains_key("tri```ple.go"));
    }
}
