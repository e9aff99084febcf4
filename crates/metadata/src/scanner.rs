use crate::document::{Hierarchy, HierarchyNode};
use crate::{MetadataError, Result};
use gophex_classify::classify;
use std::path::{Component, Path};
use walkdir::WalkDir;

/// Walk a project tree and build its hierarchy snapshot.
///
/// Dotfiles and dot-directories are skipped, except names starting with
/// `.env` (so `.env` and `.env.example` are captured but `.git` is pruned
/// whole). The scan root itself is excluded. Any traversal error aborts the
/// scan; no partial hierarchy is returned.
pub fn scan_hierarchy(root: &Path) -> Result<Hierarchy> {
    let mut hierarchy = Hierarchy::new();
    let mut entries = 0usize;

    // min_depth(1) excludes the scan root, so the skip rule is never
    // applied to the root's own name.
    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !is_skipped(&entry.file_name().to_string_lossy()));

    for entry in walker {
        let entry = entry?;
        let relative = entry.path().strip_prefix(root).map_err(|_| {
            MetadataError::InvalidPath(entry.path().display().to_string())
        })?;

        let segments: Vec<String> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if segments.is_empty() {
            continue;
        }

        let label = if entry.file_type().is_dir() {
            None
        } else {
            Some(classify(&segments.join("/")))
        };
        insert(&mut hierarchy, &segments, label);
        entries += 1;
    }

    log::debug!("scanned {entries} entries under {}", root.display());
    Ok(hierarchy)
}

/// Skip rule: hidden entries are pruned, `.env*` is the one exemption.
fn is_skipped(name: &str) -> bool {
    name.starts_with('.') && !name.starts_with(".env")
}

fn insert(tree: &mut Hierarchy, segments: &[String], label: Option<&'static str>) {
    match segments {
        [] => {}
        [leaf] => match label {
            Some(label) => {
                tree.insert(leaf.clone(), HierarchyNode::File(label.to_string()));
            }
            None => {
                tree.entry(leaf.clone())
                    .or_insert_with(|| HierarchyNode::Directory(Hierarchy::new()));
            }
        },
        [first, rest @ ..] => {
            let node = tree
                .entry(first.clone())
                .or_insert_with(|| HierarchyNode::Directory(Hierarchy::new()));
            if let HierarchyNode::Directory(children) = node {
                insert(children, rest, label);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{is_skipped, scan_hierarchy};
    use crate::document::HierarchyNode;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn skips_dot_entries_but_keeps_env_files() {
        let temp = tempdir().unwrap();
        let git = temp.path().join(".git").join("objects");
        fs::create_dir_all(&git).unwrap();
        fs::write(git.join("abc123"), b"blob").unwrap();
        fs::write(temp.path().join(".gitignore"), b"target/").unwrap();
        fs::write(temp.path().join(".env"), b"PORT=8080").unwrap();
        fs::write(temp.path().join("main.go"), b"package main").unwrap();

        let hierarchy = scan_hierarchy(temp.path()).unwrap();

        assert!(!hierarchy.contains_key(".git"));
        assert!(!hierarchy.contains_key(".gitignore"));
        assert_eq!(
            hierarchy.get(".env"),
            Some(&HierarchyNode::File("environment_variables".to_string()))
        );
        assert_eq!(
            hierarchy.get("main.go"),
            Some(&HierarchyNode::File("application_entry_point".to_string()))
        );
    }

    #[test]
    fn builds_nested_directories() {
        let temp = tempdir().unwrap();
        let handlers = temp.path().join("internal").join("api").join("handlers");
        fs::create_dir_all(&handlers).unwrap();
        fs::write(handlers.join("users.go"), b"package handlers").unwrap();
        fs::create_dir_all(temp.path().join("migrations")).unwrap();

        let hierarchy = scan_hierarchy(temp.path()).unwrap();

        let HierarchyNode::Directory(internal) = &hierarchy["internal"] else {
            panic!("internal should be a directory");
        };
        let HierarchyNode::Directory(api) = &internal["api"] else {
            panic!("api should be a directory");
        };
        let HierarchyNode::Directory(handlers) = &api["handlers"] else {
            panic!("handlers should be a directory");
        };
        assert_eq!(
            handlers["users.go"],
            HierarchyNode::File("request_handler".to_string())
        );

        // Empty directories are kept as empty maps.
        assert_eq!(
            hierarchy["migrations"],
            HierarchyNode::Directory(Default::default())
        );
    }

    #[test]
    fn scan_root_may_itself_be_hidden() {
        let temp = tempdir().unwrap();
        let root = temp.path().join(".workdir");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("main.go"), b"package main").unwrap();

        let hierarchy = scan_hierarchy(&root).unwrap();
        assert!(hierarchy.contains_key("main.go"));
    }

    #[test]
    fn skip_rule_is_prefix_based() {
        assert!(is_skipped(".git"));
        assert!(is_skipped(".gitignore"));
        assert!(is_skipped(".idea"));
        assert!(!is_skipped(".env"));
        assert!(!is_skipped(".env.example"));
        assert!(!is_skipped("main.go"));
    }
}
