//! Integration tests for project discovery, the component graph and its cache

use std::fs;
use std::path::Path;
use std::sync::Arc;

use indoc::indoc;
use tempfile::TempDir;
use zenith_language_server::project::{ComponentKind, ProjectGraph, ProjectGraphCache, detect_root};

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn create_project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "zenith.config.ts", "export default {}\n");
    write(
        root,
        "src/components/Card.zen",
        indoc! {r#"
            <script lang="ts">
              interface Props { heading: string; compact?: boolean }
            </script>
            <article><h2>{heading}</h2><p>{description}</p></article>
        "#},
    );
    write(root, "src/components/forms/Button.zen", "<button>{label}</button>\n");
    write(root, "src/layouts/Main.zen", "<main><slot /></main>\n");
    write(root, "src/pages/index.zen", "<Main><Card /></Main>\n");
    write(root, "src/pages/notes.txt", "not a component\n");
    dir
}

#[test]
fn test_build_graph() {
    let _ = zenith_language_server::logging::init_logger(false, Some("warn"), false);
    let project = create_project();
    let graph = ProjectGraph::build(project.path());

    assert_eq!(graph.len(), 4);
    assert!(graph.layouts.contains_key("Main"));
    assert!(graph.pages.contains_key("index"));

    let card = graph.lookup("Card").expect("Card component");
    assert_eq!(card.kind, ComponentKind::Component);
    assert_eq!(card.props, vec!["heading", "compact", "description"]);

    let button = graph.lookup("Button").expect("nested components are discovered");
    assert_eq!(button.props, vec!["label"]);

    assert!(graph.is_resolvable_component("Main"));
    assert!(!graph.is_resolvable_component("Missing"));
}

#[test]
fn test_missing_directories_give_empty_graph() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "zenith.config.js", "");
    let graph = ProjectGraph::build(dir.path());
    assert!(graph.is_empty());
}

#[test]
fn test_detect_root_from_nested_file() {
    let project = create_project();
    let page = project.path().join("src/pages/index.zen");
    assert_eq!(detect_root(&page).as_deref(), Some(project.path()));
}

#[test]
fn test_cache_reuses_graphs() {
    let project = create_project();
    let cache = ProjectGraphCache::new();
    let page = project.path().join("src/pages/index.zen");

    let first = cache.graph_for_file(&page).expect("graph");
    let second = cache.graph_for_file(&page).expect("graph");
    assert!(Arc::ptr_eq(&first, &second));

    let stats = cache.stats();
    assert_eq!(stats.builds, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[test]
fn test_invalidation_of_unrelated_root_keeps_current_graph() {
    let current = create_project();
    let other = create_project();
    let cache = ProjectGraphCache::new();

    let graph = cache.get_or_build(current.path());
    cache.get_or_build(other.path());
    assert_eq!(cache.len(), 2);

    let changed = other.path().join("src/components/New.zen");
    assert_eq!(cache.invalidate_paths([changed.as_path()]), 1);

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.roots_containing(&current.path().join("src/pages/index.zen")).len(), 1);
    assert!(Arc::ptr_eq(&graph, &cache.get_or_build(current.path())));
}

#[test]
fn test_rebuild_after_invalidation_sees_new_component() {
    let project = create_project();
    let cache = ProjectGraphCache::new();
    assert!(!cache.get_or_build(project.path()).is_resolvable_component("Footer"));

    write(project.path(), "src/components/Footer.zen", "<footer />\n");
    let footer = project.path().join("src/components/Footer.zen");
    cache.invalidate_paths([footer.as_path()]);

    assert!(cache.get_or_build(project.path()).is_resolvable_component("Footer"));
    assert_eq!(cache.stats().invalidations, 1);
}
