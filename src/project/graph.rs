//! Cross-file component graph of a project
//!
//! A project root holds (directly, or under `src/` or `app/`) the conventional
//! directories `layouts/`, `components/` and `pages/`. Every `.zen` file found
//! recursively below them becomes a [`ComponentInfo`] named after its file stem.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::props::read_props;

pub const COMPONENT_EXTENSION: &str = "zen";

/// Files whose presence marks a project root
pub const MARKER_FILES: &[&str] = &["zenith.config.ts", "zenith.config.js", "zenith.config.mjs"];

/// Conventional source directories, checked in order
pub const SOURCE_DIRS: &[&str] = &["src", "app"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Layout,
    Component,
    Page,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 3] = [ComponentKind::Layout, ComponentKind::Component, ComponentKind::Page];

    pub fn directory(self) -> &'static str {
        match self {
            ComponentKind::Layout => "layouts",
            ComponentKind::Component => "components",
            ComponentKind::Page => "pages",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ComponentKind::Layout => "layout",
            ComponentKind::Component => "component",
            ComponentKind::Page => "page",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
    pub name: String,
    pub path: PathBuf,
    pub kind: ComponentKind,
    pub props: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectGraph {
    pub root: PathBuf,
    pub layouts: BTreeMap<String, ComponentInfo>,
    pub components: BTreeMap<String, ComponentInfo>,
    pub pages: BTreeMap<String, ComponentInfo>,
}

impl ProjectGraph {
    /// Scans the project under `root`. Missing directories are empty; when two
    /// files of one kind share a stem, the first in path order wins.
    pub fn build(root: &Path) -> Self {
        let source_root = source_root(root);
        let mut graph = ProjectGraph {
            root: root.to_path_buf(),
            ..Default::default()
        };

        for kind in ComponentKind::ALL {
            let dir = source_root.join(kind.directory());
            if !dir.is_dir() {
                continue;
            }
            for result in WalkDir::new(&dir).sort_by_file_name() {
                let entry = match result {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!("Failed to read {:?} while building project graph: {}", dir, e);
                        continue;
                    }
                };
                let path = entry.path();
                if !entry.file_type().is_file()
                    || path.extension().is_none_or(|ext| ext != COMPONENT_EXTENSION)
                {
                    continue;
                }
                let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                    continue;
                };
                let map = graph.map_mut(kind);
                if map.contains_key(name) {
                    debug!("Duplicate {} {:?} ignored", kind.label(), path);
                    continue;
                }
                map.insert(
                    name.to_string(),
                    ComponentInfo {
                        name: name.to_string(),
                        path: path.to_path_buf(),
                        kind,
                        props: read_props(path),
                    },
                );
            }
        }

        debug!(
            "Built project graph for {:?}: {} layouts, {} components, {} pages",
            root,
            graph.layouts.len(),
            graph.components.len(),
            graph.pages.len()
        );
        graph
    }

    pub fn map(&self, kind: ComponentKind) -> &BTreeMap<String, ComponentInfo> {
        match kind {
            ComponentKind::Layout => &self.layouts,
            ComponentKind::Component => &self.components,
            ComponentKind::Page => &self.pages,
        }
    }

    fn map_mut(&mut self, kind: ComponentKind) -> &mut BTreeMap<String, ComponentInfo> {
        match kind {
            ComponentKind::Layout => &mut self.layouts,
            ComponentKind::Component => &mut self.components,
            ComponentKind::Page => &mut self.pages,
        }
    }

    /// Looks `name` up in layouts, then components, then pages
    pub fn lookup(&self, name: &str) -> Option<&ComponentInfo> {
        ComponentKind::ALL
            .into_iter()
            .find_map(|kind| self.map(kind).get(name))
    }

    /// Whether a template may reference `name` as a tag. Pages are routes, not
    /// embeddable components.
    pub fn is_resolvable_component(&self, name: &str) -> bool {
        self.layouts.contains_key(name) || self.components.contains_key(name)
    }

    /// Layouts then components, each in name order
    pub fn embeddable(&self) -> impl Iterator<Item = &ComponentInfo> {
        self.layouts.values().chain(self.components.values())
    }

    pub fn len(&self) -> usize {
        self.layouts.len() + self.components.len() + self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Directory holding `layouts/`, `components/` and `pages/` for `root`: the
/// root itself, else the first source dir with any of them, else the first
/// source dir that exists
pub fn source_root(root: &Path) -> PathBuf {
    if has_graph_dirs(root) {
        return root.to_path_buf();
    }
    let candidates: Vec<PathBuf> = SOURCE_DIRS.iter().map(|dir| root.join(dir)).collect();
    candidates
        .iter()
        .find(|dir| has_graph_dirs(dir))
        .or_else(|| candidates.iter().find(|dir| dir.is_dir()))
        .cloned()
        .unwrap_or_else(|| root.to_path_buf())
}

fn has_graph_dirs(dir: &Path) -> bool {
    ComponentKind::ALL
        .iter()
        .any(|kind| dir.join(kind.directory()).is_dir())
}

/// Walks upward from `start` (a file or directory) to the nearest project
/// root: a directory with a marker file, or with a `src/` or `app/` directory
/// that contains `pages/` or `layouts/`.
pub fn detect_root(start: &Path) -> Option<PathBuf> {
    let first = if start.is_file() { start.parent()? } else { start };
    first.ancestors().find(|dir| is_project_root(dir)).map(Path::to_path_buf)
}

fn is_project_root(dir: &Path) -> bool {
    if MARKER_FILES.iter().any(|marker| dir.join(marker).is_file()) {
        return true;
    }
    SOURCE_DIRS.iter().any(|source| {
        let source = dir.join(source);
        source.join("pages").is_dir() || source.join("layouts").is_dir()
    })
}
