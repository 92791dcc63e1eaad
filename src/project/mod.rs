//! Project-wide component knowledge

pub mod cache;
pub mod graph;
pub mod props;

pub use cache::{GraphCacheStats, ProjectGraphCache};
pub use graph::{
    COMPONENT_EXTENSION, ComponentInfo, ComponentKind, MARKER_FILES, ProjectGraph, SOURCE_DIRS,
    detect_root, source_root,
};
pub use props::{PROP_VOCABULARY, infer_props, read_props};
