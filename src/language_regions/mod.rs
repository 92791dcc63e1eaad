//! Embedded language regions of a `.zen` document
//!
//! A component document mixes three sub-languages: the markup template, a
//! `<script>` block and a `<style>` block. This module locates the blocks,
//! scans template tags and classifies cursor positions.

pub mod blocks;
pub mod classifier;
pub mod tags;

pub use blocks::{BlockKind, EmbeddedBlock, find_blocks, mask_non_template, script_block};
pub use classifier::{
    Region, RegionContext, classify, extract_partial_identifier, is_event_attribute,
    is_identifier_char,
};
pub use tags::{Attribute, AttributeValue, HostCategory, Tag, ValueDelimiter, is_component_name, scan_tags};
