//! Language features served over the protocol
//!
//! Both features work on plain text and byte offsets; the backend converts
//! protocol positions before calling them.

pub mod completion;
pub mod hover;

pub use completion::{Suggestion, complete};
pub use hover::{HoverBuilder, HoverInfo, hover};
