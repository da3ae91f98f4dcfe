//! Document model shared by every decoder.
//!
//! Decoders produce pages or paragraphs plus raw metadata; the
//! [`Document`] assembled from them is the single output shape of the crate.

mod document;
mod metadata;
mod page;
mod paragraph;

pub use document::{Document, Units, UNIT_SEPARATOR};
pub use metadata::{Metadata, MetadataKey, MetadataValue, RawMetadata};
pub use page::Page;
pub use paragraph::{Paragraph, DEFAULT_STYLE};
