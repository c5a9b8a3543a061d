//! Project-level plumbing around the metadata reader.
//!
//! Analyzing a solution touches the same shared assemblies from many units, and a
//! host reader may be backed by expensive loading. [`AssemblyCache`] bounds how
//! many loaded assemblies stay resident, and [`CachingReader`] decorates any
//! [`MetadataReader`](crate::metadata::reader::MetadataReader) with it. Eviction
//! is purely a resource concern; the reader contract guarantees reconstruction
//! yields equivalent entities.

mod cache;

pub use cache::{AssemblyCache, CachingReader};
