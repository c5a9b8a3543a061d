//! Metadata surface of the analysis engine.
//!
//! This module defines everything the engine knows about a compiled unit without ever
//! touching the on-disk metadata format: the value identities used as keys throughout
//! the analysis ([`identity`]), the read-only entity views over assemblies, types,
//! members, and attributes ([`entity`]), and the [`reader`] contract through which a
//! host supplies fully-resolved entities for any assembly identity.
//!
//! # Layering
//!
//! The entity model is pure data: construction happens once (through the builders or a
//! reader implementation) and every view afterwards is side-effect free. The identity
//! layer sits below it and owes nothing to the entities - identities are plain value
//! objects with structural equality, safe to use as map and set keys across threads.
//!
//! Binary-format parsing is explicitly out of scope; a parser-backed host implements
//! [`reader::MetadataReader`] on top of its own loading machinery, and the engine never
//! notices the difference from the in-memory [`reader::MemoryReader`] used in tests.

pub mod entity;
pub mod identity;
pub mod reader;
