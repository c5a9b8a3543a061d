// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(clippy::too_many_arguments)]

//! # refscope
//!
//! Reference usage analysis for .NET assemblies: given a compiled unit and its declared
//! external references, determine which of those references are never structurally
//! required by the code and are therefore safe to remove.
//!
//! `refscope` is the analysis core of a reference-pruning tool. It deliberately does
//! *not* parse the on-disk metadata format - a [`metadata::reader::MetadataReader`]
//! collaborator supplies fully-resolved entities - and it carries no IDE, build, or
//! presentation plumbing. What it does carry is the hard part: the entity graph, the
//! identity and equality rules for assemblies and types (including type forwarding and
//! interop type embedding), the memoized reachability traversals, and the narrowing
//! protocol that composes them into a final unused-reference set.
//!
//! ## Features
//!
//! - **🔍 Sound liveness analysis** - A reference reachable through class hierarchies,
//!   interfaces, member signatures, attribute arguments, manifests, or type forwarders
//!   is never reported as removable
//! - **📦 Abstract entity model** - Read-only assembly/type/member views decoupled from
//!   any binary parser, with fluent builders for hosts and tests
//! - **⚡ Memoized traversal** - A per-run used-type cache bounds interface and
//!   attribute recursion to linear time in the number of distinct types touched
//! - **🧩 Composable algorithms** - Manifest, type-reachability, referenced-types, and
//!   dependent-assemblies passes composed by an early-exiting narrowing protocol
//! - **🛡️ Typed error surface** - Resolution failures carry the offending type's
//!   qualified identity; one unit's failure never aborts a batch
//!
//! ## Quick Start
//!
//! Add `refscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! refscope = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! ```rust
//! use refscope::prelude::*;
//!
//! // Describe the compiled unit through the entity model
//! let unit = AssemblyBuilder::new("MyApp", AssemblyVersion::new(1, 0, 0, 0))
//!     .references(["MyLib, Version=2.0.0.0"])?
//!     .build()?;
//!
//! let mut reader = MemoryReader::new();
//! let unit_id = unit.identity.clone();
//! reader.insert(unit);
//!
//! // Candidates are the project's declared references
//! let candidates = vec![ProjectReference::new(
//!     "OldLib",
//!     AssemblyIdentity::parse("OldLib, Version=1.0.0.0")?,
//!     "packages/OldLib.dll",
//! )];
//!
//! let analyzer = ReferenceAnalyzer::new(&reader);
//! let report = analyzer.analyze(&unit_id, candidates)?;
//! assert_eq!(report.unused.len(), 1); // OldLib is never reached
//! # Ok::<(), refscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `refscope` is organized into three layers, leaves first:
//!
//! - [`metadata`] - Entity model, value identities, and the reader contract
//! - [`analysis`] - Used-type cache, reachability strategies, composed algorithms,
//!   the candidate narrowing protocol, and the multi-unit batch driver
//! - [`project`] - Bounded LRU caching of loaded assemblies around any reader
//!
//! Data flows from the entity model through the identity layer into the strategies
//! (which consult the cache), up through the algorithms, and into the narrowing
//! protocol, which emits the final unused set together with per-reference provenance
//! for everything it retained.
//!
//! ### Identity Rules
//!
//! Assemblies compare by name, version, culture, and public key token; types compare
//! by full name, defining assembly, *and* forwarded-from origin. The same nominal type
//! forwarded from two different origins intentionally does not collapse: each origin
//! assembly is independently live when reached through that path. See
//! [`metadata::identity`] for the full contract.
//!
//! ### Caching Discipline
//!
//! Every analysis run owns a fresh [`analysis::cache::UsedTypeCache`]; nothing is
//! process-global. Sharing a cache across unrelated units would silently skip types in
//! the second run and is a soundness bug, so the public entry points make it
//! impossible by construction.

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// Import [`prelude::*`](prelude) to get the analyzer facade, the entity builders,
/// the in-memory reader, and the identity types in one line.
pub mod prelude;

/// Entity model, value identities, and the metadata reader contract.
///
/// Everything the analysis engine knows about an assembly comes through this module:
/// the immutable entity views ([`metadata::entity`]), the value identities used as
/// map and set keys ([`metadata::identity`]), and the [`metadata::reader`] seam
/// through which a host supplies resolved metadata.
pub mod metadata;

/// Reference usage analysis: cache, strategies, algorithms, narrowing, batch driver.
///
/// The main entry point is [`analysis::ReferenceAnalyzer`]; the lower layers are
/// public so hosts can compose their own pipelines or seed traversal state in tests.
pub mod analysis;

/// Assembly caching for repeated analysis runs.
///
/// [`project::AssemblyCache`] is an explicit bounded LRU over loaded assemblies, and
/// [`project::CachingReader`] decorates any [`metadata::reader::MetadataReader`]
/// with it. Resource hygiene only - eviction never affects correctness because
/// reconstruction through the inner reader is idempotent.
pub mod project;

/// `refscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always
/// [`Error`]. Used consistently throughout the crate for all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `refscope` Error type
///
/// The main error type for all operations in this crate. See [`error`](Error) for the
/// taxonomy: boundary validation, metadata resolution failures, unresolved imports,
/// and unsupported input, each surfaced distinctly.
pub use error::Error;

/// Main entry point for analyzing a compiled unit's references.
///
/// See [`analysis::ReferenceAnalyzer`] for the high-level API.
pub use analysis::ReferenceAnalyzer;
