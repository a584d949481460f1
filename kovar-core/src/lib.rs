//! # Kovar Core
//!
//! Core logic for the Kovar visual designer.
//! Compiles to WASM so the browser editor runs the same code as the CLI.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              kovar-core.wasm                │
//! ├─────────────────────────────────────────────┤
//! │  Object Table    │  Name Allocator          │
//! │  - Handles       │  - kind-N defaults       │
//! │  - Parent links  │  - Paste dedupe          │
//! │  - Order keys    │  - Suffix bumping        │
//! ├─────────────────────────────────────────────┤
//! │  Tree Builder  →  Node Mapper  →  Schema    │
//! │                                   ↓         │
//! │                           Markup Renderer   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The object table is the source of truth. Schema and markup are derived
//! from it on every export and never edited directly.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod designer;
pub mod error;
pub mod export;
pub mod mapper;
pub mod markup;
pub mod naming;
pub mod object;
pub mod schema;
pub mod snapshot;
pub mod table;
pub mod text;
pub mod tree;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use designer::Designer;
pub use error::{DesignError, DesignResult};
pub use export::{ExportBundle, ExportConfig, SchemaExporter};
pub use mapper::{AssetMap, NodeMapper};
pub use markup::{render_markup, MarkupRenderer};
pub use naming::{NameAllocator, NameAssignment};
pub use object::{
    ComponentOverride, Geometry, ObjectId, ObjectKind, ObjectMeta, OrderKey, VisualObject,
    VisualStyle,
};
pub use schema::{NodeStyle, NodeType, Schema, SchemaNode};
pub use snapshot::{AssetRecord, SnapshotDocument};
pub use table::ObjectTable;
pub use text::{RichText, TextContent};
pub use tree::{build_children, TreeBuilder, TreeNode};

/// Kovar core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
