// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! lincache-core: classification and export engine for lincache.
//!
//! Reads untyped records from a project-management application's local
//! store, decides what each collection holds from the shape of its records,
//! and builds a normalized, versioned snapshot of projects, teams, users,
//! workflow states, cycles and labels.
//!
//! ```rust,ignore
//! use lincache_core::{build_snapshot, build_tables, locate, DatabaseSelector, Source};
//!
//! if let Source::Ready(store) = locate(root, &DatabaseSelector::default()) {
//!     let build = build_tables(&store)?;
//!     let snapshot = build_snapshot(&build.tables, Utc::now(), &ExportOptions::default());
//! }
//! ```

pub mod classify;
pub mod clock;
pub mod discover;
pub mod error;
pub mod record;
pub mod resolve;
pub mod snapshot;
pub mod source;
pub mod store;
pub mod tables;

pub use classify::{classify, detect, EntityKind, StateType};
pub use clock::{ClockSource, FixedClock, SystemClock};
pub use discover::{discover, DiscoveryReport, StoreInfo};
pub use error::{Error, Result};
pub use record::Record;
pub use snapshot::{build_snapshot, empty_snapshot, ExportOptions, Snapshot, SNAPSHOT_VERSION};
pub use source::{locate, DatabaseSelector, Source};
pub use store::{JsonlStore, MemoryStore, RecordStore};
pub use tables::{build_tables, CollectionScan, EntityTables, ScanOutcome, SkipReason, TableBuild};
