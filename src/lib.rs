//! Usage Report Merge Library
//!
//! Combines component-usage telemetry reports produced by separate scans of
//! different micro-frontends or applications into one consolidated report, with
//! all aggregate statistics recomputed from the merged detail records.
//!
//! ## Architecture Overview
//!
//! - [`models`] - Report data model, camelCase on the wire
//! - [`merge`] - The merge engine: an N-ary fold over one pairwise combine step
//! - [`stats`] - Recomputation of the derived `overallStats` view
//! - [`loader`] - Validation of untyped JSON, file loading and writing
//! - [`mfe_cache`] - Application to micro-frontend index
//! - [`display`] - Terminal summary and JSON output
//! - [`config`] - Configuration with file and environment variable support
//! - [`logging`] - Structured logging setup
//! - [`error`] - Typed errors for loading and merging
//!
//! ## Main Entry Point
//!
//! ```rust
//! use usage_report_merge::{loader, ReportMerger};
//!
//! # async fn example(paths: Vec<std::path::PathBuf>) -> anyhow::Result<()> {
//! let reports = loader::load_reports(&paths).await?;
//! let merged = ReportMerger::new().merge_reports(&reports)?;
//! loader::write_report("merged-report.json".as_ref(), &merged, true).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod loader;
pub mod logging;
pub mod merge;
pub mod mfe_cache;
pub mod models;
pub mod stats;

pub use error::MergeError;
pub use merge::{MergeOptions, ReportMerger};
pub use mfe_cache::ApplicationMfeCache;
pub use models::*;
