//! Core Data Models
//!
//! This module defines the data structures of a component-usage report. The same
//! shape is used for every scan result fed into the merger and for the
//! consolidated report it produces.
//!
//! ## Data Flow
//!
//! 1. **Input**: [`ReportData`] - One document per scanned application
//! 2. **Merge Unit**: [`ComponentStat`] - Per-component counters folded by name
//! 3. **Derived View**: [`OverallStats`] - Recomputed after every merge, never merged
//!
//! ## Core Types
//!
//! ### Report Structure
//! - [`ReportData`] - Top-level report document
//! - [`ReportConfig`] - Scan configuration, carries the `mfes` list
//! - [`RawData`] - Raw per-usage records, passed through opaquely
//!
//! ### Component Statistics
//! - [`ComponentStat`] - Usage counters for a single component
//! - [`PropUsage`] - How often a prop is passed to a component
//! - [`Customization`] - Styling override counters
//! - [`ComponentRef`] - A library component identified by `(name, path)`
//!
//! ### Summary
//! - [`OverallStats`] - Totals and top-N rankings
//! - [`NamedCount`] - A `{name, count}` ranking entry
//!
//! All wire names are camelCase, matching the JSON emitted by the scanners.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Map from micro-frontend name to a usage count.
pub type MfeCounts = BTreeMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    #[serde(default)]
    pub generated_at: String,
    pub config: ReportConfig,
    #[serde(default)]
    pub mrc_versions: BTreeMap<String, String>,
    pub component_stats: Vec<ComponentStat>,
    #[serde(default)]
    pub unused_components: Vec<ComponentRef>,
    #[serde(default)]
    pub unused_components_by_mfe: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub overall_stats: OverallStats,
    pub raw_data: RawData,
}

/// Scan configuration. Only `mfes` is interpreted; everything else is carried verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub mfes: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentStat {
    pub component_name: String,
    #[serde(default)]
    pub total_usages: u64,
    #[serde(default)]
    pub usages_by_mfe: MfeCounts,
    #[serde(default)]
    pub common_props: Vec<PropUsage>,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub customization: Customization,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropUsage {
    pub name: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    #[serde(default)]
    pub styled_component_count: u64,
    #[serde(default)]
    pub custom_styles_count: u64,
    #[serde(default)]
    pub overridden_properties_counts: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentRef {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    #[serde(default)]
    pub total_usages: u64,
    #[serde(default)]
    pub mfe_usages: MfeCounts,
    #[serde(default)]
    pub most_used_components: Vec<NamedCount>,
    #[serde(default)]
    pub most_used_props: Vec<NamedCount>,
    #[serde(default)]
    pub total_unused_components: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedCount {
    pub name: String,
    pub count: u64,
}

/// Raw scanner output. Individual usage records are opaque to the merger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawData {
    #[serde(default)]
    pub component_usages: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReportConfig {
    /// Optional application label set by the scanner.
    pub fn application(&self) -> Option<&str> {
        self.extra.get("application").and_then(Value::as_str)
    }
}

impl ComponentStat {
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
            total_usages: 0,
            usages_by_mfe: MfeCounts::new(),
            common_props: Vec::new(),
            files: Vec::new(),
            customization: Customization::default(),
        }
    }
}

impl ComponentRef {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl NamedCount {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}
