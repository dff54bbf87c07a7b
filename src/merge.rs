//! Report Merge Engine
//!
//! This module combines several component-usage reports, each produced by a
//! separate scan of one micro-frontend or application, into a single
//! consolidated report.
//!
//! ## Merge Strategy
//!
//! The merge is a left fold over the input documents. Each step combines the
//! accumulator with the next report through one pairwise primitive; after the
//! fold, `overallStats` is rebuilt from the merged component statistics.
//!
//! ### Per-field rules
//! - **`generatedAt`**: set to the merge time
//! - **`config.mfes`**: union in first-seen order; other config keys come from the first report
//! - **`mrcVersions`**: key-by-key, later reports win
//! - **`componentStats`**: keyed by `componentName`; counters and per-MFE counts summed,
//!   `commonProps` merged by prop name, `files` deduplicated in first-seen order
//! - **`unusedComponents`**: concatenated, deduplicated by `(name, path)`
//! - **`unusedComponentsByMfe`**: per-MFE union of component names
//! - **`rawData.componentUsages`**: concatenated as-is
//!
//! ## Usage Example
//!
//! ```rust
//! use usage_report_merge::merge::ReportMerger;
//!
//! # fn example(reports: Vec<usage_report_merge::ReportData>) -> anyhow::Result<()> {
//! let merger = ReportMerger::new();
//! let merged = merger.merge_reports(&reports)?;
//! println!("{} usages", merged.overall_stats.total_usages);
//! # Ok(())
//! # }
//! ```

use crate::error::{MergeError, Result};
use crate::loader;
use crate::models::*;
use crate::stats::{compute_overall_stats, DEFAULT_TOP_N};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Entries kept in `mostUsedComponents` and `mostUsedProps`.
    pub top_n: usize,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

pub struct ReportMerger {
    options: MergeOptions,
}

impl Default for ReportMerger {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportMerger {
    pub fn new() -> Self {
        Self::with_options(MergeOptions::default())
    }

    pub fn with_options(options: MergeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Merge reports in order. A single report is returned unchanged.
    pub fn merge_reports(&self, reports: &[ReportData]) -> Result<ReportData> {
        let Some((first, rest)) = reports.split_first() else {
            return Err(MergeError::InvalidInputCount {
                minimum: 1,
                actual: 0,
            });
        };

        if rest.is_empty() {
            debug!("Single report supplied, returning it unchanged");
            return Ok(first.clone());
        }

        let merged_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        let mut merged = rest.iter().enumerate().fold(first.clone(), |acc, (i, next)| {
            debug!(
                report_index = i + 1,
                components = next.component_stats.len(),
                raw_usages = next.raw_data.component_usages.len(),
                "Folding report into accumulator"
            );
            combine(acc, next, &merged_at)
        });

        merged.overall_stats = compute_overall_stats(
            &merged.component_stats,
            &merged.unused_components,
            self.options.top_n,
        );

        info!(
            reports = reports.len(),
            components = merged.component_stats.len(),
            total_usages = merged.overall_stats.total_usages,
            unused_components = merged.overall_stats.total_unused_components,
            "Merged usage reports"
        );

        Ok(merged)
    }

    /// Validate untyped documents, then merge them.
    pub fn merge_documents(&self, documents: Vec<Value>) -> Result<ReportData> {
        let reports = documents
            .into_iter()
            .enumerate()
            .map(|(index, doc)| loader::report_from_value(index, doc))
            .collect::<Result<Vec<_>>>()?;

        self.merge_reports(&reports)
    }
}

/// Pairwise combine step. `overallStats` is left empty; the caller rebuilds it.
fn combine(left: ReportData, right: &ReportData, merged_at: &str) -> ReportData {
    let mut mrc_versions = left.mrc_versions;
    mrc_versions.extend(
        right
            .mrc_versions
            .iter()
            .map(|(mfe, version)| (mfe.clone(), version.clone())),
    );

    let mut component_usages = left.raw_data.component_usages;
    component_usages.extend(right.raw_data.component_usages.iter().cloned());

    ReportData {
        generated_at: merged_at.to_string(),
        config: ReportConfig {
            mfes: union_ordered(left.config.mfes, &right.config.mfes),
            extra: left.config.extra,
        },
        mrc_versions,
        component_stats: merge_component_stats(left.component_stats, &right.component_stats),
        unused_components: union_ordered(left.unused_components, &right.unused_components),
        unused_components_by_mfe: merge_unused_by_mfe(
            left.unused_components_by_mfe,
            &right.unused_components_by_mfe,
        ),
        overall_stats: OverallStats::default(),
        raw_data: RawData {
            component_usages,
            extra: left.raw_data.extra,
        },
    }
}

/// Key both sides by `componentName`; first appearance fixes the position.
fn merge_component_stats(left: Vec<ComponentStat>, right: &[ComponentStat]) -> Vec<ComponentStat> {
    let mut merged: Vec<ComponentStat> = Vec::with_capacity(left.len() + right.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for stat in left.into_iter().chain(right.iter().cloned()) {
        match positions.get(&stat.component_name) {
            Some(&idx) => {
                let combined = combine_stat(&merged[idx], &stat);
                merged[idx] = combined;
            }
            None => {
                positions.insert(stat.component_name.clone(), merged.len());
                merged.push(stat);
            }
        }
    }

    merged
}

fn combine_stat(left: &ComponentStat, right: &ComponentStat) -> ComponentStat {
    ComponentStat {
        component_name: left.component_name.clone(),
        total_usages: left.total_usages.saturating_add(right.total_usages),
        usages_by_mfe: sum_counts(&left.usages_by_mfe, &right.usages_by_mfe),
        common_props: merge_props(&left.common_props, &right.common_props),
        files: union_ordered(left.files.clone(), &right.files),
        customization: Customization {
            styled_component_count: left
                .customization
                .styled_component_count
                .saturating_add(right.customization.styled_component_count),
            custom_styles_count: left
                .customization
                .custom_styles_count
                .saturating_add(right.customization.custom_styles_count),
            overridden_properties_counts: sum_counts(
                &left.customization.overridden_properties_counts,
                &right.customization.overridden_properties_counts,
            ),
        },
    }
}

/// Merge by prop name: shared names sum their counts, new names are appended.
fn merge_props(left: &[PropUsage], right: &[PropUsage]) -> Vec<PropUsage> {
    let mut merged: Vec<PropUsage> = Vec::with_capacity(left.len() + right.len());
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for prop in left.iter().chain(right) {
        match positions.get(prop.name.as_str()) {
            Some(&idx) => merged[idx].count = merged[idx].count.saturating_add(prop.count),
            None => {
                positions.insert(prop.name.as_str(), merged.len());
                merged.push(prop.clone());
            }
        }
    }

    merged
}

fn sum_counts(left: &BTreeMap<String, u64>, right: &BTreeMap<String, u64>) -> BTreeMap<String, u64> {
    let mut summed = left.clone();
    for (key, count) in right {
        let total = summed.entry(key.clone()).or_insert(0);
        *total = total.saturating_add(*count);
    }
    summed
}

fn merge_unused_by_mfe(
    left: BTreeMap<String, Vec<String>>,
    right: &BTreeMap<String, Vec<String>>,
) -> BTreeMap<String, Vec<String>> {
    let mut merged = left;
    for (mfe, names) in right {
        let existing = merged.remove(mfe).unwrap_or_default();
        merged.insert(mfe.clone(), union_ordered(existing, names));
    }
    merged
}

/// Existing items followed by unseen items from `right`, with no duplicates.
fn union_ordered<T>(left: Vec<T>, right: &[T]) -> Vec<T>
where
    T: Clone + Eq + Hash,
{
    let mut seen: HashSet<T> = HashSet::with_capacity(left.len() + right.len());
    let mut merged = Vec::with_capacity(left.len() + right.len());

    for item in left.into_iter().chain(right.iter().cloned()) {
        if seen.insert(item.clone()) {
            merged.push(item);
        }
    }

    merged
}
