#![allow(dead_code)]

use anyhow::Result;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use usage_report_merge::models::*;
use usage_report_merge::stats::{compute_overall_stats, DEFAULT_TOP_N};

/// Builder for scanner-style reports used across the integration tests.
pub struct ReportBuilder {
    report: ReportData,
}

impl ReportBuilder {
    pub fn new(mfes: &[&str]) -> Self {
        Self {
            report: ReportData {
                generated_at: "2024-01-15T10:30:00.000Z".to_string(),
                config: ReportConfig {
                    mfes: mfes.iter().map(|m| m.to_string()).collect(),
                    ..Default::default()
                },
                mrc_versions: Default::default(),
                component_stats: Vec::new(),
                unused_components: Vec::new(),
                unused_components_by_mfe: Default::default(),
                overall_stats: OverallStats::default(),
                raw_data: RawData::default(),
            },
        }
    }

    pub fn config_value(mut self, key: &str, value: Value) -> Self {
        self.report.config.extra.insert(key.to_string(), value);
        self
    }

    pub fn version(mut self, mfe: &str, version: &str) -> Self {
        self.report
            .mrc_versions
            .insert(mfe.to_string(), version.to_string());
        self
    }

    pub fn component(mut self, stat: ComponentStat) -> Self {
        self.report.component_stats.push(stat);
        self
    }

    pub fn unused(mut self, name: &str, path: &str) -> Self {
        self.report
            .unused_components
            .push(ComponentRef::new(name, path));
        self
    }

    pub fn unused_in(mut self, mfe: &str, names: &[&str]) -> Self {
        self.report.unused_components_by_mfe.insert(
            mfe.to_string(),
            names.iter().map(|n| n.to_string()).collect(),
        );
        self
    }

    pub fn raw_usage(mut self, component: &str, file: &str) -> Self {
        self.report
            .raw_data
            .component_usages
            .push(json!({ "component": component, "file": file }));
        self
    }

    /// Finish with `overallStats` consistent with the content, as a scanner would.
    pub fn build(mut self) -> ReportData {
        self.report.overall_stats = compute_overall_stats(
            &self.report.component_stats,
            &self.report.unused_components,
            DEFAULT_TOP_N,
        );
        self.report
    }
}

pub fn component(name: &str, mfe_usages: &[(&str, u64)]) -> ComponentStat {
    let mut stat = ComponentStat::new(name);
    stat.usages_by_mfe = mfe_usages
        .iter()
        .map(|(m, c)| (m.to_string(), *c))
        .collect();
    stat.total_usages = mfe_usages.iter().map(|(_, c)| c).sum();
    stat
}

pub fn with_props(mut stat: ComponentStat, props: &[(&str, u64)]) -> ComponentStat {
    stat.common_props = props
        .iter()
        .map(|(name, count)| PropUsage {
            name: name.to_string(),
            count: *count,
        })
        .collect();
    stat
}

pub fn with_files(mut stat: ComponentStat, files: &[&str]) -> ComponentStat {
    stat.files = files.iter().map(|f| f.to_string()).collect();
    stat
}

pub fn write_report(dir: &Path, filename: &str, report: &ReportData) -> Result<PathBuf> {
    let path = dir.join(filename);
    fs::write(&path, serde_json::to_string_pretty(report)?)?;
    Ok(path)
}
