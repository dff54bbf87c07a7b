//! Report Loading and Validation
//!
//! Turns JSON documents into [`ReportData`] and writes merged reports back out.
//! Validation happens field by field so that a bad document is reported by its
//! position in the input list and the offending field, instead of failing with a
//! generic deserialization error.
//!
//! Required top-level fields are `config`, `componentStats` and `rawData`. All
//! other fields fall back to empty values when absent.

use crate::error::{MergeError, Result};
use crate::models::ReportData;
use anyhow::Context;
use glob::glob;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const ROOT: &str = "<root>";

/// Build a report from an untyped document, the `index`-th in the input list.
pub fn report_from_value(index: usize, document: Value) -> Result<ReportData> {
    let Value::Object(mut fields) = document else {
        return Err(MergeError::malformed(index, ROOT, "is not a JSON object"));
    };

    Ok(ReportData {
        generated_at: optional_field(index, &mut fields, "generatedAt")?,
        config: required_field(index, &mut fields, "config")?,
        mrc_versions: optional_field(index, &mut fields, "mrcVersions")?,
        component_stats: required_field(index, &mut fields, "componentStats")?,
        unused_components: optional_field(index, &mut fields, "unusedComponents")?,
        unused_components_by_mfe: optional_field(index, &mut fields, "unusedComponentsByMfe")?,
        overall_stats: optional_field(index, &mut fields, "overallStats")?,
        raw_data: required_field(index, &mut fields, "rawData")?,
    })
}

fn required_field<T: DeserializeOwned>(
    index: usize,
    fields: &mut Map<String, Value>,
    name: &str,
) -> Result<T> {
    match fields.remove(name) {
        None | Some(Value::Null) => Err(MergeError::malformed(index, name, "is missing")),
        Some(value) => decode(index, name, value),
    }
}

fn optional_field<T: DeserializeOwned + Default>(
    index: usize,
    fields: &mut Map<String, Value>,
    name: &str,
) -> Result<T> {
    match fields.remove(name) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => decode(index, name, value),
    }
}

fn decode<T: DeserializeOwned>(index: usize, name: &str, value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| MergeError::malformed(index, name, format!("has the wrong shape: {e}")))
}

/// Parse the text of the `index`-th input.
pub fn parse_report(index: usize, content: &str) -> Result<ReportData> {
    let document: Value = serde_json::from_str(content)
        .map_err(|e| MergeError::malformed(index, ROOT, format!("is not valid JSON: {e}")))?;
    report_from_value(index, document)
}

/// Read every file concurrently. Results keep the order of `paths`.
pub async fn load_reports(paths: &[PathBuf]) -> Result<Vec<ReportData>> {
    let reads = paths.iter().map(|path| async move {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| MergeError::io(path, e))?;
        debug!(path = %path.display(), bytes = content.len(), "Read report file");
        Ok::<_, MergeError>(content)
    });

    let contents = futures::future::try_join_all(reads).await?;

    contents
        .iter()
        .enumerate()
        .map(|(index, content)| parse_report(index, content))
        .collect()
}

/// Serialize `report` to `path`, creating parent directories as needed.
pub async fn write_report(path: &Path, report: &ReportData, pretty: bool) -> Result<()> {
    let content = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| MergeError::io(parent, e))?;
    }

    tokio::fs::write(path, content)
        .await
        .map_err(|e| MergeError::io(path, e))?;

    info!(path = %path.display(), "Wrote merged report");
    Ok(())
}

/// Expand glob patterns in input arguments. Plain paths pass through untouched.
pub fn expand_input_paths(args: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for arg in args {
        if !arg.contains(['*', '?', '[']) {
            paths.push(PathBuf::from(arg));
            continue;
        }

        let mut matched: Vec<PathBuf> = glob(arg)
            .with_context(|| format!("Invalid input pattern: {arg}"))?
            .flatten()
            .collect();
        matched.sort();

        if matched.is_empty() {
            anyhow::bail!("No files match input pattern: {arg}");
        }
        paths.extend(matched);
    }

    Ok(paths)
}

/// Short name for an input file, used when a report carries no application label.
pub fn source_label(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}
