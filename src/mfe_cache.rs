//! Application / micro-frontend index.
//!
//! Maps each scanned application to the micro-frontends it contains, and back.
//! The cache is an ordinary value owned by its caller: it starts empty, is filled
//! by [`ApplicationMfeCache::initialize`], and can be reset with
//! [`ApplicationMfeCache::clear`].

use crate::models::{MfeCounts, ReportData};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default)]
pub struct ApplicationMfeCache {
    mfes_by_application: BTreeMap<String, Vec<String>>,
    application_by_mfe: HashMap<String, String>,
    initialized: bool,
}

impl ApplicationMfeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index each report's `config.mfes` under its application label, falling
    /// back to the matching entry of `labels`.
    pub fn from_reports(labels: &[String], reports: &[ReportData]) -> Self {
        let entries = reports.iter().enumerate().map(|(i, report)| {
            let application = report
                .config
                .application()
                .map(str::to_string)
                .or_else(|| labels.get(i).cloned())
                .unwrap_or_else(|| format!("report-{i}"));
            (application, report.config.mfes.clone())
        });

        let mut cache = Self::new();
        cache.initialize(entries);
        cache
    }

    /// Replace the cache content. Entries for the same application are combined.
    pub fn initialize<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        self.mfes_by_application.clear();
        self.application_by_mfe.clear();

        for (application, mfes) in entries {
            let known = self
                .mfes_by_application
                .entry(application.clone())
                .or_default();
            for mfe in mfes {
                if !known.contains(&mfe) {
                    known.push(mfe.clone());
                }
                self.application_by_mfe
                    .entry(mfe)
                    .or_insert_with(|| application.clone());
            }
        }

        self.initialized = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn applications(&self) -> impl Iterator<Item = &str> {
        self.mfes_by_application.keys().map(String::as_str)
    }

    pub fn mfes_for(&self, application: &str) -> Option<&[String]> {
        self.mfes_by_application
            .get(application)
            .map(Vec::as_slice)
    }

    /// The first application that registered `mfe`.
    pub fn application_for(&self, mfe: &str) -> Option<&str> {
        self.application_by_mfe.get(mfe).map(String::as_str)
    }

    /// Roll per-MFE usage counts up to applications. Unknown MFEs are skipped.
    pub fn usages_by_application(&self, mfe_usages: &MfeCounts) -> BTreeMap<String, u64> {
        let mut totals = BTreeMap::new();
        for (mfe, count) in mfe_usages {
            if let Some(application) = self.application_for(mfe) {
                *totals.entry(application.to_string()).or_insert(0) += count;
            }
        }
        totals
    }
}
