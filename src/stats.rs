//! Overall Statistics
//!
//! `overallStats` is a derived view: it is rebuilt from the final component
//! statistics and unused-component list after every merge, never folded field
//! by field.
//!
//! ## Rankings
//!
//! - `mostUsedComponents` ranks components by `totalUsages`
//! - `mostUsedProps` ranks prop names by their count summed across all components
//!
//! Both keep the top N entries sorted descending. Ties keep their first-seen
//! order because the sort is stable.
//!
//! Counters saturate at `u64::MAX` instead of wrapping.

use crate::models::{ComponentRef, ComponentStat, MfeCounts, NamedCount, OverallStats};
use std::collections::HashMap;

/// Number of entries kept in each ranking by default.
pub const DEFAULT_TOP_N: usize = 10;

pub fn compute_overall_stats(
    component_stats: &[ComponentStat],
    unused_components: &[ComponentRef],
    top_n: usize,
) -> OverallStats {
    let total_usages = component_stats
        .iter()
        .fold(0u64, |total, s| total.saturating_add(s.total_usages));

    let mut mfe_usages = MfeCounts::new();
    for stat in component_stats {
        for (mfe, count) in &stat.usages_by_mfe {
            let total = mfe_usages.entry(mfe.clone()).or_insert(0);
            *total = total.saturating_add(*count);
        }
    }

    let most_used_components = top_entries(
        component_stats
            .iter()
            .map(|s| NamedCount::new(s.component_name.clone(), s.total_usages))
            .collect(),
        top_n,
    );

    OverallStats {
        total_usages,
        mfe_usages,
        most_used_components,
        most_used_props: top_entries(prop_totals(component_stats), top_n),
        total_unused_components: unused_components.len() as u64,
    }
}

/// Sum prop counts by name across all components, in first-seen order.
fn prop_totals(component_stats: &[ComponentStat]) -> Vec<NamedCount> {
    let mut totals: Vec<NamedCount> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for prop in component_stats.iter().flat_map(|s| &s.common_props) {
        match positions.get(prop.name.as_str()) {
            Some(&idx) => totals[idx].count = totals[idx].count.saturating_add(prop.count),
            None => {
                positions.insert(prop.name.as_str(), totals.len());
                totals.push(NamedCount::new(prop.name.clone(), prop.count));
            }
        }
    }

    totals
}

fn top_entries(mut entries: Vec<NamedCount>, top_n: usize) -> Vec<NamedCount> {
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(top_n);
    entries
}
