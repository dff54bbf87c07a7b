//! Merge behaviour over whole reports.

use pretty_assertions::assert_eq;
use serde_json::json;
use usage_report_merge::models::*;
use usage_report_merge::{MergeError, MergeOptions, ReportMerger};

mod common;
use common::{component, with_files, with_props, ReportBuilder};

fn find<'a>(report: &'a ReportData, name: &str) -> &'a ComponentStat {
    report
        .component_stats
        .iter()
        .find(|s| s.component_name == name)
        .unwrap_or_else(|| panic!("component {name} missing"))
}

#[test]
fn test_end_to_end_two_applications() {
    let doc1 = ReportBuilder::new(&["ep"])
        .component(component("SolaceButton", &[("ep", 5)]))
        .build();
    let doc2 = ReportBuilder::new(&["mc"])
        .component(component("SolaceButton", &[("mc", 3)]))
        .build();

    let merged = ReportMerger::new().merge_reports(&[doc1, doc2]).unwrap();

    assert_eq!(merged.component_stats.len(), 1);
    let button = &merged.component_stats[0];
    assert_eq!(button.component_name, "SolaceButton");
    assert_eq!(button.total_usages, 8);
    assert_eq!(button.usages_by_mfe["ep"], 5);
    assert_eq!(button.usages_by_mfe["mc"], 3);
    assert_eq!(merged.overall_stats.total_usages, 8);
    assert_eq!(merged.config.mfes, vec!["ep", "mc"]);
}

#[test]
fn test_single_report_is_returned_unchanged() {
    let report = ReportBuilder::new(&["ep"])
        .component(with_props(
            component("SolaceButton", &[("ep", 4)]),
            &[("variant", 4)],
        ))
        .unused("SolaceChip", "/lib/chip")
        .build();

    let merged = ReportMerger::new()
        .merge_reports(std::slice::from_ref(&report))
        .unwrap();

    assert_eq!(merged.component_stats, report.component_stats);
    assert_eq!(merged.unused_components, report.unused_components);
    assert_eq!(merged.overall_stats, report.overall_stats);
}

#[test]
fn test_empty_input_fails() {
    let err = ReportMerger::new().merge_reports(&[]).unwrap_err();
    assert!(matches!(err, MergeError::InvalidInputCount { actual: 0, .. }));
}

#[test]
fn test_sums_are_order_independent() {
    let a = ReportBuilder::new(&["ep", "mc"])
        .component(component("SolaceButton", &[("ep", 5), ("mc", 1)]))
        .component(component("SolaceChip", &[("ep", 2)]))
        .build();
    let b = ReportBuilder::new(&["mc", "io"])
        .component(component("SolaceChip", &[("mc", 7), ("io", 1)]))
        .component(component("SolaceButton", &[("io", 2)]))
        .build();

    let merger = ReportMerger::new();
    let ab = merger.merge_reports(&[a.clone(), b.clone()]).unwrap();
    let ba = merger.merge_reports(&[b, a]).unwrap();

    for name in ["SolaceButton", "SolaceChip"] {
        assert_eq!(find(&ab, name).total_usages, find(&ba, name).total_usages);
        assert_eq!(find(&ab, name).usages_by_mfe, find(&ba, name).usages_by_mfe);
    }
    assert_eq!(ab.overall_stats.total_usages, ba.overall_stats.total_usages);
    assert_eq!(ab.overall_stats.mfe_usages, ba.overall_stats.mfe_usages);
}

#[test]
fn test_files_are_deduplicated() {
    let a = ReportBuilder::new(&["ep"])
        .component(with_files(
            component("SolaceButton", &[("ep", 1)]),
            &["a.tsx", "b.tsx"],
        ))
        .build();
    let b = ReportBuilder::new(&["mc"])
        .component(with_files(
            component("SolaceButton", &[("mc", 1)]),
            &["b.tsx", "c.tsx"],
        ))
        .build();

    let merged = ReportMerger::new().merge_reports(&[a, b]).unwrap();

    assert_eq!(merged.component_stats[0].files, vec!["a.tsx", "b.tsx", "c.tsx"]);
}

#[test]
fn test_common_props_merge_by_name() {
    let a = ReportBuilder::new(&["ep"])
        .component(with_props(
            component("SolaceButton", &[("ep", 3)]),
            &[("variant", 3)],
        ))
        .build();
    let b = ReportBuilder::new(&["mc"])
        .component(with_props(
            component("SolaceButton", &[("mc", 2)]),
            &[("variant", 2), ("size", 1)],
        ))
        .build();

    let merged = ReportMerger::new().merge_reports(&[a, b]).unwrap();

    assert_eq!(
        merged.component_stats[0].common_props,
        vec![
            PropUsage {
                name: "variant".to_string(),
                count: 5
            },
            PropUsage {
                name: "size".to_string(),
                count: 1
            },
        ]
    );
}

#[test]
fn test_unused_components_dedup_by_name_and_path() {
    let a = ReportBuilder::new(&["ep"]).unused("X", "/a").build();
    let b = ReportBuilder::new(&["mc"])
        .unused("X", "/a")
        .unused("X", "/b")
        .build();

    let merged = ReportMerger::new().merge_reports(&[a, b]).unwrap();

    assert_eq!(
        merged.unused_components,
        vec![ComponentRef::new("X", "/a"), ComponentRef::new("X", "/b")]
    );
    assert_eq!(merged.overall_stats.total_unused_components, 2);
}

#[test]
fn test_unused_by_mfe_union() {
    let a = ReportBuilder::new(&["ep"])
        .unused_in("ep", &["SolaceChip", "SolaceDrawer"])
        .build();
    let b = ReportBuilder::new(&["ep", "mc"])
        .unused_in("ep", &["SolaceDrawer", "SolacePicker"])
        .unused_in("mc", &["SolaceChip"])
        .build();

    let merged = ReportMerger::new().merge_reports(&[a, b]).unwrap();

    assert_eq!(
        merged.unused_components_by_mfe["ep"],
        vec!["SolaceChip", "SolaceDrawer", "SolacePicker"]
    );
    assert_eq!(merged.unused_components_by_mfe["mc"], vec!["SolaceChip"]);
}

#[test]
fn test_top_ten_recomputed_after_merge() {
    let mut first = ReportBuilder::new(&["ep"]);
    for i in 1..=8u64 {
        first = first.component(component(&format!("C{i}"), &[("ep", i)]));
    }
    let mut second = ReportBuilder::new(&["mc"]);
    for i in 9..=15u64 {
        second = second.component(component(&format!("C{i}"), &[("mc", i)]));
    }

    let merged = ReportMerger::new()
        .merge_reports(&[first.build(), second.build()])
        .unwrap();

    let top: Vec<(String, u64)> = merged
        .overall_stats
        .most_used_components
        .iter()
        .map(|c| (c.name.clone(), c.count))
        .collect();
    let expected: Vec<(String, u64)> = (6..=15u64).rev().map(|i| (format!("C{i}"), i)).collect();
    assert_eq!(top, expected);
}

#[test]
fn test_most_used_props_are_global() {
    let a = ReportBuilder::new(&["ep"])
        .component(with_props(
            component("SolaceButton", &[("ep", 1)]),
            &[("variant", 3), ("size", 1)],
        ))
        .build();
    let b = ReportBuilder::new(&["mc"])
        .component(with_props(
            component("SolaceChip", &[("mc", 1)]),
            &[("size", 4)],
        ))
        .build();

    let merged = ReportMerger::new().merge_reports(&[a, b]).unwrap();

    assert_eq!(
        merged.overall_stats.most_used_props,
        vec![NamedCount::new("size", 5), NamedCount::new("variant", 3)]
    );
}

#[test]
fn test_top_n_option() {
    let a = ReportBuilder::new(&["ep"])
        .component(component("A", &[("ep", 3)]))
        .component(component("B", &[("ep", 2)]))
        .build();
    let b = ReportBuilder::new(&["mc"])
        .component(component("C", &[("mc", 1)]))
        .build();

    let merged = ReportMerger::with_options(MergeOptions { top_n: 2 })
        .merge_reports(&[a, b])
        .unwrap();

    assert_eq!(merged.overall_stats.most_used_components.len(), 2);
}

#[test]
fn test_config_versions_and_raw_data() {
    let a = ReportBuilder::new(&["ep", "mc"])
        .config_value("rootDir", json!("/first"))
        .version("ep", "1.0.0")
        .version("mc", "1.0.0")
        .raw_usage("SolaceButton", "a.tsx")
        .build();
    let b = ReportBuilder::new(&["mc", "io"])
        .config_value("rootDir", json!("/second"))
        .version("mc", "2.0.0")
        .raw_usage("SolaceButton", "a.tsx")
        .build();
    let c = ReportBuilder::new(&["io"])
        .version("io", "3.1.0")
        .raw_usage("SolaceChip", "c.tsx")
        .build();

    let merged = ReportMerger::new().merge_reports(&[a, b, c]).unwrap();

    assert_eq!(merged.config.mfes, vec!["ep", "mc", "io"]);
    assert_eq!(merged.config.extra["rootDir"], json!("/first"));
    assert_eq!(merged.mrc_versions["ep"], "1.0.0");
    assert_eq!(merged.mrc_versions["mc"], "2.0.0");
    assert_eq!(merged.mrc_versions["io"], "3.1.0");
    assert_eq!(merged.raw_data.component_usages.len(), 3);
    assert_eq!(merged.raw_data.component_usages[2]["component"], json!("SolaceChip"));
}

#[test]
fn test_generated_at_refreshed() {
    let a = ReportBuilder::new(&["ep"]).build();
    let b = ReportBuilder::new(&["mc"]).build();

    let merged = ReportMerger::new().merge_reports(&[a, b]).unwrap();

    assert_ne!(merged.generated_at, "2024-01-15T10:30:00.000Z");
    assert!(chrono::DateTime::parse_from_rfc3339(&merged.generated_at).is_ok());
}

#[test]
fn test_inputs_are_not_modified() {
    let a = ReportBuilder::new(&["ep"])
        .component(with_files(component("SolaceButton", &[("ep", 1)]), &["a.tsx"]))
        .build();
    let b = ReportBuilder::new(&["mc"])
        .component(with_files(component("SolaceButton", &[("mc", 1)]), &["b.tsx"]))
        .build();
    let (a_before, b_before) = (a.clone(), b.clone());

    let reports = vec![a, b];
    ReportMerger::new().merge_reports(&reports).unwrap();

    assert_eq!(reports[0], a_before);
    assert_eq!(reports[1], b_before);
}

#[test]
fn test_merge_documents_reports_bad_index() {
    let good = serde_json::to_value(ReportBuilder::new(&["ep"]).build()).unwrap();
    let bad = json!({ "config": { "mfes": [] }, "rawData": { "componentUsages": [] } });

    let err = ReportMerger::new()
        .merge_documents(vec![good.clone(), good, bad])
        .unwrap_err();

    match err {
        MergeError::MalformedReport { index, field, .. } => {
            assert_eq!(index, 2);
            assert_eq!(field, "componentStats");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_counters_saturate_instead_of_overflowing() {
    let mut huge = component("SolaceButton", &[("ep", u64::MAX)]);
    huge.customization.styled_component_count = u64::MAX;
    let a = ReportBuilder::new(&["ep"])
        .component(with_props(huge, &[("variant", u64::MAX)]))
        .build();
    let mut one = component("SolaceButton", &[("ep", 1)]);
    one.customization.styled_component_count = 1;
    let b = ReportBuilder::new(&["ep"])
        .component(with_props(one, &[("variant", 1)]))
        .build();
    let documents = vec![
        serde_json::to_value(&a).unwrap(),
        serde_json::to_value(&b).unwrap(),
    ];

    let merged = ReportMerger::new().merge_documents(documents).unwrap();

    let button = &merged.component_stats[0];
    assert_eq!(button.total_usages, u64::MAX);
    assert_eq!(button.usages_by_mfe["ep"], u64::MAX);
    assert_eq!(button.customization.styled_component_count, u64::MAX);
    assert_eq!(button.common_props[0].count, u64::MAX);
    assert_eq!(merged.overall_stats.total_usages, u64::MAX);
    assert_eq!(merged.overall_stats.mfe_usages["ep"], u64::MAX);
}
