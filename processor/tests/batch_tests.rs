//! End-to-end batch runs over temporary input/output directories.

use sfs_histo::{ColumnSpec, PipelineConfig, Processor, Stage};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const ZONE1: &str = "[IsGrandTotalRowTotal],[v__SHOP],Geography[Zone]\n\
                     False,17,North\n\
                     True,42,\n";

fn zone_spec() -> ColumnSpec {
    ColumnSpec::from_json(
        r#"{
            "drop_columns": [],
            "renames": { "[v__SHOP]": "[NberShopActivity]" },
            "new_columns": ["[NberNoShopActivity]", "[PerNoShopActivity]"],
            "column_order": [
                "[IsGrandTotalRowTotal]",
                "[NberShopActivity]",
                "[PerShopActivity]",
                "[NberNoShopActivity]",
                "[PerNoShopActivity]",
                "[Zone]"
            ]
        }"#,
    )
    .unwrap()
}

fn processor_for(root: &Path, spec: ColumnSpec) -> Processor {
    let config = PipelineConfig {
        input_dir: root.join("inputs"),
        output_dir: root.join("outputs"),
    };
    Processor::new(spec, config).unwrap()
}

fn write_input(root: &Path, name: &str, content: &str) {
    let inputs = root.join("inputs");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join(name), content).unwrap();
}

#[test]
fn zone_scenario_matches_column_order() {
    let dir = tempdir().unwrap();
    write_input(dir.path(), "zone1.csv", ZONE1);

    let report = processor_for(dir.path(), zone_spec()).run_dir().unwrap();
    assert!(report.is_ok());

    let output = fs::read_to_string(dir.path().join("outputs/zone1.csv")).unwrap();
    let mut lines = output.lines();
    assert_eq!(
        lines.next(),
        Some("[IsGrandTotalRowTotal],[NberShopActivity],[PerShopActivity],[NberNoShopActivity],[PerNoShopActivity],[Zone]")
    );
    // Geography[Zone] is not in the order list, [Zone] is absent from the source
    assert_eq!(lines.next(), Some("False,17,,,,"));
    assert_eq!(lines.next(), None);
}

#[test]
fn output_is_byte_identical_across_runs() {
    let dir = tempdir().unwrap();
    write_input(dir.path(), "zone1.csv", ZONE1);
    let processor = processor_for(dir.path(), zone_spec());

    processor.start("zone1.csv");
    let first = fs::read(dir.path().join("outputs/zone1.csv")).unwrap();
    processor.start("zone1.csv");
    let second = fs::read(dir.path().join("outputs/zone1.csv")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn exported_header_is_column_order_for_any_input() {
    let dir = tempdir().unwrap();
    write_input(dir.path(), "wide.csv", "[v__SHOP],x,y,z\n1,2,3,4\n");
    write_input(dir.path(), "narrow.csv", "[v__SHOP]\n5\n");

    let spec = zone_spec();
    let expected = spec.column_order.join(",");
    let report = processor_for(dir.path(), spec).run_dir().unwrap();
    assert_eq!(report.processed.len(), 2);

    for name in ["wide.csv", "narrow.csv"] {
        let output = fs::read_to_string(dir.path().join("outputs").join(name)).unwrap();
        assert_eq!(output.lines().next(), Some(expected.as_str()));
    }
}

#[test]
fn total_rows_removed_and_order_kept() {
    let dir = tempdir().unwrap();
    write_input(
        dir.path(),
        "zones.csv",
        "[IsGrandTotalRowTotal],[v__SHOP],Geography[Zone]\n\
         False,1,A\n\
         True,9,\n\
         False,2,B\n\
         TRUE,9,\n\
         False,3,C\n",
    );

    let spec = ColumnSpec::from_json(
        r#"{
            "drop_columns": [],
            "renames": {},
            "new_columns": [],
            "column_order": ["Geography[Zone]", "[v__SHOP]"]
        }"#,
    )
    .unwrap();
    processor_for(dir.path(), spec).start("zones.csv");

    let output = fs::read_to_string(dir.path().join("outputs/zones.csv")).unwrap();
    assert_eq!(output, "Geography[Zone],[v__SHOP]\nA,1\nB,2\nC,3\n");
}

#[test]
fn missing_rename_source_reports_stage_and_continues() {
    let dir = tempdir().unwrap();
    write_input(dir.path(), "a_broken.csv", "[IsGrandTotalRowTotal],Geography[Zone]\nFalse,A\n");
    write_input(dir.path(), "b_zone.csv", ZONE1);

    let report = processor_for(dir.path(), zone_spec()).run_dir().unwrap();

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].file_name, "a_broken.csv");
    assert_eq!(report.failed[0].stage, Some(Stage::RenameColumns));
    assert!(report.failed[0].message.contains("[v__SHOP]"));
    assert!(!dir.path().join("outputs/a_broken.csv").exists());
    assert!(dir.path().join("outputs/b_zone.csv").exists());
}

#[test]
fn missing_input_dir_is_an_error() {
    let dir = tempdir().unwrap();
    let result = processor_for(dir.path(), zone_spec()).run_dir();
    assert!(result.is_err());
}

#[test]
fn default_recipe_on_full_export() {
    let dir = tempdir().unwrap();
    let spec = ColumnSpec::default_recipe();

    let mut header: Vec<String> = spec.renames.keys().cloned().collect();
    header.extend(spec.drop_columns.iter().cloned());
    header.push("Geography[Zone]".to_string());
    header.insert(0, spec.indicator_column.clone());
    let row = vec!["False"; header.len()].join(",");
    let total = vec!["True"; header.len()].join(",");
    write_input(
        dir.path(),
        "histo.csv",
        &format!("{}\n{}\n{}\n", header.join(","), row, total),
    );

    let report = processor_for(dir.path(), spec.clone()).run_dir().unwrap();
    assert!(report.is_ok(), "{:?}", report.failed);
    assert_eq!(report.processed[0].rows_out, 1);
    assert_eq!(report.processed[0].columns, spec.column_order);

    // Geography names pass through unrenamed; placeholders are not exported
    let output = fs::read_to_string(dir.path().join("outputs/histo.csv")).unwrap();
    let header_out = output.lines().next().unwrap();
    assert!(header_out.ends_with("Geography[Zone],Geography[Sub Zone],Geography[Affiliates]"));
    assert!(!header_out.contains("[NberNoShopActivity]"));
    assert_eq!(output.lines().nth(1), Some("False,,False,,,,,,,,False,,"));
}
