//! Integration tests for the load-clean-style-render pipeline.

mod common;

use wind_planning_map::config::MapConfig;
use wind_planning_map::io::export::write_csv;
use wind_planning_map::pipeline::{self, MapData};
use wind_planning_map::records::cleaner::is_valid_position;
use wind_planning_map::records::schema::{HEIGHT_COLUMN, SITE_NAME_COLUMN, STATUS_COLUMN};
use wind_planning_map::records::{CleanOptions, clean, read_table};
use wind_planning_map::style::{MarkerStyle, popup_lines, status_palette};
use wind_planning_map::MapError;

/// Config pointing at a fresh copy of the sample extract, with no overlays.
fn sample_config(dir: &tempfile::TempDir) -> MapConfig {
    let mut config = MapConfig::default();
    config.source.path = common::write_sample_csv(dir.path());
    config.overlays.dir = dir.path().join("no-overlays");
    config.output.html = dir.path().join("map.html");
    config
}

fn prepare_sample() -> MapData {
    let dir = tempfile::tempdir().expect("tempdir");
    pipeline::prepare(&sample_config(&dir)).expect("sample prepares")
}

#[test]
fn cleaning_report_counts_each_drop() {
    let data = prepare_sample();
    let r = &data.cleaning;
    assert_eq!(r.rows_read, 7);
    assert_eq!(r.rows_matched, 5);
    assert_eq!(r.dropped_non_numeric, 1);
    assert_eq!(r.dropped_invalid_geometry, 0);
    assert_eq!(r.retained, 4);
    assert_eq!(data.sites.len(), 4);
}

#[test]
fn every_retained_record_has_a_valid_position() {
    let data = prepare_sample();
    for record in &data.sites.records {
        assert!(
            is_valid_position(record.longitude(), record.latitude()),
            "{:?}",
            record.geometry
        );
        // All fixture sites are in Great Britain.
        assert!((-8.0..2.0).contains(&record.longitude()));
        assert!((49.0..61.0).contains(&record.latitude()));
    }
}

#[test]
fn source_text_is_decoded_and_escaped() {
    let data = prepare_sample();
    let names: Vec<String> = data
        .sites
        .records
        .iter()
        .filter_map(|r| data.sites.value(r, SITE_NAME_COLUMN).map(ToString::to_string))
        .collect();
    assert_eq!(
        names,
        vec!["Whitelee Extension", "Fen Drove", "Mynydd Y Gwair", r"Hill\\Top"]
    );
    let moor = &data.sites.records[3];
    assert_eq!(
        data.sites.value(moor, "Address").map(ToString::to_string).as_deref(),
        Some("Moor Lane – North Yorkshire")
    );
}

#[test]
fn palette_lists_present_statuses_in_phase_order() {
    let data = prepare_sample();
    let statuses: Vec<&str> = data.palette.entries().iter().map(|(s, _)| *s).collect();
    assert_eq!(
        statuses,
        vec![
            "Application Submitted",
            "Application Refused",
            "Under Construction",
            "Operational"
        ]
    );
}

#[test]
fn coloring_by_another_attribute_is_rejected() {
    let data = prepare_sample();
    let err = status_palette(HEIGHT_COLUMN, &data.sites).expect_err("height has no palette");
    assert!(matches!(err, MapError::UnsupportedAttribute { .. }));
}

#[test]
fn marker_sizes_follow_turbine_height() {
    let data = prepare_sample();
    let radii: Vec<u32> = data
        .sites
        .records
        .iter()
        .map(|r| MarkerStyle::for_record(&data.sites, r, &data.palette).radius)
        .collect();
    // 140 m, N/A, 127 m, 45 m
    assert_eq!(radii, vec![10, 2, 10, 6]);
}

#[test]
fn popup_skips_empty_planning_history() {
    let data = prepare_sample();
    let whitelee = popup_lines(&data.sites, &data.sites.records[0]);
    assert!(whitelee.contains(&"Operational: 01/05/2013".to_string()));
    assert!(!whitelee.iter().any(|l| l.starts_with("Appeal Lodged:")));
    assert!(whitelee.iter().any(|l| l.starts_with("Coordinates: 55.")));
    let fen = popup_lines(&data.sites, &data.sites.records[1]);
    assert!(fen.contains(&"Planning Permission Refused: 12/03/2015".to_string()));
    assert!(!fen.iter().any(|l| l.starts_with("Operational:")));
}

#[test]
fn cleaning_twice_is_identical() {
    let raw = read_table(&common::sample_csv()).expect("fixture parses");
    let first = clean(&raw, &CleanOptions::default()).expect("first pass");
    let second = clean(&raw, &CleanOptions::default()).expect("second pass");
    assert_eq!(first, second);
}

#[test]
fn technology_filter_is_configurable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = sample_config(&dir);
    config.source.technology = "Wind Offshore".to_string();
    let data = pipeline::prepare(&config).expect("prepares");
    assert_eq!(data.sites.len(), 1);
    assert_eq!(
        data.sites
            .value(&data.sites.records[0], STATUS_COLUMN)
            .map(ToString::to_string)
            .as_deref(),
        Some("Operational")
    );
}

#[test]
fn run_writes_page_and_records() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = sample_config(&dir);
    let records = dir.path().join("sites.csv");
    config.output.records_csv = Some(records.clone());

    let report = pipeline::run(&config).expect("run succeeds");
    assert_eq!(report.markers, 4);
    assert_eq!(report.statuses, 4);
    assert_eq!(report.overlays_loaded, 0);

    let page = std::fs::read_to_string(&config.output.html).expect("page written");
    assert_eq!(page.matches("L.circleMarker").count(), 1);
    assert_eq!(page.matches("{ lat: ").count(), 4);
    assert!(page.contains(r#"name: "Hill\\Top""#));
    assert!(page.contains("L.Control.Search"));

    let csv = std::fs::read_to_string(&records).expect("records written");
    assert_eq!(csv.lines().count(), 5);
    assert!(csv.lines().next().unwrap_or("").ends_with("Latitude,Longitude,Coordinates"));
}

#[test]
fn export_is_deterministic_across_runs() {
    let a = prepare_sample();
    let b = prepare_sample();
    let mut buf_a = Vec::new();
    let mut buf_b = Vec::new();
    write_csv(&a.sites, &mut buf_a).expect("export a");
    write_csv(&b.sites, &mut buf_b).expect("export b");
    assert_eq!(buf_a, buf_b);

    let config = MapConfig::default();
    assert_eq!(a.render(&config), b.render(&config));
}

#[test]
fn missing_source_file_is_a_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = sample_config(&dir);
    config.source.path = dir.path().join("absent.csv");
    let err = pipeline::prepare(&config).expect_err("no source");
    assert!(matches!(err, MapError::Read { .. }));
}

#[test]
fn unknown_encoding_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = sample_config(&dir);
    config.source.encoding = "klingon".to_string();
    let err = pipeline::prepare(&config).expect_err("bad label");
    assert!(matches!(err, MapError::UnknownEncoding(_)));
}
