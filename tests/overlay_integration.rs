//! Integration tests for overlay discovery and the partial-failure policy.

mod common;

use std::fs;
use std::io::Write;

use geo::CoordsIter;
use wind_planning_map::overlay::{
    ARCHAEOLOGICAL_COLOR, ECOLOGICAL_COLOR, OverlayOptions, load_layer, load_overlays,
};

#[test]
fn good_layers_load_and_bad_files_are_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let overlays = common::write_overlay_dir(dir.path());

    let scan = load_overlays(&overlays, &OverlayOptions::default());

    let names: Vec<&str> = scan.layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Ancient Woodland", "scheduled monuments"]);
    assert_eq!(scan.layers[0].color, ECOLOGICAL_COLOR);
    assert_eq!(scan.layers[1].color, ARCHAEOLOGICAL_COLOR);

    // The corrupt archive and shapefile fail; README.txt is not a layer.
    assert_eq!(scan.failures.len(), 2, "{:?}", scan.failures);
    assert!(scan.failures.iter().any(|f| f.path.ends_with("SSSI.zip")));
    assert!(scan.failures.iter().any(|f| f.path.ends_with("broken.shp")));
}

#[test]
fn grid_layer_is_reprojected_to_degrees() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("monuments.geojson");
    fs::write(&path, common::bng_line_geojson()).expect("write layer");

    let layer = load_layer(&path, &OverlayOptions::default()).expect("layer loads");
    assert!(layer.geometry.coords_count() >= 2);
    for c in layer.geometry.coords_iter() {
        assert!((-2.1..-1.9).contains(&c.x), "lon {}", c.x);
        assert!((52.5..52.7).contains(&c.y), "lat {}", c.y);
    }
}

#[test]
fn zipped_geojson_layer_loads() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("Ramsar_Sites.zip");
    {
        let file = fs::File::create(&path).expect("create zip");
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file("ramsar/Ramsar_Sites.geojson", zip::write::FileOptions::default())
            .expect("start entry");
        zip.write_all(common::wgs84_polygon_geojson().as_bytes())
            .expect("write entry");
        zip.finish().expect("finish zip");
    }

    let layer = load_layer(&path, &OverlayOptions::default()).expect("layer loads");
    assert_eq!(layer.name, "Ramsar Sites");
    assert_eq!(layer.color, ECOLOGICAL_COLOR);
    assert_eq!(layer.geometry.len(), 1);
}

#[test]
fn unmatched_names_use_configured_default() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("local_plan.geojson");
    fs::write(&path, common::wgs84_polygon_geojson()).expect("write layer");

    let options = OverlayOptions {
        default_color: "#123456".to_string(),
        ..OverlayOptions::default()
    };
    let layer = load_layer(&path, &options).expect("layer loads");
    assert_eq!(layer.color, "#123456");
}

#[test]
fn web_mercator_layer_is_reported_not_misplaced() {
    let dir = tempfile::tempdir().expect("tempdir");
    let overlays = dir.path().join("overlays");
    fs::create_dir_all(&overlays).expect("create overlay dir");
    fs::write(overlays.join("nature_reserves.geojson"), common::web_mercator_line_geojson())
        .expect("write layer");
    fs::write(overlays.join("woodland.geojson"), common::wgs84_polygon_geojson())
        .expect("write woodland");

    let scan = load_overlays(&overlays, &OverlayOptions::default());
    assert_eq!(scan.layers.len(), 1);
    assert_eq!(scan.layers[0].name, "woodland");
    assert_eq!(scan.failures.len(), 1);
    assert!(scan.failures[0].path.ends_with("nature_reserves.geojson"));
}
