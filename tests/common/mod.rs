//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use wind_planning_map::records::schema::SOURCE_COLUMNS;

/// One row of the planning extract; unnamed columns are left empty.
pub fn source_row(fields: &[(&str, &str)]) -> Vec<String> {
    SOURCE_COLUMNS
        .iter()
        .map(|col| {
            fields
                .iter()
                .find(|(name, _)| name == col)
                .map(|(_, v)| (*v).to_string())
                .unwrap_or_default()
        })
        .collect()
}

/// Seven rows: four retained onshore wind sites, one onshore site with a
/// blank easting, one solar farm, one offshore array.
pub fn sample_rows() -> Vec<Vec<String>> {
    vec![
        source_row(&[
            ("Old Ref ID", "A1"),
            ("Ref ID", "1001"),
            ("Operator (or Applicant)", "ScottishPower Renewables"),
            ("Site Name", "Whitelee Extension"),
            ("Technology Type", "Wind Onshore"),
            ("Installed Capacity (MWelec)", "217"),
            ("No. of Turbines", "69"),
            ("Height of Turbines (m)", "140"),
            ("Development Status", "Operational"),
            ("Development Status (short)", "Operational"),
            ("County", "East Renfrewshire"),
            ("Country", "Scotland"),
            ("X-coordinate", "257000"),
            ("Y-coordinate", "645000"),
            ("Planning Authority", "Scottish Government"),
            ("Operational", "01/05/2013"),
        ]),
        source_row(&[
            ("Ref ID", "1002"),
            ("Operator (or Applicant)", "Fenland Wind Ltd"),
            ("Site Name", "Fen Drove"),
            ("Technology Type", "Wind Onshore"),
            ("Installed Capacity (MWelec)", "9.2"),
            ("Height of Turbines (m)", "N/A"),
            ("Development Status", "Application Refused"),
            ("Development Status (short)", "Application Refused"),
            ("County", "Cambridgeshire"),
            ("Country", "England"),
            ("X-coordinate", "540000"),
            ("Y-coordinate", "290000"),
            ("Planning Permission Refused", "12/03/2015"),
        ]),
        source_row(&[
            ("Ref ID", "1003"),
            ("Site Name", "Mynydd Y Gwair"),
            ("Technology Type", "Wind Onshore"),
            ("Installed Capacity (MWelec)", "33.6"),
            ("Height of Turbines (m)", "127"),
            ("Development Status", "Under Construction"),
            ("Development Status (short)", "Under Construction"),
            ("County", "Swansea"),
            ("Country", "Wales"),
            ("X-coordinate", "265000"),
            ("Y-coordinate", "207000"),
        ]),
        source_row(&[
            ("Ref ID", "1004"),
            ("Site Name", r"Hill\Top"),
            ("Technology Type", "Wind Onshore"),
            ("Height of Turbines (m)", "45"),
            ("Development Status", "Application Submitted"),
            ("Development Status (short)", "Application Submitted"),
            ("Address", "Moor Lane – North Yorkshire"),
            ("Country", "England"),
            ("X-coordinate", "410000.5"),
            ("Y-coordinate", "480000.25"),
        ]),
        source_row(&[
            ("Ref ID", "1005"),
            ("Site Name", "No Grid Ref"),
            ("Technology Type", "Wind Onshore"),
            ("Development Status (short)", "Abandoned"),
            ("X-coordinate", ""),
            ("Y-coordinate", "300000"),
        ]),
        source_row(&[
            ("Ref ID", "2001"),
            ("Site Name", "Sunny Acres"),
            ("Technology Type", "Solar Photovoltaics"),
            ("Development Status (short)", "Operational"),
            ("X-coordinate", "600000"),
            ("Y-coordinate", "150000"),
        ]),
        source_row(&[
            ("Ref ID", "3001"),
            ("Site Name", "Outer Banks"),
            ("Technology Type", "Wind Offshore"),
            ("Height of Turbines (m)", "220"),
            ("Development Status (short)", "Operational"),
            ("X-coordinate", "560000"),
            ("Y-coordinate", "420000"),
        ]),
    ]
}

/// The sample extract as CSV text.
pub fn sample_csv() -> String {
    let mut wtr = csv::WriterBuilder::new().from_writer(Vec::new());
    wtr.write_record(SOURCE_COLUMNS).expect("header");
    for row in sample_rows() {
        wtr.write_record(&row).expect("row");
    }
    let bytes = wtr.into_inner().expect("flush");
    String::from_utf8(bytes).expect("fixture is UTF-8")
}

/// Writes the sample extract encoded as Windows-1252, like the published file.
pub fn write_sample_csv(dir: &Path) -> PathBuf {
    let path = dir.join("repd.csv");
    let text = sample_csv();
    let (bytes, _, had_errors) = encoding_rs::WINDOWS_1252.encode(&text);
    assert!(!had_errors, "fixture must be representable in Windows-1252");
    fs::write(&path, &bytes).expect("write fixture CSV");
    path
}

/// A one-polygon GeoJSON layer in WGS84 around the Cairngorms.
pub fn wgs84_polygon_geojson() -> &'static str {
    r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": { "NAME": "Cairngorms" },
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[-3.9, 57.0], [-3.3, 57.0], [-3.3, 57.2], [-3.9, 57.2], [-3.9, 57.0]]]
      }
    }
  ]
}"#
}

/// A one-line GeoJSON layer in British National Grid metres, with no CRS
/// member.
pub fn bng_line_geojson() -> &'static str {
    r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": {},
      "geometry": {
        "type": "LineString",
        "coordinates": [[400000, 300000], [401000, 301000], [402000, 300500]]
      }
    }
  ]
}"#
}

/// A line near Edinburgh in Web Mercator metres, declared as EPSG:3857.
pub fn web_mercator_line_geojson() -> &'static str {
    r#"{
  "type": "FeatureCollection",
  "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:EPSG::3857" } },
  "features": [
    {
      "type": "Feature",
      "properties": {},
      "geometry": {
        "type": "LineString",
        "coordinates": [[-354000, 7560000], [-353000, 7561000]]
      }
    }
  ]
}"#
}

/// Overlay directory with two good layers, two broken ones and a file that
/// is not a layer at all.
pub fn write_overlay_dir(dir: &Path) -> PathBuf {
    let overlays = dir.join("overlays");
    fs::create_dir_all(&overlays).expect("create overlay dir");
    fs::write(overlays.join("Ancient_Woodland.geojson"), wgs84_polygon_geojson())
        .expect("write woodland");
    fs::write(overlays.join("scheduled-monuments.geojson"), bng_line_geojson())
        .expect("write monuments");
    fs::write(overlays.join("SSSI.zip"), b"not a zip archive").expect("write zip");
    fs::write(overlays.join("broken.shp"), b"\x00\x00\x27\x0a garbage").expect("write shp");
    fs::write(overlays.join("README.txt"), "layers from the national bodies").expect("write txt");
    overlays
}
