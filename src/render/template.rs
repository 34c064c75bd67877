//! Page skeleton for the generated map.
//!
//! `__NAME__` placeholders are substituted by [`super::render_map`]; the rest
//! is emitted verbatim.

pub const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
pub const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
pub const SEARCH_CSS: &str = "https://unpkg.com/leaflet-search@3.0.9/dist/leaflet-search.min.css";
pub const SEARCH_JS: &str = "https://unpkg.com/leaflet-search@3.0.9/dist/leaflet-search.min.js";

pub const OSM_TILES: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";
pub const IMAGERY_TILES: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";
pub const IMAGERY_ATTRIBUTION: &str = "Tiles &copy; Esri";

pub const PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>__TITLE__</title>
  <link rel="stylesheet" href="__LEAFLET_CSS__" />
  <link rel="stylesheet" href="__SEARCH_CSS__" />
  <script src="__LEAFLET_JS__"></script>
  <script src="__SEARCH_JS__"></script>
  <style>
    html, body { height: 100%; margin: 0; }
    #map { position: absolute; inset: 0; }
    .map-title {
      position: absolute; top: 10px; left: 50%; transform: translateX(-50%);
      z-index: 1000; background: rgba(255, 255, 255, 0.9); padding: 4px 12px;
      border-radius: 4px; font: 600 16px/1.4 sans-serif;
    }
    .map-legend {
      position: absolute; bottom: 24px; left: 10px; z-index: 1000;
      background: rgba(255, 255, 255, 0.92); padding: 8px 10px; border-radius: 4px;
      font: 12px/1.5 sans-serif; max-height: 60%; overflow-y: auto;
      box-shadow: 0 1px 4px rgba(0, 0, 0, 0.3);
    }
    .map-legend h4 { margin: 4px 0; font-size: 13px; }
    .map-legend .swatch {
      display: inline-block; width: 12px; height: 12px; margin-right: 6px;
      border-radius: 50%; vertical-align: middle;
    }
    .map-legend .size {
      display: inline-block; margin-right: 6px; border-radius: 50%;
      background: #888; vertical-align: middle;
    }
  </style>
</head>
<body>
  <div id="map"></div>
  <div class="map-title">__TITLE__</div>
__LEGEND__
  <script>
    const map = L.map('map').setView([__CENTER_LAT__, __CENTER_LON__], __ZOOM__);

    const streets = L.tileLayer('__OSM_TILES__', {
      maxZoom: 19, attribution: '__OSM_ATTRIBUTION__'
    }).addTo(map);
    const imagery = L.tileLayer('__IMAGERY_TILES__', {
      maxZoom: 19, attribution: '__IMAGERY_ATTRIBUTION__'
    });

    const sites = [
__SITES__
    ];

    const markers = L.layerGroup();
    for (const s of sites) {
      L.circleMarker([s.lat, s.lon], {
        radius: s.radius, color: s.color, fillColor: s.color,
        fillOpacity: 0.7, weight: 1, searchText: s.search
      })
        .bindPopup(s.popup, { maxWidth: 420 })
        .bindTooltip(s.name)
        .addTo(markers);
    }
    markers.addTo(map);

    const overlays = { __MARKER_LAYER_NAME__: markers };
    const overlayLayers = [
__OVERLAYS__
    ];
    for (const o of overlayLayers) {
      overlays[o.name] = L.geoJSON(o.data, {
        style: { color: o.color, weight: 1, fillOpacity: 0.2 }
      });
    }

    L.control.layers({ 'Streets': streets, 'Imagery': imagery }, overlays).addTo(map);

    map.addControl(new L.Control.Search({
      layer: markers,
      propertyName: 'searchText',
      initial: false,
      zoom: 12,
      marker: false,
      textPlaceholder: 'Search sites…'
    }));
  </script>
</body>
</html>
"#;
