use serde::Serialize;
use serde_json::json;

use super::presenter::{MapScene, MarkerKind};
use super::routing::Coordinate;

const LEAFLET_VERSION: &str = "1.9.4";

// Leaflet wants [lat, lon]; everything upstream is [lon, lat].
fn latlng(c: &Coordinate) -> [f64; 2] {
    [c.lat(), c.lon()]
}

#[derive(Serialize)]
struct LeafletMarker<'a> {
    at: [f64; 2],
    tooltip: &'a str,
    label: &'a str,
    color: &'a str,
    numbered: bool,
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// JSON payload the page script draws from.
fn scene_payload(scene: &MapScene) -> serde_json::Value {
    let markers: Vec<LeafletMarker> = scene
        .markers
        .iter()
        .map(|m| LeafletMarker {
            at: latlng(&m.position),
            tooltip: &m.tooltip,
            label: &m.label,
            color: m.color,
            numbered: matches!(m.kind, MarkerKind::Waypoint { .. }),
        })
        .collect();
    let line: Vec<[f64; 2]> = scene.route_line.points.iter().map(latlng).collect();
    let bounds = scene
        .viewport
        .map(|v| [latlng(&v.bounds.min), latlng(&v.bounds.max)]);

    json!({
        "markers": markers,
        "line": {
            "points": line,
            "color": scene.route_line.color,
            "weight": scene.route_line.weight,
            "opacity": scene.route_line.opacity,
        },
        "bounds": bounds,
    })
}

/// Renders a self-contained Leaflet page for the scene, with the summary and directions beside it.
pub fn render_html(scene: &MapScene, title: &str, summary: &str, directions: &[String]) -> String {
    // `</` inside a script block would end it early
    let payload = scene_payload(scene).to_string().replace("</", "<\\/");
    let items: String = directions
        .iter()
        .map(|line| format!("      <li>{}</li>\n", escape_html(line)))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@{ver}/dist/leaflet.css">
  <script src="https://unpkg.com/leaflet@{ver}/dist/leaflet.js"></script>
  <style>
    body {{ margin: 0; display: flex; font-family: sans-serif; }}
    #map {{ flex: 2; height: 100vh; }}
    #panel {{ flex: 1; padding: 1em; overflow-y: auto; height: 100vh; box-sizing: border-box; }}
    .badge {{ color: white; background: blue; border-radius: 50%; text-align: center; width: 24px; height: 24px; line-height: 24px; font-size: 12pt; }}
  </style>
</head>
<body>
  <div id="map"></div>
  <div id="panel">
    <h2>{title}</h2>
    <p><strong>{summary}</strong></p>
    <h3>Directions</h3>
    <ol style="list-style: none; padding-left: 0">
{items}    </ol>
  </div>
  <script>
    const scene = {payload};
    const map = L.map('map');
    L.tileLayer('https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{
      attribution: '&copy; OpenStreetMap contributors'
    }}).addTo(map);
    for (const m of scene.markers) {{
      const opts = m.numbered
        ? {{ icon: L.divIcon({{ className: '', html: '<div class="badge">' + m.label + '</div>' }}) }}
        : {{}};
      const marker = L.marker(m.at, opts).bindTooltip(m.tooltip).addTo(map);
      if (!m.numbered) {{ marker.getElement().style.filter = m.color === 'red' ? 'hue-rotate(150deg)' : 'hue-rotate(250deg)'; }}
    }}
    if (scene.line.points.length > 0) {{
      L.polyline(scene.line.points, {{ color: scene.line.color, weight: scene.line.weight, opacity: scene.line.opacity }}).addTo(map);
    }}
    if (scene.bounds) {{ map.fitBounds(scene.bounds); }} else {{ map.setView([0, 0], 2); }}
  </script>
</body>
</html>
"#,
        title = escape_html(title),
        ver = LEAFLET_VERSION,
        summary = escape_html(summary),
        items = items,
        payload = payload,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::presenter::build_scene;
    use crate::sdk::routing::{RouteRequest, RoutedPath};

    fn c(lon: f64, lat: f64) -> Coordinate {
        Coordinate::new(lon, lat).unwrap()
    }

    fn scene() -> MapScene {
        let request = RouteRequest::new(c(-0.1276, 51.5034), vec![c(-0.13, 51.502)], c(-0.1416, 51.501));
        let path = RoutedPath {
            geometry: vec![c(-0.1276, 51.5034), c(-0.1416, 51.501)],
            bounding_box: None,
            distance_m: 1500.0,
            duration_s: 300.0,
            steps: Vec::new(),
        };
        build_scene(&request, &path)
    }

    #[test]
    fn payload_flips_to_lat_lng() {
        let payload = scene_payload(&scene());
        assert_eq!(payload["markers"][0]["at"], json!([51.5034, -0.1276]));
        assert_eq!(payload["markers"][1]["numbered"], json!(true));
        assert_eq!(payload["markers"][1]["label"], json!("1"));
        assert_eq!(payload["line"]["points"][1], json!([51.501, -0.1416]));
        assert_eq!(payload["bounds"][0], json!([51.501, -0.1416]));
    }

    #[test]
    fn page_escapes_user_text() {
        let html = render_html(
            &scene(),
            "Trip <b>plan</b>",
            "1.50 km, 5.0 min",
            &["1. Head south (1500 m, 300 sec) & </script>".to_string()],
        );
        assert!(html.contains("<title>Trip &lt;b&gt;plan&lt;/b&gt;</title>"));
        assert!(html.contains("<li>1. Head south (1500 m, 300 sec) &amp; &lt;/script&gt;</li>"));
        assert!(html.contains("map.fitBounds(scene.bounds)"));
    }
}
