use super::*;

#[test]
fn text_style_defaults_fill_in() {
    let overlay: TextOverlay = serde_json::from_str(
        r#"{"text": "Hi", "position": {"x": 10.0, "y": 20.0}}"#,
    )
    .unwrap();
    assert_eq!(overlay.style.font_size, 16.0);
    assert_eq!(overlay.style.color, "#000000");
    assert_eq!(overlay.style.font_family, "sans-serif");
    assert_eq!(overlay.style.background_color, None);
    assert_eq!(overlay.style.opacity, 1.0);
    assert_eq!(overlay.style.font_weight, FontWeight::Normal);
    assert_eq!(overlay.rotation, 0.0);
}

#[test]
fn text_style_camel_case_fields_parse() {
    let overlay: TextOverlay = serde_json::from_str(
        r##"{
            "text": "Hi",
            "position": {"x": 0.0, "y": 0.0},
            "style": {"fontSize": 24.0, "backgroundColor": "#ffffff", "fontWeight": "bold"}
        }"##,
    )
    .unwrap();
    assert_eq!(overlay.style.font_size, 24.0);
    assert_eq!(overlay.style.background_color.as_deref(), Some("#ffffff"));
    assert_eq!(overlay.style.font_weight, FontWeight::Bold);
}

#[test]
fn image_overlay_size_defaults_to_natural() {
    let overlay: ImageOverlay = serde_json::from_str(
        r#"{"source": {"uri": "a.png"}, "position": {"x": 1.0, "y": 2.0}}"#,
    )
    .unwrap();
    assert_eq!(overlay.size, None);
    assert_eq!(overlay.opacity, 1.0);
    assert_eq!(overlay.rotation, 0.0);
}

#[test]
fn map_overlay_defaults_and_markers() {
    let overlay: MapOverlay = serde_json::from_str(
        r#"{
            "coordinates": {"latitude": 48.85, "longitude": 2.35},
            "markers": [
                {"coordinate": {"latitude": 48.86, "longitude": 2.34}, "title": "Home"},
                {"title": "no coordinate"}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(overlay.zoom_level, 14.0);
    assert_eq!(overlay.style.width, 300.0);
    assert_eq!(overlay.style.height, 200.0);
    assert_eq!(overlay.markers.len(), 2);
    assert!(overlay.markers[0].coordinate.is_some());
    // A marker without a coordinate still deserializes; the compositor
    // skips it at paint time.
    assert!(overlay.markers[1].coordinate.is_none());
}

#[test]
fn component_overlay_without_uri_is_representable() {
    let overlay: ComponentOverlay = serde_json::from_str(
        r#"{"position": {"x": 0.0, "y": 0.0}, "size": {"width": 10.0, "height": 10.0}}"#,
    )
    .unwrap();
    assert_eq!(overlay.rendered_image_uri, None);
}

#[test]
fn overlay_set_is_empty_tracks_all_categories() {
    let mut set = OverlaySet::default();
    assert!(set.is_empty());
    set.map = Some(MapOverlay {
        coordinates: GeoCoordinate::new(0.0, 0.0),
        zoom_level: 14.0,
        style: MapStyle::default(),
        position: Point::default(),
        markers: Vec::new(),
    });
    assert!(!set.is_empty());
}
