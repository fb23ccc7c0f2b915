use serde_json::json;
use transit_mcp::args::normalize;
use transit_mcp::catalog::build_catalog;

#[test]
fn journey_aliases_behave_like_canonical_names() {
    let catalog = build_catalog();
    let tool = catalog.get("get_journeys").unwrap();

    let canonical = normalize(
        tool,
        Some(json!({"from": "A", "to": "B"})),
    )
    .unwrap();
    let aliased = normalize(
        tool,
        Some(json!({"fromId": "A", "toId": "B"})),
    )
    .unwrap();

    assert_eq!(canonical, aliased);
    assert_eq!(aliased["from"], json!("A"));
    assert_eq!(aliased["to"], json!("B"));
    assert!(aliased.get("fromId").is_none());
    assert!(aliased.get("toId").is_none());
}

#[test]
fn canonical_value_wins_over_alias() {
    let catalog = build_catalog();
    let tool = catalog.get("get_journeys").unwrap();

    let args = normalize(
        tool,
        Some(json!({"from": "keep", "fromId": "discard", "to": "B"})),
    )
    .unwrap();
    assert_eq!(args["from"], json!("keep"));
    assert!(args.get("fromId").is_none());
}

#[test]
fn coordinate_object_and_string_normalize_identically() {
    let catalog = build_catalog();
    let tool = catalog.get("get_journeys").unwrap();

    let from_object = normalize(
        tool,
        Some(json!({"from": {"longitude": 2.35, "latitude": 48.85}, "to": "B"})),
    )
    .unwrap();
    let from_string = normalize(
        tool,
        Some(json!({"from": "2.35;48.85", "to": "B"})),
    )
    .unwrap();

    assert_eq!(from_object["from"], json!("2.35;48.85"));
    assert_eq!(from_object, from_string);
}

#[test]
fn lng_lat_spelling_collapses_too() {
    let catalog = build_catalog();
    let tool = catalog.get("places_nearby").unwrap();

    let args = normalize(tool, Some(json!({"coord": {"lng": -1.55, "lat": 47.21}}))).unwrap();
    assert_eq!(args["coord"], json!("-1.55;47.21"));
}

#[test]
fn defaults_fill_absent_and_null_but_not_zero() {
    let catalog = build_catalog();
    let tool = catalog.get("get_departures").unwrap();

    let absent = normalize(tool, Some(json!({"stop_area_id": "X"}))).unwrap();
    assert_eq!(absent["count"], json!(10));
    assert_eq!(absent["depth"], json!(3));
    assert_eq!(absent["data_freshness"], json!("realtime"));

    let null = normalize(
        tool,
        Some(json!({"stop_area_id": "X", "count": null})),
    )
    .unwrap();
    assert_eq!(null["count"], json!(10));

    let zero = normalize(
        tool,
        Some(json!({"stop_area_id": "X", "count": 0})),
    )
    .unwrap();
    assert_eq!(zero["count"], json!(0), "explicit zero is caller intent");
}

#[test]
fn distance_accepts_radius_alias() {
    let catalog = build_catalog();
    let tool = catalog.get("places_nearby").unwrap();

    let args = normalize(
        tool,
        Some(json!({"coord": "2.35;48.85", "radius": 5000})),
    )
    .unwrap();
    assert_eq!(args["distance"], json!(5000));
    assert!(args.get("radius").is_none());
}

#[test]
fn missing_required_parameter_is_named() {
    let catalog = build_catalog();
    let tool = catalog.get("get_journeys").unwrap();

    let err = normalize(tool, Some(json!({"to": "B"}))).unwrap_err();
    assert_eq!(err.to_string(), "from parameter is required");
}

#[test]
fn latitude_out_of_range_gets_descriptive_error() {
    let catalog = build_catalog();
    let tool = catalog.get("display_address_map").unwrap();

    let err = normalize(
        tool,
        Some(json!({"latitude": 91, "longitude": 2.35})),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Latitude must be between -90 and 90 degrees"
    );

    let err = normalize(
        tool,
        Some(json!({"latitude": 48.85, "longitude": -181})),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Longitude must be between -180 and 180 degrees"
    );
}

#[test]
fn zoom_range_is_enforced() {
    let catalog = build_catalog();
    let tool = catalog.get("display_address_map").unwrap();

    let err = normalize(
        tool,
        Some(json!({"latitude": 48.85, "longitude": 2.35, "zoom": 25})),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Zoom level must be between 1 and 20");

    let ok = normalize(
        tool,
        Some(json!({"latitude": 48.85, "longitude": 2.35})),
    )
    .unwrap();
    assert_eq!(ok["zoom"], json!(15));
}

#[test]
fn datetime_garbage_is_rejected_before_upstream() {
    let catalog = build_catalog();
    let tool = catalog.get("get_journeys").unwrap();

    let err = normalize(
        tool,
        Some(json!({"from": "A", "to": "B", "datetime": "tomorrow at noon"})),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid datetime format: 'tomorrow at noon'. Expected YYYYMMDDTHHMMSS (e.g. 20240101T143000)"
    );

    let ok = normalize(
        tool,
        Some(json!({"from": "A", "to": "B", "date": "20240101T143000"})),
    )
    .unwrap();
    assert_eq!(ok["datetime"], json!("20240101T143000"));
}

#[test]
fn enum_values_are_checked() {
    let catalog = build_catalog();
    let tool = catalog.get("get_departures").unwrap();

    let err = normalize(
        tool,
        Some(json!({"stop_area_id": "X", "data_freshness": "fresh"})),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid value for data_freshness: 'fresh'. Valid values: realtime, base_schedule"
    );
}

#[test]
fn place_type_array_items_are_checked() {
    let catalog = build_catalog();
    let tool = catalog.get("places_nearby").unwrap();

    let err = normalize(
        tool,
        Some(json!({"coord": "2.35;48.85", "types": ["stop_area", "castle"]})),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid value for types: 'castle'. Valid values: stop_area, stop_point, poi, address"
    );

    let err = normalize(
        tool,
        Some(json!({"coord": "2.35;48.85", "types": "stop_area"})),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "types must be an array of strings");
}

#[test]
fn non_object_arguments_are_rejected() {
    let catalog = build_catalog();
    let tool = catalog.get("search_stations").unwrap();

    let err = normalize(tool, Some(json!("paris"))).unwrap_err();
    assert_eq!(err.to_string(), "arguments must be an object, got a string");

    let err = normalize(tool, None).unwrap_err();
    assert_eq!(err.to_string(), "query parameter is required");
}
