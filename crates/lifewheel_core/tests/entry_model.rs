use lifewheel_core::{
    areas, LifeArea, MonthKey, NewWheelEntry, ScoreBand, WheelEntry, WheelEntryRow, TOTAL_AREAS,
};
use uuid::Uuid;

#[test]
fn catalog_has_eight_areas_in_fixed_order() {
    let names: Vec<&str> = areas().iter().map(|descriptor| descriptor.name).collect();
    assert_eq!(names.len(), TOTAL_AREAS);
    assert_eq!(
        names,
        vec![
            "Career",
            "Health",
            "Relationships",
            "Personal Growth",
            "Family",
            "Recreation",
            "Money",
            "Emotions",
        ]
    );
    assert!(areas().iter().all(|descriptor| !descriptor.icon.is_empty()));
}

#[test]
fn new_entry_defaults_text_to_empty() {
    let month = MonthKey::from_ymd(2026, 3).unwrap();
    let entry = NewWheelEntry::new(LifeArea::Relationships, month, 6);

    assert!(entry.what_went_well.is_empty());
    assert!(entry.what_can_be_improved.is_empty());
    assert!(entry.notes.is_empty());
    assert!(entry.validate().is_ok());
}

#[test]
fn entry_serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let month = MonthKey::from_ymd(2026, 3).unwrap();
    let entry = WheelEntry::persisted(
        id,
        NewWheelEntry {
            what_went_well: "daily walks".to_string(),
            ..NewWheelEntry::new(LifeArea::PersonalGrowth, month, 8)
        },
    );

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["area"], "Personal Growth");
    assert_eq!(json["score"], 8);
    assert_eq!(json["what_went_well"], "daily walks");
    assert_eq!(json["month"], "2026-03-01");

    let decoded: WheelEntry = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, entry);
}

#[test]
fn deserialize_rejects_unknown_area() {
    let value = serde_json::json!({
        "id": null,
        "area": "Hobbies",
        "score": 5,
        "month": "2026-03-01"
    });

    let err = serde_json::from_value::<WheelEntry>(value).unwrap_err();
    assert!(
        err.to_string().contains("unknown life area `Hobbies`"),
        "unexpected error: {err}"
    );
}

#[test]
fn wire_row_roundtrip_through_backend_shape() {
    let month = MonthKey::from_ymd(2026, 7).unwrap();
    let entry = WheelEntry::persisted(
        Uuid::new_v4(),
        NewWheelEntry::new(LifeArea::Money, month, 3),
    );

    let row = WheelEntryRow::from(&entry);
    assert_eq!(row.month.as_deref(), Some("2026-07-01"));
    assert_eq!(row.into_entry().unwrap(), entry);
}

#[test]
fn score_bands_match_form_descriptions() {
    let described: Vec<&str> = (1..=10)
        .map(|score| ScoreBand::for_score(score).description())
        .collect();
    assert_eq!(
        described,
        vec![
            "Very Dissatisfied",
            "Very Dissatisfied",
            "Dissatisfied",
            "Dissatisfied",
            "Neutral",
            "Neutral",
            "Satisfied",
            "Satisfied",
            "Very Satisfied",
            "Very Satisfied",
        ]
    );
}
