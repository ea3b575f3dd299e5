//! End-to-end exercises of the matrix model as the dashboard drives it:
//! pick a template, fill in a variation, generate combinations, and
//! serialize the result for the save endpoint.

use common::matrix::MatrixModel;
use common::model::field::{DynamicField, FieldType};
use common::model::payload::MatrixPayload;
use common::model::template::Template;

fn summer_template() -> Template {
    Template {
        id: "tpl-story".to_string(),
        name: "Story Ad".to_string(),
        platform: "instagram".to_string(),
        aspect_ratio: "9:16".to_string(),
        dynamic_fields: vec![
            DynamicField {
                id: "headline".to_string(),
                name: "Headline".to_string(),
                field_type: FieldType::Text,
                required: true,
                description: "Main hook, keep it short".to_string(),
            },
            DynamicField {
                id: "bg".to_string(),
                name: "Background Image".to_string(),
                field_type: FieldType::Image,
                required: true,
                description: String::new(),
            },
        ],
    }
}

#[test]
fn fill_one_variation_and_generate_combinations() {
    let mut model = MatrixModel::new();
    model.select_template(summer_template());
    model.add_variation().unwrap();

    let v1 = model.variations()[0].id.clone();
    let v2 = model.variations()[1].id.clone();

    model.set_field_value("headline", &v1, Some("Summer Sale".to_string()), None);
    model.set_field_value("bg", &v1, None, Some("a1".to_string()));

    assert_eq!(model.variation_completion(&v1), 100);
    assert_eq!(model.variation_completion(&v2), 0);
    // Grid-wide: 2 of 4 cells.
    assert_eq!(model.completion_percentage(), 50);

    model.generate_combinations();
    assert_eq!(model.combinations().len(), 2);
    assert_eq!(model.combinations()[0].name, "Primary Combination");
    assert_eq!(model.combinations()[0].variation_ids, vec![v1.clone()]);
    assert_eq!(model.combinations()[1].name, "A/B Test Combination");
    assert_eq!(model.combinations()[1].variation_ids, vec![v1, v2]);
}

#[test]
fn payload_serializes_with_the_documented_keys() {
    let mut model = MatrixModel::new();
    model.select_template(summer_template());
    let v1 = model.variations()[0].id.clone();
    model.set_field_value("headline", &v1, Some("Summer Sale".to_string()), None);
    model.set_field_value("bg", &v1, None, Some("a1".to_string()));
    model.generate_combinations();

    let payload = model
        .to_payload("Summer Push", Some("August flight".to_string()))
        .unwrap();
    let json = serde_json::to_value(&payload).unwrap();

    assert_eq!(json["status"], "draft");
    assert_eq!(json["templateId"], "tpl-story");
    assert_eq!(json["variations"][0]["isActive"], true);
    assert_eq!(json["variations"][0]["isDefault"], true);
    assert_eq!(json["combinations"][0]["isSelected"], true);
    assert_eq!(json["combinations"][0]["performanceScore"], 85);

    let headline = &json["fieldAssignments"]["headline"];
    assert_eq!(headline["status"], "completed");
    assert_eq!(headline["content"][0]["content"], "Summer Sale");
    assert_eq!(headline["content"][0]["variationId"], v1);

    let bg = &json["fieldAssignments"]["bg"];
    assert_eq!(bg["status"], "completed");
    assert_eq!(bg["assets"][0]["assetId"], "a1");

    // The shape must survive a round trip through the wire format.
    let back: MatrixPayload = serde_json::from_value(json).unwrap();
    assert_eq!(back.name, "Summer Push");
    assert_eq!(back.field_assignments.len(), 2);
}

#[test]
fn partially_filled_field_reports_in_progress_on_the_wire() {
    let mut model = MatrixModel::new();
    model.select_template(summer_template());
    model.add_variation().unwrap();
    let v1 = model.variations()[0].id.clone();
    model.set_field_value("headline", &v1, Some("Summer Sale".to_string()), None);

    let payload = model.to_payload("Summer Push", None).unwrap();
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["fieldAssignments"]["headline"]["status"], "in-progress");
    assert_eq!(json["fieldAssignments"]["bg"]["status"], "empty");
}
