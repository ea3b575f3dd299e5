//! # Matrix model
//!
//! In-memory state for one selected template: its variations, the
//! per-(field, variation) value assignments, and the derived test
//! combinations. All operations run synchronously to completion; the
//! model has no I/O and no dependency on the rendering environment, so
//! it can be driven directly from unit tests.
//!
//! Ownership: variations, field values and combinations belong to this
//! model. Templates and assets are owned by their libraries and are only
//! referenced here by id.

mod error;

pub use error::MatrixError;

use crate::model::combination::Combination;
use crate::model::field_value::{FieldStatus, FieldValue};
use crate::model::payload::{
    FieldAssetRef, FieldAssignment, FieldContent, MatrixPayload, MatrixStatus,
};
use crate::model::template::Template;
use crate::model::variation::Variation;
use std::collections::HashMap;
use uuid::Uuid;

/// Placeholder scores for generated combinations, in tier order
/// (primary, A/B, full suite). Real scores arrive later from analytics.
const PLACEHOLDER_SCORES: [u32; 3] = [85, 72, 68];

#[derive(Debug, Default)]
pub struct MatrixModel {
    template: Option<Template>,
    variations: Vec<Variation>,
    /// Keyed by (field id, variation id); at most one value per pair.
    values: HashMap<(String, String), FieldValue>,
    combinations: Vec<Combination>,
}

impl MatrixModel {
    pub fn new() -> MatrixModel {
        MatrixModel::default()
    }

    /// Resets the model onto `template`: one default variation
    /// ("Version A", active) and one empty value per field. Any previous
    /// variations, values and combinations are discarded.
    pub fn select_template(&mut self, template: Template) {
        self.variations.clear();
        self.values.clear();
        self.combinations.clear();

        let variation = Variation {
            id: Uuid::new_v4().to_string(),
            name: "Version A".to_string(),
            is_active: true,
            is_default: true,
        };
        for field in &template.dynamic_fields {
            self.values.insert(
                (field.id.clone(), variation.id.clone()),
                FieldValue::empty(&field.id, &variation.id),
            );
        }
        self.variations.push(variation);
        self.template = Some(template);
    }

    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    pub fn variations(&self) -> &[Variation] {
        &self.variations
    }

    pub fn combinations(&self) -> &[Combination] {
        &self.combinations
    }

    /// Appends a new active variation with an auto-generated name
    /// ("Version B", "Version C", ...) and an empty value per field.
    pub fn add_variation(&mut self) -> Result<Variation, MatrixError> {
        let template = self.template.as_ref().ok_or(MatrixError::NoTemplateSelected)?;

        let letter = (b'A' + (self.variations.len() % 26) as u8) as char;
        let variation = Variation {
            id: Uuid::new_v4().to_string(),
            name: format!("Version {letter}"),
            is_active: true,
            is_default: false,
        };
        for field in &template.dynamic_fields {
            self.values.insert(
                (field.id.clone(), variation.id.clone()),
                FieldValue::empty(&field.id, &variation.id),
            );
        }
        self.variations.push(variation.clone());
        Ok(variation)
    }

    /// Creates "<source name> (Copy)" with a deep copy of every value the
    /// source variation holds. Returns `None` (and changes nothing) when
    /// the id is unknown.
    pub fn duplicate_variation(&mut self, variation_id: &str) -> Option<&Variation> {
        let source = self.variations.iter().find(|v| v.id == variation_id)?;
        let copy = Variation {
            id: Uuid::new_v4().to_string(),
            name: format!("{} (Copy)", source.name),
            is_active: source.is_active,
            is_default: false,
        };

        let copied: Vec<FieldValue> = self
            .values
            .values()
            .filter(|fv| fv.variation_id == variation_id)
            .map(|fv| FieldValue {
                field_id: fv.field_id.clone(),
                variation_id: copy.id.clone(),
                value: fv.value.clone(),
                asset_id: fv.asset_id.clone(),
            })
            .collect();
        for fv in copied {
            self.values
                .insert((fv.field_id.clone(), fv.variation_id.clone()), fv);
        }

        self.variations.push(copy);
        self.variations.last()
    }

    /// Removes the variation and all its values, and prunes its id from
    /// every combination (combinations left empty are dropped).
    ///
    /// Deleting the last remaining variation is rejected; an unknown id
    /// is a no-op.
    pub fn delete_variation(&mut self, variation_id: &str) -> Result<(), MatrixError> {
        if self.variations.len() <= 1 {
            return Err(MatrixError::LastVariation);
        }
        if !self.variations.iter().any(|v| v.id == variation_id) {
            return Ok(());
        }

        self.variations.retain(|v| v.id != variation_id);
        self.values.retain(|(_, vid), _| vid != variation_id);
        for combination in &mut self.combinations {
            combination.variation_ids.retain(|id| id != variation_id);
        }
        self.combinations.retain(|c| !c.variation_ids.is_empty());
        Ok(())
    }

    /// Renames a variation. Returns false when the id is unknown.
    pub fn rename_variation(&mut self, variation_id: &str, name: &str) -> bool {
        match self.variations.iter_mut().find(|v| v.id == variation_id) {
            Some(v) => {
                v.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Toggles a variation in or out of the active set. Returns false
    /// when the id is unknown.
    pub fn set_variation_active(&mut self, variation_id: &str, is_active: bool) -> bool {
        match self.variations.iter_mut().find(|v| v.id == variation_id) {
            Some(v) => {
                v.is_active = is_active;
                true
            }
            None => false,
        }
    }

    /// Upserts the value for one (field, variation) cell. Ids are trusted
    /// and values are not validated against the field's declared type;
    /// completion status follows from the stored content.
    pub fn set_field_value(
        &mut self,
        field_id: &str,
        variation_id: &str,
        value: Option<String>,
        asset_id: Option<String>,
    ) {
        let key = (field_id.to_string(), variation_id.to_string());
        match self.values.get_mut(&key) {
            Some(fv) => {
                fv.value = value;
                fv.asset_id = asset_id;
            }
            None => {
                self.values.insert(
                    key,
                    FieldValue {
                        field_id: field_id.to_string(),
                        variation_id: variation_id.to_string(),
                        value,
                        asset_id,
                    },
                );
            }
        }
    }

    pub fn field_value(&self, field_id: &str, variation_id: &str) -> Option<&FieldValue> {
        self.values
            .get(&(field_id.to_string(), variation_id.to_string()))
    }

    /// Replaces the combination list from the current active-variation
    /// set:
    /// - 1+ active: "Primary Combination" (first active), selected
    /// - 2+ active: "A/B Test Combination" (first two), selected
    /// - 3+ active: "Full Test Suite" (all active), not selected
    pub fn generate_combinations(&mut self) {
        let active: Vec<&Variation> = self.variations.iter().filter(|v| v.is_active).collect();
        let mut combinations = Vec::new();

        if !active.is_empty() {
            combinations.push(Combination {
                id: Uuid::new_v4().to_string(),
                name: "Primary Combination".to_string(),
                variation_ids: vec![active[0].id.clone()],
                is_selected: true,
                performance_score: Some(PLACEHOLDER_SCORES[0]),
            });
        }
        if active.len() >= 2 {
            combinations.push(Combination {
                id: Uuid::new_v4().to_string(),
                name: "A/B Test Combination".to_string(),
                variation_ids: vec![active[0].id.clone(), active[1].id.clone()],
                is_selected: true,
                performance_score: Some(PLACEHOLDER_SCORES[1]),
            });
        }
        if active.len() >= 3 {
            combinations.push(Combination {
                id: Uuid::new_v4().to_string(),
                name: "Full Test Suite".to_string(),
                variation_ids: active.iter().map(|v| v.id.clone()).collect(),
                is_selected: false,
                performance_score: Some(PLACEHOLDER_SCORES[2]),
            });
        }

        self.combinations = combinations;
    }

    /// Completed cells over the whole grid, as a percentage rounded to
    /// the nearest integer. 0 when the grid is empty.
    pub fn completion_percentage(&self) -> u32 {
        let total = self.grid_size();
        if total == 0 {
            return 0;
        }
        let completed = self.values.values().filter(|fv| fv.is_completed()).count();
        percentage(completed, total)
    }

    /// Completion for a single variation's row of cells.
    pub fn variation_completion(&self, variation_id: &str) -> u32 {
        let total = self
            .template
            .as_ref()
            .map(|t| t.dynamic_fields.len())
            .unwrap_or(0);
        if total == 0 {
            return 0;
        }
        let completed = self
            .values
            .values()
            .filter(|fv| fv.variation_id == variation_id && fv.is_completed())
            .count();
        percentage(completed, total)
    }

    /// Serializes the model into the shape the save endpoint consumes.
    /// New matrices always leave here as drafts.
    pub fn to_payload(
        &self,
        name: &str,
        description: Option<String>,
    ) -> Result<MatrixPayload, MatrixError> {
        let template = self.template.as_ref().ok_or(MatrixError::NoTemplateSelected)?;
        if name.trim().is_empty() {
            return Err(MatrixError::EmptyName);
        }

        let mut field_assignments = std::collections::BTreeMap::new();
        for field in &template.dynamic_fields {
            let mut content = Vec::new();
            let mut assets = Vec::new();
            let mut completed = 0usize;

            for variation in &self.variations {
                let Some(fv) = self.field_value(&field.id, &variation.id) else {
                    continue;
                };
                if fv.is_completed() {
                    completed += 1;
                }
                if let Some(value) = fv.value.as_deref().filter(|v| !v.is_empty()) {
                    content.push(FieldContent {
                        id: format!("{}:{}", field.id, variation.id),
                        variation_id: variation.id.clone(),
                        content: value.to_string(),
                    });
                }
                if let Some(asset_id) = &fv.asset_id {
                    assets.push(FieldAssetRef {
                        variation_id: variation.id.clone(),
                        asset_id: asset_id.clone(),
                    });
                }
            }

            let status = if completed == 0 {
                FieldStatus::Empty
            } else if completed == self.variations.len() {
                FieldStatus::Completed
            } else {
                FieldStatus::InProgress
            };
            field_assignments.insert(
                field.id.clone(),
                FieldAssignment {
                    status,
                    content,
                    assets,
                },
            );
        }

        Ok(MatrixPayload {
            name: name.trim().to_string(),
            description,
            template_id: template.id.clone(),
            status: MatrixStatus::Draft,
            variations: self.variations.clone(),
            combinations: self.combinations.clone(),
            field_assignments,
        })
    }

    fn grid_size(&self) -> usize {
        let fields = self
            .template
            .as_ref()
            .map(|t| t.dynamic_fields.len())
            .unwrap_or(0);
        fields * self.variations.len()
    }
}

fn percentage(completed: usize, total: usize) -> u32 {
    (completed as f64 / total as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::{DynamicField, FieldType};

    fn field(id: &str, name: &str, field_type: FieldType, required: bool) -> DynamicField {
        DynamicField {
            id: id.to_string(),
            name: name.to_string(),
            field_type,
            required,
            description: String::new(),
        }
    }

    fn template(fields: Vec<DynamicField>) -> Template {
        Template {
            id: "tpl-1".to_string(),
            name: "Story Ad".to_string(),
            platform: "instagram".to_string(),
            aspect_ratio: "9:16".to_string(),
            dynamic_fields: fields,
        }
    }

    fn two_field_model() -> MatrixModel {
        let mut model = MatrixModel::new();
        model.select_template(template(vec![
            field("headline", "Headline", FieldType::Text, true),
            field("bg", "Background Image", FieldType::Image, true),
        ]));
        model
    }

    #[test]
    fn select_template_seeds_one_variation_and_empty_grid() {
        let model = two_field_model();
        assert_eq!(model.variations().len(), 1);
        let v = &model.variations()[0];
        assert_eq!(v.name, "Version A");
        assert!(v.is_active);
        assert!(v.is_default);

        for fid in ["headline", "bg"] {
            let fv = model.field_value(fid, &v.id).unwrap();
            assert_eq!(fv.status(), FieldStatus::Empty);
        }
        assert_eq!(model.completion_percentage(), 0);
    }

    #[test]
    fn select_template_resets_previous_state() {
        let mut model = two_field_model();
        model.add_variation().unwrap();
        model.generate_combinations();

        model.select_template(template(vec![field("cta", "CTA", FieldType::Link, false)]));
        assert_eq!(model.variations().len(), 1);
        assert!(model.combinations().is_empty());
        assert!(model.field_value("headline", &model.variations()[0].id).is_none());
    }

    #[test]
    fn add_variation_auto_names_and_seeds_cells() {
        let mut model = two_field_model();
        let b = model.add_variation().unwrap().id.clone();
        let c = model.add_variation().unwrap().id.clone();

        assert_eq!(model.variations().len(), 3);
        assert_eq!(model.variations()[1].name, "Version B");
        assert_eq!(model.variations()[2].name, "Version C");
        assert!(!model.variations()[2].is_default);

        for vid in [&b, &c] {
            for fid in ["headline", "bg"] {
                assert_eq!(model.field_value(fid, vid).unwrap().status(), FieldStatus::Empty);
            }
        }
    }

    #[test]
    fn add_variation_without_template_is_rejected() {
        let mut model = MatrixModel::new();
        assert_eq!(model.add_variation().unwrap_err(), MatrixError::NoTemplateSelected);
    }

    #[test]
    fn set_field_value_round_trip() {
        let mut model = two_field_model();
        let vid = model.variations()[0].id.clone();

        model.set_field_value("headline", &vid, Some("hello".to_string()), None);
        let fv = model.field_value("headline", &vid).unwrap();
        assert_eq!(fv.value.as_deref(), Some("hello"));
        assert_eq!(fv.status(), FieldStatus::Completed);

        model.set_field_value("headline", &vid, Some(String::new()), None);
        assert_eq!(
            model.field_value("headline", &vid).unwrap().status(),
            FieldStatus::Empty
        );
    }

    #[test]
    fn asset_reference_completes_a_cell() {
        let mut model = two_field_model();
        let vid = model.variations()[0].id.clone();
        model.set_field_value("bg", &vid, None, Some("a1".to_string()));
        assert_eq!(model.field_value("bg", &vid).unwrap().status(), FieldStatus::Completed);
    }

    #[test]
    fn duplicate_copies_values_without_sharing() {
        let mut model = two_field_model();
        let src = model.variations()[0].id.clone();
        model.set_field_value("headline", &src, Some("Summer Sale".to_string()), None);

        let copy = model.duplicate_variation(&src).unwrap();
        let copy_id = copy.id.clone();
        assert_eq!(copy.name, "Version A (Copy)");
        assert!(!copy.is_default);
        assert_eq!(
            model.field_value("headline", &copy_id).unwrap().value.as_deref(),
            Some("Summer Sale")
        );

        // Later edits to the source must not leak into the copy.
        model.set_field_value("headline", &src, Some("Winter Sale".to_string()), None);
        assert_eq!(
            model.field_value("headline", &copy_id).unwrap().value.as_deref(),
            Some("Summer Sale")
        );
    }

    #[test]
    fn duplicate_unknown_id_is_a_noop() {
        let mut model = two_field_model();
        assert!(model.duplicate_variation("missing").is_none());
        assert_eq!(model.variations().len(), 1);
    }

    #[test]
    fn delete_last_variation_is_rejected_and_state_unchanged() {
        let mut model = two_field_model();
        let vid = model.variations()[0].id.clone();
        let err = model.delete_variation(&vid).unwrap_err();
        assert_eq!(err, MatrixError::LastVariation);
        assert_eq!(err.to_string(), "cannot delete the last variation");
        assert_eq!(model.variations().len(), 1);
        assert!(model.field_value("headline", &vid).is_some());
    }

    #[test]
    fn delete_variation_cascades_values_and_prunes_combinations() {
        let mut model = two_field_model();
        let a = model.variations()[0].id.clone();
        let b = model.add_variation().unwrap().id.clone();
        let c = model.add_variation().unwrap().id.clone();
        model.generate_combinations();
        assert_eq!(model.combinations().len(), 3);

        model.delete_variation(&a).unwrap();
        assert_eq!(model.variations().len(), 2);
        assert!(model.field_value("headline", &a).is_none());
        for combination in model.combinations() {
            assert!(!combination.variation_ids.contains(&a));
        }
        // "Primary Combination" only held the deleted id, so it is gone.
        assert_eq!(model.combinations().len(), 2);
        assert_eq!(model.combinations()[0].variation_ids, vec![b.clone()]);
        assert_eq!(model.combinations()[1].variation_ids, vec![b, c]);
    }

    #[test]
    fn generate_combinations_tiers() {
        let mut model = two_field_model();
        model.generate_combinations();
        assert_eq!(model.combinations().len(), 1);
        assert_eq!(model.combinations()[0].name, "Primary Combination");
        assert!(model.combinations()[0].is_selected);
        assert_eq!(model.combinations()[0].performance_score, Some(85));

        model.add_variation().unwrap();
        model.generate_combinations();
        assert_eq!(model.combinations().len(), 2);
        assert_eq!(model.combinations()[1].name, "A/B Test Combination");
        assert!(model.combinations()[1].is_selected);

        model.add_variation().unwrap();
        model.generate_combinations();
        assert_eq!(model.combinations().len(), 3);
        let full = &model.combinations()[2];
        assert_eq!(full.name, "Full Test Suite");
        assert!(!full.is_selected);
        let active_ids: Vec<String> =
            model.variations().iter().map(|v| v.id.clone()).collect();
        assert_eq!(full.variation_ids, active_ids);
    }

    #[test]
    fn generate_combinations_skips_inactive_and_replaces_list() {
        let mut model = two_field_model();
        let a = model.variations()[0].id.clone();
        let b = model.add_variation().unwrap().id.clone();
        model.add_variation().unwrap();
        model.generate_combinations();
        assert_eq!(model.combinations().len(), 3);

        model.set_variation_active(&a, false);
        model.generate_combinations();
        // Two active left: the old three-tier list is fully replaced.
        assert_eq!(model.combinations().len(), 2);
        assert_eq!(model.combinations()[0].variation_ids, vec![b]);
    }

    #[test]
    fn completion_percentage_is_monotonic_and_reaches_bounds() {
        let mut model = two_field_model();
        let a = model.variations()[0].id.clone();
        let b = model.add_variation().unwrap().id.clone();
        assert_eq!(model.completion_percentage(), 0);

        let mut last = 0;
        let cells = [("headline", &a), ("bg", &a), ("headline", &b), ("bg", &b)];
        for (fid, vid) in cells {
            model.set_field_value(fid, vid, Some("x".to_string()), None);
            let pct = model.completion_percentage();
            assert!(pct >= last);
            last = pct;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn completion_percentage_rounds_to_nearest() {
        let mut model = MatrixModel::new();
        model.select_template(template(vec![
            field("f1", "F1", FieldType::Text, false),
            field("f2", "F2", FieldType::Text, false),
            field("f3", "F3", FieldType::Text, false),
        ]));
        let vid = model.variations()[0].id.clone();
        model.set_field_value("f1", &vid, Some("x".to_string()), None);
        // 1/3 rounds to 33.
        assert_eq!(model.completion_percentage(), 33);
        model.set_field_value("f2", &vid, Some("x".to_string()), None);
        // 2/3 rounds to 67.
        assert_eq!(model.completion_percentage(), 67);
    }

    #[test]
    fn empty_template_reports_zero_completion() {
        let mut model = MatrixModel::new();
        model.select_template(template(vec![]));
        assert_eq!(model.completion_percentage(), 0);
    }

    #[test]
    fn payload_requires_name_and_template() {
        let mut model = MatrixModel::new();
        assert_eq!(
            model.to_payload("Campaign", None).unwrap_err(),
            MatrixError::NoTemplateSelected
        );
        model.select_template(template(vec![]));
        assert_eq!(model.to_payload("  ", None).unwrap_err(), MatrixError::EmptyName);
    }

    #[test]
    fn payload_aggregates_field_status_across_variations() {
        let mut model = two_field_model();
        let a = model.variations()[0].id.clone();
        let b = model.add_variation().unwrap().id.clone();

        model.set_field_value("headline", &a, Some("Summer Sale".to_string()), None);
        model.set_field_value("bg", &a, None, Some("a1".to_string()));
        model.set_field_value("bg", &b, None, Some("a2".to_string()));

        let payload = model.to_payload("Summer Push", None).unwrap();
        assert_eq!(payload.status, MatrixStatus::Draft);
        assert_eq!(payload.template_id, "tpl-1");

        let headline = &payload.field_assignments["headline"];
        assert_eq!(headline.status, FieldStatus::InProgress);
        assert_eq!(headline.content.len(), 1);
        assert_eq!(headline.content[0].variation_id, a);
        assert_eq!(headline.content[0].content, "Summer Sale");
        assert!(headline.assets.is_empty());

        let bg = &payload.field_assignments["bg"];
        assert_eq!(bg.status, FieldStatus::Completed);
        assert!(bg.content.is_empty());
        assert_eq!(bg.assets.len(), 2);
        assert_eq!(bg.assets[0].asset_id, "a1");
        assert_eq!(bg.assets[1].asset_id, "a2");
    }
}
