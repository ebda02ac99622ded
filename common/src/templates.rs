//! Default message templates: form binding, validation, merge and save.
//!
//! The dashboard edits one value per (template uuid, field type). The form
//! document has the shape
//!
//! ```json
//! { "dynamicFields": { "<uuid>": { "fields": { "<type>": "value" } } } }
//! ```
//!
//! and is validated before anything is merged back into the templates. The
//! merged set is always persisted whole, in a single call.

use std::collections::BTreeMap;

use async_trait::async_trait;
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FetchError, ValidationError};
use crate::model::template::{FieldValue, Template};
use crate::notify::{NotificationKind, Notifier};
use crate::requests::SaveTemplatesRequest;

pub const TEMPLATES_UPDATED: &str = "Default setting updated";
pub const TEMPLATES_NOT_UPDATED: &str = "Error updating templates";

const DYNAMIC_FIELDS: &str = "dynamicFields";
const FIELDS: &str = "fields";

#[async_trait(?Send)]
pub trait TemplatesApi {
    async fn fetch_templates(&self) -> Result<Vec<Template>, FetchError>;
    async fn save_templates(&self, request: &SaveTemplatesRequest) -> Result<(), FetchError>;
}

/// Validated form document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatesForm {
    pub dynamic_fields: BTreeMap<String, TemplateFormEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateFormEntry {
    pub fields: BTreeMap<String, FieldValue>,
}

/// Checks `data` against the form shape and returns the typed document.
pub fn validate_form(data: &Value) -> Result<TemplatesForm, ValidationError> {
    let root = as_object(data, "")?;
    let dynamic_fields = root.get(DYNAMIC_FIELDS).ok_or(ValidationError::Missing {
        path: DYNAMIC_FIELDS.to_string(),
    })?;
    let dynamic_fields = as_object(dynamic_fields, DYNAMIC_FIELDS)?;

    let mut form = TemplatesForm::default();
    for (uuid, entry) in dynamic_fields {
        let entry_path = format!("{}.{}", DYNAMIC_FIELDS, uuid);
        let fields_path = format!("{}.{}", entry_path, FIELDS);
        let fields = as_object(entry, &entry_path)?
            .get(FIELDS)
            .ok_or_else(|| ValidationError::Missing {
                path: fields_path.clone(),
            })?;

        let mut values = BTreeMap::new();
        for (field_type, value) in as_object(fields, &fields_path)? {
            let path = format!("{}.{}", fields_path, field_type);
            values.insert(field_type.clone(), field_value(value, path)?);
        }
        form.dynamic_fields
            .insert(uuid.clone(), TemplateFormEntry { fields: values });
    }
    Ok(form)
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ValidationError> {
    value.as_object().ok_or_else(|| ValidationError::ExpectedObject {
        path: path.to_string(),
    })
}

fn field_value(value: &Value, path: String) -> Result<FieldValue, ValidationError> {
    match value {
        Value::String(text) => Ok(FieldValue::Text(text.clone())),
        Value::Number(number) => Ok(FieldValue::Number(number.clone())),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map(FieldValue::List)
            .ok_or(ValidationError::InvalidFieldValue { path }),
        _ => Err(ValidationError::InvalidFieldValue { path }),
    }
}

/// Editable form state scoped to one dashboard session.
#[derive(Debug, Clone)]
pub struct FormSession {
    data: Value,
    seeded_revision: Option<u64>,
}

impl Default for FormSession {
    fn default() -> Self {
        Self {
            data: empty_form(),
            seeded_revision: None,
        }
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn empty_form() -> Value {
    let mut root = Map::new();
    root.insert(DYNAMIC_FIELDS.to_string(), empty_object());
    Value::Object(root)
}

/// Replaces a non-object value with an empty object and returns the map.
fn ensure_object(value: &mut Value) -> Option<&mut Map<String, Value>> {
    if !value.is_object() {
        *value = empty_object();
    }
    value.as_object_mut()
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one value per template field from its `defaultValue`.
    ///
    /// `revision` identifies the loaded template set. Seeding runs once per
    /// revision, so values edited since the last seed survive re-renders that
    /// hand back the same set. An empty set seeds nothing. Returns whether
    /// values were written.
    pub fn seed(&mut self, templates: &[Template], revision: u64) -> bool {
        if templates.is_empty() || self.seeded_revision == Some(revision) {
            return false;
        }
        for template in templates {
            for field in &template.template_fields {
                self.set_field(&template.uuid, &field.field_type, field.default_value.clone());
            }
        }
        self.seeded_revision = Some(revision);
        true
    }

    /// Forgets the seeded revision and the edits, then seeds again.
    pub fn reset(&mut self, templates: &[Template], revision: u64) {
        self.data = empty_form();
        self.seeded_revision = None;
        self.seed(templates, revision);
    }

    pub fn set_field(&mut self, uuid: &str, field_type: &str, value: FieldValue) {
        let Ok(value) = serde_json::to_value(value) else {
            return;
        };
        let fields = ensure_object(&mut self.data)
            .map(|root| root.entry(DYNAMIC_FIELDS).or_insert_with(empty_object))
            .and_then(ensure_object)
            .map(|dynamic_fields| dynamic_fields.entry(uuid).or_insert_with(empty_object))
            .and_then(ensure_object)
            .map(|entry| entry.entry(FIELDS).or_insert_with(empty_object))
            .and_then(ensure_object);
        if let Some(fields) = fields {
            fields.insert(field_type.to_string(), value);
        }
    }

    /// Merges `patch` into the form (objects merge key by key, anything else
    /// replaces) and commits it only if the result passes validation.
    pub fn apply(&mut self, patch: Value) -> Result<(), ValidationError> {
        let mut candidate = self.data.clone();
        merge_json(&mut candidate, patch);
        validate_form(&candidate)?;
        self.data = candidate;
        Ok(())
    }

    pub fn value(&self, uuid: &str, field_type: &str) -> Option<FieldValue> {
        let value = self
            .data
            .get(DYNAMIC_FIELDS)?
            .get(uuid)?
            .get(FIELDS)?
            .get(field_type)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// The raw form document, as handed to submission.
    pub fn data(&self) -> &Value {
        &self.data
    }
}

fn merge_json(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, patch) => *target = patch,
    }
}

/// Writes the submitted values back into `templates`.
///
/// A template with an entry in the form takes, field by field, the submitted
/// value whenever its type is present in the entry (empty strings and zero
/// included) and keeps its current value otherwise. Templates without an
/// entry are returned unchanged.
pub fn merge_templates(templates: &[Template], form: &TemplatesForm) -> Vec<Template> {
    templates
        .iter()
        .map(|template| {
            let Some(entry) = form.dynamic_fields.get(&template.uuid) else {
                return template.clone();
            };
            let mut updated = template.clone();
            for field in &mut updated.template_fields {
                if let Some(value) = entry.fields.get(&field.field_type) {
                    field.default_value = value.clone();
                }
            }
            updated
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved,
    SaveFailed(FetchError),
    Invalid(ValidationError),
}

/// Validates `form_data`, merges it into `templates` and persists the result.
///
/// An invalid document is logged and handed to `on_invalid` once; nothing is
/// sent. Save success and failure each end in a notification.
pub async fn submit_templates<A, N>(
    api: &A,
    notifier: &N,
    templates: &[Template],
    form_data: &Value,
    on_invalid: impl FnOnce(&ValidationError),
) -> SubmitOutcome
where
    A: TemplatesApi + ?Sized,
    N: Notifier + ?Sized,
{
    let form = match validate_form(form_data) {
        Ok(form) => form,
        Err(e) => {
            error!("templates form rejected: {}", e);
            on_invalid(&e);
            return SubmitOutcome::Invalid(e);
        }
    };

    let request = SaveTemplatesRequest {
        templates: merge_templates(templates, &form),
    };
    match api.save_templates(&request).await {
        Ok(()) => {
            info!("saved {} templates", request.templates.len());
            notifier.notify(NotificationKind::Success, TEMPLATES_UPDATED);
            SubmitOutcome::Saved
        }
        Err(e) => {
            error!("failed to save templates: {}", e);
            notifier.notify(NotificationKind::Error, TEMPLATES_NOT_UPDATED);
            SubmitOutcome::SaveFailed(e)
        }
    }
}

/// Templates loaded by the dashboard. The revision is bumped whenever a load
/// returns a set that differs from the one held, so the form knows when to
/// seed again.
#[derive(Debug, Clone, Default)]
pub struct LoadedTemplates {
    pub templates: Vec<Template>,
    pub revision: u64,
    pub is_loading: bool,
    pub error: Option<FetchError>,
}

impl LoadedTemplates {
    pub fn start_loading(&mut self) {
        self.is_loading = true;
    }

    pub fn finish(&mut self, result: Result<Vec<Template>, FetchError>) {
        self.is_loading = false;
        match result {
            Ok(templates) => {
                if templates != self.templates {
                    self.templates = templates;
                    self.revision += 1;
                }
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn template(uuid: &str, fields: &[(&str, Value)]) -> Template {
        serde_json::from_value(json!({
            "uuid": uuid,
            "name": format!("Template {}", uuid),
            "templateFields": fields
                .iter()
                .map(|(t, v)| json!({ "type": t, "defaultValue": v }))
                .collect::<Vec<_>>(),
        }))
        .unwrap()
    }

    fn form(data: Value) -> TemplatesForm {
        validate_form(&data).unwrap()
    }

    #[test]
    fn submitted_value_replaces_the_default() {
        let templates = vec![template("a", &[("x", json!("1"))])];
        let merged = merge_templates(
            &templates,
            &form(json!({"dynamicFields": {"a": {"fields": {"x": "2"}}}})),
        );
        assert_eq!(merged[0].field("x").unwrap().default_value, "2".into());
        assert_eq!(merged[0].name, templates[0].name);
        assert_eq!(merged[0].uuid, "a");
    }

    #[test]
    fn omitted_field_keeps_its_default() {
        let templates = vec![template("a", &[("x", json!("1"))])];
        let merged = merge_templates(
            &templates,
            &form(json!({"dynamicFields": {"a": {"fields": {}}}})),
        );
        assert_eq!(merged, templates);
    }

    #[test]
    fn template_absent_from_form_is_unchanged() {
        let templates = vec![
            template("a", &[("x", json!("1"))]),
            template("b", &[("y", json!(["mon", "tue"])), ("z", json!(3))]),
        ];
        let merged = merge_templates(
            &templates,
            &form(json!({"dynamicFields": {"a": {"fields": {"x": "2"}}}})),
        );
        assert_eq!(merged[1], templates[1]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn falsy_submitted_values_still_win() {
        let templates = vec![template("a", &[("x", json!("1")), ("n", json!(5))])];
        let merged = merge_templates(
            &templates,
            &form(json!({"dynamicFields": {"a": {"fields": {"x": "", "n": 0}}}})),
        );
        assert_eq!(merged[0].field("x").unwrap().default_value, "".into());
        assert_eq!(
            merged[0].field("n").unwrap().default_value,
            FieldValue::Number(0.into())
        );
    }

    #[test]
    fn validation_reports_the_offending_path() {
        let err = validate_form(&json!({"dynamicFields": {"a": {"fields": {"x": {"nested": 1}}}}}))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidFieldValue {
                path: "dynamicFields.a.fields.x".into()
            }
        );

        let err = validate_form(&json!({"dynamicFields": {"a": {}}})).unwrap_err();
        assert_eq!(err.path(), "dynamicFields.a.fields");

        assert!(validate_form(&json!({})).is_err());
        assert!(validate_form(&json!({"dynamicFields": {"a": {"fields": {"x": [1]}}}})).is_err());
        assert!(validate_form(&json!({"dynamicFields": {"a": {"fields": {"x": null}}}})).is_err());
    }

    #[test]
    fn seeding_runs_once_per_revision() {
        let templates = vec![template("a", &[("x", json!("1"))])];
        let mut session = FormSession::new();

        assert!(!session.seed(&[], 0));
        assert!(session.seed(&templates, 1));
        session.set_field("a", "x", "edited".into());

        assert!(!session.seed(&templates, 1));
        assert_eq!(session.value("a", "x"), Some("edited".into()));

        assert!(session.seed(&templates, 2));
        assert_eq!(session.value("a", "x"), Some("1".into()));
    }

    #[test]
    fn reset_discards_edits() {
        let templates = vec![template("a", &[("x", json!("1"))])];
        let mut session = FormSession::new();
        session.seed(&templates, 1);
        session.set_field("a", "x", "edited".into());

        session.reset(&templates, 1);
        assert_eq!(session.value("a", "x"), Some("1".into()));
    }

    #[test]
    fn apply_commits_only_valid_patches() {
        let templates = vec![template("a", &[("x", json!("1")), ("y", json!(2))])];
        let mut session = FormSession::new();
        session.seed(&templates, 1);

        session
            .apply(json!({"dynamicFields": {"a": {"fields": {"x": "3"}}}}))
            .unwrap();
        assert_eq!(session.value("a", "x"), Some("3".into()));
        assert_eq!(session.value("a", "y"), Some(FieldValue::Number(2.into())));

        let before = session.data().clone();
        assert!(session
            .apply(json!({"dynamicFields": {"a": {"fields": {"y": true}}}}))
            .is_err());
        assert_eq!(session.data(), &before);
    }

    #[test]
    fn loaded_templates_bump_the_revision_on_success_only() {
        let mut loaded = LoadedTemplates::default();
        loaded.start_loading();
        assert!(loaded.is_loading);

        loaded.finish(Ok(vec![template("a", &[])]));
        assert_eq!(loaded.revision, 1);
        assert!(!loaded.is_loading);

        loaded.finish(Err(FetchError::Network("offline".into())));
        assert_eq!(loaded.revision, 1);
        assert_eq!(loaded.templates.len(), 1);
        assert!(loaded.error.is_some());
    }

    #[test]
    fn reloading_identical_templates_keeps_edits() {
        let templates = vec![template("a", &[("x", json!("1"))])];
        let mut loaded = LoadedTemplates::default();
        let mut session = FormSession::new();

        loaded.finish(Ok(templates.clone()));
        assert!(session.seed(&loaded.templates, loaded.revision));
        session.set_field("a", "x", "edited".into());

        loaded.finish(Ok(templates.clone()));
        assert_eq!(loaded.revision, 1);
        assert!(!session.seed(&loaded.templates, loaded.revision));
        assert_eq!(session.value("a", "x"), Some("edited".into()));

        loaded.finish(Ok(vec![template("a", &[("x", json!("2"))])]));
        assert_eq!(loaded.revision, 2);
        assert!(session.seed(&loaded.templates, loaded.revision));
        assert_eq!(session.value("a", "x"), Some("2".into()));
    }
}
