use common::model::template::{FieldValue, Template};
use common::templates::{FormSession, LoadedTemplates};

pub struct MessagesDashboard {
    /// Templates as last acknowledged by the server.
    pub loaded: LoadedTemplates,

    /// Values being edited, keyed by template uuid and field type.
    pub form: FormSession,

    /// Index of the selected template tab.
    pub active_tab: usize,

    /// A save is in flight; the Save button is disabled meanwhile.
    pub saving: bool,

    /// Guard for the first-render fetch.
    pub mounted: bool,
}

impl MessagesDashboard {
    pub fn new() -> Self {
        Self {
            loaded: LoadedTemplates::default(),
            form: FormSession::new(),
            active_tab: 0,
            saving: false,
            mounted: false,
        }
    }

    pub fn active_template(&self) -> Option<&Template> {
        self.loaded.templates.get(self.active_tab)
    }

    /// Form value for a field, or the template default when the form has
    /// none yet.
    pub fn field_value(&self, template: &Template, field_type: &str) -> Option<FieldValue> {
        self.form.value(&template.uuid, field_type).or_else(|| {
            template
                .field(field_type)
                .map(|field| field.default_value.clone())
        })
    }
}
