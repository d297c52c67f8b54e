//! Generic editor for flat (non-project) section records.

use super::{is_absolute_url, EditTarget, EditorError};
use crate::schema::{FieldKind, FieldSpec, FormRecord, FormValue};

/// Form state for one expertise item, credential, testimonial or blog post.
///
/// Values are kept in registry order, one per field binding.
#[derive(Debug, Clone)]
pub struct RecordEditor<R: FormRecord> {
    target: EditTarget<R>,
    values: Vec<FormValue>,
}

impl<R: FormRecord> RecordEditor<R> {
    /// Opens an editor; existing records pre-populate every field.
    pub fn new(target: EditTarget<R>) -> Self {
        let values = R::bindings()
            .iter()
            .map(|binding| match &target {
                EditTarget::New => FormValue::text(""),
                EditTarget::Existing(record) => (binding.read)(record),
            })
            .collect();
        Self { target, values }
    }

    pub fn is_new(&self) -> bool {
        self.target.is_new()
    }

    /// Dialog heading, e.g. `Add Blog Post` or `Edit Credential`.
    pub fn heading(&self) -> String {
        let verb = if self.is_new() { "Add" } else { "Edit" };
        format!("{verb} {}", R::SECTION.singular())
    }

    /// Field descriptors paired with their current values.
    pub fn fields(&self) -> impl Iterator<Item = (&FieldSpec, &FormValue)> {
        R::bindings()
            .iter()
            .map(|binding| &binding.spec)
            .zip(self.values.iter())
    }

    pub fn value(&self, name: &str) -> Option<&FormValue> {
        self.position(name).map(|index| &self.values[index])
    }

    /// Applies raw input to one field.
    ///
    /// Number fields are coerced; blank number input stays blank so the
    /// required check still sees it.
    pub fn set_field(&mut self, name: &str, raw: &str) -> Result<(), EditorError> {
        let index = self
            .position(name)
            .ok_or_else(|| EditorError::UnknownField(name.to_string()))?;
        let spec = R::bindings()[index].spec;

        let value = match spec.kind {
            FieldKind::Number if raw.trim().is_empty() => FormValue::text(""),
            FieldKind::Number => {
                let number = raw
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|number| number.is_finite())
                    .ok_or_else(|| EditorError::InvalidNumber {
                        field: spec.name,
                        input: raw.to_string(),
                    })?;
                FormValue::Number(number)
            }
            FieldKind::Text | FieldKind::TextArea | FieldKind::Url => FormValue::text(raw),
        };

        self.values[index] = value;
        Ok(())
    }

    /// Checks required and URL fields without producing a record.
    pub fn validate(&self) -> Result<(), EditorError> {
        for (spec, value) in self.fields() {
            if spec.required && value.is_blank() {
                return Err(EditorError::MissingRequired(spec.label));
            }
            if let (FieldKind::Url, FormValue::Text(text)) = (spec.kind, value) {
                if !text.is_empty() && !is_absolute_url(text) {
                    return Err(EditorError::InvalidUrl {
                        field: spec.name,
                        input: text.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Builds the finished record and hands it to `on_save`.
    ///
    /// Editing merges form values over the original record; anything the
    /// field list does not cover is carried over untouched.
    pub fn submit<T>(&self, on_save: impl FnOnce(R) -> T) -> Result<T, EditorError> {
        self.validate()?;

        let mut record = match &self.target {
            EditTarget::New => R::default(),
            EditTarget::Existing(original) => original.clone(),
        };
        for (binding, value) in R::bindings().iter().zip(self.values.iter()) {
            (binding.write)(&mut record, value.clone());
        }

        Ok(on_save(record))
    }

    /// Discards all edits.
    pub fn cancel(self, on_cancel: impl FnOnce()) {
        on_cancel();
    }

    fn position(&self, name: &str) -> Option<usize> {
        R::bindings()
            .iter()
            .position(|binding| binding.spec.name == name)
    }
}
