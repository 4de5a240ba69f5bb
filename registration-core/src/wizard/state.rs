use crate::util::errors::RegistrationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const AADHAAR_FIELD: &str = "aadhaarNumber";
pub const NAME_AS_PER_AADHAAR_FIELD: &str = "nameAsPerAadhaar";
pub const PAN_FIELD: &str = "panNumber";

pub const CITY_KEY: &str = "city";
pub const STATE_KEY: &str = "state";

pub const POSTAL_CODE_LEN: usize = 6;
pub const MISSING_LABEL: &str = "No Label";
pub const SUBMISSION_SUCCESS_MESSAGE: &str = "Form submitted successfully!";

/// Backend-supplied metadata for one renderable input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            placeholder: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn display_label(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => MISSING_LABEL,
        }
    }

    pub fn placeholder_text(&self) -> &str {
        self.placeholder.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WizardStep {
    #[default]
    One,
    Two,
}

impl WizardStep {
    pub fn index(self) -> u8 {
        match self {
            WizardStep::One => 1,
            WizardStep::Two => 2,
        }
    }
}

/// City and state derived from the postal code. Never edited directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PostalResolution {
    pub city: String,
    pub state: String,
}

impl PostalResolution {
    pub fn new(city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            state: state.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.city.is_empty() && self.state.is_empty()
    }
}

/// Values typed by the user, keyed by field name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FormState {
    values: BTreeMap<String, String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Form values plus `city`/`state`; the derived pair wins on key clashes.
    pub fn merged_with(&self, resolution: &PostalResolution) -> SubmissionRecord {
        let mut values = self.values.clone();
        values.insert(CITY_KEY.to_string(), resolution.city.clone());
        values.insert(STATE_KEY.to_string(), resolution.state.clone());
        SubmissionRecord(values)
    }
}

/// The flat JSON object posted to the submission endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct SubmissionRecord(BTreeMap<String, String>);

impl SubmissionRecord {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(error: &RegistrationError) -> Self {
        Self {
            kind: StatusKind::Error,
            text: error.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

/// Everything the wizard shows, in one value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct WizardState {
    pub step: WizardStep,
    pub fields: Vec<FieldDescriptor>,
    pub form: FormState,
    pub postal_code: String,
    pub resolution: PostalResolution,
    /// Last write wins; `None` renders no status line.
    pub status: Option<StatusMessage>,

    // In-flight markers for spinners
    pub fields_loading: bool,
    pub lookup_pending: bool,
    pub submitting: bool,

    /// Sequence number of the most recently issued postal lookup.
    pub lookup_seq: u64,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_error(&self) -> bool {
        self.status.as_ref().map(StatusMessage::is_error).unwrap_or(false)
    }

    pub fn status_text(&self) -> &str {
        self.status.as_ref().map(|s| s.text.as_str()).unwrap_or_default()
    }

    pub fn field_value(&self, name: &str) -> &str {
        self.form.get(name).unwrap_or_default()
    }

    pub fn submission_record(&self) -> SubmissionRecord {
        self.form.merged_with(&self.resolution)
    }
}
