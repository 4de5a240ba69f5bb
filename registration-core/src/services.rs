//! The three outbound collaborators and their HTTP implementations.

use crate::config::RegistrationConfig;
use crate::http_client::HttpClient;
use crate::util::errors::RegistrationError;
use crate::wizard::state::{FieldDescriptor, PostalResolution, SubmissionRecord};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const FORM_FIELDS_PATH: &[&str] = &["api", "form-fields"];
pub const SUBMIT_PATH: &[&str] = &["api", "submit"];
pub const PINCODE_SEGMENT: &str = "pincode";
pub const PINCODE_SUCCESS_STATUS: &str = "Success";

#[async_trait]
pub trait FormFieldService: Send + Sync {
    async fn fetch_fields(&self) -> Result<Vec<FieldDescriptor>, RegistrationError>;
}

#[async_trait]
pub trait PostalLookupService: Send + Sync {
    async fn lookup(&self, code: &str) -> Result<PostalResolution, RegistrationError>;
}

#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Returns the acknowledgment body; it is logged, never interpreted.
    async fn submit(
        &self,
        record: &SubmissionRecord,
    ) -> Result<serde_json::Value, RegistrationError>;
}

/// Handles to the three collaborators, cheap to clone into spawned tasks.
#[derive(Clone)]
pub struct Services {
    pub fields: Arc<dyn FormFieldService>,
    pub postal: Arc<dyn PostalLookupService>,
    pub submission: Arc<dyn SubmissionService>,
}

impl Services {
    pub fn new(
        fields: Arc<dyn FormFieldService>,
        postal: Arc<dyn PostalLookupService>,
        submission: Arc<dyn SubmissionService>,
    ) -> Self {
        Self {
            fields,
            postal,
            submission,
        }
    }

    pub fn from_config(config: &RegistrationConfig) -> Self {
        let backend = Arc::new(BackendClient::new(&config.backend_url, config));
        let postal = Arc::new(PostalClient::new(&config.postal_lookup_url, config));
        Self {
            fields: backend.clone(),
            postal,
            submission: backend,
        }
    }
}

/// Form-field and submission endpoints of the registration backend.
#[derive(Clone)]
pub struct BackendClient {
    http: HttpClient,
}

impl BackendClient {
    pub fn new(base_url: &str, config: &RegistrationConfig) -> Self {
        Self {
            http: HttpClient::new(base_url, config.timeout()),
        }
    }
}

#[async_trait]
impl FormFieldService for BackendClient {
    async fn fetch_fields(&self) -> Result<Vec<FieldDescriptor>, RegistrationError> {
        self.http
            .get_request::<Vec<FieldDescriptor>>(FORM_FIELDS_PATH)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch form fields: {:#}", e);
                RegistrationError::FieldFetch
            })
    }
}

#[async_trait]
impl SubmissionService for BackendClient {
    async fn submit(
        &self,
        record: &SubmissionRecord,
    ) -> Result<serde_json::Value, RegistrationError> {
        let body = self.http.post_request(SUBMIT_PATH, record).await.map_err(|e| {
            tracing::error!("Failed to submit registration: {:#}", e);
            RegistrationError::Submission
        })?;

        // Non-JSON acknowledgments are kept verbatim
        let ack = serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body));
        tracing::info!("Registration acknowledged: {}", ack);
        Ok(ack)
    }
}

/// One element of the PIN code lookup response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PincodeRecord {
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Message", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "PostOffice", default)]
    pub post_office: Option<Vec<PostOffice>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostOffice {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "District")]
    pub district: String,
    #[serde(rename = "State")]
    pub state: String,
}

/// Interprets a decoded lookup response.
///
/// A non-success status means the code is unknown. An empty response, or a
/// success without post offices, counts as a failed fetch.
pub fn resolve_pincode_records(
    records: &[PincodeRecord],
) -> Result<PostalResolution, RegistrationError> {
    let first = records.first().ok_or(RegistrationError::PostalFetch)?;

    if first.status != PINCODE_SUCCESS_STATUS {
        tracing::warn!(
            "PIN code lookup returned status '{}': {}",
            first.status,
            first.message.as_deref().unwrap_or("no message")
        );
        return Err(RegistrationError::PostalInvalid);
    }

    let office = first
        .post_office
        .as_ref()
        .and_then(|offices| offices.first())
        .ok_or(RegistrationError::PostalFetch)?;

    Ok(PostalResolution::new(office.district.clone(), office.state.clone()))
}

/// Third-party PIN code directory (`GET {base}/pincode/{code}`).
#[derive(Clone)]
pub struct PostalClient {
    http: HttpClient,
}

impl PostalClient {
    pub fn new(base_url: &str, config: &RegistrationConfig) -> Self {
        Self {
            http: HttpClient::new(base_url, config.timeout()),
        }
    }
}

#[async_trait]
impl PostalLookupService for PostalClient {
    async fn lookup(&self, code: &str) -> Result<PostalResolution, RegistrationError> {
        let records = self
            .http
            .get_request::<Vec<PincodeRecord>>(&[PINCODE_SEGMENT, code])
            .await
            .map_err(|e| {
                tracing::warn!("PIN code lookup for '{}' failed: {:#}", code, e);
                RegistrationError::PostalFetch
            })?;

        resolve_pincode_records(&records)
    }
}
