//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::bulk_create::{CandidateOutcome, Outcome};
use crate::domain::entity::candidate::CandidateContact;

// ============================================================================
// Bulk Create
// ============================================================================

/// One directory contact offered for provisioning
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateContactDto {
    pub contact_id: i64,
    pub display_name: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<CandidateContactDto> for CandidateContact {
    fn from(dto: CandidateContactDto) -> Self {
        CandidateContact {
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            ..CandidateContact::new(dto.contact_id, dto.display_name)
        }
    }
}

/// Bulk create request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreateRequest {
    pub contacts: Vec<CandidateContactDto>,
}

/// Per-contact result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeDto {
    pub contact_id: i64,
    pub display_name: String,
    /// "created" or "skipped"
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<CandidateOutcome> for OutcomeDto {
    fn from(o: CandidateOutcome) -> Self {
        let (status, login, reason) = match o.outcome {
            Outcome::Created { login, .. } => ("created", Some(login.into_inner()), None),
            Outcome::Skipped(reason) => ("skipped", None, Some(reason.code().to_string())),
        };

        Self {
            contact_id: o.contact_id.value(),
            display_name: o.display_name,
            status,
            login,
            reason,
        }
    }
}

/// Bulk create response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreateResponse {
    /// Display names of contacts that got an account
    pub succeeded: Vec<String>,
    /// Display names of contacts that did not
    pub failed: Vec<String>,
    pub outcomes: Vec<OutcomeDto>,
}

// ============================================================================
// Username Preview
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewUsernameRequest {
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewUsernameResponse {
    pub username: String,
}

// ============================================================================
// Contact Sync
// ============================================================================

/// Reverse sync result for one account
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSyncResponse {
    pub outcome: &'static str,
    pub contact_id: Option<i64>,
}
