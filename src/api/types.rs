//! Shared types for the API layer.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::directory::UserPager;
use crate::reconcile::Reconciler;
use crate::sms::SmsSender;

/// Shared context for all routes: the process-wide store, SMS, and
/// identity clients, constructed once at startup and injected so tests
/// can substitute fakes.
#[derive(Clone)]
pub struct ApiContext {
    pub reconciler: Arc<Reconciler>,
    pub sms: Arc<dyn SmsSender>,
    pub directory: Arc<dyn UserPager>,
}

impl ApiContext {
    pub fn new(
        reconciler: Arc<Reconciler>,
        sms: Arc<dyn SmsSender>,
        directory: Arc<dyn UserPager>,
    ) -> Self {
        Self {
            reconciler,
            sms,
            directory,
        }
    }
}

/// Uniform response wrapper: `{code, message?, data?, document_id?}`.
/// `code: 0` means success/expected; `code: 1` marks the "not found, so it
/// was added" upsert branch and partial failures.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub code: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
}

impl Envelope {
    pub fn message(code: u8, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
            data: None,
            document_id: None,
        }
    }

    pub fn data(data: Value) -> Self {
        Self {
            code: 0,
            message: None,
            data: Some(data),
            document_id: None,
        }
    }

    /// Successful unconditional insert: `{code: 0, document_id}`.
    pub fn created(document_id: impl Into<String>) -> Self {
        Self {
            code: 0,
            message: None,
            data: None,
            document_id: Some(document_id.into()),
        }
    }

    pub fn with_document_id(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }
}
