//! Emergency SMS fan-out.
//!
//! [`SmsSender`] is the seam to the messaging provider; [`TwilioSender`]
//! implements it against Twilio's REST API. [`broadcast_emergency`] sends
//! one message body to every contact in order, never short-circuits on a
//! failed send, and aggregates per-recipient outcomes.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmsError {
    #[error("sms request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("sms provider rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Opaque sender with a success/failure result per message.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send `body` to `to` (canonical dial format). Returns the provider's
    /// message id.
    async fn send(&self, to: &str, body: &str) -> Result<String, SmsError>;
}

pub struct TwilioSender {
    http: reqwest::Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

pub const TWILIO_BASE_URL: &str = "https://api.twilio.com";

impl TwilioSender {
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        account_sid: String,
        auth_token: String,
        from_number: String,
    ) -> Self {
        Self {
            http,
            base_url,
            account_sid,
            auth_token,
            from_number,
        }
    }
}

#[async_trait]
impl SmsSender for TwilioSender {
    async fn send(&self, to: &str, body: &str) -> Result<String, SmsError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        );
        let response = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", &self.from_number), ("Body", body)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SmsError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let created: serde_json::Value = response.json().await?;
        let sid = created
            .get("sid")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string();
        tracing::info!(%to, %sid, "SMS accepted by provider");
        Ok(sid)
    }
}

/// Strip every non-digit character and prefix `+`. An empty input yields
/// the bare `"+"`.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    format!("+{digits}")
}

/// One failed recipient in a broadcast.
#[derive(Debug, Clone, Serialize)]
pub struct SendFailure {
    pub phone: String,
    pub error: String,
}

/// Aggregate outcome of an emergency broadcast.
#[derive(Debug)]
pub struct BroadcastReport {
    /// Recipients attempted (every entry in the request, in order).
    pub total: usize,
    pub failures: Vec<SendFailure>,
}

fn message_body(location: Option<&str>) -> String {
    match location {
        Some(loc) if !loc.is_empty() => {
            format!("A human is in danger. Location: {loc}, Please help me.")
        }
        _ => "A human is in danger. Please help me.".to_string(),
    }
}

/// Send the emergency message to every phone number, sequentially and in
/// list order. A failed send is recorded and the fan-out continues.
pub async fn broadcast_emergency(
    sender: &dyn SmsSender,
    phones: &[String],
    location: Option<&str>,
) -> BroadcastReport {
    let body = message_body(location);
    let mut failures = Vec::new();

    for phone in phones {
        let to = normalize_phone(phone);
        if let Err(e) = sender.send(&to, &body).await {
            tracing::warn!(%to, error = %e, "emergency SMS failed");
            failures.push(SendFailure {
                phone: to,
                error: e.to_string(),
            });
        }
    }

    BroadcastReport {
        total: phones.len(),
        failures,
    }
}
