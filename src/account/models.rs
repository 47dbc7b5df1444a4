use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::core::Preferences;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email_verification: bool,
    #[serde(default)]
    pub phone_verification: bool,
    pub status: bool,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub prefs: Preferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    pub user_id: String,
    pub expire: String,
    pub provider: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub current: bool,
    /// Only populated when the session is created with a server key.
    #[serde(default)]
    pub secret: String,
}

/// Short-lived secret issued by recovery and verification flows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    pub user_id: String,
    #[serde(default)]
    pub secret: String,
    pub expire: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateAccountRequest<'a> {
    pub(crate) user_id: &'a str,
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EmailSessionRequest<'a> {
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdatePrefsRequest<'a> {
    pub(crate) prefs: &'a Preferences,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateRecoveryRequest<'a> {
    pub(crate) email: &'a str,
    pub(crate) url: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateRecoveryRequest<'a> {
    pub(crate) user_id: &'a str,
    pub(crate) secret: &'a str,
    pub(crate) password: &'a str,
}
