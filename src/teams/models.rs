use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::core::Preferences;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub name: String,
    /// Number of members.
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub prefs: Preferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_email: String,
    pub team_id: String,
    #[serde(default)]
    pub team_name: String,
    /// Invitation timestamp as sent by the server.
    #[serde(default)]
    pub invited: String,
    /// Empty until the invitation is accepted.
    #[serde(default)]
    pub joined: String,
    #[serde(default)]
    pub confirm: bool,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamList {
    pub total: u64,
    pub teams: Vec<Team>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipList {
    pub total: u64,
    pub memberships: Vec<Membership>,
}

/// Invitation for a new member. Exactly one of `email`, `user_id` or
/// `phone` identifies the invitee; `url` is where the invitation link
/// redirects.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMembership {
    pub roles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateTeamRequest<'a> {
    pub(crate) team_id: &'a str,
    pub(crate) name: &'a str,
    pub(crate) roles: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateTeamRequest<'a> {
    pub(crate) name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateRolesRequest<'a> {
    pub(crate) roles: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdatePrefsRequest<'a> {
    pub(crate) prefs: &'a Preferences,
}
