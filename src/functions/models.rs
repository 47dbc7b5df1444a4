use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt")]
    pub updated_at: DateTime<Utc>,
    /// Roles allowed to execute the function.
    #[serde(default)]
    pub execute: Vec<String>,
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub live: bool,
    #[serde(default)]
    pub logging: bool,
    pub runtime: String,
    /// Id of the active deployment, empty when none is active.
    #[serde(default)]
    pub deployment: String,
    #[serde(default)]
    pub events: Vec<String>,
    /// Cron expression, empty when unscheduled.
    #[serde(default)]
    pub schedule: String,
    /// Seconds.
    #[serde(default)]
    pub timeout: u32,
    #[serde(default)]
    pub entrypoint: String,
    #[serde(default)]
    pub commands: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub resource_id: String,
    #[serde(default)]
    pub resource_type: String,
    #[serde(default)]
    pub entrypoint: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub build_id: String,
    #[serde(default)]
    pub activate: bool,
    /// `waiting`, `processing`, `building`, `ready` or `failed`.
    pub status: String,
    #[serde(default)]
    pub build_logs: String,
    #[serde(default)]
    pub build_time: u64,
}

/// A request or response header as reported on an [`Execution`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "$permissions", default)]
    pub permissions: Vec<String>,
    pub function_id: String,
    /// `http`, `schedule` or `event`.
    #[serde(default)]
    pub trigger: String,
    /// `waiting`, `processing`, `completed` or `failed`.
    pub status: String,
    #[serde(default)]
    pub request_method: String,
    #[serde(default)]
    pub request_path: String,
    #[serde(default)]
    pub request_headers: Vec<Header>,
    #[serde(default)]
    pub response_status_code: u16,
    #[serde(default)]
    pub response_body: String,
    #[serde(default)]
    pub response_headers: Vec<Header>,
    #[serde(default)]
    pub logs: String,
    #[serde(default)]
    pub errors: String,
    /// Seconds.
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionList {
    pub total: u64,
    pub functions: Vec<Function>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentList {
    pub total: u64,
    pub deployments: Vec<Deployment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionList {
    pub total: u64,
    pub executions: Vec<Execution>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFunction {
    pub function_id: String,
    pub name: String,
    /// Runtime id such as `node-18.0` or `python-3.9`.
    pub runtime: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execute: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands: Option<String>,
}

impl CreateFunction {
    pub fn new(
        function_id: impl Into<String>,
        name: impl Into<String>,
        runtime: impl Into<String>,
    ) -> Self {
        Self {
            function_id: function_id.into(),
            name: name.into(),
            runtime: runtime.into(),
            ..Default::default()
        }
    }
}

/// Replacement settings for an existing function. The API treats this as a
/// full update, so omitted options fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFunction {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execute: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExecution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Queue the execution and return immediately instead of waiting for it.
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub is_async: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}
