//! Functions module.
//!
//! Serverless functions, their code deployments and executions.
//!
//! # Examples
//!
//! ```rust,no_run
//! # use appwrite_sdk::Client;
//! # use appwrite_sdk::functions::models::CreateExecution;
//! # async fn run(client: Client) -> appwrite_sdk::core::Result<()> {
//! let functions = client.functions()?;
//! let execution = functions
//!     .create_execution(
//!         "resize",
//!         &CreateExecution {
//!             body: Some(r#"{"width":128}"#.into()),
//!             ..Default::default()
//!         },
//!     )
//!     .await?;
//! println!("{} -> {}", execution.status, execution.response_body);
//! # Ok(())
//! # }
//! ```

pub mod models;


use crate::core::call::{Call, Endpoint, InputFile};
use crate::core::transport::Transport;
use crate::Service;
use models::{
    CreateExecution, CreateFunction, Deployment, DeploymentList, Execution, ExecutionList,
    Function, FunctionList, UpdateFunction,
};

const FUNCTION: &str = "functions/{functionId}";
const DEPLOYMENTS: &str = "functions/{functionId}/deployments";
const DEPLOYMENT: &str = "functions/{functionId}/deployments/{deploymentId}";
const EXECUTIONS: &str = "functions/{functionId}/executions";
const EXECUTION: &str = "functions/{functionId}/executions/{executionId}";

#[derive(Clone)]
pub struct Functions {
    transport: Transport,
}

impl Service for Functions {
    fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }
}

impl Functions {
    pub fn create_function(&self, function: &CreateFunction) -> Call<Function> {
        self.transport
            .json(Endpoint::post("functions").json(function))
    }

    pub fn list_functions(&self) -> Call<FunctionList> {
        self.transport.json(Endpoint::get("functions"))
    }

    pub fn get_function(&self, function_id: &str) -> Call<Function> {
        self.transport
            .json(Endpoint::get(FUNCTION).path_param("functionId", function_id))
    }

    pub fn update_function(&self, function_id: &str, function: &UpdateFunction) -> Call<Function> {
        self.transport.json(
            Endpoint::put(FUNCTION)
                .path_param("functionId", function_id)
                .json(function),
        )
    }

    pub fn delete_function(&self, function_id: &str) -> Call<()> {
        self.transport
            .empty(Endpoint::delete(FUNCTION).path_param("functionId", function_id))
    }

    /// Uploads a code archive (usually a `.tar.gz`) as a new deployment.
    /// With `activate` set the deployment goes live once its build succeeds.
    pub fn create_deployment(
        &self,
        function_id: &str,
        code: InputFile,
        activate: bool,
        entrypoint: Option<&str>,
        commands: Option<&str>,
    ) -> Call<Deployment> {
        let mut endpoint = Endpoint::post(DEPLOYMENTS)
            .path_param("functionId", function_id)
            .file_part("code", code)
            .text_part("activate", activate);
        if let Some(entrypoint) = entrypoint {
            endpoint = endpoint.text_part("entrypoint", entrypoint);
        }
        if let Some(commands) = commands {
            endpoint = endpoint.text_part("commands", commands);
        }
        self.transport.json(endpoint)
    }

    pub fn list_deployments(&self, function_id: &str) -> Call<DeploymentList> {
        self.transport
            .json(Endpoint::get(DEPLOYMENTS).path_param("functionId", function_id))
    }

    pub fn get_deployment(&self, function_id: &str, deployment_id: &str) -> Call<Deployment> {
        self.transport.json(
            Endpoint::get(DEPLOYMENT)
                .path_param("functionId", function_id)
                .path_param("deploymentId", deployment_id),
        )
    }

    pub fn delete_deployment(&self, function_id: &str, deployment_id: &str) -> Call<()> {
        self.transport.empty(
            Endpoint::delete(DEPLOYMENT)
                .path_param("functionId", function_id)
                .path_param("deploymentId", deployment_id),
        )
    }

    /// Triggers the function. Unless `is_async` is set the call returns once
    /// the execution has finished.
    pub fn create_execution(&self, function_id: &str, execution: &CreateExecution) -> Call<Execution> {
        self.transport.json(
            Endpoint::post(EXECUTIONS)
                .path_param("functionId", function_id)
                .json(execution),
        )
    }

    pub fn list_executions(&self, function_id: &str) -> Call<ExecutionList> {
        self.transport
            .json(Endpoint::get(EXECUTIONS).path_param("functionId", function_id))
    }

    pub fn get_execution(&self, function_id: &str, execution_id: &str) -> Call<Execution> {
        self.transport.json(
            Endpoint::get(EXECUTION)
                .path_param("functionId", function_id)
                .path_param("executionId", execution_id),
        )
    }
}
