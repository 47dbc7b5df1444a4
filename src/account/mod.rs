//! Account module.
//!
//! Operations on the account the API key acts for: registration, email
//! sessions, preferences and password recovery.
//!
//! # Examples
//!
//! ```rust,no_run
//! # use appwrite_sdk::Client;
//! # async fn run(client: Client) -> appwrite_sdk::core::Result<()> {
//! let account = client.account()?;
//! let user = account.get().await?;
//! println!("signed in as {}", user.email);
//! # Ok(())
//! # }
//! ```

pub mod models;


use crate::core::call::{Call, Endpoint};
use crate::core::transport::Transport;
use crate::Service;
use models::{
    CreateAccountRequest, CreateRecoveryRequest, EmailSessionRequest, Preferences, Session,
    Token, UpdatePrefsRequest, UpdateRecoveryRequest, User,
};

/// Session id that refers to the session making the request.
pub const CURRENT_SESSION: &str = "current";

#[derive(Clone)]
pub struct Account {
    transport: Transport,
}

impl Service for Account {
    fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }
}

impl Account {
    /// Registers a new account. Pass `"unique()"` as `user_id` to let the
    /// server pick one.
    pub fn create(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Call<User> {
        let body = CreateAccountRequest {
            user_id,
            email,
            password,
            name,
        };
        self.transport.json(Endpoint::post("account").json(&body))
    }

    pub fn create_email_session(&self, email: &str, password: &str) -> Call<Session> {
        let body = EmailSessionRequest { email, password };
        self.transport
            .json(Endpoint::post("account/sessions/email").json(&body))
    }

    pub fn get(&self) -> Call<User> {
        self.transport.json(Endpoint::get("account"))
    }

    pub fn get_prefs(&self) -> Call<Preferences> {
        self.transport.json(Endpoint::get("account/prefs"))
    }

    /// Replaces the account preferences wholesale.
    pub fn update_prefs(&self, prefs: &Preferences) -> Call<User> {
        let body = UpdatePrefsRequest { prefs };
        self.transport
            .json(Endpoint::patch("account/prefs").json(&body))
    }

    /// Sends a recovery email whose link points at `url` with the user id and
    /// secret appended.
    pub fn create_recovery(&self, email: &str, url: &str) -> Call<Token> {
        let body = CreateRecoveryRequest { email, url };
        self.transport
            .json(Endpoint::post("account/recovery").json(&body))
    }

    pub fn update_recovery(&self, user_id: &str, secret: &str, password: &str) -> Call<Token> {
        let body = UpdateRecoveryRequest {
            user_id,
            secret,
            password,
        };
        self.transport
            .json(Endpoint::put("account/recovery").json(&body))
    }

    /// Deletes one session; use [`CURRENT_SESSION`] for the active one.
    pub fn delete_session(&self, session_id: &str) -> Call<()> {
        self.transport.empty(
            Endpoint::delete("account/sessions/{sessionId}").path_param("sessionId", session_id),
        )
    }

    pub fn delete_sessions(&self) -> Call<()> {
        self.transport.empty(Endpoint::delete("account/sessions"))
    }
}
