use std::fmt;

use reqwest::Method;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::framework::{HttpTransport, SyncError};
use crate::navigation::Route;

pub const LOGIN_PATH: &str = "/api/login";
pub const SIGNUP_PATH: &str = "/api/signup";

/// Username and password posted to the login and signup endpoints.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Client for the login and signup endpoints.
///
/// Nothing from a successful login is kept; later requests carry no token.
#[derive(Clone, Debug)]
pub struct AuthClient {
    transport: HttpTransport,
}

impl AuthClient {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// Posts the credentials to the login endpoint. The reply must be JSON.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<(), SyncError> {
        let url = self.transport.url(LOGIN_PATH)?;
        self.transport
            .send_json::<_, serde_json::Value>(Method::POST, url, Some(credentials))
            .await?;
        info!("Login successful");
        Ok(())
    }

    /// Posts the credentials to the signup endpoint. Any 2xx reply is a success.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn signup(&self, credentials: &Credentials) -> Result<(), SyncError> {
        let url = self.transport.url(SIGNUP_PATH)?;
        self.transport.send(Method::POST, url, Some(credentials)).await?;
        info!("Signup successful");
        Ok(())
    }
}

/// Which of the two forms is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

/// State of the combined login/signup form.
#[derive(Clone, Default)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub username: String,
    pub password: String,
    pub error: Option<String>,
}

impl AuthForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
    }

    /// Submits the form and returns the page to go to next.
    ///
    /// On failure the form stays where it is and `error` holds `Error: <reason>`.
    pub async fn submit(&mut self, client: &AuthClient) -> Result<Route, SyncError> {
        let credentials = Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        };
        let (result, next) = match self.mode {
            AuthMode::Login => (client.login(&credentials).await, Route::Dashboard),
            AuthMode::Signup => (client.signup(&credentials).await, Route::Login),
        };

        match result {
            Ok(()) => {
                self.error = None;
                Ok(next)
            }
            Err(e) => {
                warn!(mode = ?self.mode, error = %e, "Authentication failed");
                self.error = Some(format!("Error: {}", failure_reason(&e)));
                Err(e)
            }
        }
    }
}

fn failure_reason(error: &SyncError) -> String {
    match error {
        SyncError::Rejected { .. } => "Network response was not ok".to_string(),
        SyncError::Network(reason) => reason.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_switches_between_forms() {
        let mut form = AuthForm::new();
        assert_eq!(form.mode, AuthMode::Login);
        form.toggle_mode();
        assert_eq!(form.mode, AuthMode::Signup);
        form.toggle_mode();
        assert_eq!(form.mode, AuthMode::Login);
    }

    #[test]
    fn rejected_status_reads_like_a_failed_fetch() {
        assert_eq!(
            failure_reason(&SyncError::Rejected { status: 401 }),
            "Network response was not ok"
        );
        assert_eq!(failure_reason(&SyncError::Network("refused".into())), "refused");
    }

    #[test]
    fn credentials_debug_hides_password() {
        let credentials = Credentials {
            username: "alice".into(),
            password: "hunter2".into(),
        };
        assert!(!format!("{:?}", credentials).contains("hunter2"));
    }
}
