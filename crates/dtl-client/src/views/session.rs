//! Login, registration and logout.

use dtl_model::{ActionResponse, LoginCredentials, LoginResponse, RegisterUser, UserId};
use tracing::debug;

use crate::{
    client::ApiClient,
    error::{ClientError, ClientResult},
    storage::{TOKEN_KEY, USER_ID_KEY},
};

/// Shown when login fails for any reason other than a malformed email
pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials and try again.";

/// Login state kept in the client's token storage
#[derive(Debug, Clone)]
pub struct Session {
    client: ApiClient,
}

impl Session {
    /// Session over the client's token storage
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Client used for every call made on behalf of this session
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Log in by email and persist the returned token and user id
    pub async fn login(&self, email: &str) -> ClientResult<LoginResponse> {
        let credentials = LoginCredentials::new(email.trim());
        credentials.validate()?;

        let response = self
            .client
            .login_user(&credentials)
            .await
            .map_err(|e| ClientError::view(LOGIN_FAILED, e))?;

        let store = self.client.store();
        store.set(TOKEN_KEY, &response.token)?;
        store.set(USER_ID_KEY, response.user_id.as_str())?;

        debug!(user_id = %response.user_id, "Logged in");
        Ok(response)
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, name: &str, email: &str) -> ClientResult<ActionResponse> {
        self.client
            .register_user(&RegisterUser::new(name.trim(), email.trim()))
            .await
    }

    /// Forget the stored token and user id
    pub fn logout(&self) -> ClientResult<()> {
        let store = self.client.store();
        store.remove(TOKEN_KEY)?;
        store.remove(USER_ID_KEY)?;

        debug!("Logged out");
        Ok(())
    }

    /// Whether a non-empty token is stored
    pub fn is_logged_in(&self) -> ClientResult<bool> {
        Ok(self
            .client
            .store()
            .get(TOKEN_KEY)?
            .is_some_and(|token| !token.trim().is_empty()))
    }

    /// Gate for pages that redirect to login when no token is stored
    pub fn require_login(&self) -> ClientResult<()> {
        if self.is_logged_in()? {
            Ok(())
        } else {
            Err(ClientError::NotLoggedIn)
        }
    }

    /// Stored id of the logged-in user
    pub fn current_user_id(&self) -> ClientResult<UserId> {
        self.client
            .store()
            .get(USER_ID_KEY)?
            .map(UserId::from)
            .filter(|id| !id.is_empty())
            .ok_or(ClientError::MissingIdentifier("User ID"))
    }
}
