use crate::AppError;
use crate::api::client::SnowClient;
use crate::api::models::UserInfo;
use crate::core::auth::LoginInput;
use std::path::PathBuf;

/// Connect flow: authenticate, then persist the credentials that worked
pub struct AuthService {
    client: SnowClient,
    config_path: Option<PathBuf>,
}

impl AuthService {
    /// Create new AuthService instance
    pub fn new(client: SnowClient, config_path: Option<PathBuf>) -> Self {
        Self {
            client,
            config_path,
        }
    }

    /// Build the client from collected login input
    pub fn from_login(input: &LoginInput, config_path: Option<PathBuf>) -> Result<Self, AppError> {
        input.validate()?;
        let client = SnowClient::new(&input.instance, &input.username, &input.password)?;
        Ok(Self::new(client, config_path))
    }

    /// Authenticate and save the config. Nothing is written when
    /// authentication fails.
    pub async fn connect(&mut self) -> Result<UserInfo, AppError> {
        let user = self.client.authenticate().await?;
        self.client.save_config_to(self.config_path.clone())?;
        log::debug!("credentials for {} saved", self.client.instance);
        Ok(user)
    }

    pub fn client(&self) -> &SnowClient {
        &self.client
    }
}
