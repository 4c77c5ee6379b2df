use crate::api::models::{ResultEnvelope, UserInfo};
use crate::error::{ApiError, AppError, AuthError, CliError, StorageError};
use crate::storage::config::Config;
use crate::utils::error_helpers::{convert_marshal_error, convert_read_error};
use crate::{map_api_error, map_json_error};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

const USER_AGENT: &str = concat!("sncli/", env!("CARGO_PKG_VERSION"));
pub const PROVIDER_DOMAIN: &str = "service-now.com";
pub const USER_ENDPOINT: &str = "/api/now/v1/table/sys_user";

/// Query parameters appended to a table endpoint
pub type QueryParams<'a> = [(&'a str, &'a str)];

#[derive(Debug, Clone)]
pub struct SnowClient {
    client: Client,
    pub base_url: String,
    pub instance: String,
    pub username: String,
    password: String,
    pub user_info: Option<UserInfo>,
}

impl SnowClient {
    /// Create a client for `https://<instance>.service-now.com`
    pub fn new(instance: &str, username: &str, password: &str) -> Result<Self, AppError> {
        Self::with_base_url(&Self::instance_url(instance), instance, username, password)
    }

    /// Create a client against an explicit base URL (proxies, mock servers)
    pub fn with_base_url(
        base_url: &str,
        instance: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, AppError> {
        if instance.is_empty() || username.is_empty() || password.is_empty() {
            return Err(CliError::InvalidArguments(
                "instance name, username and password are required".to_string(),
            )
            .into());
        }

        // No timeout: requests wait as long as the server takes
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::ClientInit(e.to_string()))?;

        Ok(SnowClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            instance: instance.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            user_info: None,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(&config.instance, &config.username, &config.password)
    }

    pub fn instance_url(instance: &str) -> String {
        format!("https://{}.{}", instance, PROVIDER_DOMAIN)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_info.is_some()
    }

    pub fn to_config(&self) -> Config {
        Config {
            instance: self.instance.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
    }

    /// Issue one signed request and return the raw response body.
    ///
    /// Any status outside 200..=299 becomes `ApiError::Unauthorized` carrying
    /// the received status and the raw body. Nothing is retried.
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        query: &QueryParams<'_>,
        body: Option<&B>,
    ) -> Result<Vec<u8>, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.build_request(method.clone(), path);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(data) = body {
            let payload = serde_json::to_vec(data).map_err(|e| convert_marshal_error(e, path))?;
            request = request.body(payload);
        }

        log::debug!("{} {}", method, path);
        let response = map_api_error!(request.send().await, path)?;
        let status = response.status();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| convert_read_error(e, path))?;
        log::debug!("{} {} -> {} ({} bytes)", method, path, status, bytes.len());

        if !status.is_success() {
            return Err(ApiError::Unauthorized {
                status: status.as_u16(),
                endpoint: path.to_string(),
                server_message: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(bytes.to_vec())
    }

    /// GET a table endpoint and decode the `result` list; `what` names the
    /// payload in parse errors
    pub async fn get_result<T>(
        &self,
        path: &str,
        query: &QueryParams<'_>,
        what: &str,
    ) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let data = self.request::<()>(Method::GET, path, query, None).await?;
        let envelope: ResultEnvelope<T> = map_json_error!(serde_json::from_slice(&data), what, path)?;
        Ok(envelope.result)
    }

    /// Look up the caller's own sys_user record.
    ///
    /// Failures to reach the server report status 401, an empty result
    /// reports 404. The user is cached on the client on success.
    pub async fn authenticate(&mut self) -> Result<UserInfo, AppError> {
        let user_query = format!("user_name={}", self.username);
        let data = self
            .request::<()>(
                Method::GET,
                USER_ENDPOINT,
                &[("sysparm_query", user_query.as_str())],
                None,
            )
            .await
            .map_err(auth_failure)?;

        let envelope: ResultEnvelope<UserInfo> =
            map_json_error!(serde_json::from_slice(&data), "user info", USER_ENDPOINT)?;

        let user = envelope
            .result
            .into_iter()
            .next()
            .ok_or_else(|| AuthError::Failed {
                message: "user not found".to_string(),
                status: 404,
            })?;

        log::debug!("authenticated as {} <{}>", user.user_id, user.email);
        self.user_info = Some(user.clone());
        Ok(user)
    }

    /// Persist instance, username and password to the default config path
    pub fn save_config(&self) -> Result<(), StorageError> {
        self.save_config_to(None)
    }

    pub fn save_config_to(&self, path: Option<PathBuf>) -> Result<(), StorageError> {
        self.to_config().save(path)
    }
}

fn auth_failure(error: ApiError) -> AuthError {
    match error {
        ApiError::Unauthorized {
            status,
            server_message,
            ..
        } => AuthError::Failed {
            message: server_message,
            status,
        },
        other => AuthError::Failed {
            message: other.to_string(),
            status: 401,
        },
    }
}
