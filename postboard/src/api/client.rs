use reqwest::Client;
use serde::de::DeserializeOwned;

use super::{ApiError, ApiResult};
use crate::logging::LogConfig;
use postboard_types::*;

/// Public JSONPlaceholder instance the page was built against
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// API client for the employee/post/comment REST service
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    log_config: LogConfig,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            log_config: LogConfig::default(),
        }
    }

    pub fn with_log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Helper to handle API responses
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        // Keep HTML error pages out of the log
        let message = if body.contains("<html") || body.contains("<!DOCTYPE") {
            format!("Server returned {} error", status.as_u16())
        } else {
            body
        };

        match status.as_u16() {
            404 => Err(ApiError::NotFound(message)),
            code => Err(ApiError::Api {
                status: code,
                message,
            }),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        log_api_call!(self.log_config, "GET {}", url);
        let response = self.client.get(&url).send().await?;
        log_api_call!(self.log_config, "GET {} -> {}", url, response.status());
        self.handle_response(response).await
    }

    /// Get every employee
    pub async fn get_users(&self) -> ApiResult<Vec<User>> {
        self.get_json("/users").await.map_err(|e| {
            log::error!("Error fetching users. ({})", e);
            e
        })
    }

    /// Get the posts written by one employee
    pub async fn get_user_posts(&self, user_id: Option<UserId>) -> ApiResult<Vec<Post>> {
        let user_id = user_id.ok_or(ApiError::MissingId("user_id"))?;
        self.get_json(&format!("/users/{}/posts", user_id))
            .await
            .map_err(|e| {
                log::error!("Failed to fetch user posts ({})", e);
                e
            })
    }

    /// Get a single employee
    pub async fn get_user(&self, user_id: Option<UserId>) -> ApiResult<User> {
        let user_id = user_id.ok_or(ApiError::MissingId("user_id"))?;
        self.get_json(&format!("/users/{}", user_id))
            .await
            .map_err(|e| {
                log::error!("Failed to fetch user data ({})", e);
                e
            })
    }

    /// Get the comments on a post
    pub async fn get_post_comments(&self, post_id: Option<PostId>) -> ApiResult<Vec<Comment>> {
        let post_id = post_id.ok_or(ApiError::MissingId("post_id"))?;
        self.get_json(&format!("/posts/{}/comments", post_id))
            .await
            .map_err(|e| {
                log::error!("Failed to fetch post comments ({})", e);
                e
            })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
