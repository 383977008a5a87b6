//! Directory API port and its reqwest adapter.
//!
//! The adapter owns transport details only: URL construction, status
//! mapping and JSON decoding. Views talk to [`DirectoryApi`] so they can be
//! driven by a mock in tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClientError;
use crate::model::{MessageBody, User, UserInput, UserPage};

/// Default base URL of the directory API.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Operations the views need from the directory server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Fetch one page of all users.
    async fn list_users(&self, page: u32, limit: u32) -> Result<UserPage, ClientError>;

    /// Fetch one page of users matching `query`.
    async fn search_users(
        &self,
        query: &str,
        page: u32,
        limit: u32,
    ) -> Result<UserPage, ClientError>;

    /// Fetch a single user.
    async fn get_user(&self, id: &str) -> Result<User, ClientError>;

    /// Create a user.
    async fn create_user(&self, input: &UserInput) -> Result<User, ClientError>;

    /// Replace the fields of an existing user.
    async fn update_user(&self, id: &str, input: &UserInput) -> Result<User, ClientError>;

    /// Delete a user, returning the server's confirmation message.
    async fn delete_user(&self, id: &str) -> Result<String, ClientError>;

    /// Download the CSV export.
    async fn export_csv(&self) -> Result<Vec<u8>, ClientError>;
}

#[derive(Serialize)]
struct PageQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
    page: u32,
    limit: u32,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// [`DirectoryApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDirectoryApi {
    client: Client,
    base: Url,
}

impl HttpDirectoryApi {
    /// Build an adapter for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidUrl`] when `base_url` is not an absolute
    /// hierarchical URL, or [`ClientError::Transport`] when the reqwest
    /// client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base = Url::parse(base_url).map_err(|err| ClientError::InvalidUrl(err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_owned()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn page(&self, segments: &[&str], query: PageQuery<'_>) -> Result<UserPage, ClientError> {
        let url = self.endpoint(segments)?;
        debug!(%url, page = query.page, limit = query.limit, "fetching users page");
        let response = self.client.get(url).query(&query).send().await?;
        read_json(response).await
    }
}

async fn read_success(response: Response) -> Result<Vec<u8>, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        return Err(status_error(status, &body));
    }
    Ok(body.to_vec())
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = read_success(response).await?;
    serde_json::from_slice(&body).map_err(|err| ClientError::Decode(err.to_string()))
}

fn status_error(status: StatusCode, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|decoded| decoded.message);
    ClientError::Status {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl DirectoryApi for HttpDirectoryApi {
    async fn list_users(&self, page: u32, limit: u32) -> Result<UserPage, ClientError> {
        self.page(
            &["users"],
            PageQuery {
                query: None,
                page,
                limit,
            },
        )
        .await
    }

    async fn search_users(
        &self,
        query: &str,
        page: u32,
        limit: u32,
    ) -> Result<UserPage, ClientError> {
        self.page(
            &["users", "search"],
            PageQuery {
                query: Some(query),
                page,
                limit,
            },
        )
        .await
    }

    async fn get_user(&self, id: &str) -> Result<User, ClientError> {
        let url = self.endpoint(&["users", id])?;
        read_json(self.client.get(url).send().await?).await
    }

    async fn create_user(&self, input: &UserInput) -> Result<User, ClientError> {
        let url = self.endpoint(&["users"])?;
        read_json(self.client.post(url).json(input).send().await?).await
    }

    async fn update_user(&self, id: &str, input: &UserInput) -> Result<User, ClientError> {
        let url = self.endpoint(&["users", id])?;
        read_json(self.client.put(url).json(input).send().await?).await
    }

    async fn delete_user(&self, id: &str) -> Result<String, ClientError> {
        let url = self.endpoint(&["users", id])?;
        let body: MessageBody = read_json(self.client.delete(url).send().await?).await?;
        Ok(body.message)
    }

    async fn export_csv(&self) -> Result<Vec<u8>, ClientError> {
        let url = self.endpoint(&["users", "export"])?;
        read_success(self.client.get(url).send().await?).await
    }
}
