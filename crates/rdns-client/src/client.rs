//! Upload client implementation.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client as HttpClient;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Result, UploadError};

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Username sent with Basic auth when only a password/token is configured
const DEFAULT_USERNAME: &str = "rdns";

/// Client for the repository file-upload endpoint
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct UploadClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: Url,
    credentials: Option<Credentials>,
}

struct Credentials {
    username: Option<String>,
    password: String,
}

impl UploadClient {
    /// Create a client for the given cluster base URL with default settings
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        UploadClientBuilder::new(base_url).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> UploadClientBuilder {
        UploadClientBuilder::new(base_url)
    }

    /// Upload a CSV lookup file into `repo` under the name `filename`
    ///
    /// The file at `path` is posted as a multipart `file` part with content
    /// type `text/csv` to `api/v1/repositories/{repo}/files`, resolved
    /// against the configured base URL.
    pub async fn upload_lookup_file(
        &self,
        repo: &str,
        filename: &str,
        path: &Path,
    ) -> Result<()> {
        let url = self.files_url(repo)?;
        let bytes = tokio::fs::read(path).await?;
        debug!(url = %url, bytes = bytes.len(), "uploading lookup file");

        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("text/csv")
            .map_err(|e| UploadError::Http(e.to_string()))?;
        let form = Form::new().part("file", part);

        let mut request = self.inner.http.post(url).multipart(form);

        if let Some(creds) = &self.inner.credentials {
            let user = creds.username.as_deref().unwrap_or(DEFAULT_USERNAME);
            request = request.basic_auth(user, Some(&creds.password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| UploadError::Http(e.to_string()))?;

        Self::handle_response(response).await
    }

    /// Resolve the files endpoint against the base URL
    ///
    /// `Url::join` drops the last path segment of a base without a trailing
    /// slash, so one is appended first.
    fn files_url(&self, repo: &str) -> Result<Url> {
        let mut base = self.inner.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        base.join(&format!("api/v1/repositories/{repo}/files"))
            .map_err(|e| UploadError::InvalidUrl(e.to_string()))
    }

    /// Convert an error response to an [`UploadError`]
    async fn handle_response(response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();

        // Try to parse an error message out of a JSON body
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body);

        warn!(code = status.as_u16(), "upload failed");

        match status.as_u16() {
            401 => Err(UploadError::Unauthorized),
            code => Err(UploadError::Api { code, message }),
        }
    }
}

/// Builder for configuring an [`UploadClient`]
pub struct UploadClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: String,
    credentials: Option<Credentials>,
}

impl UploadClientBuilder {
    /// Create a new builder for the given cluster base URL
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("rdns-lookup/{}", env!("CARGO_PKG_VERSION")),
            credentials: None,
        }
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Authenticate uploads with Basic auth
    ///
    /// When `username` is `None` the literal `rdns` is sent, so a bare API
    /// token works as the password.
    #[must_use]
    pub fn credentials(mut self, username: Option<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials {
            username,
            password: password.into(),
        });
        self
    }

    /// Build the client
    ///
    /// Fails with [`UploadError::InvalidUrl`] when the base URL does not
    /// parse.
    pub fn build(self) -> Result<UploadClient> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| UploadError::InvalidUrl(format!("{}: {e}", self.base_url)))?;

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .expect("Failed to build HTTP client");

        Ok(UploadClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                credentials: self.credentials,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_url_keeps_base_path_segments() {
        let client = UploadClient::new("http://cluster.example:8080/humio").unwrap();
        let url = client.files_url("myRepo").unwrap();
        assert_eq!(
            url.as_str(),
            "http://cluster.example:8080/humio/api/v1/repositories/myRepo/files"
        );
    }

    #[test]
    fn files_url_with_trailing_slash() {
        let client = UploadClient::new("http://cluster.example/").unwrap();
        let url = client.files_url("repo").unwrap();
        assert_eq!(
            url.as_str(),
            "http://cluster.example/api/v1/repositories/repo/files"
        );
    }

    #[test]
    fn build_rejects_garbage_url() {
        assert!(matches!(
            UploadClient::new("not a url"),
            Err(UploadError::InvalidUrl(_))
        ));
    }
}
