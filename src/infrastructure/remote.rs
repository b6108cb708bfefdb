//! Remote Maven repositories
//!
//! Artifacts missing from the local repository are downloaded from the
//! configured remotes, first hit wins, and stored in the local layout.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

/// Default remote when `[repository].remotes` is not set
pub const MAVEN_CENTRAL: &str = "https://repo.maven.apache.org/maven2";

const TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RemoteError {
    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url}: {message}")]
    Transport { url: String, message: String },
}

/// One remote repository, addressed by Maven-layout relative paths
pub trait ArtifactSource: Send + Sync {
    fn url(&self) -> &str;

    /// `Ok(None)` when the repository does not have `path`
    fn download(&self, path: &str) -> Result<Option<Vec<u8>>, RemoteError>;
}

/// HTTP(S) repository such as Maven Central
pub struct HttpRepository {
    base: String,
    client: OnceLock<Client>,
}

impl HttpRepository {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            client: OnceLock::new(),
        }
    }

    pub fn maven_central() -> Self {
        Self::new(MAVEN_CENTRAL)
    }

    /// Built on first download, so fully cached builds never start one
    fn client(&self) -> Result<&Client, RemoteError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = Client::builder()
            .user_agent(concat!("skein/", env!("CARGO_PKG_VERSION")))
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| RemoteError::Transport {
                url: self.base.clone(),
                message: e.to_string(),
            })?;
        Ok(self.client.get_or_init(|| client))
    }
}

impl ArtifactSource for HttpRepository {
    fn url(&self) -> &str {
        &self.base
    }

    fn download(&self, path: &str) -> Result<Option<Vec<u8>>, RemoteError> {
        let url = format!("{}/{}", self.base, path);
        let transport = |e: reqwest::Error| RemoteError::Transport {
            url: url.clone(),
            message: e.to_string(),
        };

        tracing::debug!(%url, "downloading");
        let response = self.client()?.get(&url).send().map_err(transport)?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let body = response.bytes().map_err(transport)?;
                Ok(Some(body.to_vec()))
            }
            status => Err(RemoteError::Status {
                url: url.clone(),
                status: status.as_u16(),
            }),
        }
    }
}
