use std::time::Duration;

use reqwest::{blocking::Client, StatusCode};
use serde::Deserialize;

use crate::{
    error::{Result, ScaffoldError},
    trace,
};

/// Answers "what is the latest published version of this package?".
pub trait VersionSource {
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Network`] if the version can not be determined.
    fn latest(&self, package: &str) -> Result<String>;
}

#[derive(Deserialize)]
struct DistTags {
    latest: String,
}

/// Extracts the `latest` tag from a dist-tags response body.
///
/// # Errors
///
/// Returns an error if `body` is not JSON or has no string `latest` field.
pub fn parse_dist_tags(body: &str) -> serde_json::Result<String> {
    serde_json::from_str::<DistTags>(body).map(|tags| tags.latest)
}

/// npm compatible registry queried through its dist-tags endpoint.
#[derive(Debug, Clone)]
pub struct NpmRegistry {
    base_url: String,
    client: Client,
}

impl NpmRegistry {
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Network`] if the HTTP client can not be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| ScaffoldError::network(&base_url, e))?;

        Ok(Self { base_url, client })
    }

    /// Uses an already configured client.
    #[must_use]
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    #[must_use]
    pub fn dist_tags_url(&self, package: &str) -> String {
        format!(
            "{}/-/package/{package}/dist-tags",
            self.base_url.trim_end_matches('/')
        )
    }
}

impl VersionSource for NpmRegistry {
    fn latest(&self, package: &str) -> Result<String> {
        let url = self.dist_tags_url(package);
        trace!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ScaffoldError::network(&url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ScaffoldError::network(&url, format!("status {status}")));
        }

        let body = response
            .text()
            .map_err(|e| ScaffoldError::network(&url, e))?;

        parse_dist_tags(&body).map_err(|e| ScaffoldError::network(&url, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_tag() {
        let body = r#"{"latest":"1.0.0-alpha.12","next":"1.1.0-rc.1"}"#;
        assert_eq!(parse_dist_tags(body).unwrap(), "1.0.0-alpha.12");
    }

    #[test]
    fn malformed_bodies() {
        assert!(parse_dist_tags("").is_err());
        assert!(parse_dist_tags("<html>").is_err());
        assert!(parse_dist_tags(r#"{"next":"1.0.0"}"#).is_err());
        assert!(parse_dist_tags(r#"{"latest":1}"#).is_err());
    }

    #[test]
    fn url_layout() {
        let registry = NpmRegistry::new("https://registry.npmjs.org/").unwrap();
        assert_eq!(
            registry.dist_tags_url("@dojoengine/core"),
            "https://registry.npmjs.org/-/package/@dojoengine/core/dist-tags"
        );
    }
}
