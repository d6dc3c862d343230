//! Python Package Index JSON API.

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::http::HttpClient;
use crate::package::Release;

use super::ReleaseIndex;

/// Default JSON endpoint; `{name}` is replaced by the package name.
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/pypi/{name}/json";

/// PyPI API response types (internal).
mod api {
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Deserialize, Debug)]
    pub struct Project {
        #[serde(default)]
        pub releases: BTreeMap<String, Vec<File>>,
    }

    #[derive(Deserialize, Debug)]
    pub struct File {
        pub filename: Option<String>,
        pub url: Option<String>,
        pub upload_time: Option<String>,
        pub upload_time_iso_8601: Option<String>,
        #[serde(default)]
        pub yanked: bool,
    }
}

/// Release index backed by a PyPI-compatible JSON API.
pub struct PyPiIndex {
    http_client: HttpClient,
    url_template: String,
}

impl PyPiIndex {
    /// Create an index client for pypi.org.
    pub fn new(client: Client) -> Self {
        Self::with_index_url(client, DEFAULT_INDEX_URL)
    }

    /// Create an index client for a custom endpoint.
    ///
    /// `url` is either a template containing `{name}` or a base URL such as
    /// `https://pypi.org/pypi`, to which `/<name>/json` is appended.
    pub fn with_index_url(client: Client, url: &str) -> Self {
        Self::from_http_client(HttpClient::new(client), url)
    }

    /// Create from an existing HttpClient.
    pub fn from_http_client(http_client: HttpClient, url: &str) -> Self {
        Self {
            http_client,
            url_template: url.to_string(),
        }
    }

    /// The JSON URL for `name`.
    pub fn project_url(&self, name: &str) -> String {
        if self.url_template.contains("{name}") {
            self.url_template.replace("{name}", name)
        } else {
            format!("{}/{}/json", self.url_template.trim_end_matches('/'), name)
        }
    }

    async fn fetch_project(&self, name: &str) -> Result<api::Project> {
        let url = self.project_url(name);
        debug!("Fetching release metadata from {}...", url);
        self.http_client.get_json(&url).await
    }
}

#[async_trait]
impl ReleaseIndex for PyPiIndex {
    fn index_url(&self) -> &str {
        &self.url_template
    }

    async fn fetch_releases(&self, name: &str) -> Result<Vec<Release>> {
        let project = self.fetch_project(name).await?;
        Ok(convert_releases(project.releases))
    }
}

/// Takes each release's record from its first file. Releases without files
/// have no upload time and nothing to install, so they are dropped.
fn convert_releases(releases: BTreeMap<String, Vec<api::File>>) -> Vec<Release> {
    releases
        .into_iter()
        .filter_map(|(version, files)| {
            let yanked = files.iter().all(|f| f.yanked);
            let Some(first) = files.into_iter().next() else {
                debug!("Skipping release {} without files", version);
                return None;
            };
            Some(Release {
                version,
                upload_time: first
                    .upload_time
                    .or(first.upload_time_iso_8601)
                    .unwrap_or_default(),
                filename: first.filename,
                url: first.url,
                yanked,
            })
        })
        .collect()
}
