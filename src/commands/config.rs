use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use log::debug;
use reqwest::Client;

use crate::{
    index::{DEFAULT_INDEX_URL, PyPiIndex, ReleaseIndex},
    runner::{CommandRunner, PipRunner},
};

/// User agent sent to the package index.
pub const USER_AGENT: &str = concat!("pip-helpers/", env!("CARGO_PKG_VERSION"));

/// Settings the collaborators are built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOptions {
    /// JSON endpoint template or base URL of the index (defaults to PyPI)
    pub index_url: Option<String>,
    /// Python interpreter that runs pip (defaults to `python`)
    pub python: Option<PathBuf>,
    /// Per-request timeout for index queries
    pub timeout: Option<Duration>,
}

pub struct Config<I: ReleaseIndex, C: CommandRunner> {
    pub index: I,
    pub runner: C,
}

impl Config<PyPiIndex, PipRunner> {
    pub fn new(options: ConfigOptions) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = options.timeout {
            debug!("Using index request timeout of {:?}", timeout);
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let index_url = options.index_url.as_deref().unwrap_or(DEFAULT_INDEX_URL);
        debug!("Using package index {}", index_url);
        let index = PyPiIndex::with_index_url(client, index_url);

        let runner = match options.python {
            Some(python) => PipRunner::new(python),
            None => PipRunner::default(),
        };

        Ok(Self { index, runner })
    }
}
