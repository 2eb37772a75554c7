//! Fakes shared by the integration tests: a recording fetcher, a fixed
//! version source and a mock npm registry.

use std::{
    cell::{Cell, RefCell},
    path::{Path, PathBuf},
};

use create_dojo::{error::Result, Fetcher, ScaffoldError, VersionSource};

#[allow(dead_code)]
pub const CLIENT_MANIFEST: &str = r#"{
  "name": "react-app",
  "version": "0.0.0",
  "private": true,
  "dependencies": {
    "@dojoengine/core": "workspace:*",
    "@dojoengine/react": "workspace:^",
    "@dojoengine/utils": "^0.9.0",
    "react": "^18.2.0",
    "other/tool": "workspace:*"
  },
  "devDependencies": {
    "@dojoengine/create-burner": "workspace:*"
  }
}"#;

/// Records every fetch. Writes `manifest` into destinations named `client`
/// and fails (status 1) for remotes containing any of `fail`.
#[derive(Default)]
#[allow(dead_code)]
pub struct FakeFetcher {
    pub manifest: Option<&'static str>,
    pub fail: Vec<&'static str>,
    pub calls: RefCell<Vec<(String, PathBuf)>>,
}

#[allow(dead_code)]
impl FakeFetcher {
    pub fn with_manifest(manifest: &'static str) -> Self {
        Self {
            manifest: Some(manifest),
            ..Default::default()
        }
    }

    pub fn failing(mut self, remote: &'static str) -> Self {
        self.fail.push(remote);
        self
    }

    pub fn remotes(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(r, _)| r.clone()).collect()
    }
}

impl Fetcher for FakeFetcher {
    fn fetch(&self, remote: &str, dest: &Path) -> Result<()> {
        self.calls
            .borrow_mut()
            .push((remote.to_owned(), dest.to_path_buf()));

        if self.fail.iter().any(|f| remote.contains(f)) {
            return Err(ScaffoldError::Fetch {
                remote: remote.to_owned(),
                status: Some(1),
                detail: "exit status: 1".into(),
            });
        }

        if let (Some(manifest), true) = (self.manifest, dest.ends_with("client")) {
            std::fs::write(dest.join("package.json"), manifest).unwrap();
        }

        Ok(())
    }
}

/// Answers every lookup with the same version, or fails like a registry
/// returning HTTP 500.
#[allow(dead_code)]
pub struct FixedVersion {
    pub version: Option<&'static str>,
    pub asked: Cell<usize>,
}

#[allow(dead_code)]
impl FixedVersion {
    pub fn new(version: &'static str) -> Self {
        Self {
            version: Some(version),
            asked: Cell::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            version: None,
            asked: Cell::new(0),
        }
    }
}

impl VersionSource for FixedVersion {
    fn latest(&self, package: &str) -> Result<String> {
        self.asked.set(self.asked.get() + 1);

        self.version.map(str::to_owned).ok_or_else(|| ScaffoldError::Network {
            url: format!("fake://{package}"),
            reason: "status 500 Internal Server Error".into(),
        })
    }
}

pub const DIST_TAGS_PATH: &str = "/-/package/@dojoengine/core/dist-tags";

/// npm registry stand-in serving the dist-tags endpoint.
#[allow(dead_code)]
pub struct MockRegistry {
    server: mockito::ServerGuard,
}

#[allow(dead_code)]
impl MockRegistry {
    pub fn new() -> Self {
        Self {
            server: mockito::Server::new(),
        }
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Answers dist-tags requests, expecting `hits` of them.
    pub fn mock_dist_tags(&mut self, status: usize, body: &str, hits: usize) -> mockito::Mock {
        self.server
            .mock("GET", DIST_TAGS_PATH)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(hits)
            .create()
    }
}

impl Default for MockRegistry {
    fn default() -> Self {
        Self::new()
    }
}
