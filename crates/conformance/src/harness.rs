//! Scenario harness and fixture contract.
//!
//! A [`Harness`] bundles the bearer-injecting client with the collection path
//! of the resource under test; every capability scenario takes one. Concrete
//! tests supply a [`ResourceFixture`] so scenarios can seed resources through
//! the backing store without going through the HTTP surface they are busy
//! verifying.

use async_trait::async_trait;

use crate::client::ConformanceClient;
use crate::identity::Identified;
use crate::token;

/// Harness handle passed to every capability scenario.
pub struct Harness {
    client: ConformanceClient,
    path: String,
}

impl Harness {
    /// Creates a harness for the resource collection at `path`
    /// (e.g. `/tasks`).
    pub fn new(client: ConformanceClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
        }
    }

    /// Returns the client.
    pub fn client(&self) -> &ConformanceClient {
        &self.client
    }

    /// Returns the collection path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the instance path for the given resource id.
    pub fn resource_path(&self, id: &str) -> String {
        format!("{}/{}", self.path, id)
    }

    /// Installs the standard test identity into the token cell.
    ///
    /// Every scenario calls this first, so scenarios stay order-independent
    /// even when an earlier one cleared or downgraded the token.
    pub fn reset_token(&self) {
        self.client.token().set(token::default_access_token());
    }
}

/// Factory seeding resources for scenarios that need preconditions.
///
/// Implementations create resources directly in the backing store and panic
/// on failure; a fixture that cannot seed is a broken test environment, not a
/// conformance finding.
#[async_trait]
pub trait ResourceFixture: Send + Sync {
    /// The resource type produced by this fixture.
    type Resource: Identified + Send + Sync;

    /// Creates one resource with a fresh unique identifier.
    async fn create_one(&self) -> Self::Resource;

    /// Creates one resource with the given identifier.
    async fn create_with_id(&self, id: &str) -> Self::Resource;

    /// Creates `count` resources with fresh unique identifiers.
    async fn create_many(&self, count: usize) -> Vec<Self::Resource> {
        let mut created = Vec::with_capacity(count);
        for _ in 0..count {
            created.push(self.create_one().await);
        }
        created
    }
}
