//! # restcheck-conformance - REST CRUD Conformance Kit
//!
//! This crate provides reusable conformance scenarios for CRUD-style REST
//! resources behind OAuth2 bearer auth, plus the shared response assertions
//! they are built on. It layers directly on [`axum_test::TestServer`], so it
//! exercises a service in-process with no sockets and no external fixtures.
//!
//! ## Features
//!
//! - **Capability scenarios**: List, Create, Read, Update, ConditionalUpdate,
//!   Patch, Delete, Upsert, and Truncate, each a standard scenario set driven
//!   by hooks the concrete test supplies
//! - **Shared assertions**: one definition of every canonical outcome shape
//!   (200/201/204/400/401/403/404/409) against the problem JSON format
//! - **Bearer injection**: a client wrapper that stamps the current access
//!   token onto every request from a shared mutable cell
//! - **Dummy tokens**: a signed opaque token stub carrying subject, roles,
//!   scopes, and lifetime, decodable by the service under test
//! - **Statelessness check**: every assertion fails on any `Set-Cookie`
//!   response header
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use axum_test::TestServer;
//! use restcheck_conformance::{
//!     suites, token, ConformanceClient, Harness, TokenCell,
//! };
//!
//! #[tokio::test]
//! async fn list_empty_collection() {
//!     let app = build_app_under_test();
//!     let server = TestServer::new(app).expect("test server");
//!     let cell = TokenCell::new(Some(token::default_access_token()));
//!     let harness = Harness::new(ConformanceClient::new(server, cell), "/tasks");
//!
//!     suites::list::empty(&harness).await;
//! }
//! ```
//!
//! ## Pinned HTTP Contract
//!
//! The scenarios pin the following surface on the service under test:
//!
//! | Operation | HTTP Method | URL Pattern |
//! |-----------|-------------|-------------|
//! | list | GET | `/{path}?size=N&next=cursor` |
//! | read | GET | `/{path}/{id}` |
//! | create | POST | `/{path}` |
//! | update | POST | `/{path}/{id}` |
//! | conditional update | POST | `/{path}/{id}?version=N` |
//! | patch | PATCH | `/{path}/{id}` |
//! | delete | DELETE | `/{path}/{id}` |
//! | truncate | DELETE | `/{path}` |
//! | upsert | PUT | `/{path}/{id}` |
//!
//! Error bodies follow the problem shape `{type?, title, status, detail?}`
//! with `status` mirroring the HTTP code; list bodies follow
//! `{chunk: {size, pagination_token?}, _embedded: {elements: [...]}}` with
//! the cursor present exactly when further elements remain.
//!
//! ## Architecture
//!
//! - [`asserts`] - Response-shape assertions and the JSON path helper
//! - [`client`] - Bearer-injecting wrapper around the test server
//! - [`token`] - Dummy opaque token issue/decode
//! - [`identity`] - The [`Identified`] accessor tested resources implement
//! - [`harness`] - Scenario harness and the [`ResourceFixture`] factory
//! - [`suites`] - One scenario module per capability

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod asserts;
pub mod client;
pub mod harness;
pub mod identity;
pub mod suites;
pub mod token;

// Re-export commonly used types
pub use client::{ConformanceClient, TokenCell};
pub use harness::{Harness, ResourceFixture};
pub use identity::Identified;
pub use token::{ClaimSet, TokenError};
