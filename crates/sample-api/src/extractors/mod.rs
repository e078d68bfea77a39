//! Request extractors.
//!
//! - [`Authenticated`] - Verify the bearer token and expose its claims
//! - [`Authorized`] - Check a route authority before any body is read
//! - [`Locale`] - Response language negotiated from `Accept-Language`
//! - [`ApiJson`] - JSON body extraction with problem-shaped rejections
//! - [`ApiQuery`] - Query string extraction with problem-shaped rejections

pub mod authority;
pub mod bearer;
pub mod body;
pub mod query;

pub use authority::{Authority, Authorized};
pub use bearer::{Authenticated, Locale};
pub use body::ApiJson;
pub use query::ApiQuery;
