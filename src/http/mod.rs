//! HTTP transport for the API under test.
//!
//! Every completed exchange is returned as an [`ApiResponse`], whatever its
//! status code. Only failures to reach the server are errors.

mod client;
mod response;

pub use client::{ApiClient, build_client, mask_token};
pub use response::{ApiResponse, ResponseBody};
