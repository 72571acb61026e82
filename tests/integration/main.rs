//! HTTP-level integration tests, driven through the router in-process.

mod auth_test;
mod helpers;
mod middleware_test;
