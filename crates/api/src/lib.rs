//! HTTP boundary: the stock-count form, its submission endpoint, and
//! mapping processor outcomes to user-facing notices.

pub mod app;
pub mod middleware;
