//! Shared service bootstrap: health routes, middleware and the HTTP listener.
//!
//! Every service hands its route table to [`Application::builder`] and gets
//! back a bound listener with `/health`, `/ready` and `/metrics` registered.

mod app;
mod health;

pub use app::{Application, ApplicationBuilder, shutdown_signal};
pub use health::{HealthResponse, ReadinessCheck, ServiceInfo};
