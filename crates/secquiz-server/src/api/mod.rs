//! HTTP routes.

pub mod analyze;
pub mod error;
pub mod health;
pub mod scenarios;

use actix_web::web;

/// Largest request body accepted, in bytes. Responses are cut to
/// `MAX_RESPONSE_CHARS` after decoding, so anything within this limit is
/// scored or falls back; larger bodies are refused with 413.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Register every route on an actix `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .configure(health::configure)
        .configure(analyze::configure)
        .configure(scenarios::configure);
}
