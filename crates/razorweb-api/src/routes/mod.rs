//! Route modules for the HTTP server
//!
//! Each module follows the same structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints and HTMX partials
//! - page.rs: Full page and fragment rendering

pub mod settings;
pub mod transactions;
