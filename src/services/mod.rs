//! Service layer for the crawler service.
//!
//! This module contains the request-handling logic:
//! - Enum resolution against provider vocabularies (`resolver`)
//! - Query parameter coercion (`validate`)
//! - The provider client adapter (`GooglePlayService`)

mod google_play;
pub mod resolver;
pub mod validate;

pub use google_play::GooglePlayService;
pub use validate::QueryParams;
