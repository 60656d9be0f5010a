//! HTTP route groups.

pub mod google_play;
pub mod system;
