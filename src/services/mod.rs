//! Domain services.
//!
//! - `storefront`: visitor lifecycle, cart actions and view flags
//! - `assistant`: design-advice chat backed by a dialogue session
//! - `insight`: per-product marketing hooks under a sampling policy

pub mod assistant;
pub mod insight;
pub mod storefront;
