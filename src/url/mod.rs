//! Address handling for Strata
//!
//! Addresses are opaque absolute URL strings; the only structure the crawler
//! relies on is the host, which keys per-host admission control.

mod domain;

pub use domain::host_of;
