//! Test fixtures for ride-fare-engine.
//!
//! Provides realistic test data including:
//! - Real Tamil Nadu towns along the Chennai–Madurai corridor
//! - Mock routing and place-search providers
//! - Local HTTP stubs for adapter failure modes

pub mod http_stub;
pub mod providers;
pub mod tamil_nadu_locations;

#[allow(unused_imports)]
pub use http_stub::*;
#[allow(unused_imports)]
pub use providers::*;
#[allow(unused_imports)]
pub use tamil_nadu_locations::*;
