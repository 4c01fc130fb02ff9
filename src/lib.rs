//! ride-fare-engine
//!
//! Route estimation and fare computation for multi-stop ride offers: a
//! priced route with a fare for every (boarding, drop) stop pair, with the
//! origin→destination fare anchored against segment edits.

pub mod advisory;
pub mod config;
pub mod discovery;
pub mod error;
pub mod haversine;
pub mod ledger;
pub mod matrix;
pub mod osrm;
pub mod places;
pub mod polyline;
pub mod pricing;
pub mod route;
pub mod session;
pub mod stop;
pub mod traits;
