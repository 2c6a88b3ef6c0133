//! # Domain Layer (Inner Hexagon)
//!
//! Pure deployment concepts: addresses, artifacts, requests and receipts.
//! NO I/O, NO async.

pub mod entities;
pub mod invariants;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use invariants::*;
pub use services::*;
pub use value_objects::*;
