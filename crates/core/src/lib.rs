//! # Roombook Core
//!
//! Domain types shared by the storage engines and the HTTP layer: the reservation
//! entity and its overlap rule, the validated create/update intents, the wire time
//! format, the error taxonomy, and the storage trait every engine implements.

pub mod deadline;
pub mod errors;
pub mod models;
pub mod repository;
