//! Plenary record store
//!
//! Arena-style storage for the tracker's records: every record lives in a
//! map keyed by its opaque id, associations are resolved through
//! by-foreign-key queries, and nothing holds a back-pointer. The store
//! answers queries and applies writes; it does NOT make workflow
//! decisions. Those live in `plenary-engine`.

#![deny(unsafe_code)]

pub mod memory;

pub use memory::MemoryStore;
