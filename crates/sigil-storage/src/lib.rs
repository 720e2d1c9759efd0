//! Account store backends for Sigil.
//!
//! Currently provides a thread-safe in-memory store implementing the
//! [`sigil_auth::AccountStore`] port. Apps are provisioned into it at
//! process start; user records are created through the engine.

mod memory;

pub use memory::MemoryAccountStore;
