//! Key-addressed blob storage backends for the Cask gateway.
//!
//! This crate defines the boundary between the gateway and whatever durable
//! store actually holds blob bytes. A blob is an opaque byte sequence plus a
//! type tag derived from its key; the backend never inspects the bytes.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlobStore`] trait:
//!
//! - [`MemoryStore`] -- `HashMap`-based store for tests, development, and
//!   embedding, with an optional capacity budget
//!
//! # Design Rules
//!
//! 1. A blob's identity is its key; content is fully replaced on update,
//!    never partially patched.
//! 2. `retrieve` reports absence as `Ok(None)`, never as an error.
//! 3. `create` is an upsert; `update` requires prior existence.
//! 4. `delete` of an absent key is a no-op success.
//! 5. Every write carries a size hint in gibibytes, a coarse quota signal
//!    the backend may use for capacity accounting.
//! 6. All backend errors are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod record;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use record::BlobRecord;
pub use traits::BlobStore;
