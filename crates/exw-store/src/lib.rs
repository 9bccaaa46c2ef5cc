//! # exw-store
//!
//! Client-side persisted state for Exitwise.
//!
//! Everything the client remembers between invocations (the session token,
//! the signed-in user, the in-progress valuation) goes through the
//! [`Repository`] trait as plain JSON under a fixed set of [`keys`].
//! [`FileStore`] keeps one file per key on disk, [`MemoryStore`] keeps them
//! in process for tests and one-shot runs.

mod draft;
mod error;
mod file;
pub mod keys;
mod memory;
mod repository;

pub use draft::ValuationDraftStore;
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use repository::{Repository, RepositoryExt};
