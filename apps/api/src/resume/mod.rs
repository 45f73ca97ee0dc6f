// Resume persistence subsystem.
// Implements: section drafts + validation, the batched upsert gateway,
// the dual-mode writer (remote Postgres vs client-local store), and the
// aggregate loader. All storage access for resume sections goes through
// the writer — handlers never touch the pool for section saves directly.

pub mod gateway;
pub mod handlers;
pub mod loader;
pub mod local;
pub mod sections;
pub mod writer;
