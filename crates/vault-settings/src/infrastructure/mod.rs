//! Infrastructure layer for vault settings.
//!
//! Contains the OS-facing adapters: environment inspection and file-system
//! storage.
//!
//! **Dependency rule**: this layer may depend on `domain`, but MUST NOT be
//! imported by the domain layer.

pub mod storage;
