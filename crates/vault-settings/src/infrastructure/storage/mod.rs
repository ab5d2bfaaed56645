//! Storage infrastructure: settings file persistence.
//!
//! - `location` – where `settings.json` lives on each platform.
//! - `store` – loading and saving the file, one call at a time.
//! - `async_store` – the same store, driven from an async runtime.
//! - `error` – why a load or save failed.
//!
//! Keeping storage concerns here means the rest of the application only
//! ever sees a [`Settings`](crate::Settings) value; it never handles paths
//! or I/O errors.

pub mod async_store;
pub mod error;
pub mod location;
pub mod store;
