//! Domain entities for vault settings.
//!
//! This module contains the settings document with no infrastructure
//! dependencies.  Nothing here opens a file or reads an environment
//! variable; the `infrastructure` layer does that and hands the results to
//! these types.

/// The persisted settings document.
///
/// See [`settings::Settings`] for the main type.
pub mod settings;
