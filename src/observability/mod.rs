//! Observability for the validator
//!
//! The library only emits `tracing` records; installing a subscriber is
//! up to the application.
//!
//! - `debug`: begin / complete of every top-level call
//! - `trace`: checker instantiation, discriminator resolution
//! - `warn`: a malformed rule tree aborted a call
//!
//! Every record carries an `event` field holding an [`Event`] name.

mod events;

pub use events::Event;
