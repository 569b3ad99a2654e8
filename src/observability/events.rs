//! Observable events emitted by the validator
//!
//! Events are explicit and typed. They are attached to `tracing` records
//! as the `event` field so log pipelines can filter on a stable name.

use std::fmt;

/// Observable events in a validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A top-level validation call started
    ValidationBegin,
    /// A top-level validation call walked the whole tree
    ValidationComplete,
    /// A malformed rule tree aborted a validation call
    RuleRejected,
    /// The registry created a checker on first use
    CheckerInstantiated,
    /// A discriminator value was read and matched against its variants
    DiscriminatorResolved,
}

impl Event {
    /// Returns the stable event name
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ValidationBegin => "VALIDATION_BEGIN",
            Event::ValidationComplete => "VALIDATION_COMPLETE",
            Event::RuleRejected => "RULE_REJECTED",
            Event::CheckerInstantiated => "CHECKER_INSTANTIATED",
            Event::DiscriminatorResolved => "DISCRIMINATOR_RESOLVED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
