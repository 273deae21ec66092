use spotlight_core_types::SourceLocation;

/// Host-facing notifications published on the session event bus.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// Boot negotiation finished; the backend is accepting interaction.
    Ready,
    /// A click resolved to an element with a known source position; the
    /// host decides what "open this file" means.
    SourceLocated(SourceLocation),
}
