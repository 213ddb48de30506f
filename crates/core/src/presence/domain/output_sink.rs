use crate::presence::domain::debouncer::OutputCommand;

/// Port for the physical indicator driven by the debounce engine.
///
/// Implementations must be idempotent level-setters: re-applying the
/// level already held is a no-op. The engine re-emits `Activate` on every
/// qualifying frame and relies on that.
pub trait OutputSink: Send {
    fn apply(&mut self, command: OutputCommand) -> Result<(), Box<dyn std::error::Error>>;
}

/// Sink that discards all commands.
///
/// Used by tests where the output level is irrelevant.
pub struct NullOutputSink;

impl OutputSink for NullOutputSink {
    fn apply(&mut self, _command: OutputCommand) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}
