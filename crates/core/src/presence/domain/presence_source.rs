/// Port for the per-frame presence signal.
///
/// Implementations may be stateful (frame counters, open devices),
/// hence `&mut self`. `Ok(None)` signals end of stream; an error stops
/// the call stream and leaves the engine's last committed state intact.
pub trait PresenceSource: Send {
    fn next_sample(&mut self) -> Result<Option<bool>, Box<dyn std::error::Error>>;
}
