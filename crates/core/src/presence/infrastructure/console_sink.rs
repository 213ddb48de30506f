use crate::presence::domain::debouncer::OutputCommand;
use crate::presence::domain::output_sink::OutputSink;

/// Sink that logs level *transitions* instead of touching hardware.
///
/// Dry-run stand-in for [`super::gpio_sink::GpioOutputSink`]. The engine
/// re-emits `Activate` every qualifying frame; logging each repeat would
/// flood the output, so only edges are reported.
pub struct ConsoleOutputSink {
    active: bool,
}

impl ConsoleOutputSink {
    pub fn new() -> Self {
        Self { active: false }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Default for ConsoleOutputSink {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for ConsoleOutputSink {
    fn apply(&mut self, command: OutputCommand) -> Result<(), Box<dyn std::error::Error>> {
        let level = matches!(command, OutputCommand::Activate);
        if level != self.active {
            self.active = level;
            log::info!("output {}", if level { "ON" } else { "OFF" });
        }
        Ok(())
    }
}
