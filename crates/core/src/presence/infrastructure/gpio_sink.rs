use rppal::gpio::{Gpio, OutputPin};

use crate::presence::domain::debouncer::OutputCommand;
use crate::presence::domain::output_sink::OutputSink;

/// LED sink driving a Raspberry Pi GPIO pin (BCM numbering).
///
/// The pin is claimed and driven low on construction so the indicator
/// starts dark. Writes are plain level sets, so repeated `Activate`
/// commands are harmless. The pin is released and reset to its default
/// state on drop.
pub struct GpioOutputSink {
    pin: OutputPin,
}

impl GpioOutputSink {
    pub fn new(bcm_pin: u8) -> Result<Self, rppal::gpio::Error> {
        let pin = Gpio::new()?.get(bcm_pin)?.into_output_low();
        Ok(Self { pin })
    }
}

impl Drop for GpioOutputSink {
    fn drop(&mut self) {
        // Leave the indicator dark on shutdown, whatever the loop last set.
        self.pin.set_low();
    }
}

impl OutputSink for GpioOutputSink {
    fn apply(&mut self, command: OutputCommand) -> Result<(), Box<dyn std::error::Error>> {
        match command {
            OutputCommand::Activate => self.pin.set_high(),
            OutputCommand::Deactivate => self.pin.set_low(),
        }
        Ok(())
    }
}
