pub mod console_sink;
pub mod detector_source;
pub mod gpio_sink;
pub mod line_source;
