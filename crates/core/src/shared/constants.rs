pub const SEETA_MODEL_NAME: &str = "seeta_fd_frontal_v1.0.bin";
pub const SEETA_MODEL_URL: &str =
    "https://github.com/atomashpolskiy/rustface/raw/master/model/seeta_fd_frontal_v1.0.bin";

/// Consecutive same-valued frames that must be *exceeded* to flip regime.
pub const DEFAULT_FRAME_THRESHOLD: u32 = 5;

/// Seconds of continuous engagement before the output is asserted.
pub const DEFAULT_DWELL_SECS: f64 = 5.0;

/// BCM pin driving the LED (physical pin 7 on the Raspberry Pi header).
pub const DEFAULT_LED_PIN: u8 = 4;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
