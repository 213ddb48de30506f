//! Core library for the interest meter: a debounced, dwell-gated
//! face-presence signal driving a digital output.
//!
//! The `presence` context holds the decision engine and its ports; the
//! `detection` and `video` contexts provide the optional built-in face
//! detector; `pipeline` wires them into a synchronous control loop.

pub mod detection;
pub mod pipeline;
pub mod presence;
pub mod shared;
pub mod video;
