//! Drive an rgb light which is controlled through plain http GET endpoints
//!
//! The light is exposed as power, hue, saturation and brightness characteristics.
//! [`light::accessory::LightAccessory`] translates between the hsb model of the host
//! and the rgb hex values the device understands.

pub mod config;
pub mod error;
pub mod light;
