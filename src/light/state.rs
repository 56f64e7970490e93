use serde::Serialize;
use crate::light::color::{hsb_to_rgb, Hsb, Rgb};

/// Last known color of the light
///
/// The device only speaks rgb, so changing a single hsb component means rebuilding
/// the full rgb value from the other two cached components. Lives in memory only
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CachedColorState {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
}

impl Default for CachedColorState {
    fn default() -> Self {
        Self { hue: 0.0, saturation: 0.0, brightness: 100.0 }
    }
}

impl CachedColorState {
    /// Replace all three components, e.g. after reading the color from the device
    pub fn update(&mut self, hsb: Hsb) {
        self.hue = hsb.hue;
        self.saturation = hsb.saturation;
        self.brightness = hsb.brightness;
    }

    pub fn hsb(&self) -> Hsb {
        Hsb::new(self.hue, self.saturation, self.brightness)
    }

    pub fn rgb(&self) -> Rgb {
        hsb_to_rgb(self.hsb())
    }
}
