use serde::Serialize;
use crate::error::LightError;

/// Hue in degrees (0-360), saturation and brightness in percent (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsb {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Hsb {
    pub fn new(hue: f64, saturation: f64, brightness: f64) -> Self {
        Self { hue, saturation, brightness }
    }
}

impl Rgb {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Lowercase hex without a leading `#`, the format the device expects
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Convert a hsb (hsv) value to rgb
///
/// Zero saturation or brightness degenerates to grey or black
pub fn hsb_to_rgb(hsb: Hsb) -> Rgb {
    let hue = hsb.hue.rem_euclid(360.0);
    let saturation = (hsb.saturation / 100.0).clamp(0.0, 1.0);
    let value = (hsb.brightness / 100.0).clamp(0.0, 1.0);

    let sector = hue / 60.0;
    let fraction = sector - sector.floor();
    let chroma = value * saturation;

    let min = value - chroma;
    let falling = value - chroma * fraction;
    let rising = value - chroma * (1.0 - fraction);

    let (red, green, blue) = match sector.floor() as u32 % 6 {
        0 => (value, rising, min),
        1 => (falling, value, min),
        2 => (min, value, rising),
        3 => (min, falling, value),
        4 => (rising, min, value),
        _ => (value, min, falling),
    };

    Rgb { red: channel(red), green: channel(green), blue: channel(blue) }
}

/// Convert a rgb value to hsb (hsv)
///
/// Greys have neither hue nor saturation, both are reported as 0
pub fn rgb_to_hsb(rgb: Rgb) -> Hsb {
    let red = rgb.red as f64 / 255.0;
    let green = rgb.green as f64 / 255.0;
    let blue = rgb.blue as f64 / 255.0;

    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);
    let delta = max - min;

    let hue = if delta == 0.0 {
        0.0
    } else if max == red {
        60.0 * ((green - blue) / delta).rem_euclid(6.0)
    } else if max == green {
        60.0 * ((blue - red) / delta + 2.0)
    } else {
        60.0 * ((red - green) / delta + 4.0)
    };

    let saturation = if max == 0.0 { 0.0 } else { delta / max * 100.0 };

    Hsb { hue, saturation, brightness: max * 100.0 }
}

/// Parse the six digit hex color the device reports
pub fn parse_hex(hex: &str) -> Result<Rgb, LightError> {
    let hex = hex.trim();
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(LightError::InvalidColorFormat(hex.to_string()));
    }

    let rgb = colorsys::Rgb::from_hex_str(&hex.to_ascii_lowercase())
        .map_err(|_| LightError::InvalidColorFormat(hex.to_string()))?;
    Ok(Rgb { red: byte(rgb.red()), green: byte(rgb.green()), blue: byte(rgb.blue()) })
}

fn channel(value: f64) -> u8 {
    byte(value * 255.0)
}

fn byte(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hue_distance(a: f64, b: f64) -> f64 {
        let distance = (a - b).abs() % 360.0;
        distance.min(360.0 - distance)
    }

    #[test]
    fn primaries() {
        assert_eq!(hsb_to_rgb(Hsb::new(0.0, 100.0, 100.0)), Rgb::new(255, 0, 0));
        assert_eq!(hsb_to_rgb(Hsb::new(120.0, 100.0, 100.0)), Rgb::new(0, 255, 0));
        assert_eq!(hsb_to_rgb(Hsb::new(240.0, 100.0, 100.0)), Rgb::new(0, 0, 255));
        assert_eq!(hsb_to_rgb(Hsb::new(360.0, 100.0, 100.0)), Rgb::new(255, 0, 0));
        assert_eq!(hsb_to_rgb(Hsb::new(30.0, 100.0, 100.0)), Rgb::new(255, 128, 0));
    }

    #[test]
    fn greys_have_no_hue() {
        assert_eq!(hsb_to_rgb(Hsb::new(200.0, 0.0, 100.0)), Rgb::new(255, 255, 255));
        assert_eq!(hsb_to_rgb(Hsb::new(200.0, 0.0, 50.0)), Rgb::new(128, 128, 128));
        assert_eq!(hsb_to_rgb(Hsb::new(200.0, 100.0, 0.0)), Rgb::new(0, 0, 0));

        assert_eq!(rgb_to_hsb(Rgb::new(255, 255, 255)), Hsb::new(0.0, 0.0, 100.0));
        assert_eq!(rgb_to_hsb(Rgb::new(0, 0, 0)), Hsb::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn hex_format() {
        assert_eq!(Rgb::new(255, 128, 0).to_hex(), "ff8000");
        assert_eq!(Rgb::new(0, 10, 1).to_hex(), "000a01");
    }

    #[test]
    fn parses_device_hex() {
        assert_eq!(parse_hex("ffffff").unwrap(), Rgb::new(255, 255, 255));
        assert_eq!(parse_hex("FF8000\n").unwrap(), Rgb::new(255, 128, 0));
        assert_eq!(parse_hex("00000a").unwrap(), Rgb::new(0, 0, 10));
    }

    #[test]
    fn rejects_malformed_hex() {
        for body in ["", "fff", "#ffffff", "fffffff", "gg0000", "12 456"] {
            assert!(
                matches!(parse_hex(body), Err(LightError::InvalidColorFormat(_))),
                "'{body}' should be rejected"
            );
        }
    }

    #[test]
    fn rgb_survives_hsb_round_trip() {
        for red in (0..=255).step_by(15) {
            for green in (0..=255).step_by(17) {
                for blue in (0..=255).step_by(51) {
                    let rgb = Rgb::new(red as u8, green as u8, blue as u8);
                    assert_eq!(hsb_to_rgb(rgb_to_hsb(rgb)), rgb);
                }
            }
        }
    }

    #[test]
    fn hsb_survives_hex_round_trip() {
        for hue in (0..360).step_by(7) {
            for saturation in [70, 80, 90, 100] {
                for brightness in [70, 80, 90, 100] {
                    let hsb = Hsb::new(hue as f64, saturation as f64, brightness as f64);
                    let hex = hsb_to_rgb(hsb).to_hex();
                    let back = rgb_to_hsb(parse_hex(&hex).unwrap());

                    assert!(hue_distance(back.hue, hsb.hue) <= 1.0, "{hsb:?} came back as {back:?}");
                    assert!((back.saturation - hsb.saturation).abs() <= 1.0, "{hsb:?} came back as {back:?}");
                    assert!((back.brightness - hsb.brightness).abs() <= 1.0, "{hsb:?} came back as {back:?}");
                }
            }
        }
    }
}
