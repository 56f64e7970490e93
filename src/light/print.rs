use std::fmt::{Display, Formatter};

use colored::{Colorize, CustomColor};

use super::accessory::AccessoryInformation;
use super::{CharacteristicValue, LightStatus};

impl Display for LightStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut lines = vec![];
        let state = if self.on { "Turned on" } else { "Turned off" };
        lines.push(format!("{}: {state}", "State".bold()));

        let block = "  ".on_custom_color(CustomColor::new(self.rgb.red, self.rgb.green, self.rgb.blue));
        lines.push(format!("{}: #{} {block}", "Color".bold(), self.hex));
        lines.push(format!("{}: {}", "Hue".bold(), self.hue));
        lines.push(format!("{}: {}%", "Saturation".bold(), self.saturation));
        lines.push(format!("{}: {}%", "Brightness".bold(), self.brightness));

        f.write_str(lines.join("\n").as_str())
    }
}

impl Display for AccessoryInformation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let lines = [
            format!("{}: {}", "Name".bold(), self.name),
            format!("{}: {}", "Service".bold(), self.service),
            format!("{}: {}", "Manufacturer".bold(), self.manufacturer),
            format!("{}: {}", "Model".bold(), self.model),
            format!("{}: {}", "Serial number".bold(), self.serial_number),
            format!("{}: {}", "Firmware".bold(), self.firmware_revision),
        ];

        f.write_str(lines.join("\n").as_str())
    }
}

impl Display for CharacteristicValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CharacteristicValue::Power(on) => write!(f, "{}", if *on { "on" } else { "off" }),
            CharacteristicValue::Hue(hue) => write!(f, "{hue}"),
            CharacteristicValue::Saturation(saturation) => write!(f, "{saturation}%"),
            CharacteristicValue::Brightness(brightness) => write!(f, "{brightness}%"),
        }
    }
}
