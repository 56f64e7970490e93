use std::path::PathBuf;
use clap::{Parser, Subcommand};
use httprgb::light::validation::{validate_brightness, validate_hue, validate_saturation};
use httprgb::light::Characteristic;
use spinoff::Spinner;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the configuration file which should be used [default: <config dir>/httprgb/config.toml]
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Print result (if any) as json
    #[arg(long, short, default_value_t = false, global = true)]
    pub json: bool
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Turn the light on
    On,
    /// Turn the light off
    Off,
    /// Print whether the light is turned on
    Power,
    /// Read a single characteristic of the light
    Get {
        #[arg(value_enum)]
        characteristic: Characteristic,
    },
    /// Update characteristics of the light
    Set {
        /// Hue value between 0 and 360
        #[arg(value_parser = parse_hue_value, long)]
        hue: Option<f64>,

        /// Saturation value between 0 and 100
        #[arg(value_parser = parse_saturation_value, long, short)]
        saturation: Option<f64>,

        /// Brightness value between 0 and 100
        #[arg(value_parser = parse_brightness_value, long, short)]
        brightness: Option<u8>,

        /// Turn the light on or off
        #[arg(long, short)]
        power: Option<bool>,
    },
    /// Print power state and color of the light
    Status,
    /// Print the identification of the accessory
    Info,
}

fn parse_hue_value(s: &str) -> Result<f64, String> {
    let value = s.parse::<f64>().map_err(|_| format!("'{s}' is not a valid number"))?;
    validate_hue(value).map_err(|err| err.code.to_string())?;
    Ok(value)
}

fn parse_saturation_value(s: &str) -> Result<f64, String> {
    let value = s.parse::<f64>().map_err(|_| format!("'{s}' is not a valid number"))?;
    validate_saturation(value).map_err(|err| err.code.to_string())?;
    Ok(value)
}

fn parse_brightness_value(s: &str) -> Result<u8, String> {
    let value = s.parse::<u8>().map_err(|_| format!("'{s}' is not a valid integer"))?;
    validate_brightness(value).map_err(|err| err.code.to_string())?;
    Ok(value)
}

pub trait SpinnerOpt {
    fn success(&mut self, message: &str);

    fn fail(&mut self, message: &str);
}

impl SpinnerOpt for Option<Spinner> {
    fn success(&mut self, message: &str) {
        if let Some(spinner) = self {
            spinner.success(message)
        }
    }

    fn fail(&mut self, message: &str) {
        if let Some(spinner) = self {
            spinner.fail(message)
        }
    }
}
