use std::process::exit;
use anyhow::Context;
use clap::Parser;
use log::{error, warn};
use serde_json::json;
use spinoff::{spinners, Spinner};
use httprgb::config::LightConfig;
use httprgb::error::{LightError, LightErrorExt};
use httprgb::light::accessory::LightAccessory;
use httprgb::light::http::ReqwestTransport;
use httprgb::light::{connect, LightStatus};
use crate::cli::{Cli, Commands, SpinnerOpt};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();
    let json = cli.json;

    let config = LightConfig::load(cli.config.as_deref())?;
    let accessory = connect(&config, None).context("Unable to set up the light accessory")?;
    accessory.did_finish_launching();

    let mut spinner = (!json).then(|| Spinner::new(spinners::Dots, "Sending request...", None));
    let result = run(&accessory, cli.command, json, &mut spinner).await;

    if let Err(err) = &result {
        spinner.fail(&err.to_string());
        if json {
            println!("{}", json!({ "error": err.to_string() }));
        } else {
            error!("{err}");
        }
        if result.is_transport() {
            warn!("Is the device at the configured address up and running?");
        } else if result.is_http_status() {
            warn!("The device rejected the request, check the urls in the configuration");
        }
        exit(1)
    }

    Ok(())
}

async fn run(
    accessory: &LightAccessory<ReqwestTransport>,
    command: Commands,
    json: bool,
    spinner: &mut Option<Spinner>,
) -> Result<(), LightError> {
    let name = accessory.name().to_string();

    match command {
        Commands::On | Commands::Off => {
            let on = matches!(command, Commands::On);
            accessory.set_power_state(on).await?;
            spinner.success("Updated light");
            if json {
                println!("{}", json!({ "on": on }))
            } else {
                println!("'{name}' is now turned {}", if on { "on" } else { "off" })
            }
        }
        Commands::Power => {
            let on = accessory.get_power_state().await?;
            spinner.success("Fetched power state");
            if json {
                println!("{}", json!({ "on": on }))
            } else {
                println!("'{name}' is turned {}", if on { "on" } else { "off" })
            }
        }
        Commands::Get { characteristic } => {
            let value = accessory.get(characteristic).await?;
            spinner.success("Fetched characteristic");
            if json {
                let key = characteristic.to_string().to_lowercase();
                println!("{}", json!({ key: value }))
            } else {
                println!("{characteristic}: {value}")
            }
        }
        Commands::Set { hue, saturation, brightness, power } => {
            if let Some(hue) = hue {
                accessory.set_hue(hue).await?;
            }
            if let Some(saturation) = saturation {
                accessory.set_saturation(saturation).await?;
            }
            if let Some(brightness) = brightness {
                accessory.set_brightness(brightness).await?;
            }
            if let Some(on) = power {
                accessory.set_power_state(on).await?;
            }

            let cached = accessory.cached_color().await;
            spinner.success("Updated light");
            if json {
                println!("{}", json!({ "color": cached, "on": power }))
            } else {
                println!("'{name}' now shows #{}", cached.rgb().to_hex())
            }
        }
        Commands::Status => {
            let (on, color) = futures::future::try_join(
                accessory.get_power_state(),
                accessory.get_color(),
            ).await?;
            let status = LightStatus::new(&name, on, color);
            spinner.success(&format!("Status of '{name}':"));
            if json {
                println!("{}", json!(status))
            } else {
                println!("{status}")
            }
        }
        Commands::Info => {
            let information = accessory.information();
            spinner.success("Accessory information:");
            if json {
                println!("{}", json!(information))
            } else {
                println!("{information}")
            }
        }
    }

    Ok(())
}
