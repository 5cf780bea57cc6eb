use std::process::ExitCode;

use clap::{CommandFactory, Parser};

mod cli;
mod config;
mod dispatch;
mod logging;
mod network;
mod wol;

use cli::Cli;
use config::ConfigSet;

fn main() -> ExitCode {
    let args = Cli::parse();

    if let Err(err) = logging::init() {
        eprintln!("{}", err);
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> anyhow::Result<ExitCode> {
    if args.list_interfaces {
        print_interfaces();
        return Ok(ExitCode::SUCCESS);
    }

    // Direct sends bypass the config entirely.
    if let Some(mac) = args.mac.as_deref() {
        dispatch::send_magic_packet(mac, &args.broadcast, args.port, args.interface.as_deref())?;
        return Ok(ExitCode::SUCCESS);
    }
    if let Some(name) = args.name.as_deref() {
        if wol::looks_like_mac(name) {
            dispatch::send_magic_packet(
                name,
                &args.broadcast,
                args.port,
                args.interface.as_deref(),
            )?;
            return Ok(ExitCode::SUCCESS);
        }
    }

    let config_path = args.config.unwrap_or_else(config::default_config_path);
    let config = ConfigSet::load(&config_path)?;

    if args.list {
        print_targets(&config);
        return Ok(ExitCode::SUCCESS);
    }

    let Some(name) = args.name.as_deref() else {
        Cli::command().print_help()?;
        return Ok(ExitCode::FAILURE);
    };

    let Some(target) = config.get(name) else {
        eprintln!("Computer '{}' not found in config.", name);
        eprintln!("Available computers: {}", config.names().join(", "));
        return Ok(ExitCode::FAILURE);
    };

    let Some(mac) = target.mac.as_deref() else {
        eprintln!("Computer '{}' is missing 'mac' in config.", name);
        return Ok(ExitCode::FAILURE);
    };

    dispatch::send_magic_packet(mac, &target.broadcast, target.port, target.interface.as_deref())?;
    Ok(ExitCode::SUCCESS)
}

fn print_interfaces() {
    println!("Available network interfaces:");
    for iface in network::enumerate_interfaces() {
        println!("  {}", iface);
    }
}

fn print_targets(config: &ConfigSet) {
    println!("Available computers:");
    for (name, target) in config.iter() {
        println!(
            "- {}: mac={}, broadcast={}, port={}, interface={}",
            name,
            target.mac.as_deref().unwrap_or("N/A"),
            target.broadcast,
            target.port,
            target.interface.as_deref().unwrap_or("all")
        );
    }
}
