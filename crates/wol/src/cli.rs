use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "wol",
    about = "Wake-on-LAN using YAML configuration, computer name, or direct MAC input",
    version
)]
pub struct Cli {
    /// Target computer name defined in the config file, or a MAC address
    pub name: Option<String>,

    /// YAML config file (default: ~/.wol.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// List available computers from config
    #[arg(short, long)]
    pub list: bool,

    /// List available network interfaces and exit
    #[arg(long)]
    pub list_interfaces: bool,

    /// Directly specify MAC address (e.g. 00:11:22:33:44:55)
    #[arg(short, long)]
    pub mac: Option<String>,

    /// Broadcast address
    #[arg(short, long, default_value = "255.255.255.255")]
    pub broadcast: String,

    /// UDP port
    #[arg(short, long, default_value_t = 9)]
    pub port: u16,

    /// Network interface to use (default: all interfaces)
    #[arg(short, long)]
    pub interface: Option<String>,
}
