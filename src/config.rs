//! Startup configuration.
//!
//! Everything arrives on the command line — no environment variables, no
//! config files. The cache directory is the one required flag; a launch
//! without it fails before the listener is ever bound.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

/// Command-line options for the stockroom binary.
#[derive(Debug, Parser)]
#[command(name = "stockroom", version, about = "Inventory-tracking HTTP service")]
pub struct Config {
    /// Address to bind.
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,

    /// Directory where uploaded photos are stored. Created recursively if
    /// missing.
    #[arg(short, long)]
    pub cache: PathBuf,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_and_port_have_defaults() {
        let config = Config::try_parse_from(["stockroom", "--cache", "/tmp/photos"]).unwrap();
        assert_eq!(config.addr(), "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.cache, PathBuf::from("/tmp/photos"));
    }

    #[test]
    fn cache_directory_is_required() {
        assert!(Config::try_parse_from(["stockroom"]).is_err());
    }

    #[test]
    fn short_flags_parse() {
        let config =
            Config::try_parse_from(["stockroom", "-H", "0.0.0.0", "-p", "8080", "-c", "photos"])
                .unwrap();
        assert_eq!(config.addr(), "0.0.0.0:8080".parse().unwrap());
    }
}
