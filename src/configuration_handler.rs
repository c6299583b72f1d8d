use crate::configuration::Configuration;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(about = "Booking backend for the kitesurfing school")]
pub struct ConfigurationHandler {
    /// Port the HTTP server listens on
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// JSON file holding users and bookings
    #[arg(long, default_value = "kite_bookings.json")]
    data_file: PathBuf,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn port(&self) -> u16 {
        self.port
    }

    fn data_file(&self) -> PathBuf {
        self.data_file.clone()
    }
}
