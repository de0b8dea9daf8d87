//! Server configuration from command-line flags and the environment.

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "tradedesk")]
#[command(about = "In-memory trade submission service")]
pub struct Config {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "8080")]
    pub port: u16,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
