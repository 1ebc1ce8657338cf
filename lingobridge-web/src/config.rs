use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use lingobridge_mt::{MtResult, MyMemoryProvider};

/// Command line and environment configuration of the proxy server
#[derive(Debug, Clone, Parser)]
#[command(name = "lingobridge-web", version, about = "Translation proxy in front of MyMemory")]
pub struct ServerConfig {
    /// Address the HTTP server listens on
    #[arg(long, env = "LINGOBRIDGE_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Base URL of the MyMemory API
    #[arg(long, env = "MYMEMORY_URL", default_value = MyMemoryProvider::DEFAULT_BASE_URL)]
    pub upstream_url: String,

    /// Contact address sent upstream as `de`
    #[arg(long, env = "MYMEMORY_EMAIL")]
    pub contact_email: Option<String>,

    /// Give up on upstream calls after this many seconds (transport default when unset)
    #[arg(long, env = "MYMEMORY_TIMEOUT_SECS")]
    pub upstream_timeout_secs: Option<u64>,
}

impl ServerConfig {
    pub fn provider(&self) -> MtResult<MyMemoryProvider> {
        let provider = match self.upstream_timeout_secs {
            Some(secs) => {
                MyMemoryProvider::with_timeout(&self.upstream_url, Duration::from_secs(secs))?
            }
            None => MyMemoryProvider::new(&self.upstream_url)?,
        };

        Ok(match self.contact_email.as_deref().map(str::trim) {
            Some(email) if !email.is_empty() => provider.with_contact_email(email),
            _ => provider,
        })
    }
}
