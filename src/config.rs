use std::{
    env,
    fmt::Display,
    net::{Ipv4Addr, SocketAddr},
    str::FromStr,
};

pub struct Config {
    pub http_port: u16,
    pub relay_port: u16,
    pub mongodb_url: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            http_port: try_load("HTTP_PORT", "3000"),
            relay_port: try_load("RELAY_PORT", "5000"),
            mongodb_url: try_load("MONGODB_URL", "mongodb://localhost:27017/"),
        }
    }

    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::LOCALHOST, self.http_port))
    }

    pub fn relay_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::LOCALHOST, self.relay_port))
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            log::info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            log::warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
