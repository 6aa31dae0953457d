use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing::warn;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_BOOKING_SESSIONS: usize = 1000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub directory_seed_path: Option<String>,
    pub max_booking_sessions: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            directory_seed_path: None,
            max_booking_sessions: DEFAULT_MAX_BOOKING_SESSIONS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            host: env::var("HOST")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_else(|| {
                    warn!("HOST not set or invalid, using {}", defaults.host);
                    defaults.host
                }),
            port: env::var("PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_else(|| {
                    warn!("PORT not set or invalid, using {}", defaults.port);
                    defaults.port
                }),
            directory_seed_path: env::var("DIRECTORY_SEED_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty()),
            max_booking_sessions: env::var("MAX_BOOKING_SESSIONS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .filter(|max: &usize| *max > 0)
                .unwrap_or_else(|| {
                    warn!("MAX_BOOKING_SESSIONS not set or invalid, using {}", defaults.max_booking_sessions);
                    defaults.max_booking_sessions
                }),
        };

        if !config.has_directory_seed() {
            warn!("DIRECTORY_SEED_PATH not set, serving the built-in demo directory");
        }

        config
    }

    pub fn has_directory_seed(&self) -> bool {
        self.directory_seed_path.is_some()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
