use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_CLINIC_LOCATION: &str = "DocSphere Clinic";
pub const DEFAULT_APPOINTMENT_MINUTES: u32 = 30;
pub const DEFAULT_SESSION_TTL_MINUTES: u32 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub seed_path: Option<PathBuf>,
    pub clinic_location: String,
    pub appointment_minutes: u32,
    pub session_ttl_minutes: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            seed_path: None,
            clinic_location: DEFAULT_CLINIC_LOCATION.to_string(),
            appointment_minutes: DEFAULT_APPOINTMENT_MINUTES,
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Missing or
    /// malformed values fall back to their defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = match lookup("DOCSPHERE_BIND_ADDR") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("DOCSPHERE_BIND_ADDR '{}' is not a socket address, using default", raw);
                default_bind_addr()
            }),
            None => {
                warn!("DOCSPHERE_BIND_ADDR not set, using default");
                default_bind_addr()
            }
        };

        let seed_path = lookup("DOCSPHERE_SEED_PATH")
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);
        if seed_path.is_none() {
            warn!("DOCSPHERE_SEED_PATH not set, using built-in demo seed");
        }

        let clinic_location = lookup("DOCSPHERE_CLINIC_LOCATION")
            .unwrap_or_else(|| {
                warn!("DOCSPHERE_CLINIC_LOCATION not set, using default");
                DEFAULT_CLINIC_LOCATION.to_string()
            });

        let appointment_minutes =
            minutes_var(&lookup, "DOCSPHERE_APPOINTMENT_MINUTES", DEFAULT_APPOINTMENT_MINUTES);
        let session_ttl_minutes =
            minutes_var(&lookup, "DOCSPHERE_SESSION_TTL_MINUTES", DEFAULT_SESSION_TTL_MINUTES);

        Self {
            bind_addr,
            seed_path,
            clinic_location,
            appointment_minutes,
            session_ttl_minutes,
        }
    }

    pub fn uses_builtin_seed(&self) -> bool {
        self.seed_path.is_none()
    }

    /// How long a booking session may sit idle before it is dropped.
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(u64::from(self.session_ttl_minutes) * 60)
    }
}

/// A positive minute count, or `default` with a warning.
fn minutes_var<F>(lookup: &F, key: &str, default: u32) -> u32
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.parse::<u32>() {
            Ok(minutes) if minutes > 0 => minutes,
            _ => {
                warn!("{} '{}' is invalid, using default", key, raw);
                default
            }
        },
        None => {
            warn!("{} not set, using default", key);
            default
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}
