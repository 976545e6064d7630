use crate::types::Vehicle;
use log::warn;
use std::env;

pub struct Config {
    pub username: String,
    pub password: String,
    /// Tracked vehicles in declared order; refreshes iterate this order.
    pub vehicles: Vec<Vehicle>,
    pub port: u16,
}

impl Config {
    /// Reads the process configuration once. Missing variables warn and
    /// default to empty so the server still starts; lookups for an empty
    /// plate simply fail per-vehicle later.
    pub fn from_env() -> Config {
        dotenv::dotenv().ok();
        Config {
            username: optional_var("EASYTRACK_USER"),
            password: optional_var("EASYTRACK_PASS"),
            vehicles: vec![
                Vehicle {
                    key: "bus_1".to_string(),
                    plate: optional_var("BUS_1"),
                },
                Vehicle {
                    key: "bus_2".to_string(),
                    plate: optional_var("BUS_2"),
                },
                Vehicle {
                    key: "bus_3".to_string(),
                    plate: optional_var("BUS_3"),
                },
            ],
            port: env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(8080),
        }
    }

    pub fn vehicle_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.vehicles.iter().map(|vehicle| vehicle.key.clone())
    }
}

fn optional_var(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| {
        warn!("Missing environment variable {}", name);
        String::new()
    })
}
