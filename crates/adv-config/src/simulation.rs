//! Simulation run and trigger configuration.

use serde::{Deserialize, Serialize};

fn default_input_path() -> String {
    String::from("victory.csv")
}

fn default_bind_addr() -> String {
    String::from("0.0.0.0:7071")
}

fn default_route() -> String {
    String::from("/api/simulations")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// CSV of victory conditions to evaluate.
    #[serde(default = "default_input_path")]
    pub input_path: String,

    /// Address the HTTP trigger listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Path of the trigger endpoint.
    #[serde(default = "default_route")]
    pub route: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            bind_addr: default_bind_addr(),
            route: default_route(),
        }
    }
}
