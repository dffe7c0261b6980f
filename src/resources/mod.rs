pub mod config;

pub use config::simulation::SimulationConfig;
