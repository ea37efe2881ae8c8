//! Configuration loaded from `.campusvault.toml`.

pub mod settings;

pub use settings::Settings;
