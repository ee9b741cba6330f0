mod config_store;
mod validate;

pub use config_store::{ConfigStore, from_yaml, to_yaml};
pub use validate::Validate;
