use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid configuration: {field} = {value} ({reason})")]
    InvalidConfig {
        field: &'static str,
        value: u64,
        reason: &'static str,
    },

    #[error("failed to spawn {role} thread: {source}")]
    Spawn {
        role: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{role} thread panicked")]
    ActorPanicked { role: String },
}

pub type Result<T> = std::result::Result<T, SimError>;
