use thiserror::Error;

#[derive(Error, Debug)]
pub enum VigilError {
    #[error("could not find a service named: {0}")]
    ServiceNotFound(String),

    #[error("service {name} uses an unsupported host kind: {host}")]
    UnsupportedHost { name: String, host: String },

    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("unexpected {vendor} payload: {reason}")]
    Parse {
        vendor: &'static str,
        reason: String,
    },

    #[error("service {name} has no status URL configured")]
    MissingStatusUrl { name: String },

    #[error("service {name} has no component named: {component}")]
    UnknownComponent { name: String, component: String },
}

pub type Result<T> = std::result::Result<T, VigilError>;
