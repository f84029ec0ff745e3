use thiserror::Error;

/// Infrastructure errors that can occur during startup.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Configuration error: {var} is invalid ({reason})")]
    InvalidConfig { var: &'static str, reason: String },

    #[error("Catalog client setup failed")]
    CatalogClient(#[source] crate::app_error::AppError),

    #[error("TCP bind failed")]
    TcpBind(#[source] std::io::Error),

    #[error("Server error")]
    Server(#[source] std::io::Error),
}
