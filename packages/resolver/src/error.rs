use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("Invalid device mode: {0} (expected desktop, tablet, mobile, auto:N or custom:N)")]
    InvalidDeviceMode(String),
}
