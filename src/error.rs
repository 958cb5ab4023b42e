/// Errors raised by the gyro engine and its display collaborators
#[derive(Debug, thiserror::Error)]
pub enum GyroError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid angle: {0} is not finite")]
    InvalidAngle(f64),
    #[error("display error: {0}")]
    Display(String),
}

impl From<winit::error::EventLoopError> for GyroError {
    fn from(err: winit::error::EventLoopError) -> Self {
        GyroError::Display(err.to_string())
    }
}

impl From<winit::error::OsError> for GyroError {
    fn from(err: winit::error::OsError) -> Self {
        GyroError::Display(err.to_string())
    }
}

impl From<pixels::Error> for GyroError {
    fn from(err: pixels::Error) -> Self {
        GyroError::Display(err.to_string())
    }
}

pub(crate) fn ensure_finite(value: f64) -> Result<f64, GyroError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GyroError::InvalidAngle(value))
    }
}
