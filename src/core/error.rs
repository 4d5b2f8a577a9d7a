use crate::core::unit::{TimeField, TimeUnit};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported time unit: {0}")]
    UnsupportedUnit(TimeUnit),
    #[error("field {field} never changes across one {unit} step")]
    IncompatibleField { unit: TimeUnit, field: TimeField },
    #[error("unknown zone: {0}")]
    UnknownZone(String),
    #[error("timestamp out of range: {0} ms")]
    TimestampOutOfRange(i64),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::UnsupportedUnit(TimeUnit::Weeks).to_string(),
            "unsupported time unit: weeks"
        );
        assert_eq!(
            Error::IncompatibleField {
                unit: TimeUnit::Days,
                field: TimeField::HourOfDay,
            }
            .to_string(),
            "field hour_of_day never changes across one days step"
        );
        assert_eq!(
            Error::UnknownZone("Mars/Olympus".to_string()).to_string(),
            "unknown zone: Mars/Olympus"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
