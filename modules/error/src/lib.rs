use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

/// Will be used each time an error can occur
pub type Result<T> = core::result::Result<T, Error>;

/// Represent an error
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Error {
    Config(ConfigError),
    Render(RenderError)
}

impl From<ConfigError> for Error {
    fn from(value: ConfigError) -> Self {
        Error::Config(value)
    }
}

impl From<RenderError> for Error {
    fn from(value: RenderError) -> Self {
        Error::Render(value)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for Error {}

/// Represent an error that can occur inside the config system
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConfigError {
    InvalidFile(String),
    CannotReadFile(String),
}

/// Represent an error that can occur while a renderer is built or applied
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RenderError {
    /// A renderer parameter is out of its accepted range
    InvalidConfiguration(String),
}

#[cfg(test)]
mod test {
    use crate::{ConfigError, Error, RenderError};

    #[test]
    fn display_uses_debug_form() {
        let e = Error::from(RenderError::InvalidConfiguration("block_size = 0".into()));

        assert_eq!(e.to_string(), "Render(InvalidConfiguration(\"block_size = 0\"))");
    }

    #[test]
    fn conversions() {
        assert!(matches!(Error::from(ConfigError::CannotReadFile("a".into())), Error::Config(_)));
        assert!(matches!(Error::from(RenderError::InvalidConfiguration("b".into())), Error::Render(_)));
    }
}
