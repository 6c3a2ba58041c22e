use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersonError {
    #[error("Invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },

    #[error("Operation failed: {message}")]
    OperationFailed {
        message: String,
        #[source]
        source: Box<PersonError>,
    },
}

impl PersonError {
    pub fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }

    pub fn operation_failed(message: impl Into<String>, source: PersonError) -> Self {
        Self::OperationFailed {
            message: message.into(),
            source: Box::new(source),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

pub type Result<T> = std::result::Result<T, PersonError>;
