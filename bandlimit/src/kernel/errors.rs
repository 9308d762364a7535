use core::{error, fmt};

/// Validation errors raised at kernel construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A configuration argument value is invalid.
    InvalidArgument {
        /// Name of the argument.
        arg: &'static str,
        /// Human readable reason.
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidArgument { arg, reason } => {
                write!(f, "Invalid argument `{arg}`: {reason}")
            }
        }
    }
}

impl error::Error for ConfigError {}

/// Runtime invariant violations raised by checked `apply` entrypoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecInvariantViolation {
    /// An execution precondition was violated.
    InvalidState {
        /// Human readable reason.
        reason: &'static str,
    },
    /// Primitive-level failure surfaced by the convolution core.
    Core(bandlimit_core::Error),
    /// Configuration failure surfaced at apply time.
    Config(ConfigError),
}

impl From<ConfigError> for ExecInvariantViolation {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<bandlimit_core::Error> for ExecInvariantViolation {
    fn from(value: bandlimit_core::Error) -> Self {
        Self::Core(value)
    }
}

impl fmt::Display for ExecInvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecInvariantViolation::InvalidState { reason } => {
                write!(f, "Execution invariant violation: {reason}")
            }
            ExecInvariantViolation::Core(err) => write!(f, "{err}"),
            ExecInvariantViolation::Config(err) => write!(f, "{err}"),
        }
    }
}

impl error::Error for ExecInvariantViolation {}
