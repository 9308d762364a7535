use super::ConfigError;

/// Constructor validation lifecycle shared by filter and resampler kernels.
///
/// Parameter errors (negative cutoff, odd kernel sizes, zero ratios) are
/// rejected here, once, so `apply` never has to re-validate.
pub trait KernelLifecycle: Sized {
    /// Kernel config type.
    type Config;

    /// Construct a validated kernel from config.
    fn try_new(config: Self::Config) -> Result<Self, ConfigError>;
}
