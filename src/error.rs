/// Failures surfaced by the device layer.
///
/// Initialization failures (`AllocationFailed` through `ExposureFailed`, plus
/// `InvalidConfig`) are fatal to [`Registry::initialize`](crate::Registry::initialize)
/// and are only returned after every acquired host resource has been released.
/// The rest are per-operation and leave the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("device number allocation failed")]
    AllocationFailed,
    #[error("device class creation failed")]
    ClassCreationFailed,
    #[error("device registration failed")]
    RegistrationFailed,
    #[error("device node creation failed")]
    ExposureFailed,
    #[error("invalid device table")]
    InvalidConfig,
    #[error("no such device")]
    NotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error("invalid argument")]
    InvalidArgument,
    #[error("no space left in device")]
    OutOfSpace,
    #[error("bad address")]
    TransferFault,
}

impl Error {
    /// Negative errno value for hosts that speak errno.
    pub fn to_errno(&self) -> isize {
        match self {
            Error::PermissionDenied => -1, // EPERM
            Error::TransferFault => -14,   // EFAULT
            Error::RegistrationFailed => -16, // EBUSY
            Error::ExposureFailed => -17,  // EEXIST
            Error::NotFound => -19,        // ENODEV
            Error::InvalidArgument | Error::InvalidConfig => -22, // EINVAL
            // ENOMEM
            Error::AllocationFailed | Error::ClassCreationFailed | Error::OutOfSpace => -12,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
