use std::fmt;
use std::io;
use std::result;

/// `Error` enumerates all possible errors reported by the codec.
#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// An IO error occured while reading from the caller's stream.
    IoError(io::Error),
    /// The supplied bytes do not form a structurally valid VINT: the total
    /// length disagrees with the encoded width, no marker bit is
    /// discoverable, or the input ended mid-VINT.
    Malformed(&'static str),
    /// The VINT is structurally valid but its payload does not fit the
    /// decoded integer type. Limits prevent silent truncation of
    /// oversized inputs.
    Limit(&'static str),
    /// An explicitly requested octet length cannot hold the value being
    /// encoded.
    InvalidWidth { requested: usize, required: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::IoError(err) => err.fmt(f),
            Error::Malformed(msg) => {
                write!(f, "malformed vint: {}", msg)
            }
            Error::Limit(constraint) => {
                write!(f, "limit reached: {}", constraint)
            }
            Error::InvalidWidth {
                requested,
                required,
            } => {
                write!(
                    f,
                    "requested octet length {} cannot hold the value (needs {})",
                    requested, required
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IoError(err)
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Convenience function to create a malformed vint error.
pub fn malformed_error<T>(desc: &'static str) -> Result<T> {
    Err(Error::Malformed(desc))
}

/// Convenience function to create a limit error.
pub fn limit_error<T>(constraint: &'static str) -> Result<T> {
    Err(Error::Limit(constraint))
}

/// Convenience function to create an invalid width error.
pub fn invalid_width_error<T>(requested: usize, required: usize) -> Result<T> {
    Err(Error::InvalidWidth {
        requested,
        required,
    })
}
