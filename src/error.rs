use std::fmt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Faults raised by the wire codecs.
///
/// Every failure is reported at the point of detection and propagated to the
/// caller; nothing at this layer retries, repairs, or logs-and-continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A decoder was handed a block with no encoded bytes behind it.
    MissingWireBytes,
    /// An element's type did not match the type expected at this call site.
    UnexpectedType { expected: u64, actual: u64 },
    /// A mandatory sub-element is absent.
    MissingSubElement {
        inside: &'static str,
        expected: &'static str,
    },
    /// A sub-element exists but not at the position the structure mandates.
    SubElementOutOfOrder {
        inside: &'static str,
        expected: &'static str,
    },
    /// More sub-elements than the structure allows.
    TooManySubElements { inside: &'static str },
    /// A variable-width number was truncated or not in canonical form.
    BadVarNumber(&'static str),
    /// Fewer bytes were present than an element's declared length.
    LengthTooShort {
        step: &'static str,
        expected: u64,
        actual: u64,
    },
    /// More bytes were present than an element's declared length.
    LengthTooLong { declared: u64, actual: u64 },
    /// A non-negative integer body was not 1, 2, 4, or 8 bytes wide.
    BadNonNegativeInteger(usize),
    /// A name URI could not be parsed.
    BadUri(String),
    /// Read of an optional field that was never populated.
    NotSet(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::MissingWireBytes => f.write_str("Block does not contain wire format"),
            Error::UnexpectedType { expected, actual } => write!(
                f,
                "Unexpected TLV type: expected {}, got {}",
                expected, actual
            ),
            Error::MissingSubElement { inside, expected } => {
                write!(f, "{} requires a {} sub-element", inside, expected)
            }
            Error::SubElementOutOfOrder { inside, expected } => {
                write!(f, "{} requires {} at this position", inside, expected)
            }
            Error::TooManySubElements { inside } => {
                write!(f, "{} contains more sub-elements than allowed", inside)
            }
            Error::BadVarNumber(reason) => write!(f, "Bad variable-width number: {}", reason),
            Error::LengthTooShort {
                step,
                expected,
                actual,
            } => write!(
                f,
                "Expected {} bytes but only {} remain on step [{}]",
                expected, actual, step
            ),
            Error::LengthTooLong { declared, actual } => write!(
                f,
                "Element declares {} value bytes but {} are present",
                declared, actual
            ),
            Error::BadNonNegativeInteger(width) => write!(
                f,
                "Non-negative integer must be 1, 2, 4, or 8 bytes, got {}",
                width
            ),
            Error::BadUri(ref uri) => write!(f, "Bad name URI: {}", uri),
            Error::NotSet(field) => write!(f, "{} is not set", field),
        }
    }
}

impl std::error::Error for Error {}
