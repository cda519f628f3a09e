use core::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorError {
    Empty,
    InvalidLength { len: usize },
    InvalidDigit { found: char },
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "color string is empty"),
            Self::InvalidLength { len } => {
                write!(f, "hex color must have 3 or 6 digits, got {len}")
            }
            Self::InvalidDigit { found } => write!(f, "invalid hex digit in color: {found:?}"),
        }
    }
}

impl std::error::Error for ColorError {}
