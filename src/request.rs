use std::fmt;

/// Why a background request produced no usable payload.
///
/// `Network` covers everything before a response arrived; `Decode` means a
/// response arrived but its body was not the JSON shape we expected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestFailure {
    Network(String),
    Decode(String),
}

impl RequestFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Decode(_) => "decode",
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            Self::Network(detail) | Self::Decode(detail) => detail,
        }
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failure: {}", self.as_str(), self.detail())
    }
}

impl std::error::Error for RequestFailure {}
