use std::fmt;

/// The field a login attempt identifies the account by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentifier {
    Username(String),
    Email(String),
}

impl LoginIdentifier {
    /// Picks the identifier from a login form. A non-empty username always
    /// wins over the email; empty strings count as absent.
    pub fn from_fields(username: Option<&str>, email: Option<&str>) -> Option<Self> {
        let non_empty = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(str::to_string);

        non_empty(username)
            .map(Self::Username)
            .or_else(|| non_empty(email).map(Self::Email))
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Username(v) | Self::Email(v) => v,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Username(_) => "username",
            Self::Email(_) => "email",
        }
    }
}

impl fmt::Display for LoginIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.kind(), self.value())
    }
}
