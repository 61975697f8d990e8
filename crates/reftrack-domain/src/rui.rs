//! Identifier and temporal primitives shared by every tuple variant.

use std::fmt;

/// Referent Unique Identifier, based on UUIDv7
///
/// A Rui names a referent (portion of reality), an author, a tuple
/// instance, or a concept system. UUIDv7 provides:
/// - Chronological sortability for temporal queries
/// - 128-bit uniqueness
/// - RFC 9562-standard format with broad ecosystem support
/// - No coordination required for distributed generation
///
/// Ruis are `Copy`: many tuples legitimately reference the same
/// identifier, so they are shared by value, never by exclusive ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rui(u128);

impl Rui {
    /// Generate a fresh UUIDv7-based Rui
    ///
    /// # Examples
    ///
    /// ```
    /// use reftrack_domain::Rui;
    ///
    /// let a = Rui::new();
    /// let b = Rui::new();
    /// assert_ne!(a, b);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a Rui from a raw u128 value
    ///
    /// This is primarily for deserialization layers.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a Rui from its canonical UUID string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Get the timestamp component of the UUIDv7 (milliseconds since Unix epoch)
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for Rui {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Rui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A temporal reference: either a concrete instant or an identifier
/// denoting an instant or interval of time
///
/// Concrete instants are UTC, milliseconds since the Unix epoch.
/// Equality is structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TempRef {
    /// A concrete point in time (Unix milliseconds, UTC)
    Instant(u64),

    /// A reference to an identified time instant or interval
    Ref(Rui),
}

impl TempRef {
    /// A temporal reference for the current instant
    pub fn now() -> Self {
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self::Instant(millis)
    }
}

impl fmt::Display for TempRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TempRef::Instant(ms) => write!(f, "{}", ms),
            TempRef::Ref(rui) => write!(f, "{}", rui),
        }
    }
}

/// The sentinel URI held by a default-constructed [`Relationship`]
pub const INVALID_RELATIONSHIP_URI: &str = "http://invalid_relationship.com";

/// A named relation between portions of reality, held as a URI
///
/// Equality is structural (by the full field set).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relationship {
    /// URI naming the relation
    pub uri: String,
}

impl Relationship {
    /// Create a relationship from a URI
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    /// The invalid/default sentinel relationship
    pub fn invalid() -> Self {
        Self::new(INVALID_RELATIONSHIP_URI)
    }

    /// Whether this relationship still holds the sentinel URI
    pub fn is_invalid(&self) -> bool {
        self.uri == INVALID_RELATIONSHIP_URI
    }
}

impl Default for Relationship {
    fn default() -> Self {
        Self::invalid()
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri)
    }
}
