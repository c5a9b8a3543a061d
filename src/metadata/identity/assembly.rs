//! Assembly identity and versioning.
//!
//! Implements the identity components a .NET assembly is known by - simple name,
//! four-part version, culture, and public key token - together with parsing and
//! formatting of the standard display-name form
//! (`Name, Version=..., Culture=..., PublicKeyToken=...`).
//!
//! # Equality Semantics
//!
//! [`AssemblyIdentity`] derives structural equality over all four components; the
//! canonical form is an exact, case-sensitive match. Callers that want the
//! conventional case-insensitive name comparison or version-tolerant binding checks
//! use [`AssemblyIdentity::matches_name`] and [`AssemblyIdentity::satisfies`]
//! explicitly - those options are never baked into `Eq` or `Hash`, so identities
//! behave predictably as map keys.
//!
//! # Examples
//!
//! ```rust
//! use refscope::metadata::identity::{AssemblyIdentity, AssemblyVersion};
//!
//! let mscorlib = AssemblyIdentity::parse(
//!     "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
//! )?;
//! assert_eq!(mscorlib.name, "mscorlib");
//! assert_eq!(mscorlib.version, AssemblyVersion::new(4, 0, 0, 0));
//! assert!(mscorlib.is_strong_named());
//! # Ok::<(), refscope::Error>(())
//! ```

use std::{fmt, fmt::Write as _, str::FromStr};

use crate::{Error, Result};

/// Complete identity information for a .NET assembly.
///
/// Serves as the primary key for assemblies throughout the analysis: manifest
/// reference sets, live sets, candidate matching, and the loaded-assembly cache all
/// use this type. Identities are plain values - cloneable, hashable, and free of any
/// reference semantics.
///
/// # Uniqueness
///
/// Two assemblies are the same assembly if and only if name, version, culture, and
/// public key token all match. Version-insensitive comparison is a caller option via
/// [`satisfies`](Self::satisfies), not a model invariant.
///
/// # Examples
///
/// ```rust
/// use refscope::metadata::identity::{AssemblyIdentity, AssemblyVersion};
///
/// let identity = AssemblyIdentity::new("MyLibrary", AssemblyVersion::new(1, 0, 0, 0), None, None);
/// assert_eq!(identity.display_name(), "MyLibrary, Version=1.0.0.0, Culture=neutral, PublicKeyToken=null");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssemblyIdentity {
    /// Simple assembly name (e.g., "mscorlib", "System.Core").
    pub name: String,

    /// Four-part version number for compatibility and binding.
    pub version: AssemblyVersion,

    /// Culture information for localized assemblies.
    ///
    /// `None` indicates a culture-neutral assembly containing the default resources
    /// and executable code; `Some("en-US")` and friends identify satellite assemblies.
    pub culture: Option<String>,

    /// Public key token of the assembly's strong name, if strong-named.
    ///
    /// Stored as the 8 token bytes in little-endian `u64` form; the display-name
    /// formatting emits the bytes in their natural order, matching the .NET
    /// convention where `b77a5c561934e089` stands for the byte sequence
    /// `[0xb7, 0x7a, 0x5c, 0x56, 0x19, 0x34, 0xe0, 0x89]`.
    pub public_key_token: Option<u64>,
}

impl AssemblyIdentity {
    /// Create a new assembly identity with the specified components.
    ///
    /// # Arguments
    ///
    /// * `name` - Simple assembly name for identification
    /// * `version` - Four-part version number
    /// * `culture` - Optional culture for localized assemblies
    /// * `public_key_token` - Optional strong-name token
    pub fn new(
        name: impl Into<String>,
        version: AssemblyVersion,
        culture: Option<String>,
        public_key_token: Option<u64>,
    ) -> Self {
        Self {
            name: name.into(),
            version,
            culture,
            public_key_token,
        }
    }

    /// Parse assembly identity from a display name string.
    ///
    /// Supports both simple names and fully-qualified names in the standard format:
    ///
    /// ```text
    /// AssemblyName[, Version=Major.Minor.Build.Revision][, Culture=culture][, PublicKeyToken=token]
    /// ```
    ///
    /// `Culture=neutral` and `PublicKeyToken=null` map to `None`.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the display name is empty, a version component
    /// does not parse, or the token is not exactly 16 hex characters.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use refscope::metadata::identity::AssemblyIdentity;
    ///
    /// let simple = AssemblyIdentity::parse("MyLibrary")?;
    /// assert!(simple.public_key_token.is_none());
    ///
    /// let full = AssemblyIdentity::parse(
    ///     "System.Core, Version=3.5.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
    /// )?;
    /// assert!(full.is_strong_named());
    /// # Ok::<(), refscope::Error>(())
    /// ```
    pub fn parse(display_name: &str) -> Result<Self> {
        let mut version = AssemblyVersion::UNKNOWN;
        let mut culture = None;
        let mut public_key_token = None;

        let parts: Vec<&str> = display_name.split(',').map(str::trim).collect();

        if parts.is_empty() {
            return Err(malformed_error!("Empty assembly display name"));
        }

        let name = parts[0].to_string();
        if name.is_empty() {
            return Err(malformed_error!("Assembly name cannot be empty"));
        }

        for part in parts.iter().skip(1) {
            if let Some(value) = part.strip_prefix("Version=") {
                version = AssemblyVersion::parse(value)?;
            } else if let Some(value) = part.strip_prefix("Culture=") {
                if value != "neutral" {
                    culture = Some(value.to_string());
                }
            } else if let Some(value) = part.strip_prefix("PublicKeyToken=") {
                if value != "null" && !value.is_empty() {
                    public_key_token = Some(Self::parse_token(value)?);
                }
            }
        }

        Ok(Self {
            name,
            version,
            culture,
            public_key_token,
        })
    }

    /// Decode a 16-hex-character public key token into its `u64` form.
    fn parse_token(value: &str) -> Result<u64> {
        if value.len() != 16 || !value.is_ascii() {
            return Err(malformed_error!(
                "PublicKeyToken must be exactly 8 bytes (16 hex characters), got '{}'",
                value
            ));
        }

        let mut bytes = [0u8; 8];
        for (i, chunk) in value.as_bytes().chunks_exact(2).enumerate() {
            let pair = std::str::from_utf8(chunk)
                .map_err(|_| malformed_error!("Invalid hex in PublicKeyToken '{}'", value))?;
            bytes[i] = u8::from_str_radix(pair, 16)
                .map_err(|_| malformed_error!("Invalid hex in PublicKeyToken '{}'", value))?;
        }

        Ok(u64::from_le_bytes(bytes))
    }

    /// Generate the .NET-compatible display name for this identity.
    ///
    /// Always includes version, culture, and token components so that the output can
    /// be fed back through [`parse`](Self::parse) and to external removal tooling.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut result = String::with_capacity(self.name.len() + 80);

        result.push_str(&self.name);
        let _ = write!(result, ", Version={}", self.version);

        let culture_str = self.culture.as_deref().unwrap_or("neutral");
        let _ = write!(result, ", Culture={}", culture_str);

        result.push_str(", PublicKeyToken=");
        match self.public_key_token {
            Some(token) => {
                for byte in token.to_le_bytes() {
                    let _ = write!(result, "{:02x}", byte);
                }
            }
            None => result.push_str("null"),
        }

        result
    }

    /// Get the simple assembly name without version or culture information.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// Check if this assembly is strong-named.
    #[must_use]
    pub fn is_strong_named(&self) -> bool {
        self.public_key_token.is_some()
    }

    /// Check if this assembly is culture-neutral.
    #[must_use]
    pub fn is_culture_neutral(&self) -> bool {
        self.culture.is_none()
    }

    /// Compare simple names using the conventional case-insensitive rule.
    ///
    /// This is the caller-option comparison: canonical identity equality stays
    /// case-sensitive, but reference matching in project files traditionally ignores
    /// case on the simple name.
    #[must_use]
    pub fn matches_name(&self, other: &AssemblyIdentity) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }

    /// Check if this assembly identity satisfies a dependency requirement.
    ///
    /// Determines whether this assembly can stand in for a reference to `required`
    /// under .NET binding rules: case-insensitive name match, exact culture match,
    /// identical token when the requirement is strong-named, and a compatible version
    /// per [`AssemblyVersion::is_compatible_with`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use refscope::metadata::identity::{AssemblyIdentity, AssemblyVersion};
    ///
    /// let available =
    ///     AssemblyIdentity::new("System.Core", AssemblyVersion::new(4, 5, 0, 0), None, None);
    /// let required =
    ///     AssemblyIdentity::new("system.core", AssemblyVersion::new(4, 0, 0, 0), None, None);
    ///
    /// // v4.5 satisfies a requirement for v4.0, not the other way around
    /// assert!(available.satisfies(&required));
    /// assert!(!required.satisfies(&available));
    /// ```
    #[must_use]
    pub fn satisfies(&self, required: &AssemblyIdentity) -> bool {
        if !self.matches_name(required) {
            return false;
        }

        if self.culture != required.culture {
            return false;
        }

        if required.public_key_token.is_some() && self.public_key_token != required.public_key_token
        {
            return false;
        }

        self.version.is_compatible_with(&required.version)
    }
}

/// Four-part version numbering for .NET assemblies.
///
/// Standard `major.minor.build.revision` versioning with component-wise ordering,
/// compatible with .NET runtime binding semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssemblyVersion {
    /// Major version component; changes here may break compatibility.
    pub major: u16,
    /// Minor version component; backward-compatible feature additions.
    pub minor: u16,
    /// Build version component; fixes and minor updates.
    pub build: u16,
    /// Revision version component; emergency patches.
    pub revision: u16,
}

impl AssemblyVersion {
    /// Sentinel value representing an unknown or unspecified version.
    ///
    /// Used when version information is not available, such as identities parsed from
    /// display names without a `Version=` component. Use
    /// [`is_unknown()`](Self::is_unknown) to detect it.
    pub const UNKNOWN: Self = Self {
        major: 0,
        minor: 0,
        build: 0,
        revision: 0,
    };

    /// Create a new assembly version with the specified components.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use refscope::metadata::identity::AssemblyVersion;
    ///
    /// let version = AssemblyVersion::new(1, 2, 3, 4);
    /// assert_eq!(version.to_string(), "1.2.3.4");
    /// ```
    #[must_use]
    pub const fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Check if this version represents an unknown/unspecified version (0.0.0.0).
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        self.major == 0 && self.minor == 0 && self.build == 0 && self.revision == 0
    }

    /// Check if this version is compatible with a required version.
    ///
    /// Follows .NET version unification: an unknown requirement accepts anything;
    /// otherwise the major versions must match and this version must be at least the
    /// required one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use refscope::metadata::identity::AssemblyVersion;
    ///
    /// let v4_0 = AssemblyVersion::new(4, 0, 0, 0);
    /// let v4_5 = AssemblyVersion::new(4, 5, 0, 0);
    /// let v5_0 = AssemblyVersion::new(5, 0, 0, 0);
    ///
    /// assert!(v4_5.is_compatible_with(&v4_0));
    /// assert!(!v4_0.is_compatible_with(&v4_5));
    /// assert!(!v5_0.is_compatible_with(&v4_0));
    /// assert!(v4_0.is_compatible_with(&AssemblyVersion::UNKNOWN));
    /// ```
    #[must_use]
    pub fn is_compatible_with(&self, required: &AssemblyVersion) -> bool {
        if required.is_unknown() {
            return true;
        }

        self.major == required.major && *self >= *required
    }

    /// Parse an assembly version from string representation.
    ///
    /// Accepts one to four dot-separated components; missing components default to 0.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] for empty input, more than four components, or a
    /// component that does not fit a `u16`.
    pub fn parse(version_str: &str) -> Result<Self> {
        let parts: Vec<&str> = version_str.split('.').collect();

        if parts.is_empty() || parts.len() > 4 {
            return Err(malformed_error!("Invalid version format: {}", version_str));
        }

        let mut components = [0u16; 4];
        for (i, part) in parts.iter().enumerate() {
            components[i] = part
                .parse::<u16>()
                .map_err(|_| malformed_error!("Invalid version component: {}", part))?;
        }

        Ok(Self::new(
            components[0],
            components[1],
            components[2],
            components[3],
        ))
    }
}

impl fmt::Display for AssemblyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

impl fmt::Display for AssemblyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for AssemblyVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl FromStr for AssemblyIdentity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
