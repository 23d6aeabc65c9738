use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VersionError;

/// Maximum number of dotted components (`major.minor.build.revision`).
const MAX_COMPONENTS: usize = 4;

/// Schema version of a configuration document.
///
/// A version carries up to four components. Components that were not
/// supplied are *absent*: they are not printed by [`Display`](fmt::Display)
/// and read back as `None` from the accessors, but compare as `0` against a
/// version that does specify them. So `1.0` equals `1.0.0.0`, while
/// `1.0.0.1` is greater than both.
///
/// Ordering: `major` → `minor` → `build` → `revision` (total order).
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    components: [u32; MAX_COMPONENTS],
    /// Number of components actually supplied (1..=4).
    precision: u8,
}

impl Version {
    /// Create a two-component version (`major.minor`).
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            components: [major, minor, 0, 0],
            precision: 2,
        }
    }

    /// Create a version that specifies all four components.
    pub const fn full(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            components: [major, minor, build, revision],
            precision: 4,
        }
    }

    /// The version assumed for documents that carry no version tag.
    pub const fn initial() -> Self {
        Self::new(1, 0)
    }

    /// Parse a dotted version string such as `"2.0"` or `"1.0.0.1"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgup_types::Version;
    ///
    /// let v = Version::parse("1.2.3").unwrap();
    /// assert_eq!(v.build(), Some(3));
    /// assert_eq!(v.revision(), None);
    /// assert!(Version::parse("1.x").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        if input.trim().is_empty() {
            return Err(VersionError::Empty);
        }

        let segments: Vec<&str> = input.trim().split('.').collect();
        if segments.len() > MAX_COMPONENTS {
            return Err(VersionError::TooManyComponents {
                input: input.to_string(),
                count: segments.len(),
            });
        }

        let mut components = [0u32; MAX_COMPONENTS];
        for (slot, segment) in components.iter_mut().zip(&segments) {
            // `u32::from_str` accepts a leading '+', which is not a digit.
            if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                return Err(VersionError::InvalidComponent {
                    input: input.to_string(),
                    component: segment.to_string(),
                });
            }
            *slot = segment
                .parse()
                .map_err(|_| VersionError::InvalidComponent {
                    input: input.to_string(),
                    component: segment.to_string(),
                })?;
        }

        Ok(Self {
            components,
            precision: segments.len() as u8,
        })
    }

    /// Return a copy with the build component set.
    pub fn with_build(mut self, build: u32) -> Self {
        self.components[2] = build;
        self.precision = self.precision.max(3);
        self
    }

    /// Return a copy with the revision component set.
    pub fn with_revision(mut self, revision: u32) -> Self {
        self.components[3] = revision;
        self.precision = MAX_COMPONENTS as u8;
        self
    }

    pub fn major(&self) -> u32 {
        self.components[0]
    }

    pub fn minor(&self) -> Option<u32> {
        self.component(1)
    }

    pub fn build(&self) -> Option<u32> {
        self.component(2)
    }

    pub fn revision(&self) -> Option<u32> {
        self.component(3)
    }

    /// Number of components that were supplied.
    pub fn precision(&self) -> usize {
        self.precision as usize
    }

    /// Returns `true` if this version is strictly newer than `other`.
    pub fn is_newer_than(&self, other: &Self) -> bool {
        self > other
    }

    fn component(&self, index: usize) -> Option<u32> {
        (index < self.precision()).then(|| self.components[index])
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::initial()
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Absent components are stored as zero, so this agrees with `Eq`.
        self.components.hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.components.cmp(&other.components)
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version({self})")
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components[..self.precision()].iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Version {
    type Error = VersionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn parse_two_components() {
        let version = v("2.0");
        assert_eq!(version.major(), 2);
        assert_eq!(version.minor(), Some(0));
        assert_eq!(version.build(), None);
        assert_eq!(version.revision(), None);
        assert_eq!(version, Version::new(2, 0));
    }

    #[test]
    fn parse_four_components() {
        let version = v("1.2.3.4");
        assert_eq!(version, Version::full(1, 2, 3, 4));
        assert_eq!(version.precision(), 4);
    }

    #[test]
    fn parse_single_component() {
        let version = v("7");
        assert_eq!(version.major(), 7);
        assert_eq!(version.minor(), None);
    }

    #[test]
    fn reject_non_numeric_component() {
        assert!(matches!(
            Version::parse("1.x"),
            Err(VersionError::InvalidComponent { component, .. }) if component == "x"
        ));
        assert!(Version::parse("1.-1").is_err());
        assert!(Version::parse("1.+2").is_err());
    }

    #[test]
    fn reject_empty_segments() {
        assert_eq!(Version::parse(""), Err(VersionError::Empty));
        assert!(Version::parse("1..0").is_err());
        assert!(Version::parse("1.0.").is_err());
        assert!(Version::parse(".1").is_err());
    }

    #[test]
    fn reject_too_many_components() {
        assert!(matches!(
            Version::parse("1.0.0.0.0"),
            Err(VersionError::TooManyComponents { count: 5, .. })
        ));
    }

    #[test]
    fn reject_overflowing_component() {
        assert!(Version::parse("99999999999.0").is_err());
    }

    #[test]
    fn absent_components_compare_as_zero() {
        let one_oh = v("1.0");
        let one_oh_oh_oh = v("1.0.0.0");
        let one_oh_oh_one = v("1.0.0.1");

        assert_eq!(one_oh, one_oh_oh_oh);
        assert!(!(one_oh < one_oh_oh_oh));
        assert!(!(one_oh > one_oh_oh_oh));
        assert!(one_oh_oh_one > one_oh);
        assert!(one_oh_oh_one > one_oh_oh_oh);
    }

    #[test]
    fn ordering_major_first() {
        assert!(v("1.9.9.9") < v("2.0"));
        assert!(v("2.1") > v("2.0.5"));
        assert!(v("3.0").is_newer_than(&v("2.0")));
    }

    #[test]
    fn display_preserves_precision() {
        assert_eq!(v("1.0").to_string(), "1.0");
        assert_eq!(v("1.0.0.0").to_string(), "1.0.0.0");
        assert_eq!(Version::new(2, 0).with_build(7).to_string(), "2.0.7");
        assert_eq!(Version::new(2, 0).with_revision(1).to_string(), "2.0.0.1");
    }

    #[test]
    fn default_is_one_oh() {
        assert_eq!(Version::default(), v("1.0"));
        assert_eq!(Version::initial().to_string(), "1.0");
    }

    #[test]
    fn serde_roundtrip_as_string() {
        let version = v("2.0.1");
        let json = serde_json::to_string(&version).unwrap();
        assert_eq!(json, "\"2.0.1\"");
        let parsed: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, version);
        assert_eq!(parsed.precision(), 3);
    }

    #[test]
    fn serde_rejects_malformed_string() {
        assert!(serde_json::from_str::<Version>("\"two\"").is_err());
    }

    proptest! {
        #[test]
        fn trailing_zeros_do_not_change_identity(major in 0u32..1000, minor in 0u32..1000) {
            let short = Version::new(major, minor);
            let long = Version::full(major, minor, 0, 0);
            prop_assert_eq!(short, long);
            prop_assert_eq!(short.cmp(&long), Ordering::Equal);
        }

        #[test]
        fn ordering_matches_component_tuples(
            a in proptest::array::uniform4(0u32..50),
            b in proptest::array::uniform4(0u32..50),
        ) {
            let va = Version::full(a[0], a[1], a[2], a[3]);
            let vb = Version::full(b[0], b[1], b[2], b[3]);
            prop_assert_eq!(va.cmp(&vb), a.cmp(&b));
        }

        #[test]
        fn display_parse_roundtrip(a in proptest::array::uniform4(0u32..10_000)) {
            let version = Version::full(a[0], a[1], a[2], a[3]);
            let parsed = Version::parse(&version.to_string()).unwrap();
            prop_assert_eq!(parsed, version);
            prop_assert_eq!(parsed.precision(), 4);
        }
    }
}
