//! Dotted key paths into a parameter tree

use std::fmt;
use std::str::FromStr;

/// Location of a node in a parameter tree, e.g. `gains.kp`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ParamPath {
    segments: Vec<String>,
}

impl ParamPath {
    /// The path of the root group
    pub fn root() -> Self {
        ParamPath::default()
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ParamPath {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// A new path one level below this one
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        ParamPath { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl fmt::Display for ParamPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl From<&str> for ParamPath {
    fn from(path: &str) -> Self {
        ParamPath::from_segments(path.split('.').filter(|s| !s.is_empty()))
    }
}

impl FromStr for ParamPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ParamPath::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let path = ParamPath::from("gains.kp");
        assert_eq!(path.segments(), ["gains", "kp"]);
        assert_eq!(path.to_string(), "gains.kp");
        assert_eq!(path.name(), Some("kp"));
    }

    #[test]
    fn test_child_and_root() {
        let root = ParamPath::root();
        assert!(root.is_root());
        assert_eq!(root.child("goal").child("x"), ParamPath::from("goal.x"));
        assert!(ParamPath::from("").is_root());
    }
}
