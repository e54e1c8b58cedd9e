//! Hierarchical supervisor parameters
//!
//! A [`ParameterTree`] holds typed leaves grouped under named groups. It is
//! read as a nested [`ParamRecord`] snapshot and written through validated,
//! all-or-nothing bulk updates.
pub mod node;
pub mod path;
pub mod value;

pub use self::node::{ParameterChild, ParameterNode};
pub use self::path::ParamPath;
pub use self::value::{ParamRecord, ParamValue};

use crate::error::{ConfigurationError, ValidationError};
use log::debug;

/// Typed parameter tree with an implicit root group
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterTree {
    root: ParameterNode,
}

impl Default for ParameterTree {
    fn default() -> Self {
        ParameterTree {
            root: ParameterNode::group(),
        }
    }
}

impl ParameterTree {
    /// A tree with no parameters at all
    pub fn empty() -> Self {
        ParameterTree::default()
    }

    /// Start building a tree from a template
    pub fn builder() -> GroupBuilder {
        GroupBuilder::new(ParamPath::root())
    }

    /// Deep copy of every value, keeping group nesting and declaration order
    pub fn get_snapshot(&self) -> ParamRecord {
        match self.root.value() {
            ParamValue::Group(record) => record,
            _ => ParamRecord::new(),
        }
    }

    /// Read-only view of the whole tree, for renderers
    pub fn describe(&self) -> &ParameterNode {
        &self.root
    }

    pub fn get(&self, path: &ParamPath) -> Option<ParamValue> {
        if path.is_root() {
            return None;
        }
        self.root.lookup(path).map(ParameterNode::value)
    }

    /// Set a single leaf
    pub fn set(&mut self, path: ParamPath, value: ParamValue) -> Result<(), ValidationError> {
        self.set_bulk(&[(path, value)])
    }

    /// Apply a batch of updates atomically
    ///
    /// Every update is checked against its leaf's domain before anything is
    /// written. If one path is unknown or one value is out of domain the
    /// error names that path and the tree is exactly as it was.
    pub fn set_bulk(&mut self, updates: &[(ParamPath, ParamValue)]) -> Result<(), ValidationError> {
        let mut staged = self.root.clone();

        for (path, value) in updates {
            if path.is_root() {
                return Err(ValidationError::new(path.clone(), "empty parameter path"));
            }
            let leaf = staged
                .lookup_mut(path)
                .ok_or_else(|| ValidationError::new(path.clone(), "unknown parameter"))?;
            leaf.try_assign(value)
                .map_err(|reason| ValidationError::new(path.clone(), reason))?;
        }

        debug!("Applied {} parameter updates", updates.len());
        self.root = staged;
        Ok(())
    }

    /// Apply a nested record, as produced by [`get_snapshot`](Self::get_snapshot)
    pub fn set_record(&mut self, record: &ParamRecord) -> Result<(), ValidationError> {
        self.set_bulk(&record.flatten())
    }

    /// True when both trees have the same groups, leaf names and leaf kinds
    pub fn matches_schema(&self, other: &ParameterTree) -> bool {
        self.root.same_shape(&other.root)
    }
}

/// Builds one group of a [`ParameterTree`]
///
/// Problems in the template (duplicate names, defaults outside their own
/// bounds) are reported once by [`GroupBuilder::build`].
#[derive(Debug)]
pub struct GroupBuilder {
    path: ParamPath,
    children: Vec<ParameterChild>,
    error: Option<ConfigurationError>,
}

impl GroupBuilder {
    fn new(path: ParamPath) -> Self {
        GroupBuilder {
            path,
            children: Vec::new(),
            error: None,
        }
    }

    fn push(mut self, name: &str, label: Option<&str>, node: ParameterNode) -> Self {
        if self.error.is_some() {
            return self;
        }
        let path = self.path.child(name);
        if name.is_empty() || name.contains('.') {
            self.error = Some(ConfigurationError::InvalidDefault {
                path,
                reason: "names must be non-empty and contain no '.'".to_string(),
            });
        } else if self.children.iter().any(|child| child.name == name) {
            self.error = Some(ConfigurationError::DuplicateName(path.to_string()));
        } else if let Err(reason) = node.check_default() {
            self.error = Some(ConfigurationError::InvalidDefault { path, reason });
        } else {
            self.children.push(ParameterChild {
                name: name.to_string(),
                label: label.map(str::to_string),
                node,
            });
        }
        self
    }

    /// Add a leaf or a prebuilt node
    pub fn leaf(self, name: &str, node: ParameterNode) -> Self {
        self.push(name, None, node)
    }

    /// Add a leaf with a display label
    pub fn labelled(self, name: &str, label: &str, node: ParameterNode) -> Self {
        self.push(name, Some(label), node)
    }

    /// Add a nested group
    pub fn group(mut self, name: &str, build: impl FnOnce(GroupBuilder) -> GroupBuilder) -> Self {
        let nested = build(GroupBuilder::new(self.path.child(name)));
        if let Some(error) = nested.error {
            if self.error.is_none() {
                self.error = Some(error);
            }
            return self;
        }
        self = self.push(
            name,
            None,
            ParameterNode::Group {
                children: nested.children,
            },
        );
        self
    }

    pub fn build(self) -> Result<ParameterTree, ConfigurationError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(ParameterTree {
                root: ParameterNode::Group {
                    children: self.children,
                },
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> ParameterTree {
        ParameterTree::builder()
            .group("goal", |g| {
                g.leaf("x", ParameterNode::float(-5.0, -100.0, 100.0, 0.5))
                    .leaf("y", ParameterNode::float(5.0, -100.0, 100.0, 0.5))
            })
            .leaf("level", ParameterNode::float(3.0, 0.0, 10.0, 1.0))
            .leaf("laps", ParameterNode::int(1, 0, 5))
            .leaf("enabled", ParameterNode::boolean(true))
            .leaf("mode", ParameterNode::choice(["pid", "hold"], "pid"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_snapshot_is_nested_and_ordered() {
        let snapshot = tree().get_snapshot();
        let names: Vec<_> = snapshot.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["goal", "level", "laps", "enabled", "mode"]);
        assert_eq!(snapshot.get_f64("goal.x"), Some(-5.0));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut tree = tree();
        let snapshot = tree.get_snapshot();
        tree.set(ParamPath::from("goal.x"), ParamValue::Float(1.0))
            .unwrap();
        assert_eq!(snapshot.get_f64("goal.x"), Some(-5.0));
        assert_eq!(tree.get_snapshot().get_f64("goal.x"), Some(1.0));
    }

    #[test]
    fn test_upper_bound_is_inclusive() {
        let mut tree = tree();
        let err = tree
            .set(ParamPath::from("level"), ParamValue::Float(15.0))
            .unwrap_err();
        assert_eq!(err.path, ParamPath::from("level"));
        assert!(tree
            .set(ParamPath::from("level"), ParamValue::Float(10.0))
            .is_ok());
        assert_eq!(tree.get(&ParamPath::from("level")), Some(ParamValue::Float(10.0)));
    }

    #[test]
    fn test_set_bulk_is_atomic() {
        let mut tree = tree();
        let before = tree.clone();
        let err = tree
            .set_bulk(&[
                (ParamPath::from("goal.x"), ParamValue::Float(2.0)),
                (ParamPath::from("enabled"), ParamValue::Bool(false)),
                (ParamPath::from("gains.kp"), ParamValue::Float(1.0)),
                (ParamPath::from("mode"), ParamValue::from("hold")),
            ])
            .unwrap_err();

        assert_eq!(err.path, ParamPath::from("gains.kp"));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_set_bulk_applies_all() {
        let mut tree = tree();
        tree.set_bulk(&[
            (ParamPath::from("goal.y"), ParamValue::Int(-3)),
            (ParamPath::from("laps"), ParamValue::Int(5)),
            (ParamPath::from("mode"), ParamValue::from("hold")),
        ])
        .unwrap();

        let snapshot = tree.get_snapshot();
        assert_eq!(snapshot.get_f64("goal.y"), Some(-3.0));
        assert_eq!(snapshot.get("laps"), Some(&ParamValue::Int(5)));
        assert_eq!(snapshot.get("mode"), Some(&ParamValue::from("hold")));
    }

    #[test]
    fn test_group_path_is_not_a_value() {
        let mut tree = tree();
        let err = tree
            .set(ParamPath::from("goal"), ParamValue::Float(1.0))
            .unwrap_err();
        assert_eq!(err.path, ParamPath::from("goal"));
        assert!(tree.set(ParamPath::root(), ParamValue::Float(1.0)).is_err());
    }

    #[test]
    fn test_snapshot_round_trip_is_noop() {
        let mut tree = tree();
        let snapshot = tree.get_snapshot();
        tree.set_record(&snapshot).unwrap();
        assert_eq!(tree.get_snapshot(), snapshot);
    }

    #[test]
    fn test_set_record_rejects_record_at_leaf() {
        let mut tree = tree();
        let record = ParamRecord::new().with("level", ParamRecord::new().with("x", 1.0));
        assert!(tree.set_record(&record).is_err());
    }

    #[test]
    fn test_builder_rejects_duplicates_and_bad_defaults() {
        let duplicate = ParameterTree::builder()
            .group("gains", |g| {
                g.leaf("kp", ParameterNode::float(1.0, 0.0, 10.0, 0.1))
                    .leaf("kp", ParameterNode::float(1.0, 0.0, 10.0, 0.1))
            })
            .build();
        assert_eq!(
            duplicate.unwrap_err(),
            ConfigurationError::DuplicateName("gains.kp".to_string())
        );

        let out_of_range = ParameterTree::builder()
            .leaf("v", ParameterNode::float(20.0, 0.0, 10.0, 0.1))
            .build();
        assert!(matches!(
            out_of_range,
            Err(ConfigurationError::InvalidDefault { .. })
        ));
    }

    #[test]
    fn test_builder_rejects_repeated_choice_options() {
        let result = ParameterTree::builder()
            .leaf("mode", ParameterNode::choice(["a", "a"], "a"))
            .build();
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidDefault { ref path, .. }) if *path == ParamPath::from("mode")
        ));
    }

    #[test]
    fn test_matches_schema_ignores_values() {
        let mut other = tree();
        other
            .set(ParamPath::from("goal.x"), ParamValue::Float(42.0))
            .unwrap();
        assert!(tree().matches_schema(&other));

        let different = ParameterTree::builder()
            .leaf("level", ParameterNode::float(3.0, 0.0, 10.0, 1.0))
            .build()
            .unwrap();
        assert!(!tree().matches_schema(&different));
    }

    #[test]
    fn test_describe_exposes_labels() {
        let tree = ParameterTree::builder()
            .group("gains", |g| {
                g.labelled("kp", "Proportional gain", ParameterNode::float(1.0, 0.0, 10.0, 0.1))
            })
            .build()
            .unwrap();

        let gains = &tree.describe().children()[0];
        assert_eq!(gains.label(), "Gains");
        assert_eq!(gains.node.children()[0].label(), "Proportional gain");
    }
}
