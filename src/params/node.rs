//! Typed nodes of a parameter tree

use super::{ParamPath, ParamRecord, ParamValue};

/// One node of a parameter tree
///
/// Leaves always hold a value inside their own domain. Consumers that render
/// or inspect a tree match on the variant directly.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterNode {
    Float {
        min: f64,
        max: f64,
        step: f64,
        value: f64,
    },
    Int {
        min: i64,
        max: i64,
        value: i64,
    },
    Bool {
        value: bool,
    },
    Choice {
        options: Vec<String>,
        selected: String,
    },
    Group {
        children: Vec<ParameterChild>,
    },
}

/// A named entry of a group
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterChild {
    pub name: String,
    pub label: Option<String>,
    pub node: ParameterNode,
}

impl ParameterChild {
    /// Display label, falling back to the capitalized name
    pub fn label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => {
                let mut chars = self.name.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

impl ParameterNode {
    pub fn float(value: f64, min: f64, max: f64, step: f64) -> Self {
        ParameterNode::Float {
            min,
            max,
            step,
            value,
        }
    }

    pub fn int(value: i64, min: i64, max: i64) -> Self {
        ParameterNode::Int { min, max, value }
    }

    pub fn boolean(value: bool) -> Self {
        ParameterNode::Bool { value }
    }

    pub fn choice<I, S>(options: I, selected: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ParameterNode::Choice {
            options: options.into_iter().map(Into::into).collect(),
            selected: selected.to_string(),
        }
    }

    pub fn group() -> Self {
        ParameterNode::Group {
            children: Vec::new(),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, ParameterNode::Group { .. })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ParameterNode::Float { .. } => "number",
            ParameterNode::Int { .. } => "integer",
            ParameterNode::Bool { .. } => "boolean",
            ParameterNode::Choice { .. } => "choice",
            ParameterNode::Group { .. } => "group",
        }
    }

    pub fn children(&self) -> &[ParameterChild] {
        match self {
            ParameterNode::Group { children } => children,
            _ => &[],
        }
    }

    pub fn child(&self, name: &str) -> Option<&ParameterNode> {
        self.children()
            .iter()
            .find(|child| child.name == name)
            .map(|child| &child.node)
    }

    fn child_mut(&mut self, name: &str) -> Option<&mut ParameterNode> {
        match self {
            ParameterNode::Group { children } => children
                .iter_mut()
                .find(|child| child.name == name)
                .map(|child| &mut child.node),
            _ => None,
        }
    }

    /// Node at `path` below this one
    pub fn lookup(&self, path: &ParamPath) -> Option<&ParameterNode> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    pub(crate) fn lookup_mut(&mut self, path: &ParamPath) -> Option<&mut ParameterNode> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.child_mut(segment))
    }

    /// Current value; groups become a deep, independent record
    pub fn value(&self) -> ParamValue {
        match self {
            ParameterNode::Float { value, .. } => ParamValue::Float(*value),
            ParameterNode::Int { value, .. } => ParamValue::Int(*value),
            ParameterNode::Bool { value } => ParamValue::Bool(*value),
            ParameterNode::Choice { selected, .. } => ParamValue::Choice(selected.clone()),
            ParameterNode::Group { children } => {
                let mut record = ParamRecord::new();
                for child in children {
                    record.insert(child.name.clone(), child.node.value());
                }
                ParamValue::Group(record)
            }
        }
    }

    /// Check `value` against this leaf's domain and store it
    ///
    /// On error the node is left untouched.
    pub(crate) fn try_assign(&mut self, value: &ParamValue) -> Result<(), String> {
        match self {
            ParameterNode::Float {
                min,
                max,
                value: current,
                ..
            } => {
                let v = value
                    .as_f64()
                    .ok_or_else(|| format!("expected a number, got {}", value.kind()))?;
                if !v.is_finite() {
                    return Err(format!("{v} is not a finite number"));
                }
                if v < *min || v > *max {
                    return Err(format!("{v} is outside [{min}, {max}]"));
                }
                *current = v;
            }
            ParameterNode::Int {
                min,
                max,
                value: current,
            } => {
                let v = value
                    .as_i64()
                    .ok_or_else(|| format!("expected an integer, got {}", value.kind()))?;
                if v < *min || v > *max {
                    return Err(format!("{v} is outside [{min}, {max}]"));
                }
                *current = v;
            }
            ParameterNode::Bool { value: current } => {
                *current = value
                    .as_bool()
                    .ok_or_else(|| format!("expected a boolean, got {}", value.kind()))?;
            }
            ParameterNode::Choice { options, selected } => {
                let v = value
                    .as_str()
                    .ok_or_else(|| format!("expected one of {options:?}, got {}", value.kind()))?;
                if !options.iter().any(|option| option == v) {
                    return Err(format!("'{v}' is not one of {options:?}"));
                }
                *selected = v.to_string();
            }
            ParameterNode::Group { .. } => {
                return Err("is a group, not a single value".to_string());
            }
        }
        Ok(())
    }

    /// Check the leaf's stored value against its own bounds
    pub(crate) fn check_default(&self) -> Result<(), String> {
        match self {
            ParameterNode::Float {
                min,
                max,
                step,
                value,
            } => {
                if !(min <= max) {
                    return Err(format!("empty range [{min}, {max}]"));
                }
                if !(*step > 0.0) {
                    return Err(format!("step must be positive, got {step}"));
                }
                self.clone().try_assign(&ParamValue::Float(*value))
            }
            ParameterNode::Int { min, max, value } => {
                if min > max {
                    return Err(format!("empty range [{min}, {max}]"));
                }
                self.clone().try_assign(&ParamValue::Int(*value))
            }
            ParameterNode::Choice { options, selected } => {
                for (i, option) in options.iter().enumerate() {
                    if options[..i].contains(option) {
                        return Err(format!("option '{option}' is listed more than once"));
                    }
                }
                self.clone()
                    .try_assign(&ParamValue::Choice(selected.clone()))
            }
            ParameterNode::Bool { .. } | ParameterNode::Group { .. } => Ok(()),
        }
    }

    /// Same group structure and leaf kinds, regardless of values
    pub fn same_shape(&self, other: &ParameterNode) -> bool {
        match (self, other) {
            (ParameterNode::Group { children: a }, ParameterNode::Group { children: b }) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|(x, y)| {
                        x.name == y.name && x.node.same_shape(&y.node)
                    })
            }
            (ParameterNode::Choice { options: a, .. }, ParameterNode::Choice { options: b, .. }) => {
                a == b
            }
            (a, b) => a.kind() == b.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_bounds_are_inclusive() {
        let mut leaf = ParameterNode::float(5.0, 0.0, 10.0, 1.0);
        assert!(leaf.try_assign(&ParamValue::Float(10.0)).is_ok());
        assert!(leaf.try_assign(&ParamValue::Float(0.0)).is_ok());
        assert!(leaf.try_assign(&ParamValue::Float(15.0)).is_err());
        assert!(leaf.try_assign(&ParamValue::Float(f64::NAN)).is_err());
        assert_eq!(leaf.value(), ParamValue::Float(0.0));
    }

    #[test]
    fn test_float_accepts_integers() {
        let mut leaf = ParameterNode::float(5.0, 0.0, 10.0, 1.0);
        leaf.try_assign(&ParamValue::Int(7)).unwrap();
        assert_eq!(leaf.value(), ParamValue::Float(7.0));
    }

    #[test]
    fn test_int_rejects_fractions() {
        let mut leaf = ParameterNode::int(3, 0, 10);
        assert!(leaf.try_assign(&ParamValue::Float(2.5)).is_err());
        leaf.try_assign(&ParamValue::Float(4.0)).unwrap();
        assert_eq!(leaf.value(), ParamValue::Int(4));
    }

    #[test]
    fn test_choice_membership() {
        let mut leaf = ParameterNode::choice(["pid", "hold"], "pid");
        assert!(leaf.try_assign(&ParamValue::from("spin")).is_err());
        leaf.try_assign(&ParamValue::from("hold")).unwrap();
        assert_eq!(leaf.value(), ParamValue::from("hold"));
    }

    #[test]
    fn test_kind_mismatch() {
        let mut leaf = ParameterNode::boolean(false);
        assert!(leaf.try_assign(&ParamValue::Float(1.0)).is_err());
        assert!(ParameterNode::group().try_assign(&ParamValue::Bool(true)).is_err());
    }

    #[test]
    fn test_check_default() {
        assert!(ParameterNode::float(11.0, 0.0, 10.0, 1.0).check_default().is_err());
        assert!(ParameterNode::float(1.0, 0.0, 10.0, 0.0).check_default().is_err());
        assert!(ParameterNode::int(1, 5, 0).check_default().is_err());
        assert!(ParameterNode::choice(["a"], "b").check_default().is_err());
        assert!(ParameterNode::choice(["a", "b"], "b").check_default().is_ok());
    }

    #[test]
    fn test_choice_options_must_be_unique() {
        let err = ParameterNode::choice(["pid", "hold", "pid"], "pid")
            .check_default()
            .unwrap_err();
        assert!(err.contains("'pid'"));
    }

    #[test]
    fn test_label_fallback() {
        let child = ParameterChild {
            name: "velocity".to_string(),
            label: None,
            node: ParameterNode::group(),
        };
        assert_eq!(child.label(), "Velocity");
    }
}
