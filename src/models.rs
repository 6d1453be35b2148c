//! Chart input: `{group: {bar: {category: [values]}}}` with insertion order kept
//! at every level.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ChartError, Result};

/// Category name → ordered values. Order decides stacking.
pub type Bar = IndexMap<String, Vec<f64>>;

/// Bar name → bar. Order decides vertical placement within the group.
pub type Group = IndexMap<String, Bar>;

/// Ordered nested dataset, validated on construction from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    groups: IndexMap<String, Group>,
}

/// Goes through [`Dataset::from_value`] so shape errors carry their location.
impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Dataset::from_value(&value).map_err(serde::de::Error::custom)
    }
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style append; creates the group and bar on first use.
    ///
    /// Appending to an existing category extends its value list.
    pub fn with_values(
        mut self,
        group: &str,
        bar: &str,
        category: &str,
        values: impl IntoIterator<Item = f64>,
    ) -> Self {
        self.push(group, bar, category, values);
        self
    }

    pub fn push(
        &mut self,
        group: &str,
        bar: &str,
        category: &str,
        values: impl IntoIterator<Item = f64>,
    ) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .entry(bar.to_string())
            .or_default()
            .entry(category.to_string())
            .or_default()
            .extend(values);
    }

    /// Add a group (possibly empty). An existing group of that name is replaced.
    pub fn insert_group(&mut self, name: impl Into<String>, group: Group) {
        self.groups.insert(name.into(), group);
    }

    pub fn groups(&self) -> &IndexMap<String, Group> {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group_names(&self) -> Vec<&str> {
        self.groups.keys().map(String::as_str).collect()
    }

    /// Unique bar names in first-seen traversal order.
    pub fn all_bars(&self) -> Vec<&str> {
        let set: IndexSet<&str> = self
            .groups
            .values()
            .flat_map(|g| g.keys().map(String::as_str))
            .collect();
        set.into_iter().collect()
    }

    /// Unique category names in first-seen traversal order.
    pub fn all_categories(&self) -> Vec<&str> {
        let set: IndexSet<&str> = self
            .groups
            .values()
            .flat_map(|g| g.values())
            .flat_map(|b| b.keys().map(String::as_str))
            .collect();
        set.into_iter().collect()
    }

    /// Iterate every value with its location, in canonical traversal order.
    pub fn iter_values(&self) -> impl Iterator<Item = (&str, &str, &str, f64)> + '_ {
        self.groups.iter().flat_map(|(gn, g)| {
            g.iter().flat_map(move |(bn, b)| {
                b.iter().flat_map(move |(cn, vals)| {
                    vals.iter()
                        .map(move |v| (gn.as_str(), bn.as_str(), cn.as_str(), *v))
                })
            })
        })
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)
            .map_err(|e| ChartError::validation(format!("dataset is not valid JSON: {e}")))?;
        Self::from_value(&value)
    }

    /// Validate a JSON value against the three-level shape and build the dataset.
    ///
    /// Object key order is kept (`serde_json/preserve_order`).
    pub fn from_value(value: &Value) -> Result<Self> {
        let groups = as_object(value, "$")?;
        let mut out = IndexMap::with_capacity(groups.len());
        for (gn, gv) in groups {
            let gpath = format!("$[{gn:?}]");
            let bars = as_object(gv, &gpath)?;
            let mut group = Group::with_capacity(bars.len());
            for (bn, bv) in bars {
                let bpath = format!("{gpath}[{bn:?}]");
                let cats = as_object(bv, &bpath)?;
                let mut bar = Bar::with_capacity(cats.len());
                for (cn, cv) in cats {
                    let cpath = format!("{bpath}[{cn:?}]");
                    bar.insert(cn.clone(), as_values(cv, &cpath)?);
                }
                group.insert(bn.clone(), bar);
            }
            out.insert(gn.clone(), group);
        }
        Ok(Self { groups: out })
    }

    /// Reject non-finite values, which no policy can lay out.
    pub fn validate_finite(&self) -> Result<()> {
        for (g, b, c, v) in self.iter_values() {
            if !v.is_finite() {
                return Err(ChartError::validation(format!(
                    "$[{g:?}][{b:?}][{c:?}]: value {v} is not finite"
                )));
            }
        }
        Ok(())
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn as_object<'a>(v: &'a Value, path: &str) -> Result<&'a serde_json::Map<String, Value>> {
    v.as_object().ok_or_else(|| {
        ChartError::validation(format!("{path}: expected an object, got {}", kind_of(v)))
    })
}

fn as_values(v: &Value, path: &str) -> Result<Vec<f64>> {
    let items = v.as_array().ok_or_else(|| {
        ChartError::validation(format!(
            "{path}: expected an array of numbers, got {}",
            kind_of(v)
        ))
    })?;
    items
        .iter()
        .enumerate()
        .map(|(i, x)| {
            x.as_f64().ok_or_else(|| {
                ChartError::validation(format!(
                    "{path}[{i}]: expected a number, got {}",
                    kind_of(x)
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_seen_order_of_bars_and_categories() {
        let d = Dataset::new()
            .with_values("g1", "b2", "c3", [1.0])
            .with_values("g1", "b1", "c1", [1.0])
            .with_values("g2", "b1", "c2", [1.0])
            .with_values("g2", "b3", "c3", [1.0]);
        assert_eq!(d.all_bars(), vec!["b2", "b1", "b3"]);
        assert_eq!(d.all_categories(), vec!["c3", "c1", "c2"]);
        assert_eq!(d.group_names(), vec!["g1", "g2"]);
    }

    #[test]
    fn rejects_wrong_depth() {
        let err = Dataset::from_value(&json!({"g": {"b": [1, 2]}})).unwrap_err();
        assert!(matches!(err, ChartError::Validation(ref m) if m.contains("expected an object")));
    }

    #[test]
    fn rejects_non_numeric_value_with_location() {
        let err = Dataset::from_value(&json!({"g": {"b": {"c": [1, "x"]}}})).unwrap_err();
        match err {
            ChartError::Validation(m) => {
                assert!(m.contains("[\"c\"][1]"), "{m}");
                assert!(m.contains("string"), "{m}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_non_sequence_value_list() {
        let err = Dataset::from_value(&json!({"g": {"b": {"c": 3}}})).unwrap_err();
        assert!(matches!(err, ChartError::Validation(_)));
    }

    #[test]
    fn empty_levels_are_legal() {
        let d = Dataset::from_value(&json!({"g": {}, "h": {"b": {}}, "i": {"b": {"c": []}}}))
            .unwrap();
        assert_eq!(d.groups().len(), 3);
        assert!(d.all_categories() == vec!["c"]);
    }

    #[test]
    fn insert_group_replaces_in_place() {
        let mut d = Dataset::new()
            .with_values("g1", "b", "c", [1.0])
            .with_values("g2", "b", "c", [2.0]);
        let mut bar = Bar::new();
        bar.insert("d".to_string(), vec![5.0]);
        let mut group = Group::new();
        group.insert("b2".to_string(), bar);
        d.insert_group("g1", group);
        d.insert_group("g3", Group::new());
        assert_eq!(d.group_names(), vec!["g1", "g2", "g3"]);
        assert_eq!(d.groups()["g1"]["b2"]["d"], vec![5.0]);
        assert_eq!(d.all_bars(), vec!["b2", "b"]);
    }

    #[test]
    fn push_extends_existing_category() {
        let mut d = Dataset::new();
        d.push("g", "b", "c", [1.0, 2.0]);
        d.push("g", "b", "c", [3.0]);
        assert_eq!(d.groups()["g"]["b"]["c"], vec![1.0, 2.0, 3.0]);
    }
}
