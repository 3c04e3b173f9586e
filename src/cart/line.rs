use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedOption {
    pub option_id: String,
    pub selection_id: String,
}

impl SelectedOption {
    pub fn new(option_id: impl Into<String>, selection_id: impl Into<String>) -> Self {
        Self {
            option_id: option_id.into(),
            selection_id: selection_id.into(),
        }
    }
}

/// One configured product in the order draft. Serialized in the same shape
/// the order endpoints accept, so persisted lines go on the wire unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
    #[serde(default)]
    pub selected_topping_ids: Vec<String>,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(
        product_id: impl Into<String>,
        selected_options: Vec<SelectedOption>,
        selected_topping_ids: Vec<String>,
        quantity: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            selected_options,
            selected_topping_ids,
            quantity,
        }
    }

    pub fn matches(
        &self,
        product_id: &str,
        selected_options: &[SelectedOption],
        selected_topping_ids: &[String],
    ) -> bool {
        is_line_match(self, product_id, selected_options, selected_topping_ids)
    }

    pub fn same_configuration(&self, other: &CartLine) -> bool {
        self.matches(
            &other.product_id,
            &other.selected_options,
            &other.selected_topping_ids,
        )
    }
}

/// Whether `line` holds the given configuration. Options and toppings are
/// compared as sets: order is ignored and repeated entries collapse.
///
/// Lengths are deliberately not compared first, so toppings `[t1, t1]`
/// match `[t1]` in either direction and both land on the same line.
pub fn is_line_match(
    line: &CartLine,
    product_id: &str,
    selected_options: &[SelectedOption],
    selected_topping_ids: &[String],
) -> bool {
    line.product_id == product_id
        && option_set(&line.selected_options) == option_set(selected_options)
        && topping_set(&line.selected_topping_ids) == topping_set(selected_topping_ids)
}

// Tuples rather than joined strings, so an id containing a separator can't
// alias another pair.
fn option_set(options: &[SelectedOption]) -> BTreeSet<(&str, &str)> {
    options
        .iter()
        .map(|opt| (opt.option_id.as_str(), opt.selection_id.as_str()))
        .collect()
}

fn topping_set(ids: &[String]) -> BTreeSet<&str> {
    ids.iter().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(pairs: &[(&str, &str)]) -> Vec<SelectedOption> {
        pairs
            .iter()
            .map(|(o, s)| SelectedOption::new(*o, *s))
            .collect()
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn option_order_does_not_matter() {
        let line = CartLine::new("p1", opts(&[("o1", "s1"), ("o2", "s2")]), vec![], 1);
        assert!(is_line_match(
            &line,
            "p1",
            &opts(&[("o2", "s2"), ("o1", "s1")]),
            &[]
        ));
    }

    #[test]
    fn topping_order_does_not_matter() {
        let line = CartLine::new("p1", vec![], ids(&["t1", "t2", "t3"]), 1);
        assert!(line.matches("p1", &[], &ids(&["t3", "t1", "t2"])));
    }

    #[test]
    fn different_product_never_matches() {
        let line = CartLine::new("p1", opts(&[("o1", "s1")]), ids(&["t1"]), 1);
        assert!(!line.matches("p2", &opts(&[("o1", "s1")]), &ids(&["t1"])));
    }

    #[test]
    fn different_selection_does_not_match() {
        let line = CartLine::new("p1", opts(&[("o1", "s1")]), vec![], 1);
        assert!(!line.matches("p1", &opts(&[("o1", "s2")]), &[]));
        assert!(!line.matches("p1", &[], &[]));
    }

    #[test]
    fn extra_topping_does_not_match() {
        let line = CartLine::new("p1", vec![], ids(&["t1"]), 1);
        assert!(!line.matches("p1", &[], &ids(&["t1", "t2"])));
        assert!(!line.matches("p1", &[], &[]));
    }

    #[test]
    fn repeated_entries_collapse() {
        let line = CartLine::new("p1", opts(&[("o1", "s1")]), ids(&["t1"]), 1);
        assert!(line.matches(
            "p1",
            &opts(&[("o1", "s1"), ("o1", "s1")]),
            &ids(&["t1", "t1"])
        ));

        let doubled = CartLine::new("p1", vec![], ids(&["t1", "t1"]), 1);
        assert!(doubled.matches("p1", &[], &ids(&["t1"])));
    }

    #[test]
    fn ids_containing_colons_do_not_alias() {
        // "a:b" + "c" and "a" + "b:c" would both join to "a:b:c".
        let line = CartLine::new("p1", opts(&[("a:b", "c")]), vec![], 1);
        assert!(!line.matches("p1", &opts(&[("a", "b:c")]), &[]));
    }

    #[test]
    fn same_configuration_ignores_quantity() {
        let a = CartLine::new("p1", opts(&[("o1", "s1")]), ids(&["t1"]), 1);
        let b = CartLine::new("p1", opts(&[("o1", "s1")]), ids(&["t1"]), 7);
        assert!(a.same_configuration(&b));
    }
}
