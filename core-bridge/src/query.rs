//! Query item conversion.
//!
//! Query item lists keep construction order and allow duplicate names, but
//! two lists describe the same query when they hold the same items in any
//! order ([`same_query_items`]). Percent-encoding is left to the URL builder.

use crate::types::{ParameterValue, Parameters};

/// One `name=value` pair of a URL query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryItem {
    pub name: String,
    pub value: String,
}

impl QueryItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Convert parameters to query items, one per entry, ordered by key.
///
/// # Examples
///
/// ```
/// use core_bridge::{parameters, query_items, ParameterValue, QueryItem};
///
/// let items = query_items(&parameters([
///     ("width", ParameterValue::from(100)),
///     ("type", ParameterValue::from("square")),
/// ]));
///
/// assert_eq!(items, vec![QueryItem::new("type", "square"), QueryItem::new("width", "100")]);
/// ```
pub fn query_items(parameters: &Parameters) -> Vec<QueryItem> {
    parameters
        .iter()
        .map(|(name, value)| QueryItem::new(name.clone(), value.to_string()))
        .collect()
}

/// Collect query items back into string-valued parameters.
///
/// When a name repeats, the last occurrence wins.
pub fn parameters_from_query_items(items: &[QueryItem]) -> Parameters {
    items
        .iter()
        .map(|item| {
            (
                item.name.clone(),
                ParameterValue::String(item.value.clone()),
            )
        })
        .collect()
}

/// Order-insensitive comparison of two query item lists.
pub fn same_query_items(lhs: &[QueryItem], rhs: &[QueryItem]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }
    let mut lhs = lhs.to_vec();
    let mut rhs = rhs.to_vec();
    lhs.sort();
    rhs.sort();
    lhs == rhs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parameters;

    #[test]
    fn test_empty_parameters() {
        assert!(query_items(&Parameters::new()).is_empty());
    }

    #[test]
    fn test_one_item_per_entry() {
        let params = parameters([
            ("b", ParameterValue::from(true)),
            ("a", ParameterValue::from("x y")),
            ("c", ParameterValue::from(7)),
        ]);

        let mut items = query_items(&params);
        items.sort();

        assert_eq!(
            items,
            vec![
                QueryItem::new("a", "x y"),
                QueryItem::new("b", "true"),
                QueryItem::new("c", "7"),
            ]
        );
    }

    #[test]
    fn test_stable_for_same_snapshot() {
        let params = parameters([
            ("z", ParameterValue::from(1)),
            ("m", ParameterValue::from(2)),
            ("a", ParameterValue::from(3)),
        ]);

        assert_eq!(query_items(&params), query_items(&params.clone()));
    }

    #[test]
    fn test_same_query_items_ignores_order() {
        let lhs = vec![QueryItem::new("a", "1"), QueryItem::new("b", "2")];
        let rhs = vec![QueryItem::new("b", "2"), QueryItem::new("a", "1")];

        assert!(same_query_items(&lhs, &rhs));
        assert!(!same_query_items(&lhs, &rhs[..1]));
        assert!(!same_query_items(
            &lhs,
            &[QueryItem::new("a", "1"), QueryItem::new("b", "3")]
        ));
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let items = vec![QueryItem::new("a", "1"), QueryItem::new("a", "1")];

        assert!(!same_query_items(&items, &items[..1]));
        assert_eq!(
            parameters_from_query_items(&[QueryItem::new("a", "1"), QueryItem::new("a", "2")])
                .get("a"),
            Some(&ParameterValue::from("2"))
        );
    }
}
