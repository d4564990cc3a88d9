//! The food catalog used by the landing page's filter control.

use crate::catalog::{Catalog, OptionGroup};

/// Value selected when the sample dropdown is created.
pub const SAMPLE_DEFAULT_VALUE: &str = "grapes";

/// Trigger text shown when nothing is selected.
pub const DEFAULT_PLACEHOLDER: &str = "Select an option";

/// Fruits, vegetables and meat, with carrot disabled.
pub fn food_catalog() -> Catalog {
    Catalog::new([
        OptionGroup::new("Fruits")
            .item("apple", "Apple")
            .item("banana", "Banana")
            .item("blueberry", "Blueberry")
            .item("grapes", "Grapes")
            .item("pineapple", "Pineapple"),
        OptionGroup::new("Vegetables")
            .item("aubergine", "Aubergine")
            .item("broccoli", "Broccoli")
            .disabled_item("carrot", "Carrot")
            .item("leek", "Leek"),
        OptionGroup::new("Meat")
            .item("beef", "Beef")
            .item("chicken", "Chicken")
            .item("lamb", "Lamb"),
    ])
}
