//! Option catalog: the ordered, immutable groups a dropdown selects from.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// An option in the dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// The value reported on selection. Unique within a catalog.
    pub value: String,
    /// The display label shown in the list and on the trigger.
    pub label: String,
    /// Whether this option can be selected.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl SelectOption {
    /// Create a new option with value and label
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Mark this option as disabled
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// A labelled group of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionGroup {
    pub label: String,
    pub items: Vec<SelectOption>,
}

impl OptionGroup {
    /// Create an empty group.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            items: Vec::new(),
        }
    }

    /// Append an enabled option.
    pub fn item(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.items.push(SelectOption::new(value, label));
        self
    }

    /// Append a disabled option.
    pub fn disabled_item(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.items.push(SelectOption::new(value, label).disabled());
        self
    }

    /// Append a prebuilt option.
    pub fn option(mut self, option: SelectOption) -> Self {
        self.items.push(option);
        self
    }
}

/// The ordered set of groups a dropdown offers.
///
/// Order is significant: groups render in order and lookups scan groups in
/// order, then items within a group in order. The first match wins, so a
/// catalog built with [`Catalog::new`] that repeats a value still resolves
/// deterministically. Use [`Catalog::try_new`] to reject such catalogs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    groups: Vec<OptionGroup>,
}

impl Catalog {
    /// Build a catalog without validating it.
    pub fn new(groups: impl IntoIterator<Item = OptionGroup>) -> Self {
        Self {
            groups: groups.into_iter().collect(),
        }
    }

    /// Build a catalog, rejecting empty and duplicate values.
    pub fn try_new(groups: impl IntoIterator<Item = OptionGroup>) -> Result<Self, CatalogError> {
        let catalog = Self::new(groups);
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from JSON and validate it.
    ///
    /// The expected shape is a list of groups:
    ///
    /// ```json
    /// [{ "label": "Fruits", "items": [{ "value": "apple", "label": "Apple" }] }]
    /// ```
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check that every value is non-empty and unique.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for group in &self.groups {
            for item in &group.items {
                if item.value.is_empty() {
                    return Err(CatalogError::EmptyValue {
                        group: group.label.clone(),
                        label: item.label.clone(),
                    });
                }
                if let Some(first_group) = seen.insert(&item.value, &group.label) {
                    return Err(CatalogError::DuplicateValue {
                        value: item.value.clone(),
                        first_group: first_group.to_string(),
                        second_group: group.label.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    /// Total number of options across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All options in display order.
    pub fn iter_options(&self) -> impl Iterator<Item = &SelectOption> {
        self.groups.iter().flat_map(|g| g.items.iter())
    }

    /// Find the first option with the given value.
    pub fn find(&self, value: &str) -> Option<&SelectOption> {
        self.iter_options().find(|item| item.value == value)
    }

    /// `(group_index, item_index)` of the first option with the given value.
    pub fn position(&self, value: &str) -> Option<(usize, usize)> {
        self.groups.iter().enumerate().find_map(|(g, group)| {
            group
                .items
                .iter()
                .position(|item| item.value == value)
                .map(|i| (g, i))
        })
    }

    pub fn option_at(&self, group: usize, item: usize) -> Option<&SelectOption> {
        self.groups.get(group).and_then(|g| g.items.get(item))
    }

    /// Whether `value` names an option that can be selected.
    pub fn is_selectable(&self, value: &str) -> bool {
        self.find(value).is_some_and(|item| !item.disabled)
    }

    /// The first enabled option in display order.
    pub fn first_enabled(&self) -> Option<&SelectOption> {
        self.iter_options().find(|item| !item.disabled)
    }

    /// Flat index (display order) of a `(group, item)` position.
    pub(crate) fn flat_index(&self, group: usize, item: usize) -> Option<usize> {
        self.groups.get(group)?.items.get(item)?;
        let before: usize = self.groups[..group].iter().map(|g| g.items.len()).sum();
        Some(before + item)
    }

    /// `(group, item)` position of a flat display-order index.
    pub(crate) fn position_of_flat(&self, mut index: usize) -> Option<(usize, usize)> {
        for (g, group) in self.groups.iter().enumerate() {
            if index < group.items.len() {
                return Some((g, index));
            }
            index -= group.items.len();
        }
        None
    }
}
