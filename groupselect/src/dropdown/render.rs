//! Rendering for the Dropdown widget.
//!
//! [`render`] is a pure function of the catalog, the selection, the open
//! flag and the highlight. It produces a [`SelectView`] that a host draws
//! however it likes; element ids in the view are the ids the host reports
//! back in pointer paths and clicks.

use crate::catalog::Catalog;

/// `aria-haspopup` of the trigger.
pub const TRIGGER_HASPOPUP: &str = "listbox";
/// `role` of the option list.
pub const LIST_ROLE: &str = "listbox";
/// `role` of each option.
pub const OPTION_ROLE: &str = "option";

pub fn trigger_id(root: &str) -> String {
    format!("{}-trigger", root)
}

pub fn list_id(root: &str) -> String {
    format!("{}-list", root)
}

pub fn group_id(root: &str, group: usize) -> String {
    format!("{}-group-{}", root, group)
}

pub fn option_id(root: &str, group: usize, item: usize) -> String {
    format!("{}-opt-{}-{}", root, group, item)
}

/// Everything [`render`] looks at.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub id: &'a str,
    pub catalog: &'a Catalog,
    pub selection: Option<&'a str>,
    pub open: bool,
    pub placeholder: &'a str,
    /// Highlighted `(group, item)`; only meaningful while open.
    pub highlight: Option<(usize, usize)>,
}

/// The always-visible control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerView {
    pub id: String,
    /// Selected option's label, or the placeholder.
    pub label: String,
    pub is_placeholder: bool,
    pub aria_expanded: bool,
    pub aria_haspopup: &'static str,
    /// `▲` while open, `▼` while closed.
    pub indicator: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub id: String,
    pub value: String,
    pub label: String,
    /// Drawn as selected (check mark): value matches and the item is enabled.
    pub selected: bool,
    /// `aria-selected`: this is the first item carrying the selected value.
    pub aria_selected: bool,
    pub disabled: bool,
    pub highlighted: bool,
    pub role: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupView {
    pub id: String,
    pub label: String,
    pub items: Vec<ItemView>,
    /// A divider follows every group but the last.
    pub divider_after: bool,
}

/// The open option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub id: String,
    pub role: &'static str,
    pub groups: Vec<GroupView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectView {
    pub id: String,
    pub trigger: TriggerView,
    /// Present only while open.
    pub list: Option<ListView>,
}

impl SelectView {
    pub fn is_open(&self) -> bool {
        self.list.is_some()
    }

    /// Items of the open list in display order.
    pub fn items(&self) -> impl Iterator<Item = &ItemView> {
        self.list
            .iter()
            .flat_map(|list| list.groups.iter())
            .flat_map(|group| group.items.iter())
    }
}

/// Build the view for the given state.
pub fn render(input: &RenderInput<'_>) -> SelectView {
    let selected = input.selection.and_then(|v| input.catalog.find(v));
    // Only the first match is the selected item
    let selected_at = input.selection.and_then(|v| input.catalog.position(v));

    let trigger = TriggerView {
        id: trigger_id(input.id),
        label: selected
            .map(|item| item.label.clone())
            .unwrap_or_else(|| input.placeholder.to_string()),
        is_placeholder: selected.is_none(),
        aria_expanded: input.open,
        aria_haspopup: TRIGGER_HASPOPUP,
        indicator: if input.open { "▲" } else { "▼" },
    };

    let list = input.open.then(|| {
        let last = input.catalog.groups().len().saturating_sub(1);
        let groups = input
            .catalog
            .groups()
            .iter()
            .enumerate()
            .map(|(g, group)| GroupView {
                id: group_id(input.id, g),
                label: group.label.clone(),
                items: group
                    .items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let matches = selected_at == Some((g, i));
                        ItemView {
                            id: option_id(input.id, g, i),
                            value: item.value.clone(),
                            label: item.label.clone(),
                            selected: matches && !item.disabled,
                            aria_selected: matches,
                            disabled: item.disabled,
                            highlighted: input.highlight == Some((g, i)),
                            role: OPTION_ROLE,
                        }
                    })
                    .collect(),
                divider_after: g < last,
            })
            .collect();

        ListView {
            id: list_id(input.id),
            role: LIST_ROLE,
            groups,
        }
    });

    SelectView {
        id: input.id.to_string(),
        trigger,
        list,
    }
}
