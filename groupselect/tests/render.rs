use groupselect::dropdown::render::{render, RenderInput, LIST_ROLE, OPTION_ROLE, TRIGGER_HASPOPUP};
use groupselect::sample::{food_catalog, DEFAULT_PLACEHOLDER, SAMPLE_DEFAULT_VALUE};
use groupselect::{Catalog, Document, Dropdown, OptionGroup};

fn input<'a>(catalog: &'a Catalog, selection: Option<&'a str>, open: bool) -> RenderInput<'a> {
    RenderInput {
        id: "food",
        catalog,
        selection,
        open,
        placeholder: DEFAULT_PLACEHOLDER,
        highlight: None,
    }
}

// ============================================================================
// Trigger Tests
// ============================================================================

#[test]
fn test_closed_view_has_no_list() {
    let catalog = food_catalog();
    let view = render(&input(&catalog, Some("grapes"), false));

    assert_eq!(view.id, "food");
    assert!(!view.is_open());
    assert_eq!(view.trigger.id, "food-trigger");
    assert_eq!(view.trigger.label, "Grapes");
    assert!(!view.trigger.is_placeholder);
    assert!(!view.trigger.aria_expanded);
    assert_eq!(view.trigger.aria_haspopup, TRIGGER_HASPOPUP);
    assert_eq!(view.trigger.indicator, "▼");
}

#[test]
fn test_open_trigger_reports_expanded() {
    let catalog = food_catalog();
    let view = render(&input(&catalog, None, true));
    assert!(view.trigger.aria_expanded);
    assert_eq!(view.trigger.indicator, "▲");
}

#[test]
fn test_unknown_selection_shows_placeholder() {
    let catalog = food_catalog();
    let view = render(&input(&catalog, Some("durian"), false));
    assert_eq!(view.trigger.label, DEFAULT_PLACEHOLDER);
    assert!(view.trigger.is_placeholder);
}

#[test]
fn test_duplicate_values_label_from_first_match() {
    let catalog = Catalog::new([
        OptionGroup::new("A").item("dup", "First"),
        OptionGroup::new("B").item("dup", "Second"),
    ]);
    let view = render(&input(&catalog, Some("dup"), false));
    assert_eq!(view.trigger.label, "First");
}

#[test]
fn test_duplicate_values_flag_only_first_match() {
    let catalog = Catalog::new([
        OptionGroup::new("A").item("dup", "First"),
        OptionGroup::new("B").item("dup", "Second"),
    ]);
    let view = render(&input(&catalog, Some("dup"), true));
    let flags: Vec<(&str, bool, bool)> = view
        .items()
        .map(|item| (item.label.as_str(), item.selected, item.aria_selected))
        .collect();
    assert_eq!(flags, vec![("First", true, true), ("Second", false, false)]);
}

// ============================================================================
// List Tests
// ============================================================================

#[test]
fn test_open_list_keeps_catalog_order() {
    let catalog = food_catalog();
    let view = render(&input(&catalog, Some(SAMPLE_DEFAULT_VALUE), true));
    let list = view.list.as_ref().unwrap();

    assert_eq!(list.id, "food-list");
    assert_eq!(list.role, LIST_ROLE);
    let labels: Vec<&str> = list.groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["Fruits", "Vegetables", "Meat"]);

    let values: Vec<&str> = view.items().map(|i| i.value.as_str()).collect();
    let expected: Vec<&str> = catalog.iter_options().map(|o| o.value.as_str()).collect();
    assert_eq!(values, expected);
}

#[test]
fn test_dividers_between_groups_only() {
    let catalog = food_catalog();
    let view = render(&input(&catalog, None, true));
    let dividers: Vec<bool> = view
        .list
        .unwrap()
        .groups
        .iter()
        .map(|g| g.divider_after)
        .collect();
    assert_eq!(dividers, vec![true, true, false]);
}

#[test]
fn test_item_ids_and_roles() {
    let catalog = food_catalog();
    let view = render(&input(&catalog, None, true));
    let list = view.list.as_ref().unwrap();

    assert_eq!(list.groups[1].id, "food-group-1");
    assert_eq!(list.groups[1].items[2].id, "food-opt-1-2");
    assert_eq!(list.groups[1].items[2].value, "carrot");
    assert!(view.items().all(|i| i.role == OPTION_ROLE));
}

#[test]
fn test_selected_and_disabled_flags() {
    let catalog = food_catalog();
    let view = render(&input(&catalog, Some("grapes"), true));

    let selected: Vec<&str> = view.items().filter(|i| i.selected).map(|i| i.value.as_str()).collect();
    assert_eq!(selected, vec!["grapes"]);

    let disabled: Vec<&str> = view.items().filter(|i| i.disabled).map(|i| i.value.as_str()).collect();
    assert_eq!(disabled, vec!["carrot"]);
}

#[test]
fn test_disabled_match_is_aria_selected_but_not_drawn_selected() {
    let catalog = food_catalog();
    let view = render(&input(&catalog, Some("carrot"), true));
    let carrot = view.items().find(|i| i.value == "carrot").unwrap();
    assert!(carrot.aria_selected);
    assert!(!carrot.selected);
}

#[test]
fn test_highlight_flag() {
    let catalog = food_catalog();
    let mut inp = input(&catalog, None, true);
    inp.highlight = Some((2, 1));
    let view = render(&inp);

    let highlighted: Vec<&str> = view
        .items()
        .filter(|i| i.highlighted)
        .map(|i| i.value.as_str())
        .collect();
    assert_eq!(highlighted, vec!["chicken"]);
}

#[test]
fn test_render_is_pure() {
    let catalog = food_catalog();
    let a = render(&input(&catalog, Some("leek"), true));
    let b = render(&input(&catalog, Some("leek"), true));
    assert_eq!(a, b);
}

// ============================================================================
// Dropdown::render Tests
// ============================================================================

#[test]
fn test_dropdown_render_follows_state() {
    let doc = Document::new();
    let dd = Dropdown::builder(food_catalog())
        .id("food")
        .default_value("grapes")
        .build_uncontrolled(&doc);

    assert!(!dd.render().is_open());

    dd.open();
    let view = dd.render();
    assert!(view.is_open());
    // Highlight starts on the selected option
    let highlighted = view.items().find(|i| i.highlighted).unwrap();
    assert_eq!(highlighted.value, "grapes");

    dd.close();
    assert!(!dd.render().is_open());
}
