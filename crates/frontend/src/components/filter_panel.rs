use dioxus::prelude::*;
use spotfinder_shared::filter::CheckedGroup;
use spotfinder_shared::models::{Category, CategoryValue};

/// One checkbox binding: a value plus its checked flag. The true key is
/// (category, value): entries are addressed by index within their section,
/// so a value id reused across categories can never leak between filters.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterEntry {
    pub value: CategoryValue,
    pub checked: bool,
}

/// One category's section in the filter panel. Sections are created with no
/// entries as soon as the category list arrives and filled in when that
/// category's value fetch resolves, so a slow or failed fetch leaves a
/// titled, empty section without blocking the others.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSection {
    pub category: Category,
    pub entries: Vec<FilterEntry>,
}

impl FilterSection {
    pub fn empty(category: Category) -> Self {
        FilterSection {
            category,
            entries: Vec::new(),
        }
    }

    pub fn with_values(category: Category, values: Vec<CategoryValue>) -> Self {
        FilterSection {
            category,
            entries: values
                .into_iter()
                .map(|value| FilterEntry {
                    value,
                    checked: false,
                })
                .collect(),
        }
    }

    /// The checked value ids of this section, in render order.
    pub fn checked_group(&self) -> CheckedGroup {
        CheckedGroup::new(
            self.category.id.clone(),
            self.entries
                .iter()
                .filter(|e| e.checked)
                .map(|e| e.value.id.clone())
                .collect(),
        )
    }
}

/// Snapshot the full registry state. Called on every change: correctness
/// rests on re-reading everything, not on incremental diffing.
pub fn checked_groups(sections: &[FilterSection]) -> Vec<CheckedGroup> {
    sections.iter().map(FilterSection::checked_group).collect()
}

#[component]
pub fn FilterPanel(sections: Signal<Vec<FilterSection>>, on_change: EventHandler<()>) -> Element {
    // Mutable binding for the checkbox handlers (Signal is Copy)
    let mut sections = sections;
    let rendered = sections.read().clone();

    rsx! {
        div { class: "filter-panel",
            for (si, section) in rendered.iter().enumerate() {
                div { class: "filter-section",
                    span { class: "filter-section-title", "{section.category.label}" }
                    for (vi, entry) in section.entries.iter().enumerate() {
                        label {
                            class: "filter-row",
                            r#for: "{section.category.id}-{entry.value.id}",
                            input {
                                r#type: "checkbox",
                                id: "{section.category.id}-{entry.value.id}",
                                checked: entry.checked,
                                onchange: move |_| {
                                    let mut secs = sections.write();
                                    if let Some(e) =
                                        secs.get_mut(si).and_then(|s| s.entries.get_mut(vi))
                                    {
                                        e.checked = !e.checked;
                                    }
                                    drop(secs);
                                    on_change.call(());
                                },
                            }
                            "{entry.value.label}"
                        }
                    }
                }
            }
        }
    }
}
