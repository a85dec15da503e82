use dioxus::prelude::*;
use spotfinder_shared::filter;
use spotfinder_shared::models::Place;

use crate::api;
use crate::components::filter_panel::{checked_groups, FilterPanel, FilterSection};
use crate::components::language_chooser::LanguageChooser;
use crate::components::map_view::MapView;
use crate::components::report_form::ReportForm;
use crate::config::MapConfig;
use crate::layer::{LayerManager, RefreshState};

#[component]
pub fn MapPage() -> Element {
    let config = use_hook(MapConfig::default);
    let initial_center = (config.center[0], config.center[1]);
    let initial_zoom = config.zoom;

    let mut sections = use_signal(Vec::<FilterSection>::new);
    let mut manager = use_signal(LayerManager::new);
    let center = use_signal(move || initial_center);
    let zoom = use_signal(move || initial_zoom);
    let open_popup = use_signal(|| None::<String>);
    let mut report_target = use_signal(|| None::<Place>);

    let languages_resource = use_resource(|| api::fetch_languages());

    // One filter change = one generation. The query is read synchronously
    // from the registry before the fetch is spawned, so it reflects exactly
    // the boxes checked at this instant.
    let mut refresh = move || {
        let query = filter::build_query(&checked_groups(&sections.read()));
        let token = manager.write().begin_refresh();
        spawn(async move {
            match api::fetch_places(&query).await {
                Ok(places) => {
                    manager.write().complete_refresh(token, places);
                }
                Err(e) => {
                    tracing::error!(error = %e, "places fetch failed, keeping current markers");
                    manager.write().fail_refresh(token);
                }
            }
        });
    };

    // Startup: initial unfiltered load, then the filter controls. Sections
    // appear in category-list order immediately; each category's values load
    // independently, so one slow or failed fetch only leaves that section
    // unpopulated.
    use_hook(move || {
        spawn(async move {
            refresh();
            match api::fetch_categories().await {
                Ok(categories) => {
                    sections
                        .set(categories.iter().cloned().map(FilterSection::empty).collect());
                    for (index, category) in categories.into_iter().enumerate() {
                        spawn(async move {
                            match api::fetch_category_values(&category.id).await {
                                Ok(values) => {
                                    if let Some(section) = sections.write().get_mut(index) {
                                        *section = FilterSection::with_values(category, values);
                                    }
                                }
                                Err(e) => {
                                    tracing::error!(
                                        category = %category.id,
                                        error = %e,
                                        "category values fetch failed"
                                    );
                                }
                            }
                        });
                    }
                }
                Err(e) => tracing::error!(error = %e, "categories fetch failed"),
            }
        });
    });

    let layer = manager.read().layer().clone();
    let refreshing = matches!(manager.read().state(), RefreshState::Refreshing { .. });
    let languages: Vec<String> = match &*languages_resource.read() {
        Some(Ok(l)) => l.clone(),
        _ => vec![],
    };

    rsx! {
        div { class: "app",
            div { class: "header",
                h1 { "Spotfinder" }
                if refreshing {
                    span { class: "refresh-badge", "Updating..." }
                }
                LanguageChooser { languages: languages }
            }

            div { class: "sidebar",
                div { class: "panel",
                    h3 { "Filters" }
                    FilterPanel {
                        sections: sections,
                        on_change: move |_| refresh(),
                    }
                }
            }

            MapView {
                config: config.clone(),
                layer: layer,
                center: center,
                zoom: zoom,
                open_popup: open_popup,
                on_report: move |place: Place| report_target.set(Some(place)),
            }

            if let Some(place) = report_target.read().clone() {
                ReportForm {
                    place: place,
                    on_close: move |_| report_target.set(None),
                }
            }
        }
    }
}
