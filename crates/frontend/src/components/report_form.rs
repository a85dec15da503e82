use dioxus::prelude::*;
use spotfinder_shared::models::Place;

use crate::api;

#[derive(Debug, Clone, PartialEq)]
enum ReportStatus {
    Editing,
    Sending,
    Sent,
    Failed(String),
}

/// "Report a problem" dialog for one place. Submitting never touches the
/// marker layer; the only outcomes are an inline confirmation or error.
#[component]
pub fn ReportForm(place: Place, on_close: EventHandler<()>) -> Element {
    let mut description = use_signal(String::new);
    let mut status = use_signal(|| ReportStatus::Editing);

    let cur_status = status.read().clone();
    let sending = cur_status == ReportStatus::Sending;

    rsx! {
        div { class: "report-overlay",
            div { class: "report-form",
                h3 { "Report a problem" }
                p { class: "report-place", "{place.title}" }

                {match &cur_status {
                    ReportStatus::Sent => rsx! {
                        p { class: "report-ok", "Thank you, the problem has been reported." }
                    },
                    ReportStatus::Failed(err) => rsx! {
                        p { class: "report-error", "Sending failed: {err}" }
                    },
                    _ => rsx! {
                        textarea {
                            placeholder: "What is wrong with this place?",
                            value: "{description}",
                            disabled: sending,
                            oninput: move |evt: Event<FormData>| {
                                description.set(evt.value().to_string());
                            },
                        }
                    },
                }}

                div { class: "report-actions",
                    if cur_status == ReportStatus::Editing || matches!(&cur_status, ReportStatus::Failed(_)) {
                        button {
                            disabled: description.read().trim().is_empty(),
                            onclick: {
                                let place = place.clone();
                                move |_| {
                                    let place = place.clone();
                                    let text = description.read().trim().to_string();
                                    status.set(ReportStatus::Sending);
                                    spawn(async move {
                                        match api::report_place(&place, &text).await {
                                            Ok(()) => {
                                                status.set(ReportStatus::Sent);
                                                // Let the confirmation sit for a moment
                                                gloo_timers::future::TimeoutFuture::new(2_500).await;
                                                on_close.call(());
                                            }
                                            Err(e) => {
                                                tracing::warn!(error = %e, "problem report failed");
                                                status.set(ReportStatus::Failed(e));
                                            }
                                        }
                                    });
                                }
                            },
                            "Send"
                        }
                    }
                    button {
                        class: "secondary",
                        onclick: move |_| on_close.call(()),
                        if cur_status == ReportStatus::Sent { "Close" } else { "Cancel" }
                    }
                }
            }
        }
    }
}
