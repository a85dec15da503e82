use dioxus::prelude::*;

/// Language pills linking to the server-side language switch.
#[component]
pub fn LanguageChooser(languages: Vec<String>) -> Element {
    rsx! {
        ul { class: "lang-list",
            for lang in languages {
                li { class: "lang-item",
                    a { href: "/language/{lang}", "{lang}" }
                }
            }
        }
    }
}
