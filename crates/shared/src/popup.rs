//! Marker popup markup.

use crate::models::Place;

/// Render the popup markup for one place.
///
/// Produces a title block (bold title, line break, subtitle) followed by one
/// `<b>category</b>: value1, value2` line per attribute category on the
/// place. Place-provided strings are embedded raw: the data source is the
/// deployment's own database and is trusted by contract. Callers feeding
/// untrusted data through this function get script injection, not a layout
/// bug.
pub fn format_popup(place: &Place) -> String {
    let mut markup = String::with_capacity(128);
    markup.push_str("<div class=\"place-data\">");
    markup.push_str(&format!(
        "<p><b>{}</b><br/>{}</p>",
        place.title, place.subtitle
    ));
    if !place.data.is_empty() {
        let lines: Vec<String> = place
            .data
            .iter()
            .map(|(category, values)| format!("<b>{}</b>: {}", category, values.join(", ")))
            .collect();
        markup.push_str(&format!("<p>{}</p>", lines.join("<br>")));
    }
    markup.push_str("</div>");
    markup
}
