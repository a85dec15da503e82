pub mod filter_panel;
pub mod language_chooser;
pub mod map_view;
pub mod report_form;
