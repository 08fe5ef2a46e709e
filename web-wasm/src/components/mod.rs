//! UIコンポーネント

pub mod admin_panel;
pub mod decode_dialog;
pub mod export_buttons;
pub mod extraction_results;
pub mod header;
pub mod insurance_form;
pub mod manual_entry;
pub mod progress_bar;
pub mod upload_area;
pub mod uploaded_files;
pub mod vehicle_results;
