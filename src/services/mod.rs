pub mod scoring;
pub mod sheet_import;
pub mod test_service;
pub mod user_service;
