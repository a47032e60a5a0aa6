pub mod process_bookmark;
pub mod run_monitoring;
