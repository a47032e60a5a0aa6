pub mod bookmark;
pub mod monitoring;
pub mod shared;
