pub mod bridge;
pub mod clipboard;
