pub mod context;
pub mod crop;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod keys;
pub mod lifecycle;
pub mod page;
pub mod placement;
