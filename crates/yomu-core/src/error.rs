#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Surface has no pixels ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },

    #[error("Screen has no area ({width}x{height})")]
    EmptyScreen { width: u32, height: u32 },

    #[error("Selection box is not finite")]
    InvalidBox,
}
