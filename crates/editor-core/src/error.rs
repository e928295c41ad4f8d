use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("No rendered viewport for page {0}")]
    MissingViewport(u32),
}
