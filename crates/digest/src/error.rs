use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("Failed to render digest: {0}")]
    Render(#[from] std::fmt::Error),
}
