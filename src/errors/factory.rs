#[derive(thiserror::Error, Debug)]
pub enum FactoryErrorKind {
    #[error("Invalid factory pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
