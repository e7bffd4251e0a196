use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankingError {
    #[error("Invalid ranking configuration: {0}")]
    Config(#[from] configuration::error::ConfigError),
}
