use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Ranking engine error: {0}")]
    Ranking(#[from] ranking::RankingError),

    #[error("Failed to access ranking history at {}: {source}", path.display())]
    HistoryIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Ranking history at {} is not valid JSON: {source}", path.display())]
    HistoryFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
