use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("depth must be at least 1")]
    DepthTooLow,
    #[error("time limit must be greater than zero")]
    ZeroTimeLimit,
    #[error("failed to start search workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
