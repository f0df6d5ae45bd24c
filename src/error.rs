use super::*;

/// Failure to fetch a submission or its comments from Reddit.
#[derive(Debug, Error)]
pub(crate) enum FetchError {
  #[error("reddit reported errors: {0}")]
  Api(String),
  #[error("reddit rejected the credentials: {reason}")]
  Auth { reason: String },
  #[error("could not decode reddit response: {0}")]
  Decode(#[from] serde_json::Error),
  #[error("invalid reddit post URL: {url}")]
  InvalidUrl { url: String },
  #[error("reddit response did not contain a submission")]
  MissingSubmission,
  #[error("reddit rate limit exceeded, try again later")]
  RateLimited,
  #[error("reddit returned {status} for {url}")]
  Status { status: StatusCode, url: String },
  #[error("network error: {0}")]
  Transport(#[from] reqwest::Error),
}

/// Failure to write the CSV export.
#[derive(Debug, Error)]
pub(crate) enum ExportError {
  #[error("could not write CSV to {}: {source}", path.display())]
  Csv { path: PathBuf, source: csv::Error },
  #[error("could not write {}: {source}", path.display())]
  Io { path: PathBuf, source: io::Error },
}

#[derive(Debug, Error)]
pub(crate) enum TaskError {
  #[error(transparent)]
  Export(#[from] ExportError),
  #[error(transparent)]
  Fetch(#[from] FetchError),
}
