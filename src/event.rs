use super::*;

/// Messages sent from background tasks to the interactive loop.
#[derive(Debug)]
pub(crate) enum Event {
  TaskFailed {
    message: String,
    task_id: u64,
  },
  TaskFinished {
    task_id: u64,
  },
  TopLevelCount {
    request_id: u64,
    result: Result<usize, FetchError>,
  },
  TotalComments {
    path: PathBuf,
    task_id: u64,
    total: usize,
  },
}
