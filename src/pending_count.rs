use super::*;

/// A save-all request waiting for its top-level comment count, or holding
/// a count that arrived while another overlay was open.
pub(crate) struct PendingCount {
  pub(crate) job: ExportJob,
  pub(crate) request_id: u64,
  pub(crate) total: Option<usize>,
}
