use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
  CountTopLevel { request_id: u64, url: String },
  Export { job: ExportJob, task_id: u64 },
}
