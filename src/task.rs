use super::*;

/// Everything a background export needs, captured when the user saves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ExportJob {
  pub(crate) directory: PathBuf,
  pub(crate) limit: usize,
  pub(crate) save_all: bool,
  pub(crate) url: String,
}

/// Fetches and exports one submission off the interactive loop.
///
/// A task runs once: `run` consumes it, reports either the total top-level
/// count or an error, and always reports completion last.
pub(crate) struct ExportTask {
  client: Client,
  id: u64,
  job: ExportJob,
  sender: UnboundedSender<Event>,
}

impl ExportTask {
  async fn execute(&self) -> Result<(usize, PathBuf), TaskError> {
    let fetched = self
      .client
      .fetch_comments(&self.job.url, self.job.limit, self.job.save_all)
      .await?;

    let path =
      exporter::export(fetched.records, &fetched.title, &self.job.directory)?;

    Ok((fetched.total_top_level, path))
  }

  pub(crate) fn new(
    client: Client,
    id: u64,
    job: ExportJob,
    sender: UnboundedSender<Event>,
  ) -> Self {
    Self {
      client,
      id,
      job,
      sender,
    }
  }

  pub(crate) async fn run(self) {
    info!(task = self.id, url = %self.job.url, "export started");

    let event = match self.execute().await {
      Ok((total, path)) => {
        info!(task = self.id, total, path = %path.display(), "export finished");

        Event::TotalComments {
          path,
          task_id: self.id,
          total,
        }
      }
      Err(error) => {
        warn!(task = self.id, %error, "export failed");

        Event::TaskFailed {
          message: error.to_string(),
          task_id: self.id,
        }
      }
    };

    let _ = self.sender.send(event);
    let _ = self.sender.send(Event::TaskFinished { task_id: self.id });
  }
}
