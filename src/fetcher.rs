use super::*;

#[derive(Debug)]
pub(crate) struct FetchedComments {
  pub(crate) records: Vec<CommentRecord>,
  pub(crate) title: String,
  pub(crate) total_top_level: usize,
}

impl Client {
  /// Counts top-level comments, resolving only the placeholders attached
  /// directly to the submission.
  pub(crate) async fn count_top_level(
    &self,
    reference: &str,
  ) -> Result<usize, FetchError> {
    let id = Submission::parse_id(reference)?;

    let mut submission = self.fetch_submission(&id).await?;

    self
      .resolve_forest(
        &submission.name,
        &mut submission.comments,
        &submission.name,
        false,
      )
      .await?;

    debug!(
      %id,
      nested_placeholders = submission.comments.has_placeholders(),
      "counted top-level comments"
    );

    Ok(submission.comments.len())
  }

  /// Fetches a submission with its whole comment tree resolved and returns
  /// its comments in listing order.
  ///
  /// Unless `save_all` is set only the first `limit` listed comments are
  /// kept. The cut happens before any sorting by score.
  pub(crate) async fn fetch_comments(
    &self,
    reference: &str,
    limit: usize,
    save_all: bool,
  ) -> Result<FetchedComments, FetchError> {
    let id = Submission::parse_id(reference)?;

    let mut submission = self.fetch_submission(&id).await?;

    self
      .resolve_forest(
        &submission.name,
        &mut submission.comments,
        &submission.name,
        true,
      )
      .await?;

    let listed = submission.comments.flatten();

    let keep = if save_all { listed.len() } else { limit };

    info!(
      %id,
      listed = listed.len(),
      kept = keep.min(listed.len()),
      "fetched comments"
    );

    let records = listed
      .into_iter()
      .take(keep)
      .map(CommentRecord::from)
      .collect();

    let total_top_level = submission.comments.len();

    Ok(FetchedComments {
      records,
      title: submission.title,
      total_top_level,
    })
  }

  /// Replaces every placeholder of `forest` with the comments it stands for,
  /// descending into replies when `recursive` is set.
  fn resolve_forest<'a>(
    &'a self,
    link: &'a str,
    forest: &'a mut CommentForest,
    parent: &'a str,
    recursive: bool,
  ) -> BoxFuture<'a, Result<(), FetchError>> {
    async move {
      let article = link.strip_prefix("t3_").unwrap_or(link);

      while !forest.more.is_empty() {
        for more in mem::take(&mut forest.more) {
          let resolved = if more.is_continue_thread() {
            if more.parent_id == link {
              continue;
            }

            self.fetch_continued(article, &more.parent_id).await?
          } else {
            debug!(parent, count = more.count, "resolving placeholder");

            let mut things = Vec::with_capacity(more.children.len());

            for batch in more.children.chunks(Self::MORE_CHILDREN_BATCH) {
              things.extend(self.fetch_more_children(link, batch).await?);
            }

            CommentForest::assemble(things, parent)
          };

          forest.extend(resolved);
        }
      }

      if recursive {
        for comment in &mut forest.comments {
          self
            .resolve_forest(link, &mut comment.replies, &comment.name, true)
            .await?;
        }
      }

      Ok(())
    }
    .boxed()
  }
}
