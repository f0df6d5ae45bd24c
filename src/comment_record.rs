use super::*;

/// One exported row: the comment's score, its direct reply count and its
/// body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CommentRecord {
  pub(crate) body: String,
  pub(crate) reply_count: usize,
  pub(crate) score: i64,
}

impl From<&Comment> for CommentRecord {
  fn from(comment: &Comment) -> Self {
    Self {
      body: comment.body.clone(),
      reply_count: comment.replies.len(),
      score: comment.score,
    }
  }
}

impl CommentRecord {
  #[cfg(test)]
  pub(crate) fn new(score: i64, reply_count: usize, body: &str) -> Self {
    Self {
      body: body.to_string(),
      reply_count,
      score,
    }
  }
}
