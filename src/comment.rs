use super::*;

#[derive(Clone, Debug)]
pub(crate) struct Comment {
  pub(crate) body: String,
  pub(crate) id: String,
  pub(crate) name: String,
  pub(crate) replies: CommentForest,
  pub(crate) score: i64,
}

impl From<CommentData> for Comment {
  fn from(data: CommentData) -> Self {
    let replies = data
      .replies
      .map(|listing| CommentForest::from_things(listing.data.children))
      .unwrap_or_default();

    Self {
      body: data.body,
      id: data.id,
      name: data.name,
      replies,
      score: data.score,
    }
  }
}

/// Comments at one level of a thread, plus the placeholders that still hide
/// more comments at that level.
#[derive(Clone, Debug, Default)]
pub(crate) struct CommentForest {
  pub(crate) comments: Vec<Comment>,
  pub(crate) more: Vec<More>,
}

impl CommentForest {
  /// Rebuilds a forest from a flat, depth-first list of things whose
  /// `parent_id` links them to each other or to `root`.
  pub(crate) fn assemble(things: Vec<Thing>, root: &str) -> Self {
    let mut pending = HashMap::<String, CommentForest>::new();

    for thing in things.into_iter().rev() {
      match thing {
        Thing::Comment(data) => {
          let parent = data.parent_id.clone();

          let mut comment = Comment::from(data);

          if let Some(mut replies) = pending.remove(&comment.name) {
            replies.reverse();
            comment.replies.extend(replies);
          }

          pending.entry(parent).or_default().comments.push(comment);
        }
        Thing::More(data) => {
          pending
            .entry(data.parent_id.clone())
            .or_default()
            .more
            .push(More::from(data));
        }
        Thing::Link(_) => {}
      }
    }

    let mut forest = pending.remove(root).unwrap_or_default();

    forest.reverse();

    if !pending.is_empty() {
      warn!(
        orphans = pending.len(),
        root, "dropping comments whose parent was not returned"
      );
    }

    forest
  }

  pub(crate) fn extend(&mut self, other: CommentForest) {
    self.comments.extend(other.comments);
    self.more.extend(other.more);
  }

  /// Lists every comment breadth first: all comments of this level, then
  /// their replies, level by level.
  pub(crate) fn flatten(&self) -> Vec<&Comment> {
    let mut queue = self.comments.iter().collect::<VecDeque<_>>();

    let mut listed = Vec::new();

    while let Some(comment) = queue.pop_front() {
      listed.push(comment);
      queue.extend(comment.replies.comments.iter());
    }

    listed
  }

  pub(crate) fn from_things(things: Vec<Thing>) -> Self {
    let mut forest = Self::default();

    for thing in things {
      match thing {
        Thing::Comment(data) => forest.comments.push(Comment::from(data)),
        Thing::More(data) => forest.more.push(More::from(data)),
        Thing::Link(_) => {}
      }
    }

    forest
  }

  pub(crate) fn has_placeholders(&self) -> bool {
    !self.more.is_empty()
      || self
        .comments
        .iter()
        .any(|comment| comment.replies.has_placeholders())
  }

  pub(crate) fn len(&self) -> usize {
    self.comments.len()
  }

  fn reverse(&mut self) {
    self.comments.reverse();
    self.more.reverse();
  }
}

/// A "load more comments" placeholder.
#[derive(Clone, Debug)]
pub(crate) struct More {
  pub(crate) children: Vec<String>,
  pub(crate) count: u64,
  pub(crate) parent_id: String,
}

impl From<MoreData> for More {
  fn from(data: MoreData) -> Self {
    Self {
      children: data.children,
      count: data.count,
      parent_id: data.parent_id,
    }
  }
}

impl More {
  /// "Continue this thread" links carry no child ids; the thread has to be
  /// fetched again rooted at the parent comment.
  pub(crate) fn is_continue_thread(&self) -> bool {
    self.children.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use {super::*, crate::test_helpers::*};

  fn things(values: Vec<Value>) -> Vec<Thing> {
    values
      .into_iter()
      .map(|value| serde_json::from_value(value).unwrap())
      .collect()
  }

  fn ids(comments: &[&Comment]) -> Vec<String> {
    comments.iter().map(|comment| comment.id.clone()).collect()
  }

  #[test]
  fn assemble_links_depth_first_things_to_their_parents() {
    let forest = CommentForest::assemble(
      things(vec![
        comment_json("a", "t3_post", 5, "a", Vec::new()),
        comment_json("a1", "t1_a", 1, "a1", Vec::new()),
        comment_json("a1x", "t1_a1", 1, "a1x", Vec::new()),
        more_json("t1_a1", &["a1y"]),
        comment_json("a2", "t1_a", 1, "a2", Vec::new()),
        comment_json("b", "t3_post", 3, "b", Vec::new()),
        more_json("t3_post", &["c", "d"]),
      ]),
      "t3_post",
    );

    assert_eq!(
      forest
        .comments
        .iter()
        .map(|comment| comment.id.as_str())
        .collect::<Vec<_>>(),
      vec!["a", "b"]
    );

    assert_eq!(forest.more.len(), 1);
    assert_eq!(forest.more[0].children, vec!["c", "d"]);

    let a = &forest.comments[0];

    assert_eq!(
      a.replies
        .comments
        .iter()
        .map(|comment| comment.id.as_str())
        .collect::<Vec<_>>(),
      vec!["a1", "a2"]
    );

    assert_eq!(a.replies.comments[0].replies.len(), 1);
    assert_eq!(a.replies.comments[0].replies.more.len(), 1);
    assert!(forest.has_placeholders());
  }

  #[test]
  fn assemble_drops_orphans() {
    let forest = CommentForest::assemble(
      things(vec![
        comment_json("a", "t3_post", 1, "a", Vec::new()),
        comment_json("x", "t1_missing", 1, "x", Vec::new()),
      ]),
      "t3_post",
    );

    assert_eq!(forest.len(), 1);
    assert!(forest.comments[0].replies.comments.is_empty());
  }

  #[test]
  fn flatten_lists_breadth_first() {
    let forest = CommentForest::from_things(things(vec![
      comment_json(
        "a",
        "t3_post",
        1,
        "a",
        vec![comment_json(
          "a1",
          "t1_a",
          1,
          "a1",
          vec![comment_json("a1x", "t1_a1", 1, "a1x", Vec::new())],
        )],
      ),
      comment_json(
        "b",
        "t3_post",
        1,
        "b",
        vec![comment_json("b1", "t1_b", 1, "b1", Vec::new())],
      ),
    ]));

    assert_eq!(ids(&forest.flatten()), vec!["a", "b", "a1", "b1", "a1x"]);
    assert_eq!(forest.len(), 2);
    assert!(!forest.has_placeholders());
  }

  #[test]
  fn continue_thread_placeholder_has_no_children() {
    let forest =
      CommentForest::from_things(things(vec![more_json("t1_a", &[])]));

    assert!(forest.more[0].is_continue_thread());
  }
}
