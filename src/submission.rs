use super::*;

#[derive(Debug)]
pub(crate) struct Submission {
  pub(crate) comments: CommentForest,
  pub(crate) id: String,
  pub(crate) name: String,
  pub(crate) title: String,
}

impl Submission {
  pub(crate) fn from_listings(
    link: Listing,
    comments: Listing,
  ) -> Result<Self, FetchError> {
    let link = link
      .data
      .children
      .into_iter()
      .find_map(|thing| match thing {
        Thing::Link(link) => Some(link),
        _ => None,
      })
      .ok_or(FetchError::MissingSubmission)?;

    let LinkData { id, name, title } = link;

    Ok(Self {
      comments: CommentForest::from_things(comments.data.children),
      id,
      name,
      title,
    })
  }

  /// Extracts the submission id from a post URL.
  ///
  /// Accepts `reddit.com/r/<sub>/comments/<id>/...` on any reddit host,
  /// `reddit.com/comments/<id>` and `redd.it/<id>`, with or without a scheme.
  pub(crate) fn parse_id(reference: &str) -> Result<String, FetchError> {
    let invalid = || FetchError::InvalidUrl {
      url: reference.to_string(),
    };

    let trimmed = reference.trim();

    let url = match Url::parse(trimmed) {
      Ok(url) => url,
      Err(url::ParseError::RelativeUrlWithoutBase) => {
        Url::parse(&format!("https://{trimmed}")).map_err(|_| invalid())?
      }
      Err(_) => return Err(invalid()),
    };

    if !matches!(url.scheme(), "http" | "https") {
      return Err(invalid());
    }

    let host = url.host_str().ok_or_else(invalid)?.to_ascii_lowercase();

    let segments = url
      .path_segments()
      .map(|segments| {
        segments
          .filter(|segment| !segment.is_empty())
          .collect::<Vec<_>>()
      })
      .unwrap_or_default();

    let id = if host == "redd.it" {
      segments.first().copied()
    } else if host == "reddit.com" || host.ends_with(".reddit.com") {
      segments
        .iter()
        .position(|segment| *segment == "comments")
        .and_then(|index| segments.get(index + 1))
        .copied()
    } else {
      None
    };

    id.filter(|id| id.chars().all(|ch| ch.is_ascii_alphanumeric()))
      .map(str::to_string)
      .ok_or_else(invalid)
  }
}
