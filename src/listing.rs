use super::*;

#[derive(Debug, Deserialize)]
pub(crate) struct Listing {
  pub(crate) data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListingData {
  #[serde(default)]
  pub(crate) children: Vec<Thing>,
}

/// A single Reddit "thing", tagged by its `kind`.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub(crate) enum Thing {
  #[serde(rename = "t1")]
  Comment(CommentData),
  #[serde(rename = "t3")]
  Link(LinkData),
  #[serde(rename = "more")]
  More(MoreData),
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentData {
  #[serde(default)]
  pub(crate) body: String,
  pub(crate) id: String,
  pub(crate) name: String,
  pub(crate) parent_id: String,
  #[serde(default, deserialize_with = "deserialize_replies")]
  pub(crate) replies: Option<Listing>,
  #[serde(default)]
  pub(crate) score: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LinkData {
  pub(crate) id: String,
  pub(crate) name: String,
  pub(crate) title: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MoreData {
  #[serde(default)]
  pub(crate) children: Vec<String>,
  #[serde(default)]
  pub(crate) count: u64,
  pub(crate) parent_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MoreChildrenResponse {
  pub(crate) json: MoreChildrenBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MoreChildrenBody {
  #[serde(default)]
  pub(crate) data: ListingThings,
  #[serde(default)]
  pub(crate) errors: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListingThings {
  #[serde(default)]
  pub(crate) things: Vec<Thing>,
}
