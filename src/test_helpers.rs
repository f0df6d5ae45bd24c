//! Reddit payload builders and a mock-backed client shared by unit tests.

use {
  super::*,
  wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
  },
};

pub(crate) fn comment_json(
  id: &str,
  parent: &str,
  score: i64,
  body: &str,
  replies: Vec<Value>,
) -> Value {
  let replies = if replies.is_empty() {
    Value::String(String::new())
  } else {
    listing_json(replies)
  };

  serde_json::json!({
    "kind": "t1",
    "data": {
      "body": body,
      "id": id,
      "name": format!("t1_{id}"),
      "parent_id": parent,
      "replies": replies,
      "score": score,
    }
  })
}

pub(crate) fn listing_json(children: Vec<Value>) -> Value {
  serde_json::json!({
    "kind": "Listing",
    "data": { "children": children }
  })
}

pub(crate) fn mock_client(server: &MockServer) -> Client {
  Client::new(
    Credentials {
      client_id: "id".to_string(),
      client_secret: "secret".to_string(),
      user_agent: "reddit-comments-tests".to_string(),
    },
    Endpoints {
      api: server.uri(),
      auth: server.uri(),
    },
  )
}

pub(crate) fn more_json(parent: &str, children: &[&str]) -> Value {
  let id = children.first().copied().unwrap_or("_");

  serde_json::json!({
    "kind": "more",
    "data": {
      "children": children,
      "count": children.len(),
      "id": id,
      "name": format!("t1_{id}"),
      "parent_id": parent,
    }
  })
}

pub(crate) async fn mount_token(server: &MockServer) {
  Mock::given(method("POST"))
    .and(path("/api/v1/access_token"))
    .respond_with(ResponseTemplate::new(200).set_body_json(
      serde_json::json!({"access_token": "token", "expires_in": 3600}),
    ))
    .mount(server)
    .await;
}

pub(crate) fn thread_json(id: &str, title: &str, comments: Vec<Value>) -> Value {
  serde_json::json!([
    listing_json(vec![serde_json::json!({
      "kind": "t3",
      "data": {
        "id": id,
        "name": format!("t3_{id}"),
        "title": title,
      }
    })]),
    listing_json(comments),
  ])
}
