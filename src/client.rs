use super::*;

/// Base URLs of the Reddit API. Tests point both at a mock server.
#[derive(Clone, Debug)]
pub(crate) struct Endpoints {
  pub(crate) api: String,
  pub(crate) auth: String,
}

impl Default for Endpoints {
  fn default() -> Self {
    Self {
      api: "https://oauth.reddit.com".to_string(),
      auth: "https://www.reddit.com".to_string(),
    }
  }
}

struct AccessToken {
  expires_at: Instant,
  value: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
  access_token: Option<String>,
  error: Option<String>,
  #[serde(default)]
  expires_in: u64,
}

#[derive(Clone)]
pub(crate) struct Client {
  client: reqwest::Client,
  credentials: Arc<Credentials>,
  endpoints: Arc<Endpoints>,
  token: Arc<AsyncMutex<Option<AccessToken>>>,
}

impl Client {
  pub(crate) const MORE_CHILDREN_BATCH: usize = 100;

  const THREAD_LIMIT: &str = "500";

  const TOKEN_MARGIN: Duration = Duration::from_secs(60);

  async fn access_token(&self) -> Result<String, FetchError> {
    let mut token = self.token.lock().await;

    if let Some(token) = token.as_ref()
      && token.expires_at > Instant::now()
    {
      return Ok(token.value.clone());
    }

    let url = format!("{}/api/v1/access_token", self.endpoints.auth);

    debug!(%url, "requesting access token");

    let response = self
      .client
      .post(&url)
      .basic_auth(
        &self.credentials.client_id,
        Some(&self.credentials.client_secret),
      )
      .header(USER_AGENT, &self.credentials.user_agent)
      .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
      .body("grant_type=client_credentials")
      .send()
      .await?;

    let response = Self::decode::<TokenResponse>(response).await?;

    let value = match (response.access_token, response.error) {
      (_, Some(error)) => return Err(FetchError::Auth { reason: error }),
      (Some(value), None) => value,
      (None, None) => {
        return Err(FetchError::Auth {
          reason: "no access token in response".to_string(),
        });
      }
    };

    let lifetime = Duration::from_secs(response.expires_in)
      .saturating_sub(Self::TOKEN_MARGIN);

    *token = Some(AccessToken {
      expires_at: Instant::now() + lifetime,
      value: value.clone(),
    });

    Ok(value)
  }

  async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
  ) -> Result<T, FetchError> {
    let status = response.status();

    match status {
      StatusCode::TOO_MANY_REQUESTS => return Err(FetchError::RateLimited),
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
        return Err(FetchError::Auth {
          reason: status.to_string(),
        });
      }
      _ if !status.is_success() => {
        return Err(FetchError::Status {
          status,
          url: response.url().to_string(),
        });
      }
      _ => {}
    }

    let body = response.bytes().await?;

    Ok(serde_json::from_slice(&body)?)
  }

  /// Fetches the replies of `parent`, for "continue this thread"
  /// placeholders.
  pub(crate) async fn fetch_continued(
    &self,
    article: &str,
    parent: &str,
  ) -> Result<CommentForest, FetchError> {
    let comment_id = parent.strip_prefix("t1_").unwrap_or(parent);

    let (_, comments) = self
      .get::<(Listing, Listing)>(
        &format!("/comments/{article}"),
        &[
          ("comment", comment_id),
          ("limit", Self::THREAD_LIMIT),
          ("raw_json", "1"),
        ],
      )
      .await?;

    let forest = CommentForest::from_things(comments.data.children);

    let Some(parent) = forest
      .comments
      .into_iter()
      .find(|comment| comment.id == comment_id)
    else {
      warn!(article, parent, "continued thread did not include its parent");
      return Ok(CommentForest::default());
    };

    Ok(parent.replies)
  }

  pub(crate) async fn fetch_more_children(
    &self,
    link: &str,
    children: &[String],
  ) -> Result<Vec<Thing>, FetchError> {
    let children = children.join(",");

    debug!(link, %children, "expanding placeholder");

    let response = self
      .get::<MoreChildrenResponse>(
        "/api/morechildren",
        &[
          ("api_type", "json"),
          ("children", children.as_str()),
          ("link_id", link),
          ("raw_json", "1"),
        ],
      )
      .await?;

    if !response.json.errors.is_empty() {
      return Err(FetchError::Api(
        response
          .json
          .errors
          .iter()
          .map(Value::to_string)
          .collect::<Vec<_>>()
          .join(", "),
      ));
    }

    Ok(response.json.data.things)
  }

  pub(crate) async fn fetch_submission(
    &self,
    id: &str,
  ) -> Result<Submission, FetchError> {
    let (link, comments) = self
      .get::<(Listing, Listing)>(
        &format!("/comments/{id}"),
        &[("limit", Self::THREAD_LIMIT), ("raw_json", "1")],
      )
      .await?;

    let submission = Submission::from_listings(link, comments)?;

    debug!(
      id = %submission.id,
      title = %submission.title,
      top_level = submission.comments.len(),
      placeholders = submission.comments.more.len(),
      "fetched submission"
    );

    Ok(submission)
  }

  async fn get<T: serde::de::DeserializeOwned>(
    &self,
    path: &str,
    query: &[(&str, &str)],
  ) -> Result<T, FetchError> {
    let mut url = Url::parse(&format!("{}{path}", self.endpoints.api))
      .map_err(|_| FetchError::InvalidUrl {
        url: format!("{}{path}", self.endpoints.api),
      })?;

    url.query_pairs_mut().extend_pairs(query);

    let token = self.access_token().await?;

    debug!(%url, "GET");

    let response = self
      .client
      .get(url)
      .bearer_auth(token)
      .header(USER_AGENT, &self.credentials.user_agent)
      .send()
      .await?;

    Self::decode(response).await
  }

  pub(crate) fn new(credentials: Credentials, endpoints: Endpoints) -> Self {
    Self {
      client: reqwest::Client::new(),
      credentials: Arc::new(credentials),
      endpoints: Arc::new(endpoints),
      token: Arc::new(AsyncMutex::new(None)),
    }
  }
}
