use super::*;

/// Reddit application credentials, read from the environment.
#[derive(Clone, Debug)]
pub(crate) struct Credentials {
  pub(crate) client_id: String,
  pub(crate) client_secret: String,
  pub(crate) user_agent: String,
}

impl Credentials {
  const CLIENT_ID_VAR: &str = "REDDIT_CLIENT_ID";
  const CLIENT_SECRET_VAR: &str = "REDDIT_CLIENT_SECRET";
  const USER_AGENT_VAR: &str = "REDDIT_USER_AGENT";

  fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
  }

  pub(crate) fn from_env() -> Result<Self> {
    let non_empty = |name: &str| {
      env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
    };

    let client_id = non_empty(Self::CLIENT_ID_VAR)
      .with_context(|| format!("{} is not set", Self::CLIENT_ID_VAR))?;

    Ok(Self {
      client_id,
      client_secret: non_empty(Self::CLIENT_SECRET_VAR).unwrap_or_default(),
      user_agent: non_empty(Self::USER_AGENT_VAR)
        .unwrap_or_else(Self::default_user_agent),
    })
  }
}
