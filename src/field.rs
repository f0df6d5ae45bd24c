/// Focusable parts of the form, in tab order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Field {
  Browse,
  Limit,
  Save,
  SaveAll,
  Url,
}

impl Field {
  const ORDER: [Field; 5] = [
    Field::Url,
    Field::Limit,
    Field::SaveAll,
    Field::Save,
    Field::Browse,
  ];

  pub(crate) fn next(self) -> Self {
    Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
  }

  fn position(self) -> usize {
    Self::ORDER
      .iter()
      .position(|field| *field == self)
      .unwrap_or(0)
  }

  pub(crate) fn previous(self) -> Self {
    let len = Self::ORDER.len();
    Self::ORDER[(self.position() + len - 1) % len]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn next_and_previous_wrap_around() {
    assert_eq!(Field::Url.next(), Field::Limit);
    assert_eq!(Field::Browse.next(), Field::Url);
    assert_eq!(Field::Url.previous(), Field::Browse);
    assert_eq!(Field::Save.previous(), Field::SaveAll);
  }
}
