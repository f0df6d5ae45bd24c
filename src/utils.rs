use super::*;

pub(crate) fn centered_rect(area: Rect, width: usize, height: usize) -> Rect {
  fn saturating_usize_to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
  }

  let desired_width = saturating_usize_to_u16(width).max(1);
  let desired_height = saturating_usize_to_u16(height).max(1);

  let available_width = area.width.saturating_sub(2).max(1);
  let available_height = area.height.saturating_sub(2).max(1);

  let width = available_width.clamp(1, desired_width).min(area.width);
  let height = available_height.clamp(1, desired_height).min(area.height);

  let x = area.x + (area.width.saturating_sub(width)) / 2;
  let y = area.y + (area.height.saturating_sub(height)) / 2;

  Rect::new(x, y, width, height)
}

/// Reddit sends `replies` as an empty string when a comment has none.
pub(crate) fn deserialize_replies<'de, D>(
  deserializer: D,
) -> Result<Option<Listing>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;

  match value {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(s)) if s.is_empty() => Ok(None),
    Some(Value::String(s)) => Err(de::Error::invalid_value(
      de::Unexpected::Str(&s),
      &"an empty string or a listing",
    )),
    Some(value @ Value::Object(_)) => serde_json::from_value(value)
      .map(Some)
      .map_err(de::Error::custom),
    Some(Value::Bool(b)) => Err(de::Error::invalid_type(
      de::Unexpected::Bool(b),
      &"an empty string or a listing",
    )),
    Some(Value::Number(_)) => Err(de::Error::invalid_type(
      de::Unexpected::Other("number"),
      &"an empty string or a listing",
    )),
    Some(Value::Array(_)) => Err(de::Error::invalid_type(
      de::Unexpected::Seq,
      &"an empty string or a listing",
    )),
  }
}

/// Keeps the last `max_chars` characters, so the end of a long input stays
/// visible while typing.
pub(crate) fn tail(text: &str, max_chars: usize) -> &str {
  let count = text.chars().count();

  if count <= max_chars {
    return text;
  }

  let skip = count - max_chars;

  text
    .char_indices()
    .nth(skip)
    .map_or("", |(index, _)| &text[index..])
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
  if text.chars().count() <= max_chars {
    return text.to_string();
  }

  let mut result = String::new();

  for (idx, ch) in text.chars().enumerate() {
    if idx >= max_chars {
      result.push_str("...");
      break;
    }

    result.push(ch);
  }

  result.trim_end().to_string()
}
