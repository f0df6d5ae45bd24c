use super::*;

const BYTE_ORDER_MARK: &[u8] = b"\xEF\xBB\xBF";

const HEADER: [&str; 3] = ["Points", "Replies", "Comment"];

const ILLEGAL_FILENAME_CHARS: [char; 9] =
  ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Writes `records`, highest score first, to `<directory>/<title>.csv`,
/// replacing any existing file of that name.
pub(crate) fn export(
  mut records: Vec<CommentRecord>,
  title: &str,
  directory: &Path,
) -> Result<PathBuf, ExportError> {
  sort_by_score(&mut records);

  let path = directory.join(format!("{}.csv", sanitize_title(title)));

  let io_error = |source: io::Error| ExportError::Io {
    path: path.clone(),
    source,
  };

  let csv_error = |source: csv::Error| ExportError::Csv {
    path: path.clone(),
    source,
  };

  let mut file = File::create(&path).map_err(io_error)?;

  file.write_all(BYTE_ORDER_MARK).map_err(io_error)?;

  let mut writer = csv::WriterBuilder::new()
    .terminator(csv::Terminator::CRLF)
    .from_writer(file);

  writer.write_record(HEADER).map_err(csv_error)?;

  for record in &records {
    writer
      .serialize((record.score, record.reply_count, &record.body))
      .map_err(csv_error)?;
  }

  writer.flush().map_err(io_error)?;

  info!(path = %path.display(), rows = records.len(), "exported comments");

  Ok(path)
}

pub(crate) fn sanitize_title(title: &str) -> String {
  title
    .chars()
    .filter(|ch| !ILLEGAL_FILENAME_CHARS.contains(ch))
    .collect()
}

/// Highest score first; equal scores keep their listing order.
pub(crate) fn sort_by_score(records: &mut [CommentRecord]) {
  records.sort_by(|a, b| b.score.cmp(&a.score));
}

#[cfg(test)]
mod tests {
  use {super::*, tempfile::TempDir};

  fn sample_records() -> Vec<CommentRecord> {
    vec![
      CommentRecord::new(3, 0, "three"),
      CommentRecord::new(10, 2, "ten, with a comma"),
      CommentRecord::new(-2, 1, "negative \"quoted\""),
      CommentRecord::new(3, 4, "another three\nover two lines"),
      CommentRecord::new(7, 0, "seven"),
    ]
  }

  #[test]
  fn sanitize_title_removes_illegal_characters() {
    assert_eq!(sanitize_title("a/b*c?d"), "abcd");
    assert_eq!(sanitize_title(r#"\/*?:"<>|"#), "");
    assert_eq!(sanitize_title("What's up? (AMA)"), "What's up (AMA)");
  }

  #[test]
  fn sort_by_score_is_descending_and_stable() {
    let mut records = sample_records();

    sort_by_score(&mut records);

    assert_eq!(
      records
        .iter()
        .map(|record| record.score)
        .collect::<Vec<_>>(),
      vec![10, 7, 3, 3, -2]
    );

    assert_eq!(records[2].body, "three");
    assert_eq!(records[3].body, "another three\nover two lines");
  }

  #[test]
  fn export_writes_bom_header_and_sorted_rows() {
    let dir = TempDir::new().unwrap();

    let path = export(sample_records(), "Ask: what/why?", dir.path()).unwrap();

    assert_eq!(path, dir.path().join("Ask whatwhy.csv"));

    let bytes = fs::read(&path).unwrap();

    assert!(bytes.starts_with(BYTE_ORDER_MARK));

    let text = String::from_utf8(bytes[BYTE_ORDER_MARK.len()..].to_vec()).unwrap();

    assert_eq!(
      text,
      "Points,Replies,Comment\r\n\
       10,2,\"ten, with a comma\"\r\n\
       7,0,seven\r\n\
       3,0,three\r\n\
       3,4,\"another three\nover two lines\"\r\n\
       -2,1,\"negative \"\"quoted\"\"\"\r\n"
    );
  }

  #[test]
  fn export_rows_are_non_increasing_and_complete() {
    let dir = TempDir::new().unwrap();

    let path = export(sample_records(), "post", dir.path()).unwrap();

    let bytes = fs::read(path).unwrap();

    let mut reader = csv::Reader::from_reader(&bytes[BYTE_ORDER_MARK.len()..]);

    assert_eq!(
      reader.headers().unwrap(),
      &csv::StringRecord::from(vec!["Points", "Replies", "Comment"])
    );

    let scores = reader
      .records()
      .map(|row| row.unwrap()[0].parse::<i64>().unwrap())
      .collect::<Vec<_>>();

    assert_eq!(scores.len(), 5);
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
  }

  #[test]
  fn export_is_idempotent_and_overwrites() {
    let dir = TempDir::new().unwrap();

    let path = dir.path().join("post.csv");

    fs::write(&path, "stale contents that are longer than the export").unwrap();

    export(sample_records(), "post", dir.path()).unwrap();
    let first = fs::read(&path).unwrap();

    export(sample_records(), "post", dir.path()).unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
    assert!(!String::from_utf8_lossy(&first).contains("stale"));
  }

  #[test]
  fn export_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();

    let missing = dir.path().join("does-not-exist");

    let error = export(sample_records(), "post", &missing).unwrap_err();

    assert!(matches!(error, ExportError::Io { .. }));
    assert!(!missing.exists());
  }
}
