use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DirEntry {
  pub(crate) name: String,
  pub(crate) path: PathBuf,
}

/// Directory chooser: lists the subdirectories of the directory being
/// browsed.
pub(crate) struct DirBrowser {
  current: PathBuf,
  entries: ListView<DirEntry>,
  error: Option<String>,
}

impl DirBrowser {
  const TITLE: &str = "Choose Save Location";

  pub(crate) fn current(&self) -> &Path {
    &self.current
  }

  pub(crate) fn descend(&mut self) {
    if let Some(entry) = self.entries.selected_item() {
      let path = entry.path.clone();
      self.navigate(path);
    }
  }

  pub(crate) fn draw(&mut self, frame: &mut Frame) {
    let outer = frame.area();

    let area = centered_rect(
      outer,
      usize::from(outer.width).saturating_sub(8).max(40),
      usize::from(outer.height).saturating_sub(4).max(8),
    );

    frame.render_widget(Clear, area);

    let block = Block::default().title(Self::TITLE).borders(Borders::ALL);

    let inner = block.inner(area);

    frame.render_widget(block, area);

    let layout = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
      ])
      .split(inner);

    let width = usize::from(layout[0].width);

    let current = self.current.display().to_string();

    frame.render_widget(
      Paragraph::new(Line::from(Span::styled(
        tail(&current, width).to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
      ))),
      layout[0],
    );

    if let Some(error) = &self.error {
      frame.render_widget(
        Paragraph::new(truncate(error, width))
          .style(Style::default().fg(Color::Red)),
        layout[1],
      );
    }

    let items: Vec<ListItem> = if self.entries.is_empty() {
      vec![ListItem::new(Span::styled(
        "No subdirectories.",
        Style::default().fg(Color::DarkGray),
      ))]
    } else {
      self
        .entries
        .items()
        .iter()
        .map(|entry| ListItem::new(format!("{}/", entry.name)))
        .collect()
    };

    let mut list_state = ListState::default()
      .with_selected(self.entries.selected_index())
      .with_offset(self.entries.offset());

    let list = List::new(items).highlight_style(
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    );

    frame.render_stateful_widget(list, layout[2], &mut list_state);

    self.entries.set_offset(list_state.offset());
  }

  pub(crate) fn handle_key(&mut self, key: KeyEvent, page: usize) -> Command {
    let step = isize::try_from(page).unwrap_or(isize::MAX);

    match key.code {
      KeyCode::Esc | KeyCode::Char('q') => Command::CancelBrowse,
      KeyCode::Char('s' | 'S') => {
        Command::SelectDirectory(self.current.clone())
      }
      KeyCode::Down | KeyCode::Char('j') => {
        self.entries.move_by(1);
        Command::None
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.entries.move_by(-1);
        Command::None
      }
      KeyCode::PageDown => {
        self.entries.move_by(step);
        Command::None
      }
      KeyCode::PageUp => {
        self.entries.move_by(-step);
        Command::None
      }
      KeyCode::Home => {
        self.entries.set_selected(0);
        Command::None
      }
      KeyCode::End => {
        self.entries.set_selected(self.entries.len().saturating_sub(1));
        Command::None
      }
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        self.descend();
        Command::None
      }
      KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
        self.parent();
        Command::None
      }
      _ => Command::None,
    }
  }

  fn navigate(&mut self, path: PathBuf) {
    match Self::read_entries(&path) {
      Ok(entries) => {
        self.current = path;
        self.entries = ListView::new(entries);
        self.error = None;
      }
      Err(error) => {
        self.error = Some(format!("Could not open {}: {error}", path.display()));
      }
    }
  }

  /// Opens the chooser at `path`, or at the nearest ancestor that can be
  /// listed.
  pub(crate) fn open(path: &Path) -> io::Result<Self> {
    let resolved =
      fs::canonicalize(path).or_else(|_| std::path::absolute(path))?;

    let mut candidate = Some(resolved.as_path());

    let mut last_error = None;

    while let Some(path) = candidate {
      match Self::read_entries(path) {
        Ok(entries) => {
          return Ok(Self {
            current: path.to_path_buf(),
            entries: ListView::new(entries),
            error: last_error.map(|error: io::Error| error.to_string()),
          });
        }
        Err(error) => {
          if last_error.is_none() {
            last_error = Some(error);
          }

          candidate = path.parent();
        }
      }
    }

    Err(last_error.unwrap_or_else(|| {
      io::Error::new(io::ErrorKind::NotFound, "no directory to browse")
    }))
  }

  pub(crate) fn parent(&mut self) {
    if let Some(parent) = self.current.parent().map(Path::to_path_buf) {
      let previous = self.current.clone();

      self.navigate(parent);

      if let Some(index) = self
        .entries
        .items()
        .iter()
        .position(|entry| entry.path == previous)
      {
        self.entries.set_selected(index);
      }
    }
  }

  fn read_entries(path: &Path) -> io::Result<Vec<DirEntry>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(path)? {
      let entry = entry?;

      let name = entry.file_name().to_string_lossy().into_owned();

      if name.starts_with('.') || !entry.path().is_dir() {
        continue;
      }

      entries.push(DirEntry {
        name,
        path: entry.path(),
      });
    }

    entries.sort_by_key(|entry| entry.name.to_lowercase());

    Ok(entries)
  }
}

#[cfg(test)]
mod tests {
  use {super::*, tempfile::TempDir};

  fn press(browser: &mut DirBrowser, code: KeyCode) -> Command {
    browser.handle_key(KeyEvent::new(code, KeyModifiers::NONE), 10)
  }

  fn names(browser: &DirBrowser) -> Vec<&str> {
    browser
      .entries
      .items()
      .iter()
      .map(|entry| entry.name.as_str())
      .collect()
  }

  fn sample_tree() -> TempDir {
    let dir = TempDir::new().unwrap();

    fs::create_dir_all(dir.path().join("beta/inner")).unwrap();
    fs::create_dir(dir.path().join("Alpha")).unwrap();
    fs::create_dir(dir.path().join(".hidden")).unwrap();
    fs::write(dir.path().join("file.txt"), "not a directory").unwrap();

    dir
  }

  #[test]
  fn open_lists_visible_subdirectories_sorted() {
    let dir = sample_tree();

    let browser = DirBrowser::open(dir.path()).unwrap();

    assert_eq!(browser.current(), dir.path());
    assert_eq!(names(&browser), vec!["Alpha", "beta"]);
    assert!(browser.error.is_none());
  }

  #[test]
  fn open_falls_back_to_an_existing_ancestor() {
    let dir = sample_tree();

    let browser = DirBrowser::open(&dir.path().join("gone/deeper")).unwrap();

    assert_eq!(browser.current(), dir.path());
    assert!(browser.error.is_some());
  }

  #[test]
  fn relative_location_is_resolved_before_browsing() {
    let mut browser = DirBrowser::open(Path::new(".")).unwrap();

    let current = fs::canonicalize(".").unwrap();

    assert!(browser.current().is_absolute());
    assert_eq!(browser.current(), current);

    press(&mut browser, KeyCode::Backspace);

    assert!(browser.error.is_none());
    assert_eq!(Some(browser.current()), current.parent());
  }

  #[test]
  fn navigation_descends_and_returns_to_parent() {
    let dir = sample_tree();

    let mut browser = DirBrowser::open(dir.path()).unwrap();

    press(&mut browser, KeyCode::Down);
    press(&mut browser, KeyCode::Enter);

    assert_eq!(browser.current(), dir.path().join("beta"));
    assert_eq!(names(&browser), vec!["inner"]);

    press(&mut browser, KeyCode::Backspace);

    assert_eq!(browser.current(), dir.path());
    assert_eq!(
      browser.entries.selected_item().map(|entry| entry.name.as_str()),
      Some("beta")
    );

    assert_eq!(
      press(&mut browser, KeyCode::Char('s')),
      Command::SelectDirectory(dir.path().to_path_buf())
    );

    assert_eq!(press(&mut browser, KeyCode::Esc), Command::CancelBrowse);
  }
}
