use super::*;

/// Inputs of the save form.
pub(crate) struct Form {
  pub(crate) focus: Field,
  limit: u16,
  pub(crate) save_all: bool,
  pub(crate) url: String,
}

impl Form {
  pub(crate) const LIMIT_MAX: u16 = 1000;
  pub(crate) const LIMIT_MIN: u16 = 1;

  fn adjust_limit(&mut self, delta: i32) {
    let next = (i32::from(self.limit) + delta)
      .clamp(i32::from(Self::LIMIT_MIN), i32::from(Self::LIMIT_MAX));

    self.limit = u16::try_from(next).unwrap_or(Self::LIMIT_MIN);
  }

  fn handle_button_key(&mut self, key: KeyEvent, command: Command) -> Command {
    match key.code {
      KeyCode::Enter | KeyCode::Char(' ') => command,
      KeyCode::Char('?') => Command::ShowHelp,
      KeyCode::Up | KeyCode::Left => {
        self.focus = self.focus.previous();
        Command::None
      }
      KeyCode::Down | KeyCode::Right => {
        self.focus = self.focus.next();
        Command::None
      }
      _ => Command::None,
    }
  }

  pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Command {
    let control = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
      KeyCode::Char('s') if control => return Command::Save,
      KeyCode::Char('o') if control => return Command::Browse,
      KeyCode::F(1) => return Command::ShowHelp,
      KeyCode::Esc => return Command::Quit,
      KeyCode::Tab => {
        self.focus = self.focus.next();
        return Command::None;
      }
      KeyCode::BackTab => {
        self.focus = self.focus.previous();
        return Command::None;
      }
      _ => {}
    }

    match self.focus {
      Field::Url => self.handle_url_key(key),
      Field::Limit => self.handle_limit_key(key),
      Field::SaveAll => match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => {
          self.save_all = !self.save_all;
          Command::None
        }
        _ => self.handle_button_key(key, Command::None),
      },
      Field::Save => self.handle_button_key(key, Command::Save),
      Field::Browse => self.handle_button_key(key, Command::Browse),
    }
  }

  fn handle_limit_key(&mut self, key: KeyEvent) -> Command {
    match key.code {
      KeyCode::Enter => return Command::Save,
      KeyCode::Char('?') => return Command::ShowHelp,
      KeyCode::Up | KeyCode::Char('+') => self.adjust_limit(1),
      KeyCode::Down | KeyCode::Char('-') => self.adjust_limit(-1),
      KeyCode::PageUp => self.adjust_limit(10),
      KeyCode::PageDown => self.adjust_limit(-10),
      KeyCode::Backspace => self.limit /= 10,
      KeyCode::Char(ch) => {
        if let Some(digit) = ch.to_digit(10).and_then(|d| u16::try_from(d).ok())
        {
          let next = self.limit.saturating_mul(10).saturating_add(digit);

          if next <= Self::LIMIT_MAX {
            self.limit = next;
          }
        }
      }
      KeyCode::Left => self.focus = self.focus.previous(),
      KeyCode::Right => self.focus = self.focus.next(),
      _ => {}
    }

    Command::None
  }

  fn handle_url_key(&mut self, key: KeyEvent) -> Command {
    let modifiers = key.modifiers;

    match key.code {
      KeyCode::Enter => Command::Save,
      KeyCode::Backspace => {
        self.url.pop();
        Command::None
      }
      KeyCode::Down => {
        self.focus = self.focus.next();
        Command::None
      }
      KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
        self.url.clear();
        Command::None
      }
      KeyCode::Char(ch) => {
        if !(modifiers.contains(KeyModifiers::CONTROL)
          || modifiers.contains(KeyModifiers::ALT)
          || modifiers.contains(KeyModifiers::SUPER))
        {
          self.url.push(ch);
        }

        Command::None
      }
      _ => Command::None,
    }
  }

  pub(crate) fn job(&self, directory: &Path) -> ExportJob {
    ExportJob {
      directory: directory.to_path_buf(),
      limit: self.limit(),
      save_all: self.save_all,
      url: self.url.trim().to_string(),
    }
  }

  pub(crate) fn limit(&self) -> usize {
    usize::from(self.limit.clamp(Self::LIMIT_MIN, Self::LIMIT_MAX))
  }

  /// The limit as typed; empty while the user has erased every digit.
  pub(crate) fn limit_text(&self) -> String {
    if self.limit == 0 {
      String::new()
    } else {
      self.limit.to_string()
    }
  }

  pub(crate) fn new() -> Self {
    Self {
      focus: Field::Url,
      limit: Self::LIMIT_MIN,
      save_all: false,
      url: String::new(),
    }
  }
}
