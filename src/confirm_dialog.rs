use super::*;

/// Yes/No prompt shown before saving every comment of a post.
#[derive(Debug)]
pub(crate) struct ConfirmDialog {
  job: ExportJob,
  total: usize,
  yes_selected: bool,
}

impl ConfirmDialog {
  const TITLE: &str = "Confirm Save All";

  pub(crate) fn draw(&self, frame: &mut Frame) {
    let prompt = self.prompt();

    let area =
      centered_rect(frame.area(), prompt.chars().count().max(30) + 4, 6);

    frame.render_widget(Clear, area);

    let button = |label: &'static str, selected: bool| {
      let style = if selected {
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD | Modifier::REVERSED)
      } else {
        Style::default().fg(Color::White)
      };

      Span::styled(label, style)
    };

    let text = vec![
      Line::from(prompt),
      Line::from(""),
      Line::from(vec![
        button(" Yes ", self.yes_selected),
        Span::raw("   "),
        button(" No ", !self.yes_selected),
      ]),
    ];

    let dialog = Paragraph::new(text)
      .block(Block::default().title(Self::TITLE).borders(Borders::ALL))
      .wrap(Wrap { trim: true });

    frame.render_widget(dialog, area);
  }

  pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Command {
    match key.code {
      KeyCode::Char('y' | 'Y') => Command::ConfirmSave,
      KeyCode::Char('n' | 'N') | KeyCode::Esc => Command::DeclineSave,
      KeyCode::Enter if self.yes_selected => Command::ConfirmSave,
      KeyCode::Enter => Command::DeclineSave,
      KeyCode::Left
      | KeyCode::Right
      | KeyCode::Tab
      | KeyCode::BackTab
      | KeyCode::Char('h' | 'l') => {
        self.yes_selected = !self.yes_selected;
        Command::None
      }
      _ => Command::None,
    }
  }

  pub(crate) fn into_job(self) -> ExportJob {
    self.job
  }

  pub(crate) fn new(job: ExportJob, total: usize) -> Self {
    Self {
      job,
      total,
      yes_selected: false,
    }
  }

  pub(crate) fn prompt(&self) -> String {
    format!(
      "The post has {} top-level comments. Do you wish to proceed?",
      self.total
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn dialog() -> ConfirmDialog {
    ConfirmDialog::new(
      ExportJob {
        directory: PathBuf::from("/exports"),
        limit: 1,
        save_all: true,
        url: "https://redd.it/abc".to_string(),
      },
      1200,
    )
  }

  fn press(dialog: &mut ConfirmDialog, code: KeyCode) -> Command {
    dialog.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
  }

  #[test]
  fn prompt_names_the_count() {
    assert_eq!(
      dialog().prompt(),
      "The post has 1200 top-level comments. Do you wish to proceed?"
    );
  }

  #[test]
  fn enter_defaults_to_no() {
    let mut dialog = dialog();

    assert_eq!(press(&mut dialog, KeyCode::Enter), Command::DeclineSave);

    press(&mut dialog, KeyCode::Left);

    assert_eq!(press(&mut dialog, KeyCode::Enter), Command::ConfirmSave);
  }

  #[test]
  fn letters_and_escape_answer_directly() {
    let mut dialog = dialog();

    assert_eq!(press(&mut dialog, KeyCode::Char('y')), Command::ConfirmSave);
    assert_eq!(press(&mut dialog, KeyCode::Char('N')), Command::DeclineSave);
    assert_eq!(press(&mut dialog, KeyCode::Esc), Command::DeclineSave);
  }
}
