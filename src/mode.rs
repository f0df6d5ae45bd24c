use super::*;

pub(crate) enum Mode {
  Browse(DirBrowser),
  Confirm(ConfirmDialog),
  Form,
}

impl Mode {
  pub(crate) fn handle_key(
    &mut self,
    key: KeyEvent,
    form: &mut Form,
    page: usize,
  ) -> Command {
    if key.code == KeyCode::Char('c')
      && key.modifiers.contains(KeyModifiers::CONTROL)
    {
      return Command::Quit;
    }

    match self {
      Mode::Browse(browser) => browser.handle_key(key, page),
      Mode::Confirm(dialog) => dialog.handle_key(key),
      Mode::Form => form.handle_key(key),
    }
  }

  pub(crate) fn status(&self) -> &'static str {
    match self {
      Mode::Browse(_) => BROWSE_STATUS,
      Mode::Confirm(_) => CONFIRM_STATUS,
      Mode::Form => FORM_STATUS,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn control_c_quits_from_every_mode() {
    let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

    let mut form = Form::new();

    let job = form.job(Path::new("/exports"));

    for mut mode in [Mode::Form, Mode::Confirm(ConfirmDialog::new(job, 3))] {
      assert_eq!(mode.handle_key(key, &mut form, 10), Command::Quit);
    }
  }

  #[test]
  fn form_mode_delegates_to_the_form() {
    let mut form = Form::new();

    let command = Mode::Form.handle_key(
      KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE),
      &mut form,
      10,
    );

    assert_eq!(command, Command::None);
    assert_eq!(form.url, "x");
  }
}
