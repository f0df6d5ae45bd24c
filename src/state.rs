use super::*;

pub(crate) struct State {
  form: Form,
  help: HelpView,
  message: String,
  mode: Mode,
  next_request_id: u64,
  pending_count: Option<PendingCount>,
  pending_effects: Vec<Effect>,
  running_tasks: usize,
  save_directory: SaveDirectory,
}

impl State {
  fn cancel_browse(&mut self) {
    self.mode = Mode::Form;

    self.set_message(format!(
      "No directory selected. Using: {}",
      self.save_directory.directory().display()
    ));
  }

  pub(crate) fn clear_pending_effects(&mut self) {
    self.pending_effects.clear();
  }

  fn confirm_save(&mut self) {
    if !matches!(self.mode, Mode::Confirm(_)) {
      return;
    }

    if let Mode::Confirm(dialog) = mem::replace(&mut self.mode, Mode::Form) {
      self.start_export(dialog.into_job());
    }
  }

  fn decline_save(&mut self) {
    self.mode = Mode::Form;
    self.set_message(CANCELLED_STATUS.into());
  }

  pub(crate) fn dispatch_command(
    &mut self,
    command: Command,
  ) -> Result<CommandDispatch> {
    debug_assert!(
      self.pending_effects.is_empty(),
      "command dispatch should start without pending effects"
    );

    let mut should_exit = false;

    match command {
      Command::Quit => {
        should_exit = true;
      }
      Command::ShowHelp => self.help.show(&mut self.message),
      Command::HideHelp => self.help.hide(&mut self.message),
      Command::Save => self.save(),
      Command::ConfirmSave => self.confirm_save(),
      Command::DeclineSave => self.decline_save(),
      Command::Browse => self.open_browser(),
      Command::CancelBrowse => self.cancel_browse(),
      Command::SelectDirectory(directory) => {
        self.select_directory(directory)?;
      }
      Command::None => {}
    }

    self.show_pending_confirmation();

    Ok(CommandDispatch {
      effects: mem::take(&mut self.pending_effects),
      should_exit,
    })
  }

  pub(crate) fn form(&self) -> &Form {
    &self.form
  }

  pub(crate) fn handle_event(&mut self, event: Event) {
    match event {
      Event::TopLevelCount { request_id, result } => {
        let Some(pending) = self.pending_count.as_ref() else {
          return;
        };

        if pending.request_id != request_id {
          debug!(request_id, "ignoring stale top-level count");
          return;
        }

        let Some(mut pending) = self.pending_count.take() else {
          return;
        };

        match result {
          Ok(total) => {
            pending.total = Some(total);
            self.pending_count = Some(pending);
            self.set_message(format!("Total top-level comments: {total}"));
            self.show_pending_confirmation();
          }
          Err(error) => self.set_message(format!("Error: {error}")),
        }
      }
      Event::TaskFailed { message, task_id } => {
        debug!(task = task_id, %message, "task failed");
        self.set_message(format!("Error: {message}"));
      }
      Event::TaskFinished { task_id } => {
        debug!(task = task_id, "task finished");
        self.running_tasks = self.running_tasks.saturating_sub(1);
      }
      Event::TotalComments {
        path,
        task_id,
        total,
      } => {
        debug!(task = task_id, path = %path.display(), "export saved");
        self.set_message(format!("Total top-level comments: {total}"));
      }
    }
  }

  pub(crate) fn handle_key(&mut self, key: KeyEvent, page: usize) -> Command {
    if self.help.is_visible() {
      HelpView::handle_key(key)
    } else {
      self.mode.handle_key(key, &mut self.form, page)
    }
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  pub(crate) fn message(&self) -> &str {
    &self.message
  }

  pub(crate) fn mode(&self) -> &Mode {
    &self.mode
  }

  pub(crate) fn mode_mut(&mut self) -> &mut Mode {
    &mut self.mode
  }

  pub(crate) fn new(save_directory: SaveDirectory) -> Self {
    let message =
      format!("Save location: {}", save_directory.directory().display());

    Self {
      form: Form::new(),
      help: HelpView::new(),
      message,
      mode: Mode::Form,
      next_request_id: 0,
      pending_count: None,
      pending_effects: Vec::new(),
      running_tasks: 0,
      save_directory,
    }
  }

  fn next_id(&mut self) -> u64 {
    let id = self.next_request_id;
    self.next_request_id = self.next_request_id.wrapping_add(1);
    id
  }

  fn open_browser(&mut self) {
    let directory = self.save_directory.directory().to_path_buf();

    match DirBrowser::open(&directory) {
      Ok(browser) => self.mode = Mode::Browse(browser),
      Err(error) => self.set_message(format!(
        "Error: could not browse {}: {error}",
        directory.display()
      )),
    }
  }

  pub(crate) fn running_tasks(&self) -> usize {
    self.running_tasks
  }

  fn save(&mut self) {
    let job = self.form.job(self.save_directory.directory());

    if job.url.is_empty() {
      self.set_message(MISSING_URL_STATUS.into());
      return;
    }

    if !job.save_all {
      self.start_export(job);
      return;
    }

    let request_id = self.next_id();

    self.pending_effects.push(Effect::CountTopLevel {
      request_id,
      url: job.url.clone(),
    });

    self.pending_count = Some(PendingCount {
      job,
      request_id,
      total: None,
    });

    self.set_message(COUNTING_STATUS.into());
  }

  pub(crate) fn save_directory(&self) -> &SaveDirectory {
    &self.save_directory
  }

  fn select_directory(&mut self, directory: PathBuf) -> Result {
    self.mode = Mode::Form;

    self.show_pending_confirmation();

    self.save_directory.set(directory)?;

    info!(
      directory = %self.save_directory.directory().display(),
      "save location changed"
    );

    self.set_message(format!(
      "Save location set to: {}",
      self.save_directory.directory().display()
    ));

    Ok(())
  }

  /// Shows `message` in the status line, or queues it behind the help
  /// overlay when help is open.
  pub(crate) fn set_message(&mut self, message: String) {
    if self.help.is_visible() {
      self.help.replace_backup(message);
    } else {
      self.message = message;
    }
  }

  /// Opens the confirmation for a counted save-all request, once the form
  /// is the active mode.
  fn show_pending_confirmation(&mut self) {
    let ready = matches!(self.mode, Mode::Form)
      && self
        .pending_count
        .as_ref()
        .is_some_and(|pending| pending.total.is_some());

    if !ready {
      return;
    }

    if let Some(PendingCount {
      job,
      total: Some(total),
      ..
    }) = self.pending_count.take()
    {
      self.mode = Mode::Confirm(ConfirmDialog::new(job, total));
    }
  }

  fn start_export(&mut self, job: ExportJob) {
    let task_id = self.next_id();

    self.running_tasks = self.running_tasks.saturating_add(1);

    self.pending_effects.push(Effect::Export { job, task_id });

    self.set_message(SAVING_STATUS.into());
  }
}
