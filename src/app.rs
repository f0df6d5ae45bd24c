use super::*;

pub(crate) struct App {
  client: Client,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  page: usize,
  state: State,
}

impl App {
  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
      ])
      .split(frame.area());

    self.page = usize::from(frame.area().height).saturating_sub(8).max(1);

    frame.render_widget(Paragraph::new(self.title_line()), layout[0]);

    let form = self.state.form();

    let url_width = usize::from(layout[1].width.saturating_sub(2));

    let url = tail(&form.url, url_width.saturating_sub(1)).to_string();

    frame.render_widget(
      Paragraph::new(url.clone()).block(
        Block::default()
          .title("Post URL")
          .borders(Borders::ALL)
          .border_style(Self::field_style(form.focus == Field::Url)),
      ),
      layout[1],
    );

    frame.render_widget(
      Paragraph::new(form.limit_text()).block(
        Block::default()
          .title(format!(
            "Comment limit ({}-{})",
            Form::LIMIT_MIN,
            Form::LIMIT_MAX
          ))
          .borders(Borders::ALL)
          .border_style(Self::field_style(form.focus == Field::Limit)),
      ),
      layout[2],
    );

    let checkbox = if form.save_all { "[x]" } else { "[ ]" };

    frame.render_widget(
      Paragraph::new(Line::from(Span::styled(
        format!(" {checkbox} Save all comments"),
        Self::field_style(form.focus == Field::SaveAll),
      ))),
      layout[3],
    );

    frame.render_widget(
      Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(
          "[ Save ]",
          Self::field_style(form.focus == Field::Save),
        ),
        Span::raw("   "),
        Span::styled(
          "[ Choose location ]",
          Self::field_style(form.focus == Field::Browse),
        ),
      ])),
      layout[4],
    );

    let location = format!(
      " Save location: {}",
      self.state.save_directory().directory().display()
    );

    frame.render_widget(
      Paragraph::new(truncate(&location, usize::from(layout[5].width)))
        .style(Style::default().fg(Color::DarkGray)),
      layout[5],
    );

    frame.render_widget(
      Paragraph::new(self.state.message().to_string())
        .style(Style::default().fg(Color::White)),
      layout[7],
    );

    frame.render_widget(
      Paragraph::new(self.state.mode().status())
        .style(Style::default().fg(Color::DarkGray)),
      layout[8],
    );

    let url_focused = matches!(self.state.mode(), Mode::Form)
      && form.focus == Field::Url
      && !self.state.help().is_visible();

    if url_focused {
      let column = u16::try_from(url.chars().count()).unwrap_or(u16::MAX);

      frame.set_cursor_position((
        layout[1].x.saturating_add(1).saturating_add(column),
        layout[1].y.saturating_add(1),
      ));
    }

    match self.state.mode_mut() {
      Mode::Browse(browser) => browser.draw(frame),
      Mode::Confirm(dialog) => dialog.draw(frame),
      Mode::Form => {}
    }

    self.state.help().draw(frame);
  }

  fn execute_effect(&mut self, effect: Effect) {
    let (client, sender) = (self.client.clone(), self.event_tx.clone());

    match effect {
      Effect::CountTopLevel { request_id, url } => {
        self.handle.spawn(async move {
          let _ = sender.send(Event::TopLevelCount {
            request_id,
            result: client.count_top_level(&url).await,
          });
        });
      }
      Effect::Export { job, task_id } => {
        self
          .handle
          .spawn(ExportTask::new(client, task_id, job, sender).run());
      }
    }
  }

  fn field_style(focused: bool) -> Style {
    if focused {
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::White)
    }
  }

  pub(crate) fn new(client: Client, save_directory: SaveDirectory) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    Self {
      client,
      event_rx,
      event_tx,
      handle: Handle::current(),
      page: 1,
      state: State::new(save_directory),
    }
  }

  fn process_pending_events(&mut self) {
    while let Ok(event) = self.event_rx.try_recv() {
      self.state.handle_event(event);
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(200))? {
        self.process_pending_events();
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        self.process_pending_events();
        continue;
      };

      if key.kind != KeyEventKind::Press {
        self.process_pending_events();
        continue;
      }

      let command = self.state.handle_key(key, self.page);

      match self.state.dispatch_command(command) {
        Ok(dispatch) => {
          for effect in dispatch.effects {
            self.execute_effect(effect);
          }

          if dispatch.should_exit {
            break;
          }

          self.process_pending_events();
        }
        Err(error) => {
          warn!("command failed: {error:#}");
          self.state.clear_pending_effects();
          self.state.set_message(format!("Error: {error:#}"));
          self.process_pending_events();
        }
      }
    }

    Ok(())
  }

  fn title_line(&self) -> Line<'static> {
    let mut spans = vec![Span::styled(
      APP_TITLE,
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    )];

    match self.state.running_tasks() {
      0 => {}
      1 => spans.push(Span::styled(
        "  (1 export running)",
        Style::default().fg(Color::Yellow),
      )),
      running => spans.push(Span::styled(
        format!("  ({running} exports running)"),
        Style::default().fg(Color::Yellow),
      )),
    }

    Line::from(spans)
  }
}
