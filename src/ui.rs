use crate::model::{Category, Task};
use crate::stats::CategoryStats;
use crate::storage::{Slot, StoreLocation, TaskStore};
use crate::view::{ListMode, Row, TaskView};
use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Alignment, Color, Modifier, Rect, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};
use tracing::{info, warn};

const PANEL_BG: Color = Color::Rgb(16, 18, 24);

pub fn run(store: TaskStore, view: TaskView, location: StoreLocation) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(store, view, location);
    let result = app.event_loop(&mut terminal);
    teardown_terminal(&mut terminal)?;
    result
}

struct App<S: Slot> {
    store: TaskStore<S>,
    view: TaskView,
    location: StoreLocation,
    selected: usize,
    scroll_offset: usize,
    last_save: Instant,
    status: String,
    mode: Mode,
    overlay_area: Option<Rect>,
}

enum Mode {
    Normal,
    Creating(TaskForm),
    Editing { index: usize, text: FieldValue },
}

struct TaskForm {
    text: FieldValue,
    category: Option<Category>,
    field: FormField,
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum FormField {
    Text,
    Category,
}

#[derive(Clone)]
struct FieldValue {
    value: String,
    cursor: usize,
}

impl FieldValue {
    fn new(value: &str) -> Self {
        FieldValue {
            value: value.to_string(),
            cursor: value.len(),
        }
    }

    fn move_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor = prev_char(self.cursor, &self.value);
    }

    fn move_right(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        self.cursor = next_char(self.cursor, &self.value);
    }

    fn home(&mut self) {
        self.cursor = 0;
    }

    fn end(&mut self) {
        self.cursor = self.value.len();
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = prev_char(self.cursor, &self.value);
        self.value.drain(prev..self.cursor);
        self.cursor = prev;
    }

    fn delete(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        let next = next_char(self.cursor, &self.value);
        self.value.drain(self.cursor..next);
    }

    fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.home(),
            KeyCode::End => self.end(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(c)
            }
            _ => return false,
        }
        true
    }

    fn with_caret(&self) -> String {
        let mut text = self.value.clone();
        text.insert_str(self.cursor, "▌");
        text
    }
}

impl TaskForm {
    fn new() -> Self {
        TaskForm {
            text: FieldValue::new(""),
            category: None,
            field: FormField::Text,
        }
    }

    fn toggle_field(&mut self) {
        self.field = match self.field {
            FormField::Text => FormField::Category,
            FormField::Category => FormField::Text,
        };
    }

    fn next_category(&mut self) {
        self.category = Some(self.category.map_or(Category::Personal, |c| c.next()));
    }

    fn prev_category(&mut self) {
        self.category = Some(self.category.map_or(Category::Health, |c| c.prev()));
    }

    fn submission(&self) -> Option<Task> {
        let category = self.category?;
        Task::new(&self.text.value, category).ok()
    }
}

impl<S: Slot> App<S> {
    fn new(store: TaskStore<S>, view: TaskView, location: StoreLocation) -> Self {
        let status = format!(
            "Loaded {} tasks from {}",
            view.rows().len(),
            location.path.display()
        );
        App {
            store,
            view,
            location,
            selected: 0,
            scroll_offset: 0,
            last_save: Instant::now(),
            status,
            mode: Mode::Normal,
            overlay_area: None,
        }
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            if event::poll(Duration::from_millis(200))? {
                if self.handle_event(event::read()?)? {
                    break;
                }
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Creating(_) => {
                self.handle_create_key(key);
                Ok(false)
            }
            Mode::Editing { .. } => {
                self.handle_edit_key(key);
                Ok(false)
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if matches!(self.mode, Mode::Normal) {
            return;
        }
        let inside = self
            .overlay_area
            .is_some_and(|area| rect_contains(area, mouse.column, mouse.row));
        if !inside {
            self.close_overlay("Closed");
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Char('n') | KeyCode::Char('a') => {
                self.mode = Mode::Creating(TaskForm::new());
                self.status = "New task (Tab switch field, Enter save, Esc cancel)".into();
            }
            KeyCode::Up | KeyCode::Char('k') => self.prev_row(),
            KeyCode::Down | KeyCode::Char('j') => self.next_row(),
            KeyCode::Char(' ') | KeyCode::Char('x') => self.toggle_selected(),
            KeyCode::Char('e') => self.open_edit(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('r') => {
                self.view.rebuild_list(&self.store);
                self.clamp_selection();
                self.status = format!("Reloaded {} tasks", self.view.rows().len());
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_create_key(&mut self, key: KeyEvent) {
        let Mode::Creating(form) = &mut self.mode else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.close_overlay("Canceled");
                return;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Enter => {
                if let Some(task) = form.submission() {
                    self.create_task(task);
                }
                return;
            }
            _ => {}
        }
        match form.field {
            FormField::Text => {
                form.text.handle_key(key);
            }
            FormField::Category => match key.code {
                KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                    form.next_category()
                }
                KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                    form.prev_category()
                }
                KeyCode::Char(c @ '1'..='4') => {
                    let pos = c as usize - '1' as usize;
                    form.category = Some(Category::ALL[pos]);
                }
                _ => {}
            },
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let Mode::Editing { index, text } = &mut self.mode else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.close_overlay("Edit canceled"),
            KeyCode::Enter => {
                let index = *index;
                let value = text.value.clone();
                self.mode = Mode::Normal;
                self.overlay_area = None;
                self.edit_task(index, &value);
            }
            _ => {
                text.handle_key(key);
            }
        }
    }

    fn close_overlay(&mut self, message: &str) {
        self.mode = Mode::Normal;
        self.overlay_area = None;
        self.status = message.into();
    }

    fn create_task(&mut self, task: Task) {
        let text = task.text.clone();
        match self.view.add(&mut self.store, task) {
            Ok(index) => {
                self.selected = index;
                self.mode = Mode::Normal;
                self.overlay_area = None;
                self.saved(format!("Added \"{}\"", text));
            }
            Err(err) => self.failed(err),
        }
    }

    fn edit_task(&mut self, index: usize, text: &str) {
        match self.view.edit(&mut self.store, index, text) {
            Ok(true) => {
                self.clamp_selection();
                self.saved(format!("Updated task {}", index + 1));
            }
            Ok(false) => self.status = "Edit left unchanged".into(),
            Err(err) => {
                self.view.rebuild_list(&self.store);
                self.clamp_selection();
                self.failed(err);
            }
        }
    }

    fn toggle_selected(&mut self) {
        let Some(row) = self.selected_row().cloned() else {
            return;
        };
        match self
            .view
            .set_completed(&mut self.store, row.index, !row.completed)
        {
            Ok(()) => {
                let verb = if row.completed { "Reopened" } else { "Completed" };
                self.saved(format!("{} \"{}\"", verb, row.text));
            }
            Err(err) => self.failed(err),
        }
    }

    fn open_edit(&mut self) {
        let Some(row) = self.selected_row() else {
            self.status = "No task selected to edit".into();
            return;
        };
        self.mode = Mode::Editing {
            index: row.index,
            text: FieldValue::new(&row.text),
        };
        self.status = "Editing (Enter save, Esc cancel)".into();
    }

    fn delete_selected(&mut self) {
        let Some(index) = self.selected_row().map(|r| r.index) else {
            self.status = "No task selected to delete".into();
            return;
        };
        match self.view.delete(&mut self.store, index) {
            Ok(removed) => {
                self.clamp_selection();
                self.saved(format!("Deleted \"{}\"", removed.text));
            }
            Err(err) => {
                self.view.rebuild_list(&self.store);
                self.clamp_selection();
                self.failed(err);
            }
        }
    }

    fn saved(&mut self, message: String) {
        info!("{}", message);
        self.last_save = Instant::now();
        self.status = message;
    }

    fn failed(&mut self, err: anyhow::Error) {
        warn!(error = %err, "task update failed");
        self.status = format!("Save failed: {:#}", err);
    }

    fn selected_row(&self) -> Option<&Row> {
        self.view.rows().get(self.selected)
    }

    fn prev_row(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn next_row(&mut self) {
        if self.selected + 1 < self.view.rows().len() {
            self.selected += 1;
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = self
            .selected
            .min(self.view.rows().len().saturating_sub(1));
    }

    fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(4),
            ])
            .split(f.size());

        self.draw_header(f, layout[0]);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(layout[1]);
        self.draw_tasks(f, body[0]);
        self.draw_summary(f, body[1]);
        self.draw_footer(f, layout[2]);

        self.overlay_area = match &self.mode {
            Mode::Creating(form) => Some(draw_create_form(f, form)),
            Mode::Editing { text, .. } => Some(draw_edit_form(f, text)),
            Mode::Normal => None,
        };
    }

    fn draw_header(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let title = Line::from(vec![
            Span::styled(
                "tasktally ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                self.location.scope.label(),
                Style::default().fg(Color::Green),
            ),
            Span::raw("  •  "),
            Span::styled(
                format!("{}", self.location.path.display()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("  •  "),
            Span::styled(
                format!("saved {}", format_elapsed(self.last_save)),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let paragraph = Paragraph::new(title)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
    }

    fn draw_tasks(&mut self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(Span::styled(
                format!("Tasks ({})", self.view.rows().len()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(PANEL_BG));

        if self.view.mode() == ListMode::Empty {
            let msg = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No tasks yet",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from("Press n to add one"),
            ])
            .alignment(Alignment::Center)
            .block(block);
            f.render_widget(msg, area);
            return;
        }

        let text_width = area.width.saturating_sub(20) as usize;
        let items = self
            .view
            .rows()
            .iter()
            .map(|row| row_item(row, text_width))
            .collect::<Vec<_>>();
        let viewport = area.height.saturating_sub(2) as usize;
        self.clamp_selection();
        self.scroll_offset =
            adjust_offset(self.selected, self.scroll_offset, viewport, 1, items.len());
        let mut state = ListState::default();
        state.select(Some(self.selected));
        *state.offset_mut() = self.scroll_offset;

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(Color::Rgb(44, 48, 60))
                .add_modifier(Modifier::BOLD),
        );
        f.render_stateful_widget(list, area, &mut state);
    }

    fn draw_summary(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Min(0),
            ])
            .split(area);
        for (idx, (category, stat)) in self.view.stats().iter().enumerate() {
            draw_category_summary(f, chunks[idx], category, &stat);
        }
    }

    fn draw_footer(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(2)])
            .split(area);

        let help_bar = Paragraph::new(self.footer_help_line())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(help_bar, rows[0]);

        let status = Paragraph::new(self.status.clone())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(status, rows[1]);
    }

    fn footer_help_line(&self) -> Line<'static> {
        let spans = match self.mode {
            Mode::Normal => vec![
                Span::styled("↑↓ / j k", Style::default().fg(Color::LightCyan)),
                Span::raw(" move  "),
                Span::styled("space", Style::default().fg(Color::LightGreen)),
                Span::raw(" done  "),
                Span::styled("n", Style::default().fg(Color::LightMagenta)),
                Span::raw(" new  "),
                Span::styled("e", Style::default().fg(Color::LightYellow)),
                Span::raw(" edit  "),
                Span::styled("d", Style::default().fg(Color::LightRed)),
                Span::raw(" delete  "),
                Span::styled("r", Style::default().fg(Color::LightCyan)),
                Span::raw(" reload  "),
                Span::styled("q", Style::default().fg(Color::LightRed)),
                Span::raw(" quit"),
            ],
            Mode::Creating(_) => vec![
                Span::styled("Tab", Style::default().fg(Color::LightCyan)),
                Span::raw(" field  "),
                Span::styled("←→ / 1-4", Style::default().fg(Color::LightCyan)),
                Span::raw(" category  "),
                Span::styled("Enter", Style::default().fg(Color::LightGreen)),
                Span::raw(" save  "),
                Span::styled("Esc", Style::default().fg(Color::LightRed)),
                Span::raw(" cancel"),
            ],
            Mode::Editing { .. } => vec![
                Span::styled("Enter", Style::default().fg(Color::LightGreen)),
                Span::raw(" save  "),
                Span::styled("Esc", Style::default().fg(Color::LightRed)),
                Span::raw(" cancel"),
            ],
        };
        Line::from(spans)
    }
}

fn draw_category_summary(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    category: Category,
    stat: &CategoryStats,
) {
    let color = accent(category);
    let block = Block::default()
        .title(Span::styled(
            category.label(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(PANEL_BG));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }
    let lines = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);
    let counts = Paragraph::new(Line::from(vec![
        Span::styled(stat.count_label(), Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled(stat.percent_label(), Style::default().fg(color)),
    ]));
    f.render_widget(counts, lines[0]);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Rgb(30, 32, 40)))
        .ratio(stat.fill_ratio())
        .label("");
    f.render_widget(gauge, lines[1]);
}

fn draw_create_form(f: &mut ratatui::Frame<'_>, form: &TaskForm) -> Rect {
    let area = centered_rect(60, 40, f.size());
    let mut lines = vec![field_line("Task", &form.text, form.field == FormField::Text)];
    lines.push(Line::from(""));
    lines.push(category_line(form.category, form.field == FormField::Category));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter to save • Esc to cancel • Tab to switch field",
        Style::default().fg(Color::Gray),
    )));
    let dialog = Paragraph::new(lines)
        .block(overlay_block("New Task"))
        .wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
    area
}

fn draw_edit_form(f: &mut ratatui::Frame<'_>, text: &FieldValue) -> Rect {
    let area = centered_rect(60, 30, f.size());
    let lines = vec![
        field_line("Task", text, true),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to save • Esc to cancel • empty text keeps the old one",
            Style::default().fg(Color::Gray),
        )),
    ];
    let dialog = Paragraph::new(lines)
        .block(overlay_block("Edit Task"))
        .wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
    area
}

fn overlay_block(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn rect_contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

fn accent(category: Category) -> Color {
    let (r, g, b) = category.accent_rgb();
    Color::Rgb(r, g, b)
}

fn adjust_offset(
    selected: usize,
    current_offset: usize,
    viewport: usize,
    scrolloff: usize,
    len: usize,
) -> usize {
    if viewport == 0 || len == 0 {
        return 0;
    }
    let max_offset = len.saturating_sub(viewport);
    let margin = scrolloff.min(viewport.saturating_sub(1));
    let mut offset = current_offset.min(max_offset);
    if selected < offset.saturating_add(margin) {
        offset = selected.saturating_sub(margin);
    } else {
        let upper = offset
            .saturating_add(viewport.saturating_sub(1))
            .saturating_sub(margin);
        if selected > upper {
            offset = selected.saturating_add(margin + 1).saturating_sub(viewport);
        }
    }
    offset.min(max_offset)
}

fn prev_char(cursor: usize, text: &str) -> usize {
    text[..cursor]
        .char_indices()
        .next_back()
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

fn next_char(cursor: usize, text: &str) -> usize {
    text[cursor..]
        .chars()
        .next()
        .map(|ch| cursor + ch.len_utf8())
        .unwrap_or(text.len())
}

fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut out: String = text.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

fn row_item(row: &Row, text_width: usize) -> ListItem<'static> {
    let color = accent(row.category);
    let text_style = if row.completed {
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::CROSSED_OUT | Modifier::DIM)
    } else {
        Style::default().fg(Color::White)
    };
    let spans = vec![
        Span::styled(
            if row.completed { "[x] " } else { "[ ] " },
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(truncate_text(&row.text, text_width.max(8)), text_style),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", row.category.label()),
            Style::default().bg(color).fg(Color::Black),
        ),
    ];
    ListItem::new(Line::from(spans))
}

fn field_line(label: &str, field: &FieldValue, active: bool) -> Line<'static> {
    let label_style = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::BOLD | Modifier::DIM);
    let value_style = Style::default().fg(if active { Color::Cyan } else { Color::White });
    let text = if active {
        field.with_caret()
    } else {
        field.value.clone()
    };
    Line::from(vec![
        Span::styled(format!("{}: ", label), label_style),
        Span::styled(text, value_style),
    ])
}

fn category_line(selected: Option<Category>, active: bool) -> Line<'static> {
    let label_style = Style::default()
        .fg(if active { Color::Cyan } else { Color::Gray })
        .add_modifier(Modifier::BOLD | Modifier::DIM);
    let mut spans = vec![Span::styled("Category: ", label_style)];
    for (pos, category) in Category::ALL.iter().enumerate() {
        let color = accent(*category);
        let style = if selected == Some(*category) {
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };
        spans.push(Span::styled(
            format!(" {} {} ", pos + 1, category.label()),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    if selected.is_none() {
        spans.push(Span::styled("(choose one)", Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

fn format_elapsed(last: Instant) -> String {
    let secs = last.elapsed().as_secs();
    if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else {
        format!("{}h ago", secs / 3600)
    }
}
