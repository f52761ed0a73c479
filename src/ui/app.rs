use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use rusqlite::Connection;
use tracing::{error, info};

use crate::db::{delete_all_records, insert_record};
use crate::error::StoreError;
use crate::models::{normalize_lrn, timestamp_now};

use super::dialogs::{
    ConfirmChoice, ConfirmDeleteAll, Dialog, MessageDialog, CONFIRM_DELETE_TEXT,
    CONFIRM_DELETE_TITLE, DELETED_ALL_TEXT, STORAGE_FAILURE_TEXT,
};
use super::helpers::{button_span, centered_rect, cursor_column, input_block, key_style};
use super::screens::{EntryFocus, EntryScreen, RecordsScreen, Screen};

/// Footer space reserved for key hints.
const FOOTER_HEIGHT: u16 = 2;
/// Rows moved by PageUp/PageDown in the records list.
const PAGE_STEP: isize = 5;

/// Central application state: the store handle, the visible screen and the
/// dialog on top of it, if any.
pub struct App {
    conn: Connection,
    screen: Screen,
    entry: EntryScreen,
    dialog: Option<Dialog>,
}

impl App {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            screen: Screen::default(),
            entry: EntryScreen::default(),
            dialog: None,
        }
    }

    /// Hand the connection back so it can be closed at shutdown.
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    /// Process one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        if let Some(dialog) = self.dialog.take() {
            self.dialog = self.handle_dialog_key(code, dialog);
            return false;
        }

        match self.screen {
            Screen::Entry => self.handle_entry_key(code),
            Screen::Records(_) => {
                self.handle_records_key(code);
                false
            }
        }
    }

    /// Ctrl-modified shortcuts. Ctrl+C always quits; the others only apply on
    /// the entry screen with no dialog open.
    pub fn handle_ctrl(&mut self, ch: char) -> bool {
        if ch == 'c' {
            return true;
        }
        if self.dialog.is_some() || !matches!(self.screen, Screen::Entry) {
            return false;
        }
        match ch {
            'v' => self.view_attendance(),
            'd' => self.confirm_delete(),
            _ => {}
        }
        false
    }

    fn handle_entry_key(&mut self, code: KeyCode) -> bool {
        let entry = &mut self.entry;

        match code {
            KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::Down => entry.focus = entry.focus.next(),
            KeyCode::BackTab | KeyCode::Up => entry.focus = entry.focus.previous(),
            KeyCode::Backspace => entry.backspace(),
            KeyCode::Char(ch) => {
                entry.push_char(ch);
            }
            KeyCode::Enter => {
                let focus = entry.focus;
                match focus {
                    EntryFocus::Input | EntryFocus::Mark => self.mark_attendance(),
                    EntryFocus::View => self.view_attendance(),
                    EntryFocus::DeleteAll => self.confirm_delete(),
                }
            }
            _ => {}
        }
        false
    }

    fn handle_records_key(&mut self, code: KeyCode) {
        let Screen::Records(records) = &mut self.screen else {
            return;
        };

        match code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Up => records.move_selection(-1),
            KeyCode::Down => records.move_selection(1),
            KeyCode::PageUp => records.move_selection(-PAGE_STEP),
            KeyCode::PageDown => records.move_selection(PAGE_STEP),
            KeyCode::Home => records.select_first(),
            KeyCode::End => records.select_last(),
            KeyCode::Backspace => {
                if records.backspace() {
                    self.search_attendance();
                }
            }
            KeyCode::Char(ch) => {
                if records.push_char(ch) {
                    self.search_attendance();
                }
            }
            _ => {}
        }
    }

    fn handle_dialog_key(&mut self, code: KeyCode, dialog: Dialog) -> Option<Dialog> {
        match dialog {
            Dialog::Message(message) => match code {
                KeyCode::Enter | KeyCode::Esc => None,
                _ => Some(Dialog::Message(message)),
            },
            Dialog::ConfirmDeleteAll(mut confirm) => match code {
                KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => None,
                KeyCode::Char('y') | KeyCode::Char('Y') => self.delete_all(),
                KeyCode::Enter => match confirm.choice {
                    ConfirmChoice::Cancel => None,
                    ConfirmChoice::Delete => self.delete_all(),
                },
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                    confirm.toggle();
                    Some(Dialog::ConfirmDeleteAll(confirm))
                }
                _ => Some(Dialog::ConfirmDeleteAll(confirm)),
            },
        }
    }

    /// Validate the LRN field and record one attendance row. The screen never
    /// changes; the outcome is reported in a dialog.
    fn mark_attendance(&mut self) {
        let entry = &mut self.entry;
        let lrn = match normalize_lrn(&entry.lrn_input) {
            Ok(lrn) => lrn,
            Err(err) => {
                self.dialog = Some(Dialog::Message(MessageDialog::error(err.to_string())));
                return;
            }
        };

        match insert_record(&self.conn, &lrn, &timestamp_now()) {
            Ok(record) => {
                entry.clear_input();
                entry.focus = EntryFocus::Input;
                self.dialog = Some(Dialog::Message(MessageDialog::success(format!(
                    "Attendance recorded for LRN: {}",
                    record.lrn
                ))));
            }
            Err(err) => self.show_storage_error("mark attendance", &err),
        }
    }

    /// Switch to the records list and populate it with a full scan.
    fn view_attendance(&mut self) {
        let mut records = RecordsScreen::new();
        let result = records.load_all(&self.conn);
        self.screen = Screen::Records(records);
        if let Err(err) = result {
            self.show_storage_error("load attendance records", &err);
        }
    }

    fn search_attendance(&mut self) {
        let Screen::Records(records) = &mut self.screen else {
            return;
        };
        if let Err(err) = records.apply_filter(&self.conn) {
            self.show_storage_error("search attendance records", &err);
        }
    }

    fn confirm_delete(&mut self) {
        self.dialog = Some(Dialog::ConfirmDeleteAll(ConfirmDeleteAll::default()));
    }

    /// Runs after the confirmation was accepted; returns the follow-up dialog.
    fn delete_all(&mut self) -> Option<Dialog> {
        info!("delete of all attendance records confirmed");
        match delete_all_records(&self.conn) {
            Ok(_) => Some(Dialog::Message(MessageDialog::success(DELETED_ALL_TEXT))),
            Err(err) => {
                self.show_storage_error("delete attendance records", &err);
                self.dialog.take()
            }
        }
    }

    fn go_back(&mut self) {
        self.screen = Screen::Entry;
    }

    fn show_storage_error(&mut self, action: &str, err: &StoreError) {
        error!(action, error = %err, "storage operation failed");
        self.dialog = Some(Dialog::Message(MessageDialog::error(STORAGE_FAILURE_TEXT)));
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Entry => self.draw_entry(frame, content_area, &self.entry),
            Screen::Records(records) => self.draw_records(frame, content_area, records),
        }

        if area.height > footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.dialog {
            Some(Dialog::Message(message)) => self.draw_message(frame, area, message),
            Some(Dialog::ConfirmDeleteAll(confirm)) => {
                self.draw_confirm_delete(frame, area, confirm)
            }
            None => {}
        }
    }

    fn draw_entry(&self, frame: &mut Frame, area: Rect, entry: &EntryScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let title = Paragraph::new(Line::from(Span::styled(
            "Attendance System",
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(title, chunks[0]);

        let input_focused = entry.focus == EntryFocus::Input;
        let block = input_block("Enter LRN", input_focused);
        let inner = block.inner(chunks[1]);
        frame.render_widget(Paragraph::new(entry.lrn_input.as_str()).block(block), chunks[1]);

        let buttons = Line::from(vec![
            button_span(
                "Mark Attendance",
                Color::Green,
                entry.focus == EntryFocus::Mark,
            ),
            Span::raw("  "),
            button_span(
                "View Attendance",
                Color::Cyan,
                entry.focus == EntryFocus::View,
            ),
            Span::raw("  "),
            button_span(
                "Delete All Records",
                Color::Red,
                entry.focus == EntryFocus::DeleteAll,
            ),
        ]);
        frame.render_widget(
            Paragraph::new(buttons).alignment(Alignment::Center),
            chunks[3],
        );

        if input_focused && self.dialog.is_none() && inner.width > 0 && inner.height > 0 {
            frame.set_cursor_position((cursor_column(inner, &entry.lrn_input), inner.y));
        }
    }

    fn draw_records(&self, frame: &mut Frame, area: Rect, records: &RecordsScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
            ])
            .split(area);

        let title = Paragraph::new(Line::from(Span::styled(
            "Attendance Records",
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(title, chunks[0]);

        let block = input_block("Search LRN", true);
        let inner = block.inner(chunks[1]);
        frame.render_widget(Paragraph::new(records.filter.as_str()).block(block), chunks[1]);

        let list_block = Block::default().borders(Borders::ALL);
        if records.records.is_empty() {
            let placeholder = List::new(vec![ListItem::new(Span::styled(
                records.placeholder,
                Style::default().fg(Color::DarkGray),
            ))])
            .block(list_block);
            frame.render_widget(placeholder, chunks[2]);
        } else {
            let items: Vec<ListItem> = records
                .display_lines()
                .into_iter()
                .map(ListItem::new)
                .collect();
            let list = List::new(items)
                .block(list_block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
            let mut state = ListState::default().with_selected(Some(records.selected));
            frame.render_stateful_widget(list, chunks[2], &mut state);
        }

        if self.dialog.is_none() && inner.width > 0 && inner.height > 0 {
            frame.set_cursor_position((cursor_column(inner, &records.filter), inner.y));
        }
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let paragraph = Paragraph::new(self.footer_instructions()).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = key_style();
        match (&self.screen, &self.dialog) {
            (_, Some(Dialog::Message(_))) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" OK"),
            ]),
            (_, Some(Dialog::ConfirmDeleteAll(_))) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Switch   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Choose   "),
                Span::styled("[Y]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[N/Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (Screen::Entry, None) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Focus   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Activate   "),
                Span::styled("[Ctrl+V]", key_style),
                Span::raw(" View   "),
                Span::styled("[Ctrl+D]", key_style),
                Span::raw(" Delete All   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Quit"),
            ]),
            (Screen::Records(_), None) => Line::from(vec![
                Span::styled("[Type]", key_style),
                Span::raw(" Filter   "),
                Span::styled("[↑↓]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Back"),
            ]),
        }
    }

    fn draw_message(&self, frame: &mut Frame, area: Rect, message: &MessageDialog) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(message.title())
            .borders(Borders::ALL)
            .border_style(message.kind.style());
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let lines = vec![
            Line::from(Span::styled(message.text.clone(), message.kind.style())),
            Line::from(""),
            Line::from(button_span("OK", Color::Cyan, true)),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmDeleteAll) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(CONFIRM_DELETE_TITLE)
            .borders(Borders::ALL);
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let lines = vec![
            Line::from(CONFIRM_DELETE_TEXT),
            Line::from(""),
            Line::from(vec![
                button_span(
                    "Cancel",
                    Color::Gray,
                    confirm.choice == ConfirmChoice::Cancel,
                ),
                Span::raw("   "),
                button_span(
                    "Delete",
                    Color::Red,
                    confirm.choice == ConfirmChoice::Delete,
                ),
            ]),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}
