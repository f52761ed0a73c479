use rusqlite::Connection;

use crate::db::{fetch_records, search_records};
use crate::error::StoreResult;
use crate::models::AttendanceRecord;

/// Placeholder shown when the table is empty.
pub(crate) const NO_RECORDS: &str = "No attendance records found";
/// Placeholder shown when the live filter matches nothing.
pub(crate) const NO_MATCHES: &str = "No matching records found";
/// Placeholder shown when the store could not be read.
pub(crate) const LOAD_FAILED: &str = "Could not load attendance records";

/// High-level navigation states. The entry form is the initial screen; its
/// field state lives on `App` so it survives a trip to the records list.
#[derive(Default)]
pub(crate) enum Screen {
    #[default]
    Entry,
    Records(RecordsScreen),
}

/// Focusable widgets on the entry screen, in Tab order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum EntryFocus {
    #[default]
    Input,
    Mark,
    View,
    DeleteAll,
}

impl EntryFocus {
    const ORDER: [EntryFocus; 4] = [
        EntryFocus::Input,
        EntryFocus::Mark,
        EntryFocus::View,
        EntryFocus::DeleteAll,
    ];

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|focus| *focus == self)
            .unwrap_or(0)
    }

    pub(crate) fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub(crate) fn previous(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

/// The "mark attendance" form: one text field and three buttons.
#[derive(Default)]
pub(crate) struct EntryScreen {
    pub(crate) lrn_input: String,
    pub(crate) focus: EntryFocus,
}

impl EntryScreen {
    /// Typing always lands in the text field, wherever focus was.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.lrn_input.push(ch);
        self.focus = EntryFocus::Input;
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.lrn_input.pop();
        self.focus = EntryFocus::Input;
    }

    pub(crate) fn clear_input(&mut self) {
        self.lrn_input.clear();
    }
}

/// The records list with its live filter.
pub(crate) struct RecordsScreen {
    pub(crate) filter: String,
    pub(crate) records: Vec<AttendanceRecord>,
    pub(crate) placeholder: &'static str,
    pub(crate) selected: usize,
}

impl RecordsScreen {
    /// Fresh screen with an empty filter and nothing displayed yet.
    pub(crate) fn new() -> Self {
        Self {
            filter: String::new(),
            records: Vec::new(),
            placeholder: NO_RECORDS,
            selected: 0,
        }
    }

    /// Full scan, used when the screen is entered.
    pub(crate) fn load_all(&mut self, conn: &Connection) -> StoreResult<()> {
        self.filter.clear();
        self.clear_list();
        let records = fetch_records(conn).inspect_err(|_| self.placeholder = LOAD_FAILED)?;
        self.show(records, NO_RECORDS);
        Ok(())
    }

    /// Re-query the store with the current filter text. Runs on every edit.
    pub(crate) fn apply_filter(&mut self, conn: &Connection) -> StoreResult<()> {
        self.clear_list();
        let records =
            search_records(conn, &self.filter).inspect_err(|_| self.placeholder = LOAD_FAILED)?;
        self.show(records, NO_MATCHES);
        Ok(())
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.filter.push(ch);
        true
    }

    /// Drop the last filter character, reporting whether the text changed.
    pub(crate) fn backspace(&mut self) -> bool {
        self.filter.pop().is_some()
    }

    /// Lines for the list widget; a lone placeholder when nothing matched.
    pub(crate) fn display_lines(&self) -> Vec<String> {
        if self.records.is_empty() {
            vec![self.placeholder.to_string()]
        } else {
            self.records
                .iter()
                .map(AttendanceRecord::display_line)
                .collect()
        }
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.records.is_empty() {
            return;
        }
        let last = self.records.len() as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, last) as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.records.len().saturating_sub(1);
    }

    fn clear_list(&mut self) {
        self.records.clear();
        self.selected = 0;
    }

    fn show(&mut self, records: Vec<AttendanceRecord>, placeholder: &'static str) {
        self.records = records;
        self.placeholder = placeholder;
        self.selected = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ensure_schema, insert_record};

    fn store_with(lrns: &[&str]) -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        for lrn in lrns {
            insert_record(&conn, lrn, "2024-05-01 07:30:00").unwrap();
        }
        conn
    }

    #[test]
    fn focus_cycles_in_both_directions() {
        assert_eq!(EntryFocus::Input.next(), EntryFocus::Mark);
        assert_eq!(EntryFocus::DeleteAll.next(), EntryFocus::Input);
        assert_eq!(EntryFocus::Input.previous(), EntryFocus::DeleteAll);
        assert_eq!(EntryFocus::View.previous(), EntryFocus::Mark);
    }

    #[test]
    fn typing_returns_focus_to_the_field() {
        let mut entry = EntryScreen {
            focus: EntryFocus::View,
            ..EntryScreen::default()
        };
        assert!(entry.push_char('a'));
        assert!(!entry.push_char('\n'));
        assert_eq!(entry.lrn_input, "a");
        assert_eq!(entry.focus, EntryFocus::Input);
    }

    #[test]
    fn empty_table_shows_no_records_placeholder() {
        let conn = store_with(&[]);
        let mut screen = RecordsScreen::new();
        screen.load_all(&conn).unwrap();
        assert_eq!(screen.display_lines(), vec![NO_RECORDS.to_string()]);
    }

    #[test]
    fn filter_without_matches_shows_no_matches_placeholder() {
        let conn = store_with(&["A1"]);
        let mut screen = RecordsScreen::new();
        screen.load_all(&conn).unwrap();
        screen.push_char('Q');
        screen.apply_filter(&conn).unwrap();
        assert_eq!(screen.display_lines(), vec![NO_MATCHES.to_string()]);
    }

    #[test]
    fn load_all_resets_a_previous_filter() {
        let conn = store_with(&["A1", "B2"]);
        let mut screen = RecordsScreen::new();
        screen.push_char('B');
        screen.apply_filter(&conn).unwrap();
        assert_eq!(screen.records.len(), 1);

        screen.load_all(&conn).unwrap();
        assert!(screen.filter.is_empty());
        assert_eq!(
            screen.display_lines(),
            vec![
                "LRN: A1 | 2024-05-01 07:30:00".to_string(),
                "LRN: B2 | 2024-05-01 07:30:00".to_string(),
            ]
        );
    }

    #[test]
    fn failed_reads_never_claim_the_table_is_empty() {
        let conn = store_with(&["A1"]);
        let mut screen = RecordsScreen::new();
        screen.load_all(&conn).unwrap();
        conn.execute("ALTER TABLE attendance RENAME TO attendance_old", [])
            .unwrap();

        screen.push_char('A');
        assert!(screen.apply_filter(&conn).is_err());
        assert_eq!(screen.display_lines(), vec![LOAD_FAILED.to_string()]);

        assert!(screen.load_all(&conn).is_err());
        assert_eq!(screen.display_lines(), vec![LOAD_FAILED.to_string()]);
    }

    #[test]
    fn selection_stays_within_the_list() {
        let conn = store_with(&["A1", "A2", "A3"]);
        let mut screen = RecordsScreen::new();
        screen.load_all(&conn).unwrap();

        screen.move_selection(10);
        assert_eq!(screen.selected, 2);
        screen.move_selection(-1);
        assert_eq!(screen.selected, 1);
        screen.move_selection(-10);
        assert_eq!(screen.selected, 0);
        screen.select_last();
        assert_eq!(screen.selected, 2);
        screen.select_first();
        assert_eq!(screen.selected, 0);
    }
}
