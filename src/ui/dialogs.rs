use ratatui::style::{Color, Style};

/// Title of the delete-all confirmation.
pub(crate) const CONFIRM_DELETE_TITLE: &str = "Confirm Delete";
/// Question asked before wiping the table.
pub(crate) const CONFIRM_DELETE_TEXT: &str =
    "Are you sure you want to delete all attendance records?";
/// Shown once the table has been emptied.
pub(crate) const DELETED_ALL_TEXT: &str = "All attendance records deleted";
/// Generic text for any store failure; the cause only goes to the log.
pub(crate) const STORAGE_FAILURE_TEXT: &str =
    "A storage failure occurred. The details were written to the log.";

/// The modal currently covering the screen. Each value is dropped on dismissal.
pub(crate) enum Dialog {
    Message(MessageDialog),
    ConfirmDeleteAll(ConfirmDeleteAll),
}

/// Severity of a message dialog.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub(crate) fn title(self) -> &'static str {
        match self {
            MessageKind::Success => "Success",
            MessageKind::Error => "Error",
        }
    }

    pub(crate) fn style(self) -> Style {
        match self {
            MessageKind::Success => Style::default().fg(Color::Green),
            MessageKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// A titled message with a single OK action.
#[derive(Clone, Debug)]
pub(crate) struct MessageDialog {
    pub(crate) kind: MessageKind,
    pub(crate) text: String,
}

impl MessageDialog {
    pub(crate) fn success<S: Into<String>>(text: S) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub(crate) fn error<S: Into<String>>(text: S) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    pub(crate) fn title(&self) -> &'static str {
        self.kind.title()
    }
}

/// Buttons of the delete-all confirmation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum ConfirmChoice {
    #[default]
    Cancel,
    Delete,
}

/// Yes/no gate in front of the bulk delete. Cancel starts focused.
#[derive(Clone, Debug, Default)]
pub(crate) struct ConfirmDeleteAll {
    pub(crate) choice: ConfirmChoice,
}

impl ConfirmDeleteAll {
    pub(crate) fn toggle(&mut self) {
        self.choice = match self.choice {
            ConfirmChoice::Cancel => ConfirmChoice::Delete,
            ConfirmChoice::Delete => ConfirmChoice::Cancel,
        };
    }
}
