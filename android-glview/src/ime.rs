//! Soft-keyboard (IME) plumbing.
//!
//! The engine cannot talk to the platform input-method service directly: it
//! runs on the render thread and the service must be driven from the UI
//! thread. Requests therefore travel over a channel - a [`SoftKeyboardHandle`]
//! on the engine side, a pump on the view's UI side - and the actual text
//! entry is mirrored through [`TextEditProxy`], a stand-in for the hidden
//! edit widget the platform IME edits. Widget edits are diffed back into
//! engine-facing insert/delete calls.

use std::sync::mpsc;

use log::debug;

/// A request to open or close the on-screen keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImeRequest {
    /// Show the keyboard, seeding the hidden edit widget with the engine's
    /// current editable text.
    Open { text: String },
    /// Hide the keyboard.
    Close,
}

/// Cheaply clonable sender half handed to the engine side.
///
/// Both calls are fire-and-forget: if the view is gone the request is simply
/// dropped.
#[derive(Debug, Clone)]
pub struct SoftKeyboardHandle {
    tx: mpsc::Sender<ImeRequest>,
}

impl SoftKeyboardHandle {
    pub(crate) fn new(tx: mpsc::Sender<ImeRequest>) -> Self {
        Self { tx }
    }

    /// Requests the keyboard be shown over `text`.
    pub fn open(&self, text: impl Into<String>) {
        let _ = self.tx.send(ImeRequest::Open { text: text.into() });
    }

    /// Requests the keyboard be hidden.
    pub fn close(&self) {
        let _ = self.tx.send(ImeRequest::Close);
    }
}

/// The platform input-method service seam.
///
/// Implemented via JNI on Android ([`crate::android::ActivitySoftInput`]) and
/// by recording fakes in tests.
pub trait SoftInput {
    fn show_soft_input(&mut self);
    fn hide_soft_input(&mut self);
}

/// An engine-facing edit derived from a widget text change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Insert(String),
    DeleteBackward,
}

/// Mirror of the hidden edit widget the IME actually edits.
///
/// Invariant: between sessions and edits, `text()` tracks the most recent
/// native-requested content string plus any edits the IME has made since.
#[derive(Debug, Default)]
pub struct TextEditProxy {
    text: String,
    active: bool,
}

impl TextEditProxy {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current widget text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether a keyboard session is open.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Starts a keyboard session, seeding the widget with the
    /// native-requested content.
    pub fn begin_session(&mut self, content: &str) {
        self.text.clear();
        self.text.push_str(content);
        self.active = true;
    }

    /// Ends the keyboard session. The widget keeps its text; the next session
    /// reseeds it.
    pub fn end_session(&mut self) {
        self.active = false;
    }

    /// Applies a new widget text (the IME rewrote the field) and returns the
    /// engine-facing edits: one `DeleteBackward` per character removed past
    /// the common prefix, then at most one `Insert` for the appended text.
    ///
    /// Outside a session the change is ignored; the platform keeps sending
    /// watcher callbacks while the widget is being torn down.
    pub fn text_changed(&mut self, new_text: &str) -> Vec<EditCommand> {
        if !self.active {
            return Vec::new();
        }

        let common = self
            .text
            .chars()
            .zip(new_text.chars())
            .take_while(|(a, b)| a == b)
            .count();
        let removed = self.text.chars().count() - common;
        let inserted: String = new_text.chars().skip(common).collect();

        let mut commands = Vec::with_capacity(removed + 1);
        for _ in 0..removed {
            commands.push(EditCommand::DeleteBackward);
        }
        if !inserted.is_empty() {
            commands.push(EditCommand::Insert(inserted));
        }

        self.text.clear();
        self.text.push_str(new_text);

        debug!(
            "widget text changed: {} deletions, {} edits total",
            removed,
            commands.len()
        );
        commands
    }

    /// The user confirmed the field (the IME's done/enter action): a newline
    /// is committed to the engine and the session ends.
    pub fn editor_action_done(&mut self) -> Vec<EditCommand> {
        if !self.active {
            return Vec::new();
        }
        self.end_session();
        vec![EditCommand::Insert("\n".into())]
    }
}
