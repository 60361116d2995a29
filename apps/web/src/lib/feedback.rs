//! Seams between view-models and the user: transient notices and the
//! confirmation prompt shown before destructive actions. Routes plug in the
//! toast stack and `window.confirm`; tests plug in recorders and stubs.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A fire-and-forget message for the notification surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Sink for notices. Messages must never contain tokens or passwords.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Blocking yes/no gate.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// `window.confirm`; answers "no" when there is no window.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserConfirm;

#[cfg(target_arch = "wasm32")]
impl Confirm for BrowserConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(prompt).ok())
            .unwrap_or(false)
    }
}
