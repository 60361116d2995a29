mod alert;
mod button;
mod spinner;
mod toasts;

pub(crate) use alert::{Alert, AlertKind};
pub(crate) use button::{Button, ButtonVariant};
pub(crate) use spinner::Spinner;
pub(crate) use toasts::{ToastStack, provide_toasts, use_toasts};
