//! Side channels owned by the host shell: toast notifications and modals.
//! Handlers receive them as parameters instead of reaching for globals.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

pub trait Notifier {
    fn notify(&self, kind: NotificationKind, title: &str);
}

/// Opens named modals such as the remove-configuration prompt.
pub trait ModalLauncher {
    fn show_remove_config_prompt(&self, config_name: &str);
}
