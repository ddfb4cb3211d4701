use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::util::colors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

/// Transient message shown in the status line until it expires.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    expires_at: Instant,
}

impl Notification {
    pub fn info(message: impl Into<String>, ttl: Duration) -> Self {
        Self::new(message.into(), NotificationKind::Info, ttl)
    }

    pub fn error(message: impl Into<String>, ttl: Duration) -> Self {
        Self::new(message.into(), NotificationKind::Error, ttl)
    }

    fn new(message: String, kind: NotificationKind, ttl: Duration) -> Self {
        Self {
            message,
            kind,
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

impl Widget for &Notification {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (icon, color) = match self.kind {
            NotificationKind::Info => ("●", colors::ACCENT),
            NotificationKind::Error => ("✗", colors::ERROR),
        };
        let line = Line::from(vec![
            Span::styled(format!(" {} ", icon), Style::default().fg(color)),
            Span::styled(
                self.message.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}
