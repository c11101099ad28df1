//! Modal overlays drawn above the active screen.
//!
//! Overlays form a stack; only the top one is visible and `Esc` pops it.

use serde::{Deserialize, Serialize};

// ─── Overlay Kind ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    /// Keyboard reference.
    Help,
    /// One-shot notice raised by a screen or the shell.
    Alert,
}

impl std::fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Help => write!(f, "Help"),
            Self::Alert => write!(f, "Alert"),
        }
    }
}

// ─── Overlay Request ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayRequest {
    pub kind: OverlayKind,
    pub title: String,
    pub body: Option<String>,
}

impl OverlayRequest {
    #[must_use]
    pub fn new(kind: OverlayKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            body: None,
        }
    }

    #[must_use]
    pub fn help() -> Self {
        Self::new(OverlayKind::Help, "Keyboard Shortcuts")
    }

    #[must_use]
    pub fn alert(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(OverlayKind::Alert, title).with_body(body)
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

// ─── Overlay Manager ────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct OverlayManager {
    stack: Vec<OverlayRequest>,
}

impl OverlayManager {
    #[must_use]
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, request: OverlayRequest) {
        self.stack.push(request);
    }

    /// Pop the top overlay.
    pub fn dismiss(&mut self) -> Option<OverlayRequest> {
        self.stack.pop()
    }

    pub fn dismiss_all(&mut self) {
        self.stack.clear();
    }

    /// Show help unless it is already on top; hide it if it is.
    pub fn toggle_help(&mut self) {
        if self.top().is_some_and(|top| top.kind == OverlayKind::Help) {
            self.stack.pop();
        } else {
            self.stack.push(OverlayRequest::help());
        }
    }

    #[must_use]
    pub fn top(&self) -> Option<&OverlayRequest> {
        self.stack.last()
    }

    #[must_use]
    pub fn has_active(&self) -> bool {
        !self.stack.is_empty()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let overlays = OverlayManager::new();
        assert!(!overlays.has_active());
        assert!(overlays.top().is_none());
    }

    #[test]
    fn top_is_last_pushed() {
        let mut overlays = OverlayManager::new();
        overlays.push(OverlayRequest::help());
        overlays.push(OverlayRequest::alert("Zone removed", "Zone B-8 was removed."));
        assert_eq!(overlays.depth(), 2);
        assert_eq!(overlays.top().map(|o| o.kind), Some(OverlayKind::Alert));

        let popped = overlays.dismiss().unwrap();
        assert_eq!(popped.body.as_deref(), Some("Zone B-8 was removed."));
        assert_eq!(overlays.top().map(|o| o.kind), Some(OverlayKind::Help));
    }

    #[test]
    fn toggle_help_opens_and_closes() {
        let mut overlays = OverlayManager::new();
        overlays.toggle_help();
        assert_eq!(overlays.top().map(|o| o.kind), Some(OverlayKind::Help));
        overlays.toggle_help();
        assert!(!overlays.has_active());
    }

    #[test]
    fn toggle_help_stacks_over_alert() {
        let mut overlays = OverlayManager::new();
        overlays.push(OverlayRequest::alert("Notice", "body"));
        overlays.toggle_help();
        assert_eq!(overlays.depth(), 2);
        overlays.dismiss_all();
        assert_eq!(overlays.depth(), 0);
    }

    #[test]
    fn kind_display() {
        assert_eq!(OverlayKind::Help.to_string(), "Help");
        assert_eq!(OverlayKind::Alert.to_string(), "Alert");
    }
}
