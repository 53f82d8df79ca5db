/// Raw words for a new task, gathered from any client (CLI arguments, TUI input).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureInput {
    pub text: Vec<String>,
}

impl CaptureInput {
    pub fn from_text(text: &str) -> Self {
        Self {
            text: vec![text.to_string()],
        }
    }

    /// The normalized title, or `None` when nothing but whitespace was typed.
    pub fn title(&self) -> Option<String> {
        normalize_title(&self.text.join(" "))
    }
}

pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
