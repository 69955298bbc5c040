//! Unified diffs between backup and intended configurations

use similar::TextDiff;

/// Lines of context around each hunk.
pub const DEFAULT_CONTEXT: usize = 3;

/// A unified diff from a backup (`---`) to an intended (`+++`) text.
///
/// Line terminators are normalized before diffing, so a CRLF backup and an
/// LF intended file with the same lines produce no diff, and neither does a
/// missing newline at the end of either file. Lines are emitted
/// without terminators. Identical inputs produce no lines at all, not even
/// headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnifiedDiff {
    backup: String,
    intended: String,
    backup_label: String,
    intended_label: String,
    context: usize,
}

/// Diff a backup text against an intended text.
pub fn unified_diff(backup: &str, intended: &str) -> UnifiedDiff {
    UnifiedDiff::new(backup, intended)
}

impl UnifiedDiff {
    pub fn new(backup: &str, intended: &str) -> Self {
        Self {
            backup: normalize(backup),
            intended: normalize(intended),
            backup_label: String::new(),
            intended_label: String::new(),
            context: DEFAULT_CONTEXT,
        }
    }

    /// Set the names shown on the `---` and `+++` header lines.
    pub fn with_labels(mut self, backup: impl Into<String>, intended: impl Into<String>) -> Self {
        self.backup_label = backup.into();
        self.intended_label = intended.into();
        self
    }

    pub fn with_context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.backup == self.intended
    }

    /// The diff lines, without terminators.
    ///
    /// Each call starts over from the first line.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        let text = self.render();
        text.lines().map(str::to_string).collect::<Vec<_>>().into_iter()
    }

    /// The whole diff joined with `\n`.
    pub fn to_text(&self) -> String {
        let mut text = self.render();
        text.truncate(text.trim_end_matches('\n').len());
        text
    }

    /// Headers are only written when there is at least one hunk.
    fn render(&self) -> String {
        TextDiff::from_lines(&self.backup, &self.intended)
            .unified_diff()
            .context_radius(self.context)
            .header(&self.backup_label, &self.intended_label)
            .to_string()
    }
}

/// Unix line endings and a terminated last line.
fn normalize(text: &str) -> String {
    let mut text = text.replace("\r\n", "\n").replace('\r', "\n");
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
