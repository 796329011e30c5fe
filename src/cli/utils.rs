use lang_router_plugin::status::CheckState;
use lang_router_plugin::{DiagnosticLevel, StepOutcome};

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        format!("1 {}", word)
    } else {
        format!("{} {}s", count, word)
    }
}

pub fn level_icon(level: DiagnosticLevel) -> &'static str {
    match level {
        DiagnosticLevel::Info => "💡",
        DiagnosticLevel::Warn => "⚠️ ",
        DiagnosticLevel::Error => "❌",
    }
}

pub fn outcome_icon(outcome: StepOutcome) -> &'static str {
    match outcome {
        StepOutcome::Modified => "✅",
        StepOutcome::Unchanged => "✔️ ",
        StepOutcome::Skipped => "⏭️ ",
    }
}

pub fn check_icon(state: CheckState) -> &'static str {
    match state {
        CheckState::Done => "✅",
        CheckState::Pending => "⏳",
        CheckState::Missing => "❌",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("file", 1), "1 file");
        assert_eq!(pluralize("file", 0), "0 files");
        assert_eq!(pluralize("warning", 3), "3 warnings");
    }
}
