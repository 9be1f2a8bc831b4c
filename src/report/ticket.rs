use regex::Regex;
use std::sync::LazyLock;

pub const TASK_URL_BASE: &str = "https://app.clickup.com/t/";

static TASK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)CU-[^[:alnum:]]*([[:alnum:]]+)").expect("Invalid task reference regex")
});

/// Tracker URL for the first `CU-<id>` reference in `message`, if any.
pub fn related_task_url(message: &str) -> Option<String> {
    TASK_REGEX
        .captures(message)
        .and_then(|caps| caps.get(1))
        .map(|id| format!("{TASK_URL_BASE}{}", id.as_str()))
}
