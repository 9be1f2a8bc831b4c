use std::collections::HashSet;

/// (repository, message) pairs already placed in the report for one run.
#[derive(Debug, Default)]
pub struct SeenMessages {
    seen: HashSet<(String, String)>,
}

impl SeenMessages {
    pub fn new() -> Self {
        Self::default()
    }

    /// True the first time a given pair is offered, false on every repeat.
    pub fn first_sighting(&mut self, repo: &str, message: &str) -> bool {
        self.seen.insert((repo.to_string(), message.to_string()))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeats_are_rejected() {
        let mut seen = SeenMessages::new();
        assert!(seen.first_sighting("api", "Fix login"));
        assert!(!seen.first_sighting("api", "Fix login"));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn key_includes_repository() {
        let mut seen = SeenMessages::new();
        assert!(seen.first_sighting("api", "Bump version"));
        assert!(seen.first_sighting("web", "Bump version"));
        assert!(seen.first_sighting("api", "Bump version again"));
    }

    #[test]
    fn key_parts_do_not_bleed_into_each_other() {
        let mut seen = SeenMessages::new();
        assert!(seen.first_sighting("a_b", "c"));
        assert!(seen.first_sighting("a", "b_c"));
    }
}
