use crate::errors::SpoonError;
use crate::utils::base_name;
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Patterns applied regardless of the project's ignore file.
pub const ALWAYS_IGNORED: &[&str] = &[".git/"];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

struct IgnoreRule {
    pattern: Pattern,
    dir_only: bool,
    /// No inner `/`: matched against the entry name at any depth.
    name_only: bool,
}

impl IgnoreRule {
    fn compile(raw: &str) -> Option<IgnoreRule> {
        let mut text = raw.trim();
        let mut dir_only = false;
        if let Some(stripped) = text.strip_suffix("/**") {
            text = stripped;
            dir_only = true;
        }
        if let Some(stripped) = text.strip_suffix('/') {
            text = stripped;
            dir_only = true;
        }
        let anchored = text.starts_with('/');
        let text = text.trim_start_matches('/');
        if text.is_empty() {
            return None;
        }

        match Pattern::new(text).map_err(SpoonError::from) {
            Ok(pattern) => Some(IgnoreRule {
                pattern,
                dir_only,
                name_only: !anchored && !text.contains('/'),
            }),
            Err(e) => {
                warn!("Skipping ignore pattern '{}': {}", raw, e);
                None
            }
        }
    }

    fn matches(&self, rel_path: &str, is_dir: bool) -> bool {
        if self.dir_only && !is_dir {
            return false;
        }
        let candidate = if self.name_only {
            base_name(rel_path)
        } else {
            rel_path
        };
        self.pattern.matches_with(candidate, MATCH_OPTIONS)
    }
}

pub struct IgnorePatterns {
    rules: Vec<IgnoreRule>,
}

impl IgnorePatterns {
    pub fn new(patterns: Vec<String>) -> Self {
        let rules = ALWAYS_IGNORED
            .iter()
            .map(|p| p.to_string())
            .chain(patterns.iter().cloned())
            .filter_map(|p| IgnoreRule::compile(&p))
            .collect();

        debug!("Using ignore patterns: {:?}", patterns);

        IgnorePatterns { rules }
    }

    /// Reads `ignore_file` (relative to `root`) and appends `extra`. A missing
    /// or unreadable file contributes no patterns.
    pub fn load(root: &Path, ignore_file: &Path, extra: &[String]) -> Self {
        let path = root.join(ignore_file);
        let mut patterns = match fs::read_to_string(&path) {
            Ok(content) => parse_ignore_lines(&content),
            Err(e) => {
                debug!("No ignore patterns read from {:?}: {}", path, e);
                Vec::new()
            }
        };
        patterns.extend(extra.iter().cloned());
        IgnorePatterns::new(patterns)
    }

    /// True if `rel_path` or any of its ancestor directories is matched.
    pub fn should_ignore(&self, rel_path: &str, is_dir: bool) -> bool {
        let rel_path = rel_path.trim_end_matches('/');
        if self.matches_any(rel_path, is_dir) {
            return true;
        }
        rel_path
            .match_indices('/')
            .any(|(idx, _)| self.matches_any(&rel_path[..idx], true))
    }

    fn matches_any(&self, rel_path: &str, is_dir: bool) -> bool {
        self.rules.iter().any(|rule| rule.matches(rel_path, is_dir))
    }
}

/// One pattern per line; blank lines and `#` comments are skipped.
pub fn parse_ignore_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}

