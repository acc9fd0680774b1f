/// Computer engineering / AI terms, in Thai and English.
pub const DEFAULT_KEYWORDS: [&str; 5] = [
    "วิศวกรรมคอม",
    "AI",
    "ปัญญาประดิษฐ์",
    "Artificial Intelligence",
    "Computer Engineering",
];

/// Keyword filter over program names.
///
/// Matching is a case-insensitive plain substring test, not word-aware:
/// "ai" also matches inside "Thai" or "Mainframe". That permissiveness is the
/// intended policy and is pinned by tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevanceFilter {
    keywords: Vec<String>,
}

impl RelevanceFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|kw| kw.as_ref().to_lowercase())
                .filter(|kw| !kw.is_empty())
                .collect(),
        }
    }

    pub fn is_relevant(&self, program_name: &str) -> bool {
        let name = program_name.to_lowercase();
        self.keywords.iter().any(|kw| name.contains(kw.as_str()))
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS)
    }
}

pub fn is_relevant(program_name: &str) -> bool {
    RelevanceFilter::default().is_relevant(program_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thai_computer_engineering_is_relevant() {
        assert!(is_relevant("วิศวกรรมคอมพิวเตอร์"));
        assert!(is_relevant("หลักสูตรวิศวกรรมศาสตรบัณฑิต สาขาวิชาวิศวกรรมคอมพิวเตอร์"));
        assert!(is_relevant("วิศวกรรมปัญญาประดิษฐ์"));
    }

    #[test]
    fn test_unrelated_program_is_not_relevant() {
        assert!(!is_relevant("วิศวกรรมโยธา"));
        assert!(!is_relevant("Civil Engineering"));
        assert!(!is_relevant(""));
    }

    #[test]
    fn test_english_keywords_ignore_case() {
        assert!(is_relevant("B.Eng. COMPUTER ENGINEERING (International)"));
        assert!(is_relevant("artificial intelligence and data science"));
        assert!(is_relevant("Robotics and AI Engineering"));
    }

    #[test]
    fn test_substring_match_accepts_partial_words() {
        // "ai" inside an unrelated word still counts
        assert!(is_relevant("Thai Language"));
        assert!(is_relevant("Mainframe Operations"));
    }

    #[test]
    fn test_custom_keyword_set() {
        let filter = RelevanceFilter::new(["Data Science", ""]);
        assert_eq!(filter.keywords(), &["data science".to_string()]);
        assert!(filter.is_relevant("Applied DATA SCIENCE"));
        assert!(!filter.is_relevant("วิศวกรรมคอมพิวเตอร์"));
    }
}
