//! A fixed [`PageContext`] standing in for `location`/`document.title`.

use agentdetect_orchestrator::PageContext;

#[derive(Debug, Clone)]
pub struct FakePageContext {
    pub url: String,
    pub title: String,
}

impl FakePageContext {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

impl Default for FakePageContext {
    fn default() -> Self {
        Self::new("https://example.com/quiz", "Example Quiz")
    }
}

impl PageContext for FakePageContext {
    fn page_url(&self) -> String {
        self.url.clone()
    }
    fn page_title(&self) -> String {
        self.title.clone()
    }
}
