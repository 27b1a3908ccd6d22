use serde::{Deserialize, Serialize};

/// The fixed set of helper kinds the chooser offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HelperCategory {
    WebBrowser,
    MailReader,
    TerminalEmulator,
}

pub const ALL_HELPER_CATEGORIES: [HelperCategory; 3] = [
    HelperCategory::WebBrowser,
    HelperCategory::MailReader,
    HelperCategory::TerminalEmulator,
];

impl HelperCategory {
    pub fn id(self) -> &'static str {
        match self {
            HelperCategory::WebBrowser => "WebBrowser",
            HelperCategory::MailReader => "MailReader",
            HelperCategory::TerminalEmulator => "TerminalEmulator",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        ALL_HELPER_CATEGORIES
            .into_iter()
            .find(|category| category.id() == raw.trim())
    }

    pub fn title(self) -> &'static str {
        match self {
            HelperCategory::WebBrowser => "Default Web Browser",
            HelperCategory::MailReader => "Default Mail Reader",
            HelperCategory::TerminalEmulator => "Default Terminal Emulator",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            HelperCategory::WebBrowser => {
                "The preferred Web Browser will be used to open hyperlinks and display help contents."
            }
            HelperCategory::MailReader => {
                "The preferred Mail Reader will be used to compose emails when you click on email addresses."
            }
            HelperCategory::TerminalEmulator => {
                "The preferred Terminal Emulator will be used to run commands that require a CLI environment."
            }
        }
    }

    pub fn page(self) -> ChooserPage {
        match self {
            HelperCategory::WebBrowser | HelperCategory::MailReader => ChooserPage::Internet,
            HelperCategory::TerminalEmulator => ChooserPage::Utilities,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooserPage {
    Internet,
    Utilities,
}

pub const ALL_CHOOSER_PAGES: [ChooserPage; 2] = [ChooserPage::Internet, ChooserPage::Utilities];

impl ChooserPage {
    pub fn title(self) -> &'static str {
        match self {
            ChooserPage::Internet => "Internet",
            ChooserPage::Utilities => "Utilities",
        }
    }

    pub fn categories(self) -> Vec<HelperCategory> {
        ALL_HELPER_CATEGORIES
            .into_iter()
            .filter(|category| category.page() == self)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_three_categories_split_over_two_pages() {
        assert_eq!(ALL_HELPER_CATEGORIES.len(), 3);
        assert_eq!(
            ChooserPage::Internet.categories(),
            vec![HelperCategory::WebBrowser, HelperCategory::MailReader]
        );
        assert_eq!(
            ChooserPage::Utilities.categories(),
            vec![HelperCategory::TerminalEmulator]
        );
    }

    #[test]
    fn ids_parse_back_to_their_category() {
        for category in ALL_HELPER_CATEGORIES {
            assert_eq!(HelperCategory::parse(category.id()), Some(category));
        }
        assert_eq!(HelperCategory::parse("FileManager"), None);
    }
}
