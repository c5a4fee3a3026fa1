use crate::constants::{TAB_FILTER_NO_STUDENT, TAB_FILTER_ONLY_STUDENT};
use serde::{Deserialize, Serialize};

/// Student-visibility discriminator appended to a tab's subkey.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabUserFilter {
    NoStudent,
    OnlyStudent,
}

impl TabUserFilter {
    #[inline]
    pub fn suffix(&self) -> &'static str {
        match self {
            TabUserFilter::NoStudent => TAB_FILTER_NO_STUDENT,
            TabUserFilter::OnlyStudent => TAB_FILTER_ONLY_STUDENT,
        }
    }

    /// Recover the filter carried by a stored tab subkey, if any.
    pub fn from_subkey(subkey: &str) -> Option<Self> {
        if subkey.contains(TAB_FILTER_NO_STUDENT) {
            Some(TabUserFilter::NoStudent)
        } else if subkey.contains(TAB_FILTER_ONLY_STUDENT) {
            Some(TabUserFilter::OnlyStudent)
        } else {
            None
        }
    }
}
