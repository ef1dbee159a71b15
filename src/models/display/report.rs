//! Full report output

use serde::Serialize;

use crate::allocation::ViewModel;
use crate::route::Route;

/// A built view plus the context needed to render it.
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub time_period: String,

    /// False while showing the snapshot's initial instances only
    pub instances_loaded: bool,

    /// Report page for this view
    pub url: String,

    #[serde(flatten)]
    pub view: ViewModel,

    #[serde(skip)]
    pub help_link: String,

    #[serde(skip)]
    pub help_text: String,
}

impl ReportView {
    pub fn new(time_period: &str, view: ViewModel, instances_loaded: bool) -> Self {
        let url = Route {
            time_period: time_period.to_string(),
            user: view.target_user.as_ref().map(|u| u.user_saml_name.clone()),
        }
        .path();

        Self {
            time_period: time_period.to_string(),
            instances_loaded,
            url,
            view,
            help_link: crate::config::DEFAULT_HELP_LINK.to_string(),
            help_text: crate::config::DEFAULT_HELP_TEXT.to_string(),
        }
    }

    pub fn with_help(mut self, link: &str, text: &str) -> Self {
        self.help_link = link.to_string();
        self.help_text = text.to_string();
        self
    }
}
