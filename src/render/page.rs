// Page model the widget renders into.
// Holds the metric slots, loading/error indicators, and project cards, and serializes them to HTML.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::REPO_DISPLAY_MAP;

pub const LOADING_ID: &str = "metrics-loading";
pub const ERROR_ID: &str = "metrics-error";
pub const CARD_CLASS: &str = "project-card";
pub const BADGE_CLASS: &str = "repo-update-badge";

/// Metric slot, addressed on the page by its `data-metric` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKey {
    PublicRepos,
    ActiveRepos,
    Languages,
}

impl MetricKey {
    pub const ALL: [MetricKey; 3] = [
        MetricKey::PublicRepos,
        MetricKey::ActiveRepos,
        MetricKey::Languages,
    ];

    /// Value of the `data-metric` attribute.
    pub fn attr(self) -> &'static str {
        match self {
            MetricKey::PublicRepos => "public-repos",
            MetricKey::ActiveRepos => "active-repos",
            MetricKey::Languages => "languages",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricKey::PublicRepos => "Public repos",
            MetricKey::ActiveRepos => "Active (30d)",
            MetricKey::Languages => "Languages",
        }
    }
}

/// A text node with visibility and a class list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub text: String,
    pub hidden: bool,
    classes: BTreeSet<String>,
}

impl Element {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn new_hidden(text: impl Into<String>) -> Self {
        Self {
            hidden: true,
            ..Self::new(text)
        }
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }
}

/// Project card: a heading with a stable id and an optional update badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub heading_id: String,
    pub title: String,
    pub badge: Option<Element>,
}

/// Render targets of one page. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    metrics: BTreeMap<String, Element>,
    loading: Option<Element>,
    error: Option<Element>,
    cards: Vec<ProjectCard>,
}

impl Page {
    /// Page with no render targets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Full portfolio page: every metric, both indicators, and a badge-carrying
    /// card for each entry of the repo display map.
    pub fn portfolio() -> Self {
        let mut page = Self::new()
            .with_loading_indicator()
            .with_error_indicator();
        for key in MetricKey::ALL {
            page = page.with_metric(key.attr());
        }
        for (repo, heading_id) in REPO_DISPLAY_MAP {
            page = page.with_card(heading_id, repo, true);
        }
        page
    }

    pub fn with_metric(mut self, key: &str) -> Self {
        self.metrics.insert(key.to_string(), Element::new("--"));
        self
    }

    pub fn with_loading_indicator(mut self) -> Self {
        self.loading = Some(Element::new_hidden("Loading live GitHub data..."));
        self
    }

    pub fn with_error_indicator(mut self) -> Self {
        self.error = Some(Element::new_hidden("Live GitHub data is unavailable right now."));
        self
    }

    pub fn with_card(mut self, heading_id: &str, title: &str, with_badge: bool) -> Self {
        self.cards.push(ProjectCard {
            heading_id: heading_id.to_string(),
            title: title.to_string(),
            badge: with_badge.then(Element::default),
        });
        self
    }

    pub fn metric(&self, key: &str) -> Option<&Element> {
        self.metrics.get(key)
    }

    pub fn metric_mut(&mut self, key: &str) -> Option<&mut Element> {
        self.metrics.get_mut(key)
    }

    pub fn loading_indicator(&self) -> Option<&Element> {
        self.loading.as_ref()
    }

    pub fn loading_indicator_mut(&mut self) -> Option<&mut Element> {
        self.loading.as_mut()
    }

    pub fn error_indicator(&self) -> Option<&Element> {
        self.error.as_ref()
    }

    pub fn error_indicator_mut(&mut self) -> Option<&mut Element> {
        self.error.as_mut()
    }

    /// Card whose heading carries `heading_id`.
    pub fn card(&self, heading_id: &str) -> Option<&ProjectCard> {
        self.cards.iter().find(|c| c.heading_id == heading_id)
    }

    /// Update badge inside the card whose heading carries `heading_id`.
    pub fn badge_mut(&mut self, heading_id: &str) -> Option<&mut Element> {
        self.cards
            .iter_mut()
            .find(|c| c.heading_id == heading_id)
            .and_then(|c| c.badge.as_mut())
    }

    pub fn to_html(&self) -> String {
        let mut out = String::from("<section class=\"github-live\">\n");

        if let Some(el) = &self.loading {
            out.push_str(&format!(
                "  <p id=\"{LOADING_ID}\"{}>{}</p>\n",
                hidden_attr(el),
                escape_html(&el.text)
            ));
        }
        if let Some(el) = &self.error {
            out.push_str(&format!(
                "  <p id=\"{ERROR_ID}\"{}>{}</p>\n",
                hidden_attr(el),
                escape_html(&el.text)
            ));
        }

        if !self.metrics.is_empty() {
            out.push_str("  <dl class=\"metrics\">\n");
            for (key, el) in &self.metrics {
                let label = MetricKey::ALL
                    .iter()
                    .find(|k| k.attr() == key.as_str())
                    .map_or(key.as_str(), |k| k.label());
                out.push_str(&format!(
                    "    <div><dt>{}</dt><dd data-metric=\"{}\"{}>{}</dd></div>\n",
                    escape_html(label),
                    escape_html(key),
                    hidden_attr(el),
                    escape_html(&el.text)
                ));
            }
            out.push_str("  </dl>\n");
        }

        for card in &self.cards {
            out.push_str(&format!("  <article class=\"{CARD_CLASS}\">\n"));
            out.push_str(&format!(
                "    <h3 id=\"{}\">{}</h3>\n",
                escape_html(&card.heading_id),
                escape_html(&card.title)
            ));
            if let Some(badge) = &card.badge {
                let mut classes = vec![BADGE_CLASS];
                classes.extend(badge.classes());
                out.push_str(&format!(
                    "    <span class=\"{}\"{}>{}</span>\n",
                    escape_html(&classes.join(" ")),
                    hidden_attr(badge),
                    escape_html(&badge.text)
                ));
            }
            out.push_str("  </article>\n");
        }

        out.push_str("</section>\n");
        out
    }
}

fn hidden_attr(el: &Element) -> &'static str {
    if el.hidden { " hidden" } else { "" }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
