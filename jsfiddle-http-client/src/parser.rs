//! Embed page parsing

use crate::request::Fiddle;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

/// A source pane of a fiddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pane {
    Js,
    Html,
    Css,
}

/// Which `<pre>` block (in document order) holds which pane
///
/// The embed page carries no labels on its blocks, so this table is the whole
/// contract with the remote layout.
pub(crate) const PANE_ORDER: [(usize, Pane); 3] = [(0, Pane::Js), (1, Pane::Html), (2, Pane::Css)];

const PANE_SELECTOR: &str = "pre";
const RESOURCE_SELECTOR: &str = ".resources li a[href]";

/// Parser for embed pages with cached selectors
#[derive(Clone, Debug, Default)]
pub(crate) struct EmbedParser {
    pane_selector: OnceLock<Selector>,
    resource_selector: OnceLock<Selector>,
}

impl EmbedParser {
    /// Create a new parser with uninitialized caches
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or compile the pane selector
    fn pane_selector(&self) -> &Selector {
        self.pane_selector
            .get_or_init(|| Selector::parse(PANE_SELECTOR).expect("pane selector is valid"))
    }

    /// Get or compile the resource link selector
    fn resource_selector(&self) -> &Selector {
        self.resource_selector.get_or_init(|| {
            Selector::parse(RESOURCE_SELECTOR).expect("resource selector is valid")
        })
    }

    /// Extract panes and resources from an embed page
    ///
    /// Missing panes come back as empty strings.
    pub fn parse_embed_page(&self, html: &str) -> Fiddle {
        let document = Html::parse_document(html);

        let blocks: Vec<ElementRef<'_>> = document.select(self.pane_selector()).collect();
        let mut fiddle = Fiddle::default();
        for (index, pane) in PANE_ORDER {
            let text = blocks
                .get(index)
                .map(|block| block.text().collect::<String>())
                .unwrap_or_default();
            match pane {
                Pane::Js => fiddle.js = text,
                Pane::Html => fiddle.html = text,
                Pane::Css => fiddle.css = text,
            }
        }

        fiddle.resources = document
            .select(self.resource_selector())
            .filter_map(|anchor| anchor.value().attr("href"))
            .map(str::to_string)
            .collect();

        fiddle
    }
}
