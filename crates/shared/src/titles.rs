use anyhow::Result;
use scraper::{Html, Selector};
use std::collections::HashSet;

use crate::models::{RejectReason, RejectedTitle};
use crate::normalize::percent_decode;

const ARTICLE_LINKS: &str = "div.mw-parser-output a[href^='/wiki/']";

const BLOCKED_NAMESPACES: [&str; 6] = [
    "Wikipedia:",
    "Portal:",
    "Template:",
    "Help:",
    "Category:",
    "File:",
];

/// Titles pulled from the listing page, split into usable and rejected
#[derive(Debug, Default)]
pub struct TitleExtraction {
    /// Unique accepted titles, in the order they first appear on the page.
    pub titles: Vec<String>,
    pub rejected: Vec<RejectedTitle>,
}

impl TitleExtraction {
    /// Log how many titles were kept and a bounded sample of the rejects.
    pub fn log_report(&self, limit: usize) {
        tracing::info!(
            "Found {} Featured Articles (after ASCII filter)",
            self.titles.len()
        );
        tracing::info!("Rejected {} titles", self.rejected.len());

        for rejected in self.rejected.iter().take(limit) {
            tracing::info!(" - {} ({})", rejected.title, rejected.reason);
        }
        if self.rejected.len() > limit {
            tracing::info!("... and {} more", self.rejected.len() - limit);
        }
    }
}

/// Decide whether a decoded link target is an article title.
/// The namespace check wins when both apply.
pub fn classify_title(title: &str) -> Option<RejectReason> {
    let namespaced = BLOCKED_NAMESPACES
        .iter()
        .any(|prefix| title.starts_with(prefix))
        || title.contains(':');

    if namespaced {
        Some(RejectReason::Namespace)
    } else if !title.is_ascii() {
        Some(RejectReason::NonAscii)
    } else {
        None
    }
}

/// Collect candidate article titles from the Featured Articles listing markup.
pub fn extract_titles(html: &str) -> Result<TitleExtraction> {
    let selector = Selector::parse(ARTICLE_LINKS)
        .map_err(|e| anyhow::anyhow!("Invalid link selector {}: {:?}", ARTICLE_LINKS, e))?;
    let document = Html::parse_document(html);

    let mut extraction = TitleExtraction::default();
    let mut seen = HashSet::new();

    for link in document.select(&selector) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let raw = href.rsplit("/wiki/").next().unwrap_or(href);
        let title = percent_decode(raw);

        if let Some(reason) = classify_title(&title) {
            extraction.rejected.push(RejectedTitle { title, reason });
            continue;
        }

        if seen.insert(title.clone()) {
            extraction.titles.push(title);
        }
    }

    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|href| format!("<li><a href=\"{}\">link</a></li>\n", href))
            .collect();
        format!(
            "<html><body>\
             <div id=\"nav\"><a href=\"/wiki/Outside_Content\">nav</a></div>\
             <div class=\"mw-parser-output\"><ul>{}</ul></div>\
             </body></html>",
            anchors
        )
    }

    #[test]
    fn namespaced_titles_are_rejected() {
        for title in [
            "Wikipedia:Featured_article_criteria",
            "Portal:History",
            "Template:Featured_list",
            "Help:Contents",
            "Category:Featured_articles",
            "File:Example.jpg",
            "Talk:Something",
            "Star_Wars:_Episode_IV",
        ] {
            assert_eq!(
                classify_title(title),
                Some(RejectReason::Namespace),
                "{}",
                title
            );
        }
    }

    #[test]
    fn non_ascii_titles_are_rejected() {
        assert_eq!(classify_title("Pokémon_Red"), Some(RejectReason::NonAscii));
        assert_eq!(classify_title("Łódź"), Some(RejectReason::NonAscii));
        assert_eq!(classify_title("Jan_Matejko"), None);
    }

    #[test]
    fn namespace_takes_precedence_over_non_ascii() {
        assert_eq!(
            classify_title("Category:Pokémon"),
            Some(RejectReason::Namespace)
        );
    }

    #[test]
    fn extracts_decoded_unique_titles_from_content_only() {
        let html = listing(&[
            "/wiki/Jan_Matejko",
            "/wiki/Ada_Lovelace",
            "/wiki/Jan_Matejko",
            "/wiki/AC%2FDC",
            "/wiki/Pok%C3%A9mon_Red",
            "/wiki/Wikipedia:Featured_articles",
            "https://example.org/page",
            "/w/index.php?title=Foo",
        ]);

        let extraction = extract_titles(&html).unwrap();

        assert_eq!(
            extraction.titles,
            vec!["Jan_Matejko", "Ada_Lovelace", "AC/DC"]
        );
        assert_eq!(
            extraction.rejected,
            vec![
                RejectedTitle {
                    title: "Pokémon_Red".to_string(),
                    reason: RejectReason::NonAscii,
                },
                RejectedTitle {
                    title: "Wikipedia:Featured_articles".to_string(),
                    reason: RejectReason::Namespace,
                },
            ]
        );
    }

    #[test]
    fn empty_listing_yields_no_titles() {
        let extraction = extract_titles("<html><body><p>nothing</p></body></html>").unwrap();
        assert!(extraction.titles.is_empty());
        assert!(extraction.rejected.is_empty());
        extraction.log_report(40);
    }
}
