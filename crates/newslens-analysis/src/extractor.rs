//! Article download and HTML text extraction.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, Url};
use scraper::{ElementRef, Html, Selector};

use crate::error::AnalysisError;

/// Title and body text pulled out of an article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArticle {
    pub title: String,
    pub text: String,
}

#[async_trait]
pub trait ArticleExtractor: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AnalysisError::Extraction`] for any download or parse failure.
    async fn extract(&self, url: &str) -> Result<ExtractedArticle, AnalysisError>;
}

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static OG_TITLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:title"]"#).expect("valid og:title selector")
});
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid title selector"));
static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").expect("valid h1 selector"));
static ARTICLE_PARAGRAPHS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article p").expect("valid article selector"));
static PARAGRAPHS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid paragraph selector"));

/// Downloads a page with `reqwest` and extracts it with [`parse_article`].
#[derive(Debug, Clone)]
pub struct HtmlArticleExtractor {
    client: Client,
}

impl HtmlArticleExtractor {
    /// # Errors
    ///
    /// Returns [`AnalysisError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(user_agent: &str) -> Result<Self, AnalysisError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ArticleExtractor for HtmlArticleExtractor {
    async fn extract(&self, url: &str) -> Result<ExtractedArticle, AnalysisError> {
        let fail = |reason: String| AnalysisError::Extraction {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fail(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fail(format!("page returned status {}", status.as_u16())));
        }

        // Final URL after redirects; readability resolves relative links against it.
        let page_url = response.url().clone();
        let html = response.text().await.map_err(|e| fail(e.to_string()))?;
        let article = parse_article(&html, &page_url)
            .ok_or_else(|| fail("no article text found".to_string()))?;

        tracing::debug!(
            url = %url,
            title = %article.title,
            chars = article.text.len(),
            "article extracted"
        );
        Ok(article)
    }
}

/// Extract a title and main body from an HTML document.
///
/// The body comes from readability's boilerplate removal, split into
/// paragraphs. When readability yields nothing, [`parse_with_selectors`]
/// is used instead. Title preference: `og:title`, then the document title,
/// then the first `<h1>`. Returns `None` when no body text is found.
#[must_use]
pub fn parse_article(html: &str, url: &Url) -> Option<ExtractedArticle> {
    let Some((readable_title, text)) = readable_body(html, url) else {
        return parse_with_selectors(html);
    };

    let doc = Html::parse_document(html);
    let title = og_title(&doc)
        .or_else(|| Some(clean_text(&readable_title)).filter(|t| !t.is_empty()))
        .or_else(|| first_text(&doc, &TITLE))
        .or_else(|| first_text(&doc, &H1))
        .unwrap_or_default();

    Some(ExtractedArticle { title, text })
}

/// Selector heuristic: paragraphs inside `<article>` when present,
/// otherwise every `<p>`.
#[must_use]
pub fn parse_with_selectors(html: &str) -> Option<ExtractedArticle> {
    let doc = Html::parse_document(html);

    let title = og_title(&doc)
        .or_else(|| first_text(&doc, &TITLE))
        .or_else(|| first_text(&doc, &H1))
        .unwrap_or_default();

    let mut paragraphs = collect_paragraphs(&doc, &ARTICLE_PARAGRAPHS);
    if paragraphs.is_empty() {
        paragraphs = collect_paragraphs(&doc, &PARAGRAPHS);
    }
    if paragraphs.is_empty() {
        return None;
    }

    Some(ExtractedArticle {
        title,
        text: paragraphs.join("\n\n"),
    })
}

/// Readability title and paragraph text, or `None` when nothing readable remains.
fn readable_body(html: &str, url: &Url) -> Option<(String, String)> {
    let product = match readability::extractor::extract(&mut html.as_bytes(), url) {
        Ok(product) => product,
        Err(e) => {
            tracing::debug!(url = %url, error = ?e, "readability extraction failed");
            return None;
        }
    };

    let content = Html::parse_fragment(&product.content);
    let mut paragraphs = collect_paragraphs(&content, &PARAGRAPHS);
    if paragraphs.is_empty() {
        let text = clean_text(&product.text);
        if !text.is_empty() {
            paragraphs.push(text);
        }
    }
    if paragraphs.is_empty() {
        return None;
    }

    Some((product.title, paragraphs.join("\n\n")))
}

fn og_title(doc: &Html) -> Option<String> {
    doc.select(&OG_TITLE)
        .find_map(|el| el.value().attr("content").map(clean_text))
        .filter(|t| !t.is_empty())
}

fn first_text(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .map(element_text)
        .find(|t| !t.is_empty())
}

fn collect_paragraphs(doc: &Html, selector: &Selector) -> Vec<String> {
    doc.select(selector)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect()
}

fn element_text(el: ElementRef<'_>) -> String {
    clean_text(&el.text().collect::<String>())
}

fn clean_text(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://news.example/2025/03/harbour").unwrap()
    }

    const NEWS_PAGE: &str = r#"
        <html>
          <head>
            <title>Coastal Daily | Harbour expansion approved</title>
            <meta property="og:title" content="Harbour expansion approved">
          </head>
          <body>
            <div id="cookie-notice" class="cookie-banner">
              <p>We use cookies to personalise content, and by continuing you accept this.</p>
            </div>
            <nav class="menu">
              <ul><li><a href="/">Home</a></li><li><a href="/world">World</a></li></ul>
            </nav>
            <div class="article-body">
              <p>The city council approved the harbour expansion on Monday, ending a debate that has run for almost a decade, and construction is due to begin in the spring.</p>
              <p>Supporters say the project will create hundreds of jobs, while opponents worry about traffic, noise, and the effect on the local fishing fleet.</p>
              <p>The port authority said funding is already in place, and that the first phase should be finished within three years of breaking ground.</p>
            </div>
            <footer id="footer" class="footer">
              <p>Copyright 2025 Coastal Media Group. All rights reserved, including syndication.</p>
            </footer>
          </body>
        </html>"#;

    #[test]
    fn readability_keeps_story_and_drops_boilerplate() {
        let article = parse_article(NEWS_PAGE, &page_url()).expect("article");

        assert_eq!(article.title, "Harbour expansion approved");
        assert!(article.text.contains("approved the harbour expansion on Monday"));
        assert!(article.text.contains("first phase should be finished"));
        assert!(!article.text.contains("cookies"), "text was: {}", article.text);
        assert!(!article.text.contains("Copyright"), "text was: {}", article.text);
    }

    #[test]
    fn readability_body_is_split_into_paragraphs() {
        let article = parse_article(NEWS_PAGE, &page_url()).expect("article");
        assert_eq!(article.text.split("\n\n").count(), 3);
    }

    #[test]
    fn empty_page_yields_none() {
        assert!(parse_article("<html><head></head><body></body></html>", &page_url()).is_none());
    }

    #[test]
    fn selectors_prefer_og_title_and_article_paragraphs() {
        let html = r#"
            <html>
              <head>
                <title>Site | Headline</title>
                <meta property="og:title" content="Headline">
              </head>
              <body>
                <nav><p>Subscribe now</p></nav>
                <article>
                  <h1>Headline</h1>
                  <p>First   paragraph
                     of the story.</p>
                  <p>Second paragraph.</p>
                </article>
              </body>
            </html>"#;

        let article = parse_with_selectors(html).expect("article");
        assert_eq!(article.title, "Headline");
        assert_eq!(article.text, "First paragraph of the story.\n\nSecond paragraph.");
    }

    #[test]
    fn selectors_fall_back_to_title_tag_and_all_paragraphs() {
        let html = "<html><head><title> Plain page </title></head>\
                    <body><p>Only paragraph.</p></body></html>";

        let article = parse_with_selectors(html).expect("article");
        assert_eq!(article.title, "Plain page");
        assert_eq!(article.text, "Only paragraph.");
    }

    #[test]
    fn selectors_fall_back_to_h1_when_no_title() {
        let html = "<body><h1>Breaking</h1><p>Body text.</p></body>";
        let article = parse_with_selectors(html).expect("article");
        assert_eq!(article.title, "Breaking");
    }

    #[test]
    fn selectors_without_paragraphs_yield_none() {
        assert!(parse_with_selectors(
            "<html><head><title>x</title></head><body><div>hi</div></body></html>"
        )
        .is_none());
    }

    #[test]
    fn selectors_skip_empty_paragraphs() {
        let html = "<body><p>   </p><p>Real text.</p></body>";
        let article = parse_with_selectors(html).expect("article");
        assert_eq!(article.text, "Real text.");
    }
}
