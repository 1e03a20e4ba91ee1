//! HTML views for the home pages.
//!
//! Each page is a plain function producing its body; [`SiteView`] wraps it
//! in the shared layout.

use axum::response::Response;

use crate::home::model::ErrorViewModel;
use crate::http::response::{html_response, ResponseCache};

/// Which page an action chose, with its model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Index,
    Privacy,
    Error(ErrorViewModel),
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Index => "Home Page",
            View::Privacy => "Privacy Policy",
            View::Error(_) => "Error",
        }
    }
}

/// Outcome of a controller action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewResult {
    pub view: View,
    pub cache: Option<ResponseCache>,
}

impl ViewResult {
    pub fn new(view: View) -> Self {
        Self { view, cache: None }
    }

    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }
}

/// Renders views inside the site layout.
#[derive(Debug, Clone)]
pub struct SiteView {
    title: String,
}

impl SiteView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Full HTML document for `view`.
    pub fn render_html(&self, view: &View) -> String {
        let body = match view {
            View::Index => index_body(),
            View::Privacy => privacy_body(),
            View::Error(model) => error_body(model),
        };
        self.layout(view.title(), &body)
    }

    pub fn render(&self, result: ViewResult) -> Response {
        html_response(self.render_html(&result.view), result.cache.as_ref())
    }

    fn layout(&self, page_title: &str, body: &str) -> String {
        let site = escape_html(&self.title);
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{page_title} - {site}</title>
</head>
<body>
    <header>
        <nav>
            <a class="brand" href="/">{site}</a>
            <ul>
                <li><a href="/">Home</a></li>
                <li><a href="/Home/Privacy">Privacy</a></li>
            </ul>
        </nav>
    </header>
    <div class="container">
        <main role="main">
{body}
        </main>
    </div>
    <footer>
        &copy; {site} - <a href="/Home/Privacy">Privacy</a>
    </footer>
</body>
</html>
"#,
            page_title = escape_html(page_title),
        )
    }
}

fn index_body() -> String {
    r#"<div class="text-center">
    <h1 class="display-4">Welcome</h1>
    <p>Every visit to this page writes an error, an information and a warning record to the log.</p>
</div>"#
        .to_string()
}

fn privacy_body() -> String {
    r#"<h1>Privacy Policy</h1>
<p>Use this page to detail your site's privacy policy.</p>"#
        .to_string()
}

fn error_body(model: &ErrorViewModel) -> String {
    let mut body = String::from(
        r#"<h1 class="text-danger">Error.</h1>
<h2 class="text-danger">An error occurred while processing your request.</h2>
"#,
    );

    if let Some(id) = model.request_id.as_deref().filter(|_| model.show_request_id()) {
        body.push_str(&format!(
            "<p>\n    <strong>Request ID:</strong> <code>{}</code>\n</p>\n",
            escape_html(id)
        ));
    }

    body.push_str(
        r#"<h3>Development Mode</h3>
<p>
    Run the server with <strong>RUST_LOG=debug</strong> to see detailed information about the error that occurred.
</p>
<p>
    <strong>Debug logging shouldn't be enabled for deployed applications.</strong>
    It can result in large log volumes and expose request details to anyone reading the logs.
</p>"#,
    );
    body
}

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_carries_title_and_nav() {
        let html = SiteView::new("Demo <Site>").render_html(&View::Privacy);
        assert!(html.contains("<title>Privacy Policy - Demo &lt;Site&gt;</title>"));
        assert!(html.contains(r#"<a href="/Home/Privacy">Privacy</a>"#));
        assert!(html.contains("<h1>Privacy Policy</h1>"));
    }

    #[test]
    fn test_error_page_shows_request_id() {
        let model = ErrorViewModel {
            request_id: Some("00-abc-def-01".into()),
        };
        let html = SiteView::new("Demo").render_html(&View::Error(model));
        assert!(html.contains("An error occurred while processing your request."));
        assert!(html.contains("<code>00-abc-def-01</code>"));
    }

    #[test]
    fn test_error_page_hides_missing_request_id() {
        let html = SiteView::new("Demo").render_html(&View::Error(ErrorViewModel::default()));
        assert!(!html.contains("Request ID:"));
    }

    #[test]
    fn test_request_id_is_escaped() {
        let model = ErrorViewModel {
            request_id: Some("<script>alert('x')</script>".into()),
        };
        let html = SiteView::new("Demo").render_html(&View::Error(model));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn test_index_page() {
        let html = SiteView::new("Demo").render_html(&View::Index);
        assert!(html.contains("<title>Home Page - Demo</title>"));
        assert!(html.contains("Welcome"));
    }
}
