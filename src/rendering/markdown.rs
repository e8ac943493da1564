use pulldown_cmark::{html, Options, Parser};

/// Render story or poem Markdown to sanitized HTML.
///
/// Supports tables, footnotes, strikethrough and smart punctuation. Raw HTML
/// in the source is passed through `ammonia`, so scripts and event handlers
/// never reach the page.
pub fn render_markdown(raw: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_SMART_PUNCTUATION;

    let parser = Parser::new_ext(raw, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    ammonia::clean(&html_output)
}
