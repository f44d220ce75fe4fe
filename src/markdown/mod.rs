use comrak::Options;

/// Create default comrak options with GitHub Flavored Markdown settings
pub fn create_comrak_options<'a>() -> Options<'a> {
    let mut options = Options::default();

    // Extension options - GitHub Flavored Markdown
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;

    // Tags emit raw HTML that must survive the conversion
    options.render.unsafe_ = true;
    options.render.github_pre_lang = true;

    options.parse.smart = true;

    options
}

/// Render markdown to HTML using comrak
pub fn render_markdown(content: &str, options: &Options<'_>) -> String {
    comrak::markdown_to_html(content, options)
}
