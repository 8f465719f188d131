/// HTML elements the assistant may emit in formatted messages.
pub const ALLOWED_HTML_ELEMENTS: &[&str] = &[
    "a", "b", "blockquote", "br", "code", "dd", "del", "details", "div", "dl", "dt", "em",
    "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i", "ins", "kbd", "li", "ol", "p", "pre",
    "q", "rp", "rt", "ruby", "s", "samp", "source", "span", "strike", "strong", "sub",
    "summary", "sup", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul", "var",
];

/// Renders element names as `<a>, <b>, ...` in list order.
#[must_use]
pub fn render_allowed_elements<S: AsRef<str>>(elements: &[S]) -> String {
    elements
        .iter()
        .map(|tag| format!("<{}>", tag.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}
