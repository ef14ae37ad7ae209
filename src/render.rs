use lazy_static::lazy_static;
use regex::Regex;

/// Light markdown-to-HTML substitution used when showing generated text:
/// `**bold**`, `#`/`##`/`###` headings at line start, and newlines (LF or
/// CRLF) as `<br>`.
/// Content is passed through otherwise unchanged (no escaping).
pub fn markdown_to_html(content: &str) -> String {
    lazy_static! {
        static ref BOLD: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
        static ref H1: Regex = Regex::new(r"(?m)^# (.*)$").unwrap();
        static ref H2: Regex = Regex::new(r"(?m)^## (.*)$").unwrap();
        static ref H3: Regex = Regex::new(r"(?m)^### (.*)$").unwrap();
    }

    let content = content.replace("\r\n", "\n");
    let out = BOLD.replace_all(&content, "<strong>$1</strong>");
    let out = H1.replace_all(&out, "<h1>$1</h1>");
    let out = H2.replace_all(&out, "<h2>$1</h2>");
    let out = H3.replace_all(&out, "<h3>$1</h3>");
    out.replace('\n', "<br>")
}
