use pulldown_cmark::{Parser, html};

/// Render polished markdown to the HTML stored in a card field.
///
/// Plain CommonMark, no extensions. Anki itself resolves the `[latex]`
/// envelopes and media references embedded in the output.
pub fn to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}
