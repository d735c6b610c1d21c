/// Escapes the characters the gateway chokes on in a title.
///
/// `&` goes first so the entities produced by later replacements survive.
pub fn encode_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('\'', "&#39;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('(', "&#40;")
        .replace(')', "&#41;")
}
