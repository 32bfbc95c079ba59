//! Text sanitization for the base-14 PDF fonts.

/// Glyph printed in place of characters the renderer cannot encode.
pub const SUBSTITUTE: char = '?';

const REPLACEMENTS: &[(char, &str)] = &[
    ('+', "plus "),
    ('\u{FF0B}', "plus "),
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
    ('\u{2026}', "..."),
];

/// Makes `text` printable with an ASCII-only font.
///
/// Plus signs become `"plus "`, en and em dashes become `-`, the ellipsis glyph
/// becomes `...`, and every remaining non-ASCII or control character (other
/// than newlines and tabs) becomes [`SUBSTITUTE`].  The output contains none of
/// the replaced characters, so sanitizing twice changes nothing.
pub fn sanitize_for_pdf(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for ch in text.chars() {
        if let Some((_, replacement)) = REPLACEMENTS.iter().find(|(from, _)| *from == ch) {
            output.push_str(replacement);
        } else if ch.is_ascii() && (!ch.is_ascii_control() || ch == '\n' || ch == '\t') {
            output.push(ch);
        } else {
            output.push(SUBSTITUTE);
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_punctuation_look_alikes() {
        assert_eq!(sanitize_for_pdf("C++"), "Cplus plus ");
        assert_eq!(sanitize_for_pdf("2019\u{2013}2021"), "2019-2021");
        assert_eq!(sanitize_for_pdf("a\u{2014}b"), "a-b");
        assert_eq!(sanitize_for_pdf("wait\u{2026}"), "wait...");
    }

    #[test]
    fn replaces_unsupported_characters() {
        assert_eq!(sanitize_for_pdf("東京 office"), "?? office");
        assert_eq!(sanitize_for_pdf("caf\u{e9}"), "caf?");
        assert_eq!(sanitize_for_pdf("bell\u{7}"), "bell?");
        assert_eq!(sanitize_for_pdf("line\nbreak"), "line\nbreak");
        assert_eq!(sanitize_for_pdf(""), "");
    }

    #[test]
    fn sanitizing_is_idempotent() {
        for input in [
            "C++ and C#",
            "東京都渋谷区 1\u{2013}2\u{2013}3",
            "Ellipsis\u{2026} and \u{FF0B}",
            "plain ascii text",
            "???",
        ] {
            let once = sanitize_for_pdf(input);
            assert_eq!(sanitize_for_pdf(&once), once, "input: {input}");
        }
    }
}
