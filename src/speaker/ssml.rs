//! Plain text to SSML conversion.

const OPEN: &str = "<speak><amazon:auto-breaths>";
const CLOSE: &str = "</prosody></amazon:auto-breaths></speak>";

/// Wrap `text` in an SSML document that speaks it at `rate`.
///
/// Only `<` and `&` are escaped; those are the characters reserved in SSML
/// text content. `rate` is copied into the `prosody` attribute unchanged.
pub fn to_ssml(text: &str, rate: &str) -> String {
    let mut ssml = String::with_capacity(OPEN.len() + CLOSE.len() + rate.len() + text.len() + 18);
    ssml.push_str(OPEN);
    ssml.push_str("<prosody rate=\"");
    ssml.push_str(rate);
    ssml.push_str("\">");
    for ch in text.chars() {
        match ch {
            '<' => ssml.push_str("&lt;"),
            '&' => ssml.push_str("&amp;"),
            _ => ssml.push(ch),
        }
    }
    ssml.push_str(CLOSE);
    ssml
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn body<'a>(ssml: &'a str, rate: &str) -> &'a str {
        let prefix = format!("{OPEN}<prosody rate=\"{rate}\">");
        ssml.strip_prefix(prefix.as_str())
            .and_then(|rest| rest.strip_suffix(CLOSE))
            .expect("ssml wrapper")
    }

    fn unescape(text: &str) -> String {
        text.replace("&lt;", "<").replace("&amp;", "&")
    }

    #[test]
    fn escapes_lt_and_amp_but_not_gt() {
        assert_eq!(
            to_ssml("a<b&c>d", "medium"),
            "<speak><amazon:auto-breaths><prosody rate=\"medium\">a&lt;b&amp;c>d</prosody></amazon:auto-breaths></speak>"
        );
    }

    #[test]
    fn empty_text_yields_empty_prosody() {
        assert_eq!(
            to_ssml("", "slow"),
            "<speak><amazon:auto-breaths><prosody rate=\"slow\"></prosody></amazon:auto-breaths></speak>"
        );
    }

    #[test]
    fn reserved_only_input_stays_wrapped() {
        let ssml = to_ssml("<<&&", "medium");
        assert_eq!(body(&ssml, "medium"), "&lt;&lt;&amp;&amp;");
        assert_eq!(ssml.matches("<speak>").count(), 1);
        assert_eq!(ssml.matches("</speak>").count(), 1);
    }

    #[test]
    fn unescaping_recovers_the_input() {
        let inputs = [
            "bonjour, comment ça va?",
            "quotes \"and\" 'apostrophes' > stay",
            "&lt; is already an entity",
            "日本語のテキスト & <tags>",
            "",
        ];
        for input in inputs {
            let ssml = to_ssml(input, "medium");
            assert_eq!(unescape(body(&ssml, "medium")), input);
        }
    }

    #[test]
    fn rate_is_not_validated() {
        let ssml = to_ssml("hi", "x-fast\"");
        assert!(ssml.contains("<prosody rate=\"x-fast\"\">hi</prosody>"));
    }
}
