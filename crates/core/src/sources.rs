//! Extraction of cited URLs from generated answers.

use url::Url;

/// Scans generated text for well-formed `http`/`https` URLs.
///
/// A URL token ends at whitespace or a closing bracket/parenthesis;
/// trailing sentence punctuation is trimmed. Results are deduplicated in
/// order of first appearance.
pub fn extract_sources(text: &str) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();

    for token in text.split_whitespace() {
        let Some(start) = token
            .find("http://")
            .or_else(|| token.find("https://"))
        else {
            continue;
        };

        let mut candidate = &token[start..];
        if let Some(end) = candidate.find([')', ']', '}']) {
            candidate = &candidate[..end];
        }
        let candidate = candidate.trim_end_matches(['.', ',', ';', ':', '!', '?', '"', '\'', '>']);

        if Url::parse(candidate).is_ok() && !sources.iter().any(|s| s == candidate) {
            sources.push(candidate.to_string());
        }
    }

    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_a_plain_url() {
        let text = "Según el material y https://es.wikipedia.org/wiki/Resistencia se concluye.";
        assert_eq!(
            extract_sources(text),
            vec!["https://es.wikipedia.org/wiki/Resistencia"]
        );
    }

    #[test]
    fn strips_enclosing_punctuation() {
        let text = "Ver (https://example.edu/curso), [http://uni.edu/apunte] y https://example.org/final.";
        assert_eq!(
            extract_sources(text),
            vec![
                "https://example.edu/curso",
                "http://uni.edu/apunte",
                "https://example.org/final"
            ]
        );
    }

    #[test]
    fn deduplicates_preserving_first_appearance() {
        let text = "https://a.edu/x luego https://b.edu/y y de nuevo https://a.edu/x";
        assert_eq!(extract_sources(text), vec!["https://a.edu/x", "https://b.edu/y"]);
    }

    #[test]
    fn ignores_malformed_and_non_http_tokens() {
        let text = "mailto:profe@escuela.edu ftp://viejo.edu https:// y texto plano";
        assert!(extract_sources(text).is_empty());
    }
}
