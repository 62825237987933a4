//! Delimited-text encoding for list-valued creature columns.
//!
//! `abilities`, `related_works` and `relations` are stored as a single text
//! column joined by [`LIST_SEPARATOR`]. There is no escaping: an element that
//! itself contains the separator is split apart on the next read.

/// Separator between list elements in a stored column.
pub const LIST_SEPARATOR: &str = ",";

/// Join list elements into the stored column representation.
pub fn encode_list(items: &[String]) -> String {
    items.join(LIST_SEPARATOR)
}

/// Split a stored column back into list elements.
///
/// Each element has embedded line breaks replaced by spaces and surrounding
/// whitespace trimmed. Elements left empty are dropped, so `None` and `""`
/// both decode to an empty list.
pub fn decode_list(stored: Option<&str>) -> Vec<String> {
    let Some(stored) = stored else {
        return Vec::new();
    };

    stored
        .split(LIST_SEPARATOR)
        .map(clean_element)
        .filter(|item| !item.is_empty())
        .collect()
}

fn clean_element(raw: &str) -> String {
    raw.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn encode_joins_with_separator() {
        let items = strings(&["Omniscience", "Immortality", "Time control"]);
        assert_eq!(encode_list(&items), "Omniscience,Immortality,Time control");
    }

    #[test]
    fn encode_empty_list_is_empty_string() {
        assert_eq!(encode_list(&[]), "");
    }

    #[test]
    fn decode_absent_or_empty_is_empty_list() {
        assert!(decode_list(None).is_empty());
        assert!(decode_list(Some("")).is_empty());
        assert!(decode_list(Some("  ")).is_empty());
    }

    #[test]
    fn decode_trims_and_strips_newlines() {
        let decoded = decode_list(Some(" Dagon ,Hydra\n,\r\nCthulhu"));
        assert_eq!(decoded, strings(&["Dagon", "Hydra", "Cthulhu"]));
    }

    #[test]
    fn decode_replaces_inner_newline_with_space() {
        let decoded = decode_list(Some("The Shadow over\nInnsmouth"));
        assert_eq!(decoded, strings(&["The Shadow over Innsmouth"]));
    }

    #[test]
    fn decode_is_left_inverse_of_encode() {
        let cases = [
            strings(&[]),
            strings(&["Azathoth"]),
            strings(&["The Dunwich Horror", "Night at the Museum"]),
            strings(&["Йог-Сотот", "Шуб-Ниггурат", "Глубоководные"]),
        ];
        for items in cases {
            assert_eq!(decode_list(Some(encode_list(&items).as_str())), items);
        }
    }

    #[test]
    fn element_containing_separator_is_split_on_read() {
        let items = strings(&["fire, ice"]);
        assert_eq!(
            decode_list(Some(encode_list(&items).as_str())),
            strings(&["fire", "ice"])
        );
    }
}
