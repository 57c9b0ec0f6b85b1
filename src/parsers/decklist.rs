use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

/// Tournament record parsed from a decklist page's details row
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeckDetails {
    pub points: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub dropped: bool,
}

/// Archetype label from the deck tile tooltip, "Other" when absent
pub fn extract_archetype(html: &Html) -> String {
    let selector = Selector::parse("div.deck[data-tooltip]").unwrap();

    html.select(&selector)
        .next()
        .and_then(|element| element.value().attr("data-tooltip"))
        .map(|tooltip| tooltip.trim().to_string())
        .filter(|tooltip| !tooltip.is_empty())
        .unwrap_or_else(|| "Other".to_string())
}

/// Points, record and drop flag from the details row.
/// A page without one degrades to an all-zero record.
pub fn extract_details(html: &Html) -> DeckDetails {
    let selector = Selector::parse("div.details").unwrap();

    match html.select(&selector).next() {
        Some(element) => parse_details_text(&element.text().collect::<String>()),
        None => DeckDetails::default(),
    }
}

fn parse_details_text(text: &str) -> DeckDetails {
    let points_regex = Regex::new(r"(?i)(\d+)\s*points").expect("Failed to compile points regex");
    let record_regex =
        Regex::new(r"\((\d+)-(\d+)-(\d+)\)").expect("Failed to compile record regex");

    let points = points_regex
        .captures(text)
        .and_then(|captures| captures[1].parse().ok())
        .unwrap_or(0);

    let (wins, losses, ties) = match record_regex.captures(text) {
        Some(captures) => (
            captures[1].parse().unwrap_or(0),
            captures[2].parse().unwrap_or(0),
            captures[3].parse().unwrap_or(0),
        ),
        None => (0, 0, 0),
    };

    DeckDetails {
        points,
        wins,
        losses,
        ties,
        dropped: text.to_lowercase().contains("drop"),
    }
}

/// Card names from a decklist page.
///
/// The site has shipped three markup shapes for the list; each is tried
/// in turn and the first one that yields entries wins:
///   1. a hidden form input whose value is the deck as JSON,
///   2. an inline script assigning the deck text to a template literal,
///   3. the rendered decklist container (anchor texts, then plain lines).
pub fn extract_card_names(html: &Html, raw_page: &str) -> Vec<String> {
    let names = names_from_hidden_json(html);
    if !names.is_empty() {
        return names;
    }

    let names = names_from_script_block(raw_page);
    if !names.is_empty() {
        return names;
    }

    names_from_decklist_block(html)
}

fn names_from_hidden_json(html: &Html) -> Vec<String> {
    let selector = Selector::parse("input[name='input']").unwrap();

    let Some(value) = html
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("value"))
    else {
        return Vec::new();
    };

    let Ok(json) = serde_json::from_str::<Value>(value) else {
        return Vec::new();
    };

    let mut names = Vec::new();
    collect_name_fields(&json, &mut names);
    names
}

fn collect_name_fields(value: &Value, names: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(name)) = map.get("name") {
                names.push(name.clone());
            }
            for nested in map.values() {
                collect_name_fields(nested, names);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_name_fields(item, names);
            }
        }
        _ => {}
    }
}

fn names_from_script_block(raw_page: &str) -> Vec<String> {
    let block_regex = Regex::new(r"(?s)const\s+decklist\s*=\s*`(.*?)`")
        .expect("Failed to compile decklist script regex");

    let Some(captures) = block_regex.captures(raw_page) else {
        return Vec::new();
    };

    non_empty_lines(&captures[1])
}

fn names_from_decklist_block(html: &Html) -> Vec<String> {
    let block_selector = Selector::parse("div.decklist").unwrap();
    let anchor_selector = Selector::parse("a").unwrap();

    let Some(block) = html.select(&block_selector).next() else {
        return Vec::new();
    };

    let anchors: Vec<String> = block
        .select(&anchor_selector)
        .map(|anchor| anchor.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();
    if !anchors.is_empty() {
        return anchors;
    }

    non_empty_lines(&block.text().collect::<String>())
}

fn non_empty_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archetype_from_tooltip() {
        let html = Html::parse_document(
            r#"<html><body><div class="deck" data-tooltip="Charizard ex"></div></body></html>"#,
        );

        assert_eq!(extract_archetype(&html), "Charizard ex");
    }

    #[test]
    fn test_archetype_defaults_to_other() {
        let html = Html::parse_document("<html><body><div class='deck'></div></body></html>");

        assert_eq!(extract_archetype(&html), "Other");
    }

    #[test]
    fn test_details_with_drop_marker() {
        let html = Html::parse_document(
            r#"<html><body><div class="details">6 points (2-3-1) <i>drop</i></div></body></html>"#,
        );

        let details = extract_details(&html);

        assert_eq!(
            details,
            DeckDetails {
                points: 6,
                wins: 2,
                losses: 3,
                ties: 1,
                dropped: true,
            }
        );
    }

    #[test]
    fn test_missing_details_degrade_to_zero_record() {
        let html = Html::parse_document("<html><body><p>bare page</p></body></html>");

        assert_eq!(extract_details(&html), DeckDetails::default());
    }

    #[test]
    fn test_card_names_from_hidden_json_input() {
        let page = r#"<html><body>
            <input name="input" value='{"cards":[{"name":"Charizard ex","count":3},{"name":"Basic Fire Energy","count":10}]}'>
        </body></html>"#;
        let html = Html::parse_document(page);

        let names = extract_card_names(&html, page);

        assert_eq!(names, vec!["Charizard ex", "Basic Fire Energy"]);
    }

    #[test]
    fn test_card_names_from_script_block() {
        let page = "<html><body><script>const decklist = `4 Charizard ex PAF 234\n10 Basic Fire Energy SVE 2`;</script></body></html>";
        let html = Html::parse_document(page);

        let names = extract_card_names(&html, page);

        assert_eq!(
            names,
            vec!["4 Charizard ex PAF 234", "10 Basic Fire Energy SVE 2"]
        );
    }

    #[test]
    fn test_card_names_from_rendered_block_anchors() {
        let page = r#"<html><body><div class="decklist">
            <a href="/card/1">Charizard ex</a>
            <a href="/card/2">Basic Fire Energy</a>
        </div></body></html>"#;
        let html = Html::parse_document(page);

        let names = extract_card_names(&html, page);

        assert_eq!(names, vec!["Charizard ex", "Basic Fire Energy"]);
    }

    #[test]
    fn test_no_decklist_markup_yields_empty_list() {
        let page = "<html><body><p>nothing here</p></body></html>";
        let html = Html::parse_document(page);

        assert!(extract_card_names(&html, page).is_empty());
    }
}
