use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;

/// Extract per-player decklist links from a standings page,
/// deduplicated while preserving encounter order.
pub fn extract_deck_links(html: &Html, base_url: &str) -> Vec<String> {
    let selector = Selector::parse("a[href*='/decklist']").unwrap();
    let decklist_regex = Regex::new(r"/tournament/[^/]+/player/[^/]+/decklist")
        .expect("Failed to compile decklist regex");

    let mut links = Vec::new();
    let mut seen = HashSet::new();

    for element in html.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(found) = decklist_regex.find(href) else {
            continue;
        };

        let url = format!("{}{}", base_url, found.as_str());
        if seen.insert(url.clone()) {
            links.push(url);
        }
    }

    links
}

/// Player display name recovered from the decklist URL slug
pub fn player_name_from_url(url: &str) -> String {
    let slug_regex =
        Regex::new(r"/player/([^/]+)/decklist").expect("Failed to compile player slug regex");

    let Some(captures) = slug_regex.captures(url) else {
        return String::new();
    };

    title_case(&captures[1].replace('-', " "))
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
