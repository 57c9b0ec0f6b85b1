use crate::domain::Tournament;
use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

/// Page count advertised by the listing's pagination element
pub fn max_page(html: &Html) -> usize {
    let selector = Selector::parse("ul.pagination[data-max]").unwrap();

    html.select(&selector)
        .filter_map(|element| element.value().attr("data-max"))
        .filter_map(|raw| raw.parse().ok())
        .next()
        .unwrap_or(1)
}

/// Extract tournament rows from a listing page, deduplicated by id
/// while preserving encounter order.
pub fn extract_tournaments(html: &Html, base_url: &str, format: &str) -> Vec<Tournament> {
    let selector = Selector::parse("a[href*='/tournament/']").unwrap();
    let standings_regex =
        Regex::new(r"/tournament/([^/]+)/standings").expect("Failed to compile standings regex");

    let mut tournaments = Vec::new();
    let mut seen = HashSet::new();

    for element in html.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(captures) = standings_regex.captures(href) else {
            continue;
        };

        let id = captures[1].to_string();
        if !seen.insert(id.clone()) {
            continue;
        }

        tournaments.push(Tournament {
            standings_url: format!("{}/tournament/{}/standings", base_url, id),
            name: link_text(element),
            date: row_date(element),
            format: format.to_string(),
            id,
        });
    }

    tournaments
}

fn link_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Completion date from the surrounding row, when the markup carries one
fn row_date(link: ElementRef) -> Option<NaiveDate> {
    let row = link
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == "tr")?;

    let selector = Selector::parse("time[datetime]").unwrap();
    let datetime = row.select(&selector).next()?.value().attr("datetime")?;

    parse_date_prefix(datetime)
}

fn parse_date_prefix(datetime: &str) -> Option<NaiveDate> {
    let date_part = datetime.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
