use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Meta report for decks playing a given card, from recent completed tournaments",
    long_about = "Scrapes completed Standard-format tournaments from the last four weeks, \
keeps decklists containing the given card, and writes a win-rate-ranked report grouped \
by archetype to card_meta_report.html in the working directory, opening it on success."
)]
pub struct Cli {
    /// Card name to search for (case-insensitive substring match)
    #[arg(short, long)]
    pub card: String,
}
