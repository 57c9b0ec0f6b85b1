pub mod decklist;
pub mod listing;
pub mod standings;
