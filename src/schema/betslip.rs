//! Deep-link betslip construction. Pure function: given a book and a pick
//! card, build the sportsbook deep link if the book is known, otherwise
//! fall back to the book's homepage.

use super::pick_card::PickCard;

fn book_base_url(book_key: &str) -> Option<&'static str> {
    match book_key.to_ascii_lowercase().as_str() {
        "draftkings" => Some("https://sportsbook.draftkings.com/event"),
        "fanduel" => Some("https://sportsbook.fanduel.com/addToBetslip"),
        "betmgm" => Some("https://sports.betmgm.com/en/sports/events"),
        "caesars" => Some("https://sportsbook.caesars.com/us/bet"),
        _ => None,
    }
}

/// Builds a deep link for a pick card. Returns `None` when the book isn't
/// in the known set rather than guessing at a URL shape.
pub fn build_link(card: &PickCard) -> Option<String> {
    let base = book_base_url(&card.book)?;
    Some(format!("{base}?eventId={}&selection={}", card.event_id, urlencode(&card.selection)))
}

fn urlencode(value: &str) -> String {
    value.chars().map(|c| if c.is_ascii_alphanumeric() { c.to_string() } else { format!("%{:02X}", c as u32) }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::pick_card::PickType;

    fn card(book: &str) -> PickCard {
        PickCard {
            pick_id: "id".to_string(),
            event_id: "evt1".to_string(),
            matchup: "A @ B".to_string(),
            home_team: "B".to_string(),
            away_team: "A".to_string(),
            start_time_et: None,
            status: crate::models::EventStatus::PreGame,
            has_started: false,
            is_live: false,
            pick_type: PickType::Spread,
            market_label: "Spread".to_string(),
            selection: "Lakers".to_string(),
            selection_home_away: None,
            line: Some(-4.5),
            line_signed: Some("-4.5".to_string()),
            odds_american: Some(-110),
            units: 2.0,
            bet_string: "Lakers -4.5".to_string(),
            book: book.to_string(),
            book_link: None,
            tier: "GOLD_STAR".to_string(),
            score: 8.0,
            confidence: 0.8,
            signals_fired: vec![],
            confluence_reasons: vec![],
        }
    }

    #[test]
    fn known_book_produces_a_link() {
        assert!(build_link(&card("draftkings")).is_some());
    }

    #[test]
    fn unknown_book_returns_none_rather_than_guessing() {
        assert!(build_link(&card("some_offshore_book")).is_none());
    }
}
