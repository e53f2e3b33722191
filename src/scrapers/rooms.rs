use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::models::{Price, RoomOffer};

const ROOM: &str = ".room";

// Each field is read from the first rule that yields a non-empty value.
const NAME_RULES: &[&str] = &[".room-header-name h2", ".room-header-name h3"];
const RATE_LABEL_RULES: &[&str] = &[
    ".rates .rate-name",
    ".rates .name",
    ".rate-name",
    ".board",
    ".rate-title",
];
const PRICE_RULES: &[&str] = &[".rates .line[data-amount]", "[data-amount]"];
const AVAILABILITY_RULES: &[&str] = &[
    ".rates .remaining_rooms span",
    ".remaining_rooms span",
    ".availability .remaining span",
];

const PRICE_ATTR: &str = "data-amount";

struct RoomSelectors {
    room: Selector,
    name: Vec<Selector>,
    rate_label: Vec<Selector>,
    price: Vec<Selector>,
    availability: Vec<Selector>,
}

impl RoomSelectors {
    fn get() -> &'static RoomSelectors {
        static SELECTORS: OnceLock<RoomSelectors> = OnceLock::new();
        SELECTORS.get_or_init(|| RoomSelectors {
            room: parse_selector(ROOM),
            name: NAME_RULES.iter().map(|s| parse_selector(s)).collect(),
            rate_label: RATE_LABEL_RULES.iter().map(|s| parse_selector(s)).collect(),
            price: PRICE_RULES.iter().map(|s| parse_selector(s)).collect(),
            availability: AVAILABILITY_RULES.iter().map(|s| parse_selector(s)).collect(),
        })
    }
}

fn parse_selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e:?}"))
}

/// Extract bookable rooms from a search results page, in document order.
///
/// Rooms whose availability is missing or zero are left out. A page without
/// any room block yields an empty list.
pub fn parse_rooms(html: &str, nights: i64) -> Vec<RoomOffer> {
    let document = Html::parse_document(html);
    let selectors = RoomSelectors::get();

    let mut offers = Vec::new();
    for (idx, room) in document.select(&selectors.room).enumerate() {
        match parse_room(room, selectors, nights) {
            Some(offer) => offers.push(offer),
            None => debug!("Skipped room block {} without availability", idx),
        }
    }

    debug!("Extracted {} rooms with availability", offers.len());
    offers
}

fn parse_room(room: ElementRef, selectors: &RoomSelectors, nights: i64) -> Option<RoomOffer> {
    let available = first_text(room, &selectors.availability)
        .map(|text| parse_count(&text))
        .unwrap_or(0);
    if available == 0 {
        return None;
    }

    let name = first_text(room, &selectors.name).unwrap_or_else(|| "N/A".to_string());
    let rate_label = first_text(room, &selectors.rate_label);

    let (total, nightly) = match first_attr(room, &selectors.price, PRICE_ATTR).and_then(parse_amount) {
        Some(total) if nights > 0 => (Price::Amount(total), Price::Amount(round_cents(total / nights as f64))),
        _ => (Price::Unavailable, Price::Unavailable),
    };

    Some(RoomOffer {
        name,
        rate_label,
        total,
        nightly,
        available,
    })
}

/// Trimmed text of the first element matched by the first rule with non-empty text
fn first_text(room: ElementRef, rules: &[Selector]) -> Option<String> {
    rules.iter().find_map(|rule| {
        let element = room.select(rule).next()?;
        let text = element.text().collect::<String>();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    })
}

fn first_attr<'a>(room: ElementRef<'a>, rules: &[Selector], attr: &str) -> Option<&'a str> {
    rules.iter().find_map(|rule| {
        room.select(rule)
            .next()
            .and_then(|element| element.value().attr(attr))
            .filter(|value| !value.is_empty())
    })
}

/// Digits of `text` as a count; no digits counts as zero, overflow saturates
fn parse_count(text: &str) -> u32 {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.parse::<u32>() {
        Ok(count) => count,
        Err(_) if digits.is_empty() => 0,
        Err(_) => u32::MAX,
    }
}

/// Leading decimal number of an amount attribute, accepting a decimal comma
fn parse_amount(raw: &str) -> Option<f64> {
    static LEADING_NUMBER: OnceLock<Regex> = OnceLock::new();
    let leading = LEADING_NUMBER.get_or_init(|| {
        Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("valid number regex")
    });

    let normalized = raw.trim().replacen(',', ".", 1);
    leading
        .find(&normalized)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(rooms: &str) -> String {
        format!("<html><body><div id=\"results\">{}</div></body></html>", rooms)
    }

    #[test]
    fn extracts_room_with_price_and_availability() {
        let html = page(
            r#"<div class="room">
                <div class="room-header-name"><h2> Suite Vista Mar </h2></div>
                <div class="rates">
                    <div class="line" data-amount="4000.00">
                        <span class="rate-name">Solo alojamiento</span>
                    </div>
                    <div class="remaining_rooms"><span>3 disponibles</span></div>
                </div>
            </div>"#,
        );

        let rooms = parse_rooms(&html, 2);
        assert_eq!(
            rooms,
            vec![RoomOffer {
                name: "Suite Vista Mar".to_string(),
                rate_label: Some("Solo alojamiento".to_string()),
                total: Price::Amount(4000.0),
                nightly: Price::Amount(2000.0),
                available: 3,
            }]
        );
    }

    #[test]
    fn falls_back_to_h3_name_and_loose_price() {
        let html = page(
            r#"<div class="room">
                <div class="room-header-name"><h2>  </h2><h3>Doble Estándar</h3></div>
                <span class="price" data-amount="1234,5"></span>
                <div class="availability"><p class="remaining"><span>¡Quedan 2!</span></p></div>
            </div>"#,
        );

        let rooms = parse_rooms(&html, 3);
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].name, "Doble Estándar");
        assert_eq!(rooms[0].rate_label, None);
        assert_eq!(rooms[0].total, Price::Amount(1234.5));
        assert_eq!(rooms[0].nightly, Price::Amount(411.5));
        assert_eq!(rooms[0].available, 2);
    }

    #[test]
    fn rate_label_tries_rules_in_order() {
        let html = page(
            r#"<div class="room">
                <div class="board">Todo incluido</div>
                <div class="rate-title">Tarifa flexible</div>
                <div class="remaining_rooms"><span>1</span></div>
            </div>
            <div class="room">
                <div class="rate-title">Tarifa no reembolsable</div>
                <div class="remaining_rooms"><span>1</span></div>
            </div>"#,
        );

        let rooms = parse_rooms(&html, 1);
        assert_eq!(rooms[0].rate_label.as_deref(), Some("Todo incluido"));
        assert_eq!(rooms[1].rate_label.as_deref(), Some("Tarifa no reembolsable"));
    }

    #[test]
    fn missing_name_and_price_use_sentinels() {
        let html = page(r#"<div class="room"><div class="remaining_rooms"><span>4</span></div></div>"#);

        let rooms = parse_rooms(&html, 2);
        assert_eq!(rooms[0].name, "N/A");
        assert_eq!(rooms[0].total, Price::Unavailable);
        assert_eq!(rooms[0].nightly, Price::Unavailable);
    }

    #[test]
    fn unparseable_price_uses_sentinels() {
        let html = page(
            r#"<div class="room">
                <div class="room-header-name"><h2>Suite</h2></div>
                <div class="rates"><div class="line" data-amount="consultar"></div></div>
                <div class="remaining_rooms"><span>1</span></div>
            </div>"#,
        );

        let rooms = parse_rooms(&html, 2);
        assert_eq!(rooms[0].total, Price::Unavailable);
        assert_eq!(rooms[0].nightly, Price::Unavailable);
    }

    #[test]
    fn non_positive_nights_hide_prices() {
        let html = page(
            r#"<div class="room">
                <div data-amount="900"></div>
                <div class="remaining_rooms"><span>1</span></div>
            </div>"#,
        );

        assert_eq!(parse_rooms(&html, 0)[0].total, Price::Unavailable);
        assert_eq!(parse_rooms(&html, -1)[0].nightly, Price::Unavailable);
    }

    #[test]
    fn nightly_price_rounds_to_cents() {
        let html = page(
            r#"<div class="room">
                <div data-amount="1000"></div>
                <div class="remaining_rooms"><span>1</span></div>
            </div>"#,
        );

        assert_eq!(parse_rooms(&html, 3)[0].nightly, Price::Amount(333.33));
    }

    #[test]
    fn rooms_without_availability_are_dropped() {
        let html = page(
            r#"<div class="room"><div class="room-header-name"><h2>Agotada</h2></div>
                <div class="remaining_rooms"><span>0 disponibles</span></div></div>
              <div class="room"><div class="room-header-name"><h2>Sin dato</h2></div></div>
              <div class="room"><div class="room-header-name"><h2>Texto</h2></div>
                <div class="remaining_rooms"><span>últimas</span></div></div>
              <div class="room"><div class="room-header-name"><h2>Libre</h2></div>
                <div class="remaining_rooms"><span>5</span></div></div>"#,
        );

        let rooms = parse_rooms(&html, 2);
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].name, "Libre");
        assert!(rooms.iter().all(|room| room.available > 0));
    }

    #[test]
    fn huge_counts_are_kept() {
        let html = page(
            r#"<div class="room"><div class="room-header-name"><h2>Bloque</h2></div>
                <div class="remaining_rooms"><span>5000000000</span></div></div>"#,
        );

        let rooms = parse_rooms(&html, 1);
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].available, u32::MAX);
        assert_eq!(parse_count("000"), 0);
        assert_eq!(parse_count("sin cupo"), 0);
    }

    #[test]
    fn keeps_document_order() {
        let html = page(
            r#"<div class="room"><div class="room-header-name"><h2>B</h2></div>
                <div class="remaining_rooms"><span>1</span></div></div>
              <div class="room"><div class="room-header-name"><h2>A</h2></div>
                <div class="remaining_rooms"><span>1</span></div></div>"#,
        );

        let names: Vec<_> = parse_rooms(&html, 1).into_iter().map(|room| room.name).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn page_without_rooms_is_empty() {
        assert!(parse_rooms("<html><body><p>Sin resultados</p></body></html>", 2).is_empty());
        assert!(parse_rooms("", 2).is_empty());
        assert!(parse_rooms("{\"not\": \"html\"}", 2).is_empty());
    }

    #[test]
    fn amount_parsing_is_lenient() {
        assert_eq!(parse_amount("4000.00"), Some(4000.0));
        assert_eq!(parse_amount("4000,50"), Some(4000.5));
        assert_eq!(parse_amount(" 99.9 MXN"), Some(99.9));
        assert_eq!(parse_amount("MXN 99"), None);
        assert_eq!(parse_amount(""), None);
    }
}
