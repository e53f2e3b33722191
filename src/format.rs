//! Text rendering of extracted rooms for the chat consumer.

use crate::models::{Envelope, Price, RoomOffer};

pub const HEADER: &str = "Productos:";
pub const NO_AVAILABILITY: &str = "No hay disponibilidad para las fechas seleccionadas.";

/// Mexican peso amount, e.g. `$4,000.00`
pub fn format_mxn(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let (whole, fraction) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, fraction)
}

pub fn format_price(price: &Price) -> String {
    price.amount().map(format_mxn).unwrap_or_else(|| "N/A".to_string())
}

/// One numbered line per offer, `index` starting at 1
pub fn format_offer_line(index: usize, offer: &RoomOffer) -> String {
    let mut line = format!("{}. {}", index, offer.name);
    if let Some(label) = &offer.rate_label {
        line.push_str(&format!(" | Tipo: {}", label));
    }
    line.push_str(&format!(" | {} disp.", offer.available));
    line.push_str(&format!(
        " | Total: {} | Por noche: {}",
        format_price(&offer.total),
        format_price(&offer.nightly)
    ));
    line
}

pub fn format_rooms(offers: &[RoomOffer]) -> String {
    let mut lines = vec![HEADER.to_string()];
    if offers.is_empty() {
        lines.push(NO_AVAILABILITY.to_string());
    } else {
        lines.extend(
            offers
                .iter()
                .enumerate()
                .map(|(i, offer)| format_offer_line(i + 1, offer)),
        );
    }
    lines.join("\n")
}

pub fn rooms_envelope(offers: &[RoomOffer]) -> Envelope {
    Envelope::to_user(format_rooms(offers))
}
