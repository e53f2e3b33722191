use serde::{Serialize, Serializer};

/// Filler age the upstream endpoint expects once per adult
pub const ADULT_FILLER_AGE: u32 = 30;

/// Normalized search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Check-in date as supplied (`YYYY-MM-DD`)
    pub check_in: String,
    /// Check-out date as supplied (`YYYY-MM-DD`)
    pub check_out: String,
    pub adults: u32,
    pub children: u32,
    /// Not cross-checked against `children`
    pub child_ages: Vec<u32>,
}

/// Guest composition for one room, in the shape the search endpoint expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub ad: u32,
    pub ch: u32,
    pub ages: Vec<u32>,
}

/// Amount for a stay, or the "N/A" sentinel when the page had no usable price
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Price {
    Amount(f64),
    Unavailable,
}

impl Price {
    pub fn amount(&self) -> Option<f64> {
        match self {
            Price::Amount(value) => Some(*value),
            Price::Unavailable => None,
        }
    }
}

/// 2^53, the largest range where every integer is an exact `f64`
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Whole amounts are written without a fractional part.
            Price::Amount(value) if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER => {
                serializer.serialize_i64(*value as i64)
            }
            Price::Amount(value) => serializer.serialize_f64(*value),
            Price::Unavailable => serializer.serialize_str("N/A"),
        }
    }
}

/// One room / rate plan extracted from the search results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomOffer {
    #[serde(rename = "habitacion")]
    pub name: String,
    #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
    pub rate_label: Option<String>,
    #[serde(rename = "precio_total")]
    pub total: Price,
    #[serde(rename = "precio_por_noche")]
    pub nightly: Price,
    /// Always positive; rooms without availability are never built
    #[serde(rename = "disponibles", serialize_with = "count_as_string")]
    pub available: u32,
}

fn count_as_string<S: Serializer>(count: &u32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&count.to_string())
}

/// Message envelope consumed by the chat agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

impl Envelope {
    /// Wrap text in a single `to_user` message
    pub fn to_user(content: impl Into<String>) -> Self {
        Self {
            messages: vec![Message {
                kind: "to_user".to_string(),
                content: content.into(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn offer_serializes_sentinels_and_count() {
        let offer = RoomOffer {
            name: "Junior Suite".to_string(),
            rate_label: None,
            total: Price::Unavailable,
            nightly: Price::Unavailable,
            available: 2,
        };

        let value = serde_json::to_value(&offer).unwrap();
        assert_eq!(
            value,
            json!({
                "habitacion": "Junior Suite",
                "precio_total": "N/A",
                "precio_por_noche": "N/A",
                "disponibles": "2"
            })
        );
    }

    #[test]
    fn whole_amounts_serialize_as_integers() {
        let offer = RoomOffer {
            name: "Suite Vista Mar".to_string(),
            rate_label: Some("Solo alojamiento".to_string()),
            total: Price::Amount(4000.0),
            nightly: Price::Amount(1333.33),
            available: 3,
        };

        let text = serde_json::to_string(&offer).unwrap();
        assert!(text.contains(r#""precio_total":4000,"#), "{text}");
        assert!(text.contains(r#""precio_por_noche":1333.33,"#), "{text}");
        assert_eq!(serde_json::to_value(&offer).unwrap()["tipo"], "Solo alojamiento");
    }

    #[test]
    fn envelope_has_fixed_shape() {
        let value = serde_json::to_value(Envelope::to_user("hola")).unwrap();
        assert_eq!(
            value,
            json!({ "messages": [ { "type": "to_user", "content": "hola" } ] })
        );
    }
}
