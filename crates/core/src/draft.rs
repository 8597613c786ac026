//! Interaction draft domain types.
//!
//! The draft is the structured record of one HCP field interaction, assembled
//! incrementally from the agent's tool results. Every field starts absent and
//! is only ever set by the reconciler.

use serde::{Deserialize, Serialize};

/// Operator-reported sentiment of the interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Parse a sentiment string leniently; anything unknown is unset.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(Self::Positive),
            "neutral" => Some(Self::Neutral),
            "negative" => Some(Self::Negative),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        };
        write!(f, "{s}")
    }
}

/// A marketing or clinical material shared during the visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialShared {
    pub name: String,

    /// Material category ("brochure", "clinical_paper", "other", ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A product sample left with the HCP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleDistributed {
    pub product_name: String,
    pub quantity: u32,
}

/// The in-progress structured record of an HCP field interaction.
///
/// All fields are optional/absent until a tool result sets them. The form
/// renderer must tolerate any field being absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hcp_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics_discussed: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub materials_shared: Vec<MaterialShared>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples_distributed: Vec<SampleDistributed>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcomes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
}

impl InteractionDraft {
    /// True if no field has been set yet.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Build a draft from a loosely-typed `data` payload, normalizing the
    /// sloppy shapes the extraction agent is known to emit. Never fails:
    /// anything unusable collapses to the absent state for that field.
    ///
    /// Normalization rules:
    /// - bare-string materials become `{name, type: "other"}`
    /// - `samples_distributed` given as a bare integer becomes one
    ///   "Unknown Product" entry; bare-integer list entries likewise
    /// - `outcomes`/`follow_up` given as arrays are joined with `", "`
    /// - non-list values for list fields collapse to empty lists
    /// - unknown sentiment strings are treated as unset
    pub fn from_value(value: &serde_json::Value) -> Self {
        let Some(obj) = value.as_object() else {
            if !value.is_null() {
                tracing::debug!("Interaction data payload is not an object; ignoring");
            }
            return Self::default();
        };

        Self {
            hcp_name: string_field(obj.get("hcp_name")),
            interaction_type: string_field(obj.get("interaction_type")),
            date: string_field(obj.get("date")),
            time: string_field(obj.get("time")),
            attendees: string_list(obj.get("attendees")),
            topics_discussed: string_list(obj.get("topics_discussed")),
            materials_shared: materials(obj.get("materials_shared")),
            samples_distributed: samples(obj.get("samples_distributed")),
            sentiment: string_field(obj.get("sentiment")).and_then(|s| Sentiment::parse(&s)),
            outcomes: text_or_joined(obj.get("outcomes")),
            follow_up: text_or_joined(obj.get("follow_up")),
        }
    }
}

fn string_field(value: Option<&serde_json::Value>) -> Option<String> {
    value.and_then(|v| v.as_str()).map(str::to_string)
}

fn string_list(value: Option<&serde_json::Value>) -> Vec<String> {
    match value.and_then(|v| v.as_array()) {
        Some(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::to_string)
            .collect(),
        None => vec![],
    }
}

/// Text field that the agent sometimes returns as a list of fragments.
fn text_or_joined(value: Option<&serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}

fn materials(value: Option<&serde_json::Value>) -> Vec<MaterialShared> {
    let Some(items) = value.and_then(|v| v.as_array()) else {
        return vec![];
    };

    items
        .iter()
        .filter_map(|item| match item {
            serde_json::Value::String(name) => Some(MaterialShared {
                name: name.clone(),
                kind: Some("other".into()),
            }),
            serde_json::Value::Object(obj) => {
                Some(MaterialShared {
                    name: obj.get("name")?.as_str()?.to_string(),
                    kind: obj.get("type").and_then(|v| v.as_str()).map(str::to_string),
                })
            }
            _ => None,
        })
        .collect()
}

fn samples(value: Option<&serde_json::Value>) -> Vec<SampleDistributed> {
    let value = match value {
        Some(v) => v,
        None => return vec![],
    };

    // A bare count means "N units of something" — keep the quantity.
    if let Some(n) = value.as_u64() {
        return vec![SampleDistributed {
            product_name: "Unknown Product".into(),
            quantity: n.min(u32::MAX as u64) as u32,
        }];
    }

    let Some(items) = value.as_array() else {
        return vec![];
    };

    items
        .iter()
        .filter_map(|item| {
            if let Some(n) = item.as_u64() {
                return Some(SampleDistributed {
                    product_name: "Unknown Product".into(),
                    quantity: n.min(u32::MAX as u64) as u32,
                });
            }
            let obj = item.as_object()?;
            Some(SampleDistributed {
                product_name: obj.get("product_name")?.as_str()?.to_string(),
                quantity: obj
                    .get("quantity")
                    .and_then(|v| v.as_u64())
                    .unwrap_or(0)
                    .min(u32::MAX as u64) as u32,
            })
        })
        .collect()
}
