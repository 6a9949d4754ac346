use mallspace_common::{AvatarVariant, FacingDirection, ParticipantId};
use serde::{Deserialize, Serialize};

/// Durable participant record. Created on first join and kept across
/// sessions; only the appearance variant and `updated_at` mutate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: ParticipantId,
    pub username: String,
    pub avatar_variant: AvatarVariant,
    /// Seconds since the store epoch.
    pub created_at: f64,
    pub updated_at: f64,
}

/// Ephemeral live-position row, upserted by its owning participant.
///
/// The wire pair (`position_x`, `position_y`) carries the horizontal
/// plane (world x and z); the vertical coordinate is not replicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceRow {
    pub user_id: ParticipantId,
    pub username: String,
    pub position_x: f32,
    pub position_y: f32,
    pub direction: FacingDirection,
    pub is_moving: bool,
    /// Liveness timestamp, refreshed by publishes and heartbeats.
    pub last_seen: f64,
}

/// Catalog entry. Read-only from the client's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub position_x: f32,
    pub position_y: f32,
    #[serde(default)]
    pub created_at: f64,
}

/// One cart line for one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u64,
    pub user_id: ParticipantId,
    pub product_id: String,
    pub quantity: u32,
    pub created_at: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_row_serializes_direction_lowercase() {
        let row = PresenceRow {
            user_id: ParticipantId::new(),
            username: "ada".into(),
            position_x: 1.0,
            position_y: -2.0,
            direction: FacingDirection::Left,
            is_moving: true,
            last_seen: 12.5,
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"direction\":\"left\""));
        let back: PresenceRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn product_optional_fields_default() {
        let json = r#"{
            "id": "p-1", "name": "Linen Shirt", "price": 29.99,
            "category": "tops", "position_x": 4.0, "position_y": -3.0
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert!(p.description.is_none());
        assert!(p.image_url.is_none());
        assert_eq!(p.created_at, 0.0);
    }
}
