//! Dashboard payload DTOs
//!
//! Serializable mirrors of the sheet entities, in the shape the dashboard
//! client consumes.

use serde::{Deserialize, Serialize};

use crate::application::services::PageDataPayload;
use crate::domain::entities::{
    EnvironmentConfig, PlayerAttribute, PlayerAttributeStatus, PlayerEquipment, PlayerInfo,
    PlayerItem, PlayerNote, PlayerRecord, PlayerSpec,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentDto {
    pub key: String,
    pub value: String,
}

impl From<&EnvironmentConfig> for EnvironmentDto {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            key: config.key.clone(),
            value: config.value.clone(),
        }
    }
}

/// Only the note text is exposed to the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteDto {
    pub value: String,
}

impl From<&PlayerNote> for NoteDto {
    fn from(note: &PlayerNote) -> Self {
        Self {
            value: note.value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfoDto {
    pub info: NamedDto,
    pub value: String,
}

impl From<&PlayerInfo> for PlayerInfoDto {
    fn from(entry: &PlayerInfo) -> Self {
        Self {
            info: NamedDto {
                id: entry.info.id.to_string(),
                name: entry.info.name.clone(),
            },
            value: entry.value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDto {
    pub id: String,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAttributeDto {
    pub attribute: AttributeDto,
    pub value: i32,
    pub max_value: i32,
}

impl From<&PlayerAttribute> for PlayerAttributeDto {
    fn from(entry: &PlayerAttribute) -> Self {
        Self {
            attribute: AttributeDto {
                id: entry.attribute.id.to_string(),
                name: entry.attribute.name.clone(),
                color: entry.attribute.color.clone(),
            },
            value: entry.value,
            max_value: entry.max_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeStatusDto {
    pub id: String,
    pub name: String,
    pub attribute_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAttributeStatusDto {
    pub attribute_status: AttributeStatusDto,
    pub value: bool,
}

impl From<&PlayerAttributeStatus> for PlayerAttributeStatusDto {
    fn from(entry: &PlayerAttributeStatus) -> Self {
        Self {
            attribute_status: AttributeStatusDto {
                id: entry.attribute_status.id.to_string(),
                name: entry.attribute_status.name.clone(),
                attribute_id: entry.attribute_status.attribute_id.to_string(),
            },
            value: entry.value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpecDto {
    pub spec: NamedDto,
    pub value: String,
}

impl From<&PlayerSpec> for PlayerSpecDto {
    fn from(entry: &PlayerSpec) -> Self {
        Self {
            spec: NamedDto {
                id: entry.spec.id.to_string(),
                name: entry.spec.name.clone(),
            },
            value: entry.value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentDto {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub damage: String,
    pub range: String,
    pub attacks: String,
    pub ammo: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEquipmentDto {
    pub equipment: EquipmentDto,
    pub current_ammo: i32,
}

impl From<&PlayerEquipment> for PlayerEquipmentDto {
    fn from(entry: &PlayerEquipment) -> Self {
        let equipment = &entry.equipment;
        Self {
            equipment: EquipmentDto {
                id: equipment.id.to_string(),
                name: equipment.name.clone(),
                kind: equipment.kind.clone(),
                damage: equipment.damage.clone(),
                range: equipment.range.clone(),
                attacks: equipment.attacks.clone(),
                ammo: equipment.ammo,
            },
            current_ammo: entry.current_ammo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDto {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerItemDto {
    pub item: ItemDto,
    pub current_description: String,
    pub quantity: i32,
}

impl From<&PlayerItem> for PlayerItemDto {
    fn from(entry: &PlayerItem) -> Self {
        Self {
            item: ItemDto {
                id: entry.item.id.to_string(),
                name: entry.item.name.clone(),
                description: entry.item.description.clone(),
            },
            current_description: entry.current_description.clone(),
            quantity: entry.quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDto {
    pub id: String,
    pub attribute_status: Vec<PlayerAttributeStatusDto>,
    pub info: Vec<PlayerInfoDto>,
    pub attributes: Vec<PlayerAttributeDto>,
    pub specs: Vec<PlayerSpecDto>,
    pub equipment: Vec<PlayerEquipmentDto>,
    pub items: Vec<PlayerItemDto>,
}

impl From<&PlayerRecord> for PlayerDto {
    fn from(player: &PlayerRecord) -> Self {
        Self {
            id: player.id.to_string(),
            attribute_status: player.attribute_status.iter().map(Into::into).collect(),
            info: player.info.iter().map(Into::into).collect(),
            attributes: player.attributes.iter().map(Into::into).collect(),
            specs: player.specs.iter().map(Into::into).collect(),
            equipment: player.equipment.iter().map(Into::into).collect(),
            items: player.items.iter().map(Into::into).collect(),
        }
    }
}

/// `{environment, players, notes}` as handed to the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDataDto {
    pub environment: Option<EnvironmentDto>,
    pub players: Vec<PlayerDto>,
    pub notes: Option<NoteDto>,
}

impl From<&PageDataPayload> for PageDataDto {
    fn from(payload: &PageDataPayload) -> Self {
        Self {
            environment: payload.environment.as_ref().map(Into::into),
            players: payload.players.iter().map(Into::into).collect(),
            notes: payload.notes.as_ref().map(Into::into),
        }
    }
}

/// Display pair used by the combat container and the dice list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerName {
    pub id: String,
    pub name: String,
}

impl From<&PlayerRecord> for PlayerName {
    fn from(player: &PlayerRecord) -> Self {
        Self {
            id: player.id.to_string(),
            name: player.display_name().to_string(),
        }
    }
}
