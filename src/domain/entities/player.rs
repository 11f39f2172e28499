//! Player entity - a roster entry with its sheet data

use crate::domain::value_objects::{
    AttributeId, AttributeStatusId, EquipmentId, InfoId, ItemId, PlayerId, SpecId,
};

/// Info-name holding a player's display name
pub const DISPLAY_NAME_INFO: &str = "Nome";

/// Display name used when a player has no `Nome` info
pub const UNKNOWN_PLAYER_NAME: &str = "Desconhecido";

/// Role of an account; only `Player` accounts belong to the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerRole {
    Player,
    Admin,
}

impl PlayerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "PLAYER",
            Self::Admin => "ADMIN",
        }
    }
}

impl std::str::FromStr for PlayerRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLAYER" => Ok(Self::Player),
            "ADMIN" => Ok(Self::Admin),
            other => Err(format!("Unknown player role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub id: InfoId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInfo {
    pub info: Info,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub id: AttributeId,
    pub name: String,
    /// Hex color of the attribute bar, without the leading '#'
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerAttribute {
    pub attribute: Attribute,
    pub value: i32,
    pub max_value: i32,
}

/// A toggleable status bound to an attribute (e.g. "Inconsciente" on HP)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeStatus {
    pub id: AttributeStatusId,
    pub name: String,
    pub attribute_id: AttributeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerAttributeStatus {
    pub attribute_status: AttributeStatus,
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spec {
    pub id: SpecId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSpec {
    pub spec: Spec,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equipment {
    pub id: EquipmentId,
    pub name: String,
    pub kind: String,
    pub damage: String,
    pub range: String,
    pub attacks: String,
    /// Magazine size; `None` for melee equipment
    pub ammo: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerEquipment {
    pub equipment: Equipment,
    pub current_ammo: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerItem {
    pub item: Item,
    pub current_description: String,
    pub quantity: i32,
}

/// A roster entry as shown on the admin dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub attribute_status: Vec<PlayerAttributeStatus>,
    /// Only the info entries whose name was requested
    pub info: Vec<PlayerInfo>,
    pub attributes: Vec<PlayerAttribute>,
    pub specs: Vec<PlayerSpec>,
    pub equipment: Vec<PlayerEquipment>,
    pub items: Vec<PlayerItem>,
}

impl PlayerRecord {
    pub fn new(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            attribute_status: Vec::new(),
            info: Vec::new(),
            attributes: Vec::new(),
            specs: Vec::new(),
            equipment: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn with_info(mut self, info: PlayerInfo) -> Self {
        self.info.push(info);
        self
    }

    pub fn with_attribute(mut self, attribute: PlayerAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Value of the info entry with the given name
    pub fn info_value(&self, info_name: &str) -> Option<&str> {
        self.info
            .iter()
            .find(|entry| entry.info.name == info_name)
            .map(|entry| entry.value.as_str())
    }

    /// Display name, falling back to `Desconhecido`
    pub fn display_name(&self) -> &str {
        match self.info_value(DISPLAY_NAME_INFO) {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_PLAYER_NAME,
        }
    }
}
