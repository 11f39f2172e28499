//! Domain entities - Core business objects with identity

mod config;
mod note;
mod player;

pub use config::{EnvironmentConfig, ENVIRONMENT_KEY};
pub use note::PlayerNote;
pub use player::{
    Attribute, AttributeStatus, Equipment, Info, Item, PlayerAttribute, PlayerAttributeStatus,
    PlayerEquipment, PlayerInfo, PlayerItem, PlayerRecord, PlayerRole, PlayerSpec, Spec,
    DISPLAY_NAME_INFO,
};
