use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::application::ports::outbound::{
    AdminReadRepositoryPort, AdminWriteRepositoryPort, RepositoryError,
};
use crate::domain::entities::{
    Attribute, AttributeStatus, EnvironmentConfig, Equipment, Info, Item, PlayerAttribute,
    PlayerAttributeStatus, PlayerEquipment, PlayerInfo, PlayerItem, PlayerNote, PlayerRecord,
    PlayerRole, PlayerSpec, Spec,
};
use crate::domain::value_objects::PlayerId;

type InfoRow = (String, String, String, String);
type AttributeRow = (String, String, String, String, i32, i32);
type StatusRow = (String, String, String, String, bool);
type SpecRow = (String, String, String, String);
type EquipmentRow = (String, String, String, String, String, String, String, Option<i32>, i32);
type ItemRow = (String, String, String, String, String, i32);

#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn load_info(
        &self,
        role: PlayerRole,
        info_names: &[String],
    ) -> Result<Vec<InfoRow>, RepositoryError> {
        // `IN ()` is not valid SQL
        if info_names.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; info_names.len()].join(", ");
        let sql = format!(
            r#"SELECT pi.player_id, i.id, i.name, pi.value
               FROM player_info pi
               JOIN info i ON i.id = pi.info_id
               JOIN player p ON p.id = pi.player_id
               WHERE p.role = ? AND i.name IN ({})
               ORDER BY i.name"#,
            placeholders
        );

        let mut query = sqlx::query_as::<_, InfoRow>(&sql).bind(role.as_str());
        for name in info_names {
            query = query.bind(name.as_str());
        }
        Ok(query.fetch_all(&self.pool).await?)
    }
}

/// Position of each player in the roster, for attaching nested rows
struct Roster {
    players: Vec<PlayerRecord>,
    index: HashMap<String, usize>,
}

impl Roster {
    fn new(ids: Vec<String>) -> Self {
        let index = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        let players = ids.into_iter().map(PlayerRecord::new).collect();
        Self { players, index }
    }

    fn get_mut(&mut self, player_id: &str) -> Option<&mut PlayerRecord> {
        let i = *self.index.get(player_id)?;
        self.players.get_mut(i)
    }
}

#[async_trait]
impl AdminReadRepositoryPort for SqliteRepository {
    async fn get_config(&self, key: &str) -> Result<Option<EnvironmentConfig>, RepositoryError> {
        let row: Option<(String, String)> =
            sqlx::query_as("SELECT key, value FROM config WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(key, value)| EnvironmentConfig { key, value }))
    }

    async fn list_players(
        &self,
        role: PlayerRole,
        info_names: &[String],
    ) -> Result<Vec<PlayerRecord>, RepositoryError> {
        let ids: Vec<(String,)> = sqlx::query_as("SELECT id FROM player WHERE role = ? ORDER BY id")
            .bind(role.as_str())
            .fetch_all(&self.pool)
            .await?;
        let mut roster = Roster::new(ids.into_iter().map(|(id,)| id).collect());
        if roster.players.is_empty() {
            return Ok(Vec::new());
        }

        let statuses: Vec<StatusRow> = sqlx::query_as(
            r#"SELECT pas.player_id, s.id, s.name, s.attribute_id, pas.value
               FROM player_attribute_status pas
               JOIN attribute_status s ON s.id = pas.attribute_status_id
               JOIN player p ON p.id = pas.player_id
               WHERE p.role = ?
               ORDER BY s.name"#,
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;
        for (player_id, id, name, attribute_id, value) in statuses {
            if let Some(player) = roster.get_mut(&player_id) {
                player.attribute_status.push(PlayerAttributeStatus {
                    attribute_status: AttributeStatus {
                        id: id.into(),
                        name,
                        attribute_id: attribute_id.into(),
                    },
                    value,
                });
            }
        }

        for (player_id, id, name, value) in self.load_info(role, info_names).await? {
            if let Some(player) = roster.get_mut(&player_id) {
                player.info.push(PlayerInfo {
                    info: Info { id: id.into(), name },
                    value,
                });
            }
        }

        let attributes: Vec<AttributeRow> = sqlx::query_as(
            r#"SELECT pa.player_id, a.id, a.name, a.color, pa.value, pa.max_value
               FROM player_attribute pa
               JOIN attribute a ON a.id = pa.attribute_id
               JOIN player p ON p.id = pa.player_id
               WHERE p.role = ?
               ORDER BY a.name"#,
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;
        for (player_id, id, name, color, value, max_value) in attributes {
            if let Some(player) = roster.get_mut(&player_id) {
                player.attributes.push(PlayerAttribute {
                    attribute: Attribute {
                        id: id.into(),
                        name,
                        color,
                    },
                    value,
                    max_value,
                });
            }
        }

        let specs: Vec<SpecRow> = sqlx::query_as(
            r#"SELECT ps.player_id, s.id, s.name, ps.value
               FROM player_spec ps
               JOIN spec s ON s.id = ps.spec_id
               JOIN player p ON p.id = ps.player_id
               WHERE p.role = ?
               ORDER BY s.name"#,
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;
        for (player_id, id, name, value) in specs {
            if let Some(player) = roster.get_mut(&player_id) {
                player.specs.push(PlayerSpec {
                    spec: Spec { id: id.into(), name },
                    value,
                });
            }
        }

        let equipment: Vec<EquipmentRow> = sqlx::query_as(
            r#"SELECT pe.player_id, e.id, e.name, e.kind, e.damage, e.weapon_range, e.attacks,
                      e.ammo, pe.current_ammo
               FROM player_equipment pe
               JOIN equipment e ON e.id = pe.equipment_id
               JOIN player p ON p.id = pe.player_id
               WHERE p.role = ?
               ORDER BY e.name"#,
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;
        for (player_id, id, name, kind, damage, range, attacks, ammo, current_ammo) in equipment {
            if let Some(player) = roster.get_mut(&player_id) {
                player.equipment.push(PlayerEquipment {
                    equipment: Equipment {
                        id: id.into(),
                        name,
                        kind,
                        damage,
                        range,
                        attacks,
                        ammo,
                    },
                    current_ammo,
                });
            }
        }

        let items: Vec<ItemRow> = sqlx::query_as(
            r#"SELECT pi.player_id, i.id, i.name, i.description, pi.current_description, pi.quantity
               FROM player_item pi
               JOIN item i ON i.id = pi.item_id
               JOIN player p ON p.id = pi.player_id
               WHERE p.role = ?
               ORDER BY i.name"#,
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;
        for (player_id, id, name, description, current_description, quantity) in items {
            if let Some(player) = roster.get_mut(&player_id) {
                player.items.push(PlayerItem {
                    item: Item {
                        id: id.into(),
                        name,
                        description,
                    },
                    current_description,
                    quantity,
                });
            }
        }

        Ok(roster.players)
    }

    async fn get_note(&self, player_id: &PlayerId) -> Result<Option<PlayerNote>, RepositoryError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM player_note WHERE player_id = ?")
                .bind(player_id.as_str())
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(value,)| PlayerNote {
            player_id: player_id.clone(),
            value,
        }))
    }
}

#[async_trait]
impl AdminWriteRepositoryPort for SqliteRepository {
    async fn save_config(&self, config: &EnvironmentConfig) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO config (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)
               ON CONFLICT(key) DO UPDATE
               SET value = excluded.value, updated_at = CURRENT_TIMESTAMP"#,
        )
        .bind(config.key.as_str())
        .bind(config.value.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save_note(&self, note: &PlayerNote) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO player_note (player_id, value) VALUES (?, ?)
               ON CONFLICT(player_id) DO UPDATE SET value = excluded.value"#,
        )
        .bind(note.player_id.as_str())
        .bind(note.value.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
