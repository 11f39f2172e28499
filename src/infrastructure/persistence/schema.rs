use sqlx::SqlitePool;

const TABLES: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS config (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )"#,
    r#"CREATE TABLE IF NOT EXISTS player (
        id TEXT PRIMARY KEY,
        username TEXT NOT NULL DEFAULT '',
        role TEXT NOT NULL DEFAULT 'PLAYER'
    )"#,
    r#"CREATE TABLE IF NOT EXISTS info (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS player_info (
        player_id TEXT NOT NULL REFERENCES player(id) ON DELETE CASCADE,
        info_id TEXT NOT NULL REFERENCES info(id) ON DELETE CASCADE,
        value TEXT NOT NULL DEFAULT '',
        PRIMARY KEY (player_id, info_id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS attribute (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        color TEXT NOT NULL DEFAULT 'ffffff'
    )"#,
    r#"CREATE TABLE IF NOT EXISTS player_attribute (
        player_id TEXT NOT NULL REFERENCES player(id) ON DELETE CASCADE,
        attribute_id TEXT NOT NULL REFERENCES attribute(id) ON DELETE CASCADE,
        value INTEGER NOT NULL DEFAULT 0,
        max_value INTEGER NOT NULL DEFAULT 0,
        PRIMARY KEY (player_id, attribute_id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS attribute_status (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        attribute_id TEXT NOT NULL REFERENCES attribute(id) ON DELETE CASCADE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS player_attribute_status (
        player_id TEXT NOT NULL REFERENCES player(id) ON DELETE CASCADE,
        attribute_status_id TEXT NOT NULL REFERENCES attribute_status(id) ON DELETE CASCADE,
        value INTEGER NOT NULL DEFAULT 0,
        PRIMARY KEY (player_id, attribute_status_id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS spec (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS player_spec (
        player_id TEXT NOT NULL REFERENCES player(id) ON DELETE CASCADE,
        spec_id TEXT NOT NULL REFERENCES spec(id) ON DELETE CASCADE,
        value TEXT NOT NULL DEFAULT '',
        PRIMARY KEY (player_id, spec_id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS equipment (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        kind TEXT NOT NULL DEFAULT '',
        damage TEXT NOT NULL DEFAULT '',
        weapon_range TEXT NOT NULL DEFAULT '',
        attacks TEXT NOT NULL DEFAULT '',
        ammo INTEGER
    )"#,
    r#"CREATE TABLE IF NOT EXISTS player_equipment (
        player_id TEXT NOT NULL REFERENCES player(id) ON DELETE CASCADE,
        equipment_id TEXT NOT NULL REFERENCES equipment(id) ON DELETE CASCADE,
        current_ammo INTEGER NOT NULL DEFAULT 0,
        PRIMARY KEY (player_id, equipment_id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS item (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT ''
    )"#,
    r#"CREATE TABLE IF NOT EXISTS player_item (
        player_id TEXT NOT NULL REFERENCES player(id) ON DELETE CASCADE,
        item_id TEXT NOT NULL REFERENCES item(id) ON DELETE CASCADE,
        current_description TEXT NOT NULL DEFAULT '',
        quantity INTEGER NOT NULL DEFAULT 1,
        PRIMARY KEY (player_id, item_id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS player_note (
        player_id TEXT PRIMARY KEY REFERENCES player(id) ON DELETE CASCADE,
        value TEXT NOT NULL DEFAULT ''
    )"#,
    r#"CREATE TABLE IF NOT EXISTS session (
        token TEXT PRIMARY KEY,
        player_id TEXT NOT NULL,
        admin INTEGER NOT NULL DEFAULT 0,
        expires_at TIMESTAMP
    )"#,
];

/// Create all tables if they do not exist yet
pub async fn initialize(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for ddl in TABLES {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}
