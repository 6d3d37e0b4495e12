//! Database schema definitions and SQL constants.
//!
//! The `presentes` table keeps the column names the registry has always
//! used, so a database created by earlier deployments opens unchanged.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the gifts table.
///
/// `AUTOINCREMENT` keeps ids from being reused after a delete.
pub const CREATE_GIFTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS presentes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        nome TEXT,
        descricao TEXT,
        imagem TEXT,
        reservado INTEGER DEFAULT 0,
        reservado_por_nome TEXT,
        reservado_por_email TEXT
    )";

/// SQL statement checking whether the gifts table already exists.
pub const GIFTS_TABLE_EXISTS: &str =
    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'presentes'";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Column list shared by every gift query, in the order rows are decoded.
pub const GIFT_COLUMNS: &str =
    "id, nome, descricao, imagem, reservado, reservado_por_nome, reservado_por_email";

/// SQL statement to insert a new open gift.
pub const INSERT_GIFT: &str = r"
    INSERT INTO presentes (nome, descricao, imagem, reservado)
    VALUES (?, ?, ?, 0)
";

/// SQL statement to overwrite every mutable column of a gift.
pub const UPDATE_GIFT: &str = r"
    UPDATE presentes
    SET nome = ?, descricao = ?, imagem = ?, reservado = ?,
        reservado_por_nome = ?, reservado_por_email = ?
    WHERE id = ?
";

/// SQL statement to delete a gift by id.
pub const DELETE_GIFT: &str = "DELETE FROM presentes WHERE id = ?";
