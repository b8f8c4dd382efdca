use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use crate::error::DiaryError;
use crate::tabular::{SheetId, TabularStore};

pub const DB_FILE: &str = "moodlog.sqlite3";

/// Sqlite-backed tabular workspace. Each sheet is a bag of 1-based
/// (row, col) cells; the diary layer supplies the layout convention.
pub struct SqliteStore {
    conn: Connection,
}

pub fn open_db(workspace: &Path) -> anyhow::Result<SqliteStore> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join(DB_FILE);
    let conn = Connection::open(db_path)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS sheet_cells(
            sheet TEXT NOT NULL,
            row INTEGER NOT NULL,
            col INTEGER NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT,
            PRIMARY KEY(sheet, row, col)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_sheet_cells_sheet_row ON sheet_cells(sheet, row)",
        [],
    )?;

    // Workspaces created before the updated_at column existed still open.
    ensure_sheet_cells_updated_at(&conn)?;

    Ok(SqliteStore { conn })
}

fn ensure_sheet_cells_updated_at(conn: &Connection) -> anyhow::Result<()> {
    if table_has_column(conn, "sheet_cells", "updated_at")? {
        return Ok(());
    }
    conn.execute("ALTER TABLE sheet_cells ADD COLUMN updated_at TEXT", [])?;
    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> anyhow::Result<bool> {
    let sql = format!("PRAGMA table_info({})", table);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn unavailable(e: rusqlite::Error) -> DiaryError {
    DiaryError::StoreUnavailable(e.to_string())
}

fn now_stamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl SqliteStore {
    fn last_row(&self, sheet: &SheetId) -> Result<usize, DiaryError> {
        self.conn
            .query_row(
                "SELECT COALESCE(MAX(row), 0) FROM sheet_cells WHERE sheet = ?1",
                [sheet.as_str()],
                |r| r.get::<_, i64>(0),
            )
            .map(|n| n as usize)
            .map_err(unavailable)
    }

    fn put_cell(
        &self,
        sheet: &SheetId,
        row: usize,
        col: usize,
        value: &str,
        stamp: &str,
    ) -> Result<(), DiaryError> {
        self.conn
            .execute(
                "INSERT INTO sheet_cells(sheet, row, col, value, updated_at)
                 VALUES(?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(sheet, row, col)
                 DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                (sheet.as_str(), row as i64, col as i64, value, stamp),
            )
            .map(|_| ())
            .map_err(unavailable)
    }
}

impl TabularStore for SqliteStore {
    fn read_all_rows(&self, sheet: &SheetId) -> Result<Vec<Vec<String>>, DiaryError> {
        let mut stmt = self
            .conn
            .prepare("SELECT row, col, value FROM sheet_cells WHERE sheet = ?1 ORDER BY row, col")
            .map_err(unavailable)?;
        let cells = stmt
            .query_map([sheet.as_str()], |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, i64>(1)?,
                    r.get::<_, String>(2)?,
                ))
            })
            .and_then(|it| it.collect::<Result<Vec<_>, _>>())
            .map_err(unavailable)?;

        let mut rows: Vec<Vec<String>> = Vec::new();
        for (row, col, value) in cells {
            let (row, col) = (row as usize, col as usize);
            if row == 0 || col == 0 {
                continue;
            }
            if rows.len() < row {
                rows.resize(row, Vec::new());
            }
            let cells = &mut rows[row - 1];
            if cells.len() < col {
                cells.resize(col, String::new());
            }
            cells[col - 1] = value;
        }
        Ok(rows)
    }

    fn read_cell(&self, sheet: &SheetId, row: usize, col: usize) -> Result<String, DiaryError> {
        self.conn
            .query_row(
                "SELECT value FROM sheet_cells WHERE sheet = ?1 AND row = ?2 AND col = ?3",
                (sheet.as_str(), row as i64, col as i64),
                |r| r.get::<_, String>(0),
            )
            .optional()
            .map(|v| v.unwrap_or_default())
            .map_err(unavailable)
    }

    fn write_cell(
        &self,
        sheet: &SheetId,
        row: usize,
        col: usize,
        value: &str,
    ) -> Result<(), DiaryError> {
        if row == 0 || col == 0 {
            return Err(DiaryError::StoreUnavailable(format!(
                "cell ({row}, {col}) is out of range"
            )));
        }
        self.put_cell(sheet, row, col, value, &now_stamp())
    }

    fn write_row(&self, sheet: &SheetId, row: usize, values: &[String]) -> Result<(), DiaryError> {
        if row == 0 {
            return Err(DiaryError::StoreUnavailable(format!(
                "row {row} is out of range"
            )));
        }
        let stamp = now_stamp();
        for (i, v) in values.iter().enumerate() {
            self.put_cell(sheet, row, i + 1, v, &stamp)?;
        }
        Ok(())
    }

    fn append_row(&self, sheet: &SheetId, values: &[String]) -> Result<(), DiaryError> {
        let row = self.last_row(sheet)? + 1;
        let stamp = now_stamp();
        for (i, v) in values.iter().enumerate() {
            self.put_cell(sheet, row, i + 1, v, &stamp)?;
        }
        Ok(())
    }

    fn delete_row(&self, sheet: &SheetId, row: usize) -> Result<(), DiaryError> {
        if row == 0 || row > self.last_row(sheet)? {
            return Err(DiaryError::StoreUnavailable(format!(
                "row {row} is out of range"
            )));
        }
        self.conn
            .execute(
                "DELETE FROM sheet_cells WHERE sheet = ?1 AND row = ?2",
                (sheet.as_str(), row as i64),
            )
            .map_err(unavailable)?;
        // Shift in two steps so the interim keys never collide.
        self.conn
            .execute(
                "UPDATE sheet_cells SET row = -(row - 1) WHERE sheet = ?1 AND row > ?2",
                (sheet.as_str(), row as i64),
            )
            .map_err(unavailable)?;
        self.conn
            .execute(
                "UPDATE sheet_cells SET row = -row WHERE sheet = ?1 AND row < 0",
                [sheet.as_str()],
            )
            .map_err(unavailable)?;
        Ok(())
    }
}
