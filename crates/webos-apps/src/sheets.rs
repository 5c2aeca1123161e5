//! Spreadsheet cell store.
//!
//! A sparse map of `A1`-style cell references to raw cell text,
//! persisted as one JSON object. Formula evaluation is the mounting
//! view's concern; the store only keeps what the user typed.

use std::collections::BTreeMap;

use log::warn;
use webos_store::{SharedStorage, keys};

/// Grid bounds: columns `A`..`Z`, rows `1`..`50`.
pub const COLS: u8 = 26;
pub const ROWS: u8 = 50;

/// Build an `A1`-style reference from zero-based column and row. Both
/// must be inside the grid, matching what `parse_cell_ref` accepts.
pub fn cell_ref(col: u8, row: u8) -> String {
    debug_assert!(col < COLS && row < ROWS, "cell ({col}, {row}) outside grid");
    format!("{}{}", (b'A' + col) as char, row as u16 + 1)
}

/// Parse an `A1`-style reference into zero-based (col, row). `None` for
/// anything outside the single-letter-column grid.
pub fn parse_cell_ref(text: &str) -> Option<(u8, u8)> {
    let mut chars = text.chars();
    let col_char = chars.next()?;
    if !col_char.is_ascii_uppercase() {
        return None;
    }
    let row: u16 = chars.as_str().parse().ok()?;
    let col = col_char as u8 - b'A';
    if row == 0 || row > ROWS as u16 || col >= COLS {
        return None;
    }
    Some((col, (row - 1) as u8))
}

/// Sparse cell contents with snapshot persistence.
pub struct SheetStore {
    cells: BTreeMap<String, String>,
    store: Option<SharedStorage>,
}

impl SheetStore {
    /// An empty, unpersisted store.
    pub fn new() -> Self {
        Self {
            cells: BTreeMap::new(),
            store: None,
        }
    }

    /// Load from `store`, ignoring a missing or malformed snapshot.
    pub fn with_storage(store: SharedStorage) -> Self {
        let cells = match store.borrow().get(keys::SHEETS) {
            Some(json) => match serde_json::from_str::<BTreeMap<String, String>>(&json) {
                Ok(cells) => cells,
                Err(e) => {
                    warn!("ignoring malformed sheet data: {e}");
                    BTreeMap::new()
                },
            },
            None => BTreeMap::new(),
        };
        Self {
            cells,
            store: Some(store),
        }
    }

    /// Raw content of a cell, empty if unset.
    pub fn get(&self, cell: &str) -> &str {
        self.cells.get(cell).map(String::as_str).unwrap_or("")
    }

    /// Set a cell's raw content. Setting empty text clears the cell,
    /// keeping the map sparse.
    pub fn set(&mut self, cell: &str, value: &str) {
        if value.is_empty() {
            self.cells.remove(cell);
        } else {
            self.cells.insert(cell.to_string(), value.to_string());
        }
        self.persist();
    }

    /// Clear one cell.
    pub fn clear_cell(&mut self, cell: &str) {
        if self.cells.remove(cell).is_some() {
            self.persist();
        }
    }

    /// Clear everything, removing the persisted snapshot entirely.
    pub fn clear_all(&mut self) {
        self.cells.clear();
        if let Some(store) = &self.store {
            store.borrow_mut().remove(keys::SHEETS);
        }
    }

    /// Number of non-empty cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All populated cells in reference order.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn persist(&self) {
        let Some(store) = &self.store else {
            return;
        };
        match serde_json::to_string(&self.cells) {
            Ok(json) => store.borrow_mut().set(keys::SHEETS, &json),
            Err(e) => warn!("failed to serialize sheet data: {e}"),
        }
    }
}

impl Default for SheetStore {
    fn default() -> Self {
        Self::new()
    }
}
