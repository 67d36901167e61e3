use serde::{Deserialize, Serialize};

/// Immutable base value of a cell, fixed at generation time.
///
/// `Clear(0)` is an empty cell, `Clear(1..=8)` carries the adjacent-mine
/// count. The arithmetic-offset encoding of the classic implementations is
/// deliberately not used here; flag/reveal status lives in [`Cell`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Clear(u8),
    Mine,
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Clear(0)
    }
}

/// A single grid position: base value plus the two mutable play bits.
///
/// All operations are pure and value-returning, the caller rebinds. A cell
/// is never both revealed and flagged: [`Cell::open`] clears the flag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    value: CellValue,
    revealed: bool,
    flagged: bool,
}

impl Cell {
    pub const fn new_mine() -> Self {
        Self {
            value: CellValue::Mine,
            revealed: false,
            flagged: false,
        }
    }

    pub const fn value(self) -> CellValue {
        self.value
    }

    pub const fn is_marked(self) -> bool {
        self.flagged
    }

    pub const fn is_opened(self) -> bool {
        self.revealed
    }

    pub const fn is_mine(self) -> bool {
        matches!(self.value, CellValue::Mine)
    }

    /// Adjacent-mine count for a non-mine cell, `None` for a mine.
    pub const fn adjacent_mines(self) -> Option<u8> {
        match self.value {
            CellValue::Clear(count) => Some(count),
            CellValue::Mine => None,
        }
    }

    /// Places a flag. Fails if already flagged, no-op if already revealed.
    #[must_use]
    pub const fn mark(self) -> Option<Self> {
        if self.flagged {
            return None;
        }
        if self.revealed {
            return Some(self);
        }
        Some(Self {
            flagged: true,
            ..self
        })
    }

    /// Removes a flag. Fails if not flagged.
    #[must_use]
    pub const fn unmark(self) -> Option<Self> {
        if !self.flagged {
            return None;
        }
        Some(Self {
            flagged: false,
            ..self
        })
    }

    /// Reveals the cell, clearing any flag. Fails if already revealed.
    #[must_use]
    pub const fn open(self) -> Option<Self> {
        if self.revealed {
            return None;
        }
        Some(Self {
            revealed: true,
            flagged: false,
            ..self
        })
    }

    /// Bumps the adjacency count during board generation.
    ///
    /// # Panics
    ///
    /// Panics when called on a mine cell; mine values never change after
    /// placement, so this is a contract violation in the generator.
    #[must_use]
    pub fn increment_adjacency(self) -> Self {
        match self.value {
            CellValue::Clear(count) => Self {
                value: CellValue::Clear(count + 1),
                ..self
            },
            CellValue::Mine => panic!("adjacency increment on a mine cell"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_empty_hidden_unflagged() {
        let cell = Cell::default();

        assert_eq!(cell.value(), CellValue::Clear(0));
        assert!(!cell.is_marked());
        assert!(!cell.is_opened());
        assert!(!cell.is_mine());
        assert_eq!(cell.adjacent_mines(), Some(0));
    }

    #[test]
    fn mark_and_unmark_round_trip() {
        let cell = Cell::default();

        let marked = cell.mark().unwrap();
        assert!(marked.is_marked());
        assert_eq!(marked.mark(), None);

        let unmarked = marked.unmark().unwrap();
        assert_eq!(unmarked, cell);
        assert_eq!(unmarked.unmark(), None);
    }

    #[test]
    fn mark_is_noop_on_revealed_cell() {
        let opened = Cell::default().open().unwrap();

        assert_eq!(opened.mark(), Some(opened));
        assert!(!opened.is_marked());
    }

    #[test]
    fn open_clears_flag_and_rejects_double_open() {
        let marked = Cell::new_mine().mark().unwrap();

        let opened = marked.open().unwrap();
        assert!(opened.is_opened());
        assert!(!opened.is_marked());
        assert!(opened.is_mine());
        assert_eq!(opened.open(), None);
    }

    #[test]
    fn increment_adjacency_counts_up() {
        let cell = Cell::default()
            .increment_adjacency()
            .increment_adjacency()
            .increment_adjacency();

        assert_eq!(cell.value(), CellValue::Clear(3));
        assert_eq!(cell.adjacent_mines(), Some(3));
    }

    #[test]
    #[should_panic(expected = "mine cell")]
    fn increment_adjacency_panics_on_mine() {
        let _ = Cell::new_mine().increment_adjacency();
    }

    #[test]
    fn mine_has_no_adjacency() {
        assert_eq!(Cell::new_mine().adjacent_mines(), None);
    }
}
