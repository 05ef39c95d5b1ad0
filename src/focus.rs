// Product-focus achievement: for each representative and focus product,
// how many distinct outlets bought that product from them (invoices only).
use crate::error::ReportError;
use crate::types::SalesRow;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub const FOCUS_SLOT_COUNT: usize = 8;

/// The configured focus products, one optional code per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusSlots {
    slots: [Option<String>; FOCUS_SLOT_COUNT],
}

impl FocusSlots {
    /// Fill slots left to right. Blank codes leave their slot unconfigured.
    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Result<FocusSlots, ReportError> {
        if codes.len() > FOCUS_SLOT_COUNT {
            return Err(ReportError::TooManyFocusCodes {
                given: codes.len(),
                max: FOCUS_SLOT_COUNT,
            });
        }
        let mut slots = FocusSlots::default();
        for (i, code) in codes.iter().enumerate() {
            slots.set(i, code.as_ref())?;
        }
        Ok(slots)
    }

    pub fn set(&mut self, index: usize, code: &str) -> Result<(), ReportError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(ReportError::FocusSlotOutOfRange {
                index,
                max: FOCUS_SLOT_COUNT,
            })?;
        let code = code.trim();
        *slot = if code.is_empty() {
            None
        } else {
            Some(code.to_string())
        };
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.slots.get(index).and_then(|s| s.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> {
        self.slots.iter().map(|s| s.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// Distinct outlets per (representative, product), built from invoice rows.
#[derive(Debug, Clone, Default)]
pub struct AchievementMatrix {
    outlets: HashMap<(String, String), HashSet<String>>,
}

impl AchievementMatrix {
    pub fn build(rows: &[SalesRow]) -> AchievementMatrix {
        let mut outlets: HashMap<(String, String), HashSet<String>> = HashMap::new();
        for r in rows.iter().filter(|r| r.status.is_invoice()) {
            let user = r.user_code.trim();
            let sku = r.sku_code.trim();
            let outlet = r.retailer_code.trim();
            if user.is_empty() || sku.is_empty() || outlet.is_empty() {
                continue;
            }
            outlets
                .entry((user.to_string(), sku.to_string()))
                .or_default()
                .insert(outlet.to_string());
        }
        AchievementMatrix { outlets }
    }

    /// Outlet count for a representative and product; `0` when the product
    /// code is blank or nothing matched.
    pub fn achievement(&self, user_code: &str, sku_code: &str) -> usize {
        let sku = sku_code.trim();
        if sku.is_empty() {
            return 0;
        }
        self.outlets
            .get(&(user_code.trim().to_string(), sku.to_string()))
            .map_or(0, HashSet::len)
    }

    /// `None` for an unconfigured slot, otherwise the (possibly zero) count.
    pub fn cell(&self, user_code: &str, slot: Option<&str>) -> Option<usize> {
        slot.map(|code| self.achievement(user_code, code))
    }

    /// One row per representative in roster order, one cell per slot.
    pub fn grid(&self, roster: &[String], slots: &FocusSlots) -> Vec<FocusRow> {
        roster
            .iter()
            .map(|user| FocusRow {
                user_code: user.clone(),
                cells: slots.iter().map(|slot| self.cell(user, slot)).collect(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusRow {
    pub user_code: String,
    pub cells: Vec<Option<usize>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;

    fn row(user: &str, sku: &str, outlet: &str, status: &str) -> SalesRow {
        SalesRow {
            user_code: user.into(),
            sku_code: sku.into(),
            retailer_code: outlet.into(),
            status: Status::parse(status),
            ..SalesRow::default()
        }
    }

    #[test]
    fn counts_distinct_outlets_from_invoices_only() {
        let rows = vec![
            row("S1", "P1", "O1", "I"),
            row("S1", "P1", "O2", "I"),
            row("S1", "P1", "O2", "I"),
            row("S1", "P1", "O3", "R"),
        ];
        let m = AchievementMatrix::build(&rows);
        assert_eq!(m.achievement("S1", "P1"), 2);
        assert_eq!(m.achievement("S1", "P2"), 0);
        assert_eq!(m.achievement("S9", "P1"), 0);
        assert_eq!(m.achievement("S1", ""), 0);
    }

    #[test]
    fn codes_are_trimmed_and_blanks_skipped() {
        let rows = vec![
            row(" S1 ", "P1 ", " O1", "I"),
            row("S1", "P1", "O1", "I"),
            row("", "P1", "O2", "I"),
            row("S1", "P1", "  ", "I"),
        ];
        let m = AchievementMatrix::build(&rows);
        assert_eq!(m.achievement("S1", "P1"), 1);
    }

    #[test]
    fn lookups_trim_the_representative_code() {
        let rows = vec![row(" S1 ", "P1", "O1", "I"), row("S1", "P1", "O2", "I")];
        let m = AchievementMatrix::build(&rows);
        assert_eq!(m.achievement(" S1 ", "P1"), 2);
        assert_eq!(m.achievement("S1", " P1"), 2);
        let slots = FocusSlots::from_codes(&["P1"]).unwrap();
        let grid = m.grid(&[" S1 ".to_string()], &slots);
        assert_eq!(grid[0].cells[0], Some(2));
    }

    #[test]
    fn unconfigured_slot_differs_from_zero() {
        let rows = vec![row("S1", "P1", "O1", "I")];
        let m = AchievementMatrix::build(&rows);
        let slots = FocusSlots::from_codes(&["P1", "", "NOPE"]).unwrap();
        let grid = m.grid(&["S1".to_string()], &slots);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].cells.len(), FOCUS_SLOT_COUNT);
        assert_eq!(&grid[0].cells[..3], &[Some(1), None, Some(0)]);
        assert!(grid[0].cells[3..].iter().all(Option::is_none));
    }

    #[test]
    fn slot_configuration_limits() {
        let nine: Vec<String> = (0..9).map(|i| format!("P{}", i)).collect();
        assert!(matches!(
            FocusSlots::from_codes(&nine[..]),
            Err(ReportError::TooManyFocusCodes { given: 9, max: 8 })
        ));

        let mut slots = FocusSlots::default();
        assert!(slots.is_empty());
        slots.set(7, "P7").unwrap();
        assert_eq!(slots.get(7), Some("P7"));
        assert!(slots.set(8, "P8").is_err());
        slots.set(7, "  ").unwrap();
        assert!(slots.is_empty());
    }
}
