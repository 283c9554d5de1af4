use serde::Serialize;

//==============================================================================
// Dues Schema
//==============================================================================

/// Positional column names of the dues sheet, in source order
pub const COLUMN_NAMES: [&str; 14] = [
    "House",
    "Landlord",
    "Total Bill Due",
    "Fence Dues",
    "Painting",
    "Generator Due",
    "Prev Ground Rents",
    "2022 Ground Rent",
    "2023 Ground Rent",
    "2024 Ground Rent",
    "2025 Ground Rent",
    "CofO Payment",
    "Total Paid",
    "Total Outstanding",
];

/// Number of columns a dues sheet must provide
pub const COLUMN_COUNT: usize = COLUMN_NAMES.len();

/// Sheet read when no other name is configured
pub const DEFAULT_SHEET: &str = "FULL VIEW";

//==============================================================================
// Dues Record
//==============================================================================

/// One household's billing row after cleaning.
///
/// Amounts are whole currency units; fractional amounts are truncated when
/// loaded and never represented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DuesRecord {
    pub house: String,
    pub landlord: String,
    pub total_bill_due: i64,
    pub fence_dues: i64,
    pub painting: i64,
    pub generator_due: i64,
    pub prev_ground_rents: i64,
    pub ground_rent_2022: i64,
    pub ground_rent_2023: i64,
    pub ground_rent_2024: i64,
    pub ground_rent_2025: i64,
    pub cofo_payment: i64,
    pub total_paid: i64,
    pub total_outstanding: i64,
}

impl DuesRecord {
    pub fn new(house: impl Into<String>, landlord: impl Into<String>) -> Self {
        Self {
            house: house.into(),
            landlord: landlord.into(),
            ..Default::default()
        }
    }

    /// Mutable access to a monetary field by its column position (2..=13)
    pub(crate) fn amount_mut(&mut self, column: usize) -> Option<&mut i64> {
        let field = match column {
            2 => &mut self.total_bill_due,
            3 => &mut self.fence_dues,
            4 => &mut self.painting,
            5 => &mut self.generator_due,
            6 => &mut self.prev_ground_rents,
            7 => &mut self.ground_rent_2022,
            8 => &mut self.ground_rent_2023,
            9 => &mut self.ground_rent_2024,
            10 => &mut self.ground_rent_2025,
            11 => &mut self.cofo_payment,
            12 => &mut self.total_paid,
            13 => &mut self.total_outstanding,
            _ => return None,
        };
        Some(field)
    }

    /// Itemized charges in receipt order, labelled as printed
    pub fn breakdown(&self) -> [(&'static str, i64); 9] {
        [
            ("Fence Dues", self.fence_dues),
            ("Painting", self.painting),
            ("Generator Due", self.generator_due),
            ("Previous Ground Rents till 2021", self.prev_ground_rents),
            ("2022 Ground Rent", self.ground_rent_2022),
            ("2023 Ground Rent", self.ground_rent_2023),
            ("2024 Ground Rent", self.ground_rent_2024),
            ("2025 Ground Rent", self.ground_rent_2025),
            ("CofO Payment", self.cofo_payment),
        ]
    }

    pub fn payments(&self) -> [(&'static str, i64); 2] {
        [
            ("Total Paid", self.total_paid),
            ("Total Outstanding", self.total_outstanding),
        ]
    }
}
