use rand::Rng;

/// Placeholder replaced by the receipt number in number templates.
pub const NUMBER_PLACEHOLDER: &str = "{number}";

/// Fiscal receipt number of the form `{serial}/{month}/{year}`,
/// e.g. "4821/7/2024".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptNumber {
    serial: u16,
    month: u8,
    year: i32,
}

impl ReceiptNumber {
    pub const SERIAL_RANGE: std::ops::RangeInclusive<u16> = 1000..=9999;
    pub const MONTH_RANGE: std::ops::RangeInclusive<u8> = 1..=12;
    pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 2022..=2025;

    pub fn new(serial: u16, month: u8, year: i32) -> Self {
        Self {
            serial,
            month,
            year,
        }
    }

    /// Draw a random number: 4-digit serial, month 1-12, year 2022-2025.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let serial = rng.random_range(Self::SERIAL_RANGE);
        let month = rng.random_range(Self::MONTH_RANGE);
        let year = rng.random_range(Self::YEAR_RANGE);
        Self::new(serial, month, year)
    }

    pub fn serial(&self) -> u16 {
        self.serial
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Substitute this number into a template such as `"Nr paragonu: {number}"`.
    ///
    /// A template without the placeholder is returned unchanged.
    pub fn render(&self, template: &str) -> String {
        template.replace(NUMBER_PLACEHOLDER, &self.to_string())
    }
}

impl std::fmt::Display for ReceiptNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.serial, self.month, self.year)
    }
}
