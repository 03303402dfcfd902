//! Hebrew month enumeration.
//!
//! Months are numbered from Nisan (1) as in the Torah; the civil year and
//! the year number change at Tishrei (7). Adar II (13) exists only in leap
//! years, where Adar (12) is read as Adar I.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::year::is_leap_year;

/// The thirteen Hebrew months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum HebrewMonth {
    Nisan,
    Iyar,
    Sivan,
    Tamuz,
    Av,
    Elul,
    Tishrei,
    Cheshvan,
    Kislev,
    Tevet,
    Shevat,
    Adar,
    AdarII,
}

/// All months in numeric order (index 0 = Nisan).
pub const ALL_MONTHS: [HebrewMonth; 13] = [
    HebrewMonth::Nisan,
    HebrewMonth::Iyar,
    HebrewMonth::Sivan,
    HebrewMonth::Tamuz,
    HebrewMonth::Av,
    HebrewMonth::Elul,
    HebrewMonth::Tishrei,
    HebrewMonth::Cheshvan,
    HebrewMonth::Kislev,
    HebrewMonth::Tevet,
    HebrewMonth::Shevat,
    HebrewMonth::Adar,
    HebrewMonth::AdarII,
];

impl HebrewMonth {
    /// Month number, Nisan = 1 .. Adar II = 13.
    pub const fn number(self) -> u8 {
        match self {
            Self::Nisan => 1,
            Self::Iyar => 2,
            Self::Sivan => 3,
            Self::Tamuz => 4,
            Self::Av => 5,
            Self::Elul => 6,
            Self::Tishrei => 7,
            Self::Cheshvan => 8,
            Self::Kislev => 9,
            Self::Tevet => 10,
            Self::Shevat => 11,
            Self::Adar => 12,
            Self::AdarII => 13,
        }
    }

    /// Month from its number (1..=13).
    pub const fn from_number(n: u8) -> Option<Self> {
        if n >= 1 && n <= 13 {
            Some(ALL_MONTHS[(n - 1) as usize])
        } else {
            None
        }
    }

    /// Transliterated name, without the leap-year Adar I qualifier.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nisan => "Nisan",
            Self::Iyar => "Iyyar",
            Self::Sivan => "Sivan",
            Self::Tamuz => "Tamuz",
            Self::Av => "Av",
            Self::Elul => "Elul",
            Self::Tishrei => "Tishrei",
            Self::Cheshvan => "Cheshvan",
            Self::Kislev => "Kislev",
            Self::Tevet => "Tevet",
            Self::Shevat => "Sh'vat",
            Self::Adar => "Adar",
            Self::AdarII => "Adar II",
        }
    }

    /// Hebrew name, without the leap-year Adar I qualifier.
    pub const fn hebrew_name(self) -> &'static str {
        match self {
            Self::Nisan => "ניסן",
            Self::Iyar => "אייר",
            Self::Sivan => "סיון",
            Self::Tamuz => "תמוז",
            Self::Av => "אב",
            Self::Elul => "אלול",
            Self::Tishrei => "תשרי",
            Self::Cheshvan => "חשון",
            Self::Kislev => "כסלו",
            Self::Tevet => "טבת",
            Self::Shevat => "שבט",
            Self::Adar => "אדר",
            Self::AdarII => "אדר ב׳",
        }
    }

    /// Name as used in `year`: Adar becomes "Adar I" in a leap year.
    pub fn name_in_year(self, year: i32) -> &'static str {
        if self == Self::Adar && is_leap_year(year) {
            "Adar I"
        } else {
            self.name()
        }
    }

    /// Hebrew name as used in `year`.
    pub fn hebrew_name_in_year(self, year: i32) -> &'static str {
        if self == Self::Adar && is_leap_year(year) {
            "אדר א׳"
        } else {
            self.hebrew_name()
        }
    }

    /// Whether the month occurs in `year`.
    pub fn occurs_in(self, year: i32) -> bool {
        self != Self::AdarII || is_leap_year(year)
    }

    /// The Adar in which Purim and Taanit Esther fall for `year`.
    pub fn purim_adar(year: i32) -> Self {
        if is_leap_year(year) {
            Self::AdarII
        } else {
            Self::Adar
        }
    }

    /// All months in numeric order.
    pub const fn all() -> &'static [HebrewMonth; 13] {
        &ALL_MONTHS
    }
}

impl Display for HebrewMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Months of `year` in calendar order, Tishrei first.
pub fn months_of_year(year: i32) -> impl Iterator<Item = HebrewMonth> {
    let last = if is_leap_year(year) { 13 } else { 12 };
    (7..=last)
        .chain(1..=6)
        .filter_map(HebrewMonth::from_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_sequential() {
        for (i, m) in ALL_MONTHS.iter().enumerate() {
            assert_eq!(m.number() as usize, i + 1);
            assert_eq!(HebrewMonth::from_number(m.number()), Some(*m));
        }
    }

    #[test]
    fn out_of_range_number() {
        assert_eq!(HebrewMonth::from_number(0), None);
        assert_eq!(HebrewMonth::from_number(14), None);
    }

    #[test]
    fn names_nonempty() {
        for m in ALL_MONTHS {
            assert!(!m.name().is_empty());
            assert!(!m.hebrew_name().is_empty());
        }
    }

    #[test]
    fn adar_one_in_leap_year() {
        assert_eq!(HebrewMonth::Adar.name_in_year(5784), "Adar I");
        assert_eq!(HebrewMonth::Adar.name_in_year(5785), "Adar");
        assert_eq!(HebrewMonth::purim_adar(5784), HebrewMonth::AdarII);
    }

    #[test]
    fn leap_year_has_thirteen_months_tishrei_first() {
        let months: Vec<_> = months_of_year(5784).collect();
        assert_eq!(months.len(), 13);
        assert_eq!(months[0], HebrewMonth::Tishrei);
        assert_eq!(months[6], HebrewMonth::AdarII);
        assert_eq!(months[12], HebrewMonth::Elul);
        assert_eq!(months_of_year(5785).count(), 12);
    }
}
