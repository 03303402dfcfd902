//! Daf Yomi: the daily page of the Babylonian Talmud.
//!
//! The first cycle began on 11 September 1923. Through cycle 7 the
//! Jerusalem tractate Shekalim was studied on 13 pages (2,702 days per
//! cycle); from cycle 8, which began on 24 June 1975, it uses the Vilna
//! edition's 22 pages (2,711 days).
//!
//! Kinnim, Tamid and Midot are printed inside Meilah's volume; their page
//! numbers continue from where they sit in that volume.

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use zmanim_time::{fixed_from_gregorian, fixed_from_naive};

use crate::error::CalendarError;

/// A tractate of the Babylonian Talmud in Daf Yomi order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Tractate {
    Berachot,
    Shabbat,
    Eruvin,
    Pesachim,
    Shekalim,
    Yoma,
    Sukkah,
    Beitzah,
    RoshHashana,
    Taanit,
    Megillah,
    MoedKatan,
    Chagigah,
    Yevamot,
    Ketubot,
    Nedarim,
    Nazir,
    Sotah,
    Gitin,
    Kiddushin,
    BavaKamma,
    BavaMetzia,
    BavaBatra,
    Sanhedrin,
    Makkot,
    Shevuot,
    AvodahZarah,
    Horayot,
    Zevachim,
    Menachot,
    Chullin,
    Bechorot,
    Arachin,
    Temurah,
    Keritot,
    Meilah,
    Kinnim,
    Tamid,
    Midot,
    Niddah,
}

/// Tractates in Daf Yomi order.
pub const ALL_TRACTATES: [Tractate; 40] = [
    Tractate::Berachot,
    Tractate::Shabbat,
    Tractate::Eruvin,
    Tractate::Pesachim,
    Tractate::Shekalim,
    Tractate::Yoma,
    Tractate::Sukkah,
    Tractate::Beitzah,
    Tractate::RoshHashana,
    Tractate::Taanit,
    Tractate::Megillah,
    Tractate::MoedKatan,
    Tractate::Chagigah,
    Tractate::Yevamot,
    Tractate::Ketubot,
    Tractate::Nedarim,
    Tractate::Nazir,
    Tractate::Sotah,
    Tractate::Gitin,
    Tractate::Kiddushin,
    Tractate::BavaKamma,
    Tractate::BavaMetzia,
    Tractate::BavaBatra,
    Tractate::Sanhedrin,
    Tractate::Makkot,
    Tractate::Shevuot,
    Tractate::AvodahZarah,
    Tractate::Horayot,
    Tractate::Zevachim,
    Tractate::Menachot,
    Tractate::Chullin,
    Tractate::Bechorot,
    Tractate::Arachin,
    Tractate::Temurah,
    Tractate::Keritot,
    Tractate::Meilah,
    Tractate::Kinnim,
    Tractate::Tamid,
    Tractate::Midot,
    Tractate::Niddah,
];

impl Tractate {
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Berachot => "Berachot",
            Self::Shabbat => "Shabbat",
            Self::Eruvin => "Eruvin",
            Self::Pesachim => "Pesachim",
            Self::Shekalim => "Shekalim",
            Self::Yoma => "Yoma",
            Self::Sukkah => "Sukkah",
            Self::Beitzah => "Beitzah",
            Self::RoshHashana => "Rosh Hashana",
            Self::Taanit => "Taanit",
            Self::Megillah => "Megillah",
            Self::MoedKatan => "Moed Katan",
            Self::Chagigah => "Chagigah",
            Self::Yevamot => "Yevamot",
            Self::Ketubot => "Ketubot",
            Self::Nedarim => "Nedarim",
            Self::Nazir => "Nazir",
            Self::Sotah => "Sotah",
            Self::Gitin => "Gitin",
            Self::Kiddushin => "Kiddushin",
            Self::BavaKamma => "Baba Kamma",
            Self::BavaMetzia => "Baba Metzia",
            Self::BavaBatra => "Baba Batra",
            Self::Sanhedrin => "Sanhedrin",
            Self::Makkot => "Makkot",
            Self::Shevuot => "Shevuot",
            Self::AvodahZarah => "Avodah Zarah",
            Self::Horayot => "Horayot",
            Self::Zevachim => "Zevachim",
            Self::Menachot => "Menachot",
            Self::Chullin => "Chullin",
            Self::Bechorot => "Bechorot",
            Self::Arachin => "Arachin",
            Self::Temurah => "Temurah",
            Self::Keritot => "Keritot",
            Self::Meilah => "Meilah",
            Self::Kinnim => "Kinnim",
            Self::Tamid => "Tamid",
            Self::Midot => "Midot",
            Self::Niddah => "Niddah",
        }
    }

    pub const fn hebrew_name(self) -> &'static str {
        match self {
            Self::Berachot => "ברכות",
            Self::Shabbat => "שבת",
            Self::Eruvin => "עירובין",
            Self::Pesachim => "פסחים",
            Self::Shekalim => "שקלים",
            Self::Yoma => "יומא",
            Self::Sukkah => "סוכה",
            Self::Beitzah => "ביצה",
            Self::RoshHashana => "ראש השנה",
            Self::Taanit => "תענית",
            Self::Megillah => "מגילה",
            Self::MoedKatan => "מועד קטן",
            Self::Chagigah => "חגיגה",
            Self::Yevamot => "יבמות",
            Self::Ketubot => "כתובות",
            Self::Nedarim => "נדרים",
            Self::Nazir => "נזיר",
            Self::Sotah => "סוטה",
            Self::Gitin => "גיטין",
            Self::Kiddushin => "קידושין",
            Self::BavaKamma => "בבא קמא",
            Self::BavaMetzia => "בבא מציעא",
            Self::BavaBatra => "בבא בתרא",
            Self::Sanhedrin => "סנהדרין",
            Self::Makkot => "מכות",
            Self::Shevuot => "שבועות",
            Self::AvodahZarah => "עבודה זרה",
            Self::Horayot => "הוריות",
            Self::Zevachim => "זבחים",
            Self::Menachot => "מנחות",
            Self::Chullin => "חולין",
            Self::Bechorot => "בכורות",
            Self::Arachin => "ערכין",
            Self::Temurah => "תמורה",
            Self::Keritot => "כריתות",
            Self::Meilah => "מעילה",
            Self::Kinnim => "קנים",
            Self::Tamid => "תמיד",
            Self::Midot => "מדות",
            Self::Niddah => "נדה",
        }
    }

    /// Last page number in the modern cycle. Study starts on page 2.
    pub const fn pages(self) -> u16 {
        match self {
            Self::Berachot => 64,
            Self::Shabbat => 157,
            Self::Eruvin => 105,
            Self::Pesachim => 121,
            Self::Shekalim => 22,
            Self::Yoma => 88,
            Self::Sukkah => 56,
            Self::Beitzah => 40,
            Self::RoshHashana => 35,
            Self::Taanit => 31,
            Self::Megillah => 32,
            Self::MoedKatan => 29,
            Self::Chagigah => 27,
            Self::Yevamot => 122,
            Self::Ketubot => 112,
            Self::Nedarim => 91,
            Self::Nazir => 66,
            Self::Sotah => 49,
            Self::Gitin => 90,
            Self::Kiddushin => 82,
            Self::BavaKamma => 119,
            Self::BavaMetzia => 119,
            Self::BavaBatra => 176,
            Self::Sanhedrin => 113,
            Self::Makkot => 24,
            Self::Shevuot => 49,
            Self::AvodahZarah => 76,
            Self::Horayot => 14,
            Self::Zevachim => 120,
            Self::Menachot => 110,
            Self::Chullin => 142,
            Self::Bechorot => 61,
            Self::Arachin => 34,
            Self::Temurah => 34,
            Self::Keritot => 28,
            Self::Meilah => 22,
            Self::Kinnim => 4,
            Self::Tamid => 10,
            Self::Midot => 4,
            Self::Niddah => 73,
        }
    }

    /// Offset added to the counted page for tractates printed inside
    /// another volume.
    const fn page_offset(self) -> u16 {
        match self {
            Self::Kinnim => 21,
            Self::Tamid => 24,
            Self::Midot => 32,
            _ => 0,
        }
    }

    pub const fn all() -> &'static [Tractate; 40] {
        &ALL_TRACTATES
    }
}

impl Display for Tractate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// First day of cycle 1.
pub const DAF_YOMI_START: (i32, u32, u32) = (1923, 9, 11);
/// First day of cycle 8, the first with 22-page Shekalim.
pub const SHEKALIM_CHANGE: (i32, u32, u32) = (1975, 6, 24);

const OLD_SHEKALIM_PAGES: u16 = 13;
const OLD_CYCLE_DAYS: i64 = 2702;
const CYCLE_DAYS: i64 = 2711;

/// One day's page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DafYomi {
    /// 1-based cycle number.
    pub cycle: u16,
    pub tractate: Tractate,
    /// Page (daf) number, starting at 2.
    pub page: u16,
}

impl Display for DafYomi {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.tractate, self.page)
    }
}

/// Daf Yomi for a Gregorian date.
pub fn daf_yomi(date: NaiveDate) -> Result<DafYomi, CalendarError> {
    let fixed = fixed_from_naive(date)?;
    let start = fixed_from_gregorian(DAF_YOMI_START.0, DAF_YOMI_START.1, DAF_YOMI_START.2)?;
    let change = fixed_from_gregorian(SHEKALIM_CHANGE.0, SHEKALIM_CHANGE.1, SHEKALIM_CHANGE.2)?;
    if fixed < start {
        return Err(CalendarError::BeforeDafYomi);
    }

    let (cycle, mut day, old_shekalim) = if fixed >= change {
        let n = fixed - change;
        (8 + n / CYCLE_DAYS, n % CYCLE_DAYS, false)
    } else {
        let n = fixed - start;
        (1 + n / OLD_CYCLE_DAYS, n % OLD_CYCLE_DAYS, true)
    };

    for tractate in ALL_TRACTATES {
        let last_page = if old_shekalim && tractate == Tractate::Shekalim {
            OLD_SHEKALIM_PAGES
        } else {
            tractate.pages()
        };
        let studied = i64::from(last_page) - 1;
        if day < studied {
            return Ok(DafYomi {
                cycle: cycle as u16,
                tractate,
                page: (day + 2) as u16 + tractate.page_offset(),
            });
        }
        day -= studied;
    }
    // The tractate page counts sum to the cycle length.
    Err(CalendarError::DateRange(format!("Daf Yomi day {day} past end of cycle")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on(y: i32, m: u32, d: u32) -> DafYomi {
        daf_yomi(NaiveDate::from_ymd_opt(y, m, d).unwrap()).unwrap()
    }

    #[test]
    fn cycle_lengths_match_page_counts() {
        let modern: i64 = ALL_TRACTATES.iter().map(|t| t.pages() as i64 - 1).sum();
        assert_eq!(modern, CYCLE_DAYS);
        let old = modern - (Tractate::Shekalim.pages() - OLD_SHEKALIM_PAGES) as i64;
        assert_eq!(old, OLD_CYCLE_DAYS);
    }

    #[test]
    fn first_day() {
        let d = on(1923, 9, 11);
        assert_eq!((d.cycle, d.tractate, d.page), (1, Tractate::Berachot, 2));
    }

    #[test]
    fn before_first_cycle() {
        assert_eq!(
            daf_yomi(NaiveDate::from_ymd_opt(1923, 9, 10).unwrap()),
            Err(CalendarError::BeforeDafYomi)
        );
    }

    #[test]
    fn siyum_hashas_cycle_14() {
        let d = on(2020, 1, 5);
        assert_eq!((d.cycle, d.tractate, d.page), (14, Tractate::Berachot, 2));
        let last = on(2020, 1, 4);
        assert_eq!((last.cycle, last.tractate, last.page), (13, Tractate::Niddah, 73));
    }

    #[test]
    fn kinnim_pages_continue_meilah_volume() {
        let kinnim_start: i64 = ALL_TRACTATES
            .iter()
            .take_while(|t| **t != Tractate::Kinnim)
            .map(|t| t.pages() as i64 - 1)
            .sum();
        let date =
            NaiveDate::from_ymd_opt(2020, 1, 5).unwrap() + chrono::Days::new(kinnim_start as u64);
        let k = daf_yomi(date).unwrap();
        assert_eq!((k.tractate, k.page), (Tractate::Kinnim, 23));
    }

    #[test]
    fn display() {
        assert_eq!(on(2020, 1, 5).to_string(), "Berachot 2");
    }
}
