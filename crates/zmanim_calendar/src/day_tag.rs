//! Day classification used to gate zman rules.
//!
//! A [`DayTags`] set describes one civil day (sunrise to sunset): whether
//! it is Shabbat, a festival, a fast, the eve of one, and so on.

use std::fmt::{Display, Formatter};

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::hebrew_date::HebrewDate;
use crate::holidays::{Holiday, chanukah_day, holidays_on, is_rosh_chodesh, is_yom_tov};
use crate::month::HebrewMonth;
use crate::omer::omer_day;

/// Classification of a civil day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DayTag {
    Shabbat,
    ErevShabbat,
    /// Work-forbidden festival day, Yom Kippur included.
    YomTov,
    ErevYomTov,
    CholHamoed,
    /// Public fast day, Yom Kippur included.
    Taanit,
    YomKippur,
    ErevYomKippur,
    TishaBAv,
    ErevPesach,
    RoshChodesh,
    Chanukah,
    Purim,
    /// Within the 49 days of the Omer count.
    Omer,
    /// Penitential season, 1 Elul to 9 Tishrei.
    Selichot,
}

/// All tags in declaration order.
pub const ALL_DAY_TAGS: [DayTag; 15] = [
    DayTag::Shabbat,
    DayTag::ErevShabbat,
    DayTag::YomTov,
    DayTag::ErevYomTov,
    DayTag::CholHamoed,
    DayTag::Taanit,
    DayTag::YomKippur,
    DayTag::ErevYomKippur,
    DayTag::TishaBAv,
    DayTag::ErevPesach,
    DayTag::RoshChodesh,
    DayTag::Chanukah,
    DayTag::Purim,
    DayTag::Omer,
    DayTag::Selichot,
];

impl DayTag {
    /// Bit position in a [`DayTags`] set.
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Shabbat => "Shabbat",
            Self::ErevShabbat => "Erev Shabbat",
            Self::YomTov => "Yom Tov",
            Self::ErevYomTov => "Erev Yom Tov",
            Self::CholHamoed => "Chol HaMoed",
            Self::Taanit => "Ta'anit",
            Self::YomKippur => "Yom Kippur",
            Self::ErevYomKippur => "Erev Yom Kippur",
            Self::TishaBAv => "Tish'a B'Av",
            Self::ErevPesach => "Erev Pesach",
            Self::RoshChodesh => "Rosh Chodesh",
            Self::Chanukah => "Chanukah",
            Self::Purim => "Purim",
            Self::Omer => "Omer",
            Self::Selichot => "Selichot",
        }
    }

    pub const fn all() -> &'static [DayTag; 15] {
        &ALL_DAY_TAGS
    }
}

impl Display for DayTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Compact set of [`DayTag`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DayTags(u32);

impl DayTags {
    pub const EMPTY: Self = Self(0);

    pub const fn contains(self, tag: DayTag) -> bool {
        self.0 & (1 << tag.index()) != 0
    }

    pub fn insert(&mut self, tag: DayTag) {
        self.0 |= 1 << tag.index();
    }

    pub const fn with(self, tag: DayTag) -> Self {
        Self(self.0 | (1 << tag.index()))
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether any tag in `other` is present.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Shabbat or a festival day: melakha is forbidden.
    pub const fn is_rest_day(self) -> bool {
        self.contains(DayTag::Shabbat) || self.contains(DayTag::YomTov)
    }

    pub fn iter(self) -> impl Iterator<Item = DayTag> {
        ALL_DAY_TAGS.into_iter().filter(move |t| self.contains(*t))
    }
}

impl FromIterator<DayTag> for DayTags {
    fn from_iter<I: IntoIterator<Item = DayTag>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

/// Classify `date`.
///
/// Tags that depend on the following day (ErevYomTov) look one day ahead;
/// at the very end of the supported range the lookahead is skipped.
pub fn day_tags(date: &HebrewDate, in_israel: bool) -> DayTags {
    let mut tags = DayTags::EMPTY;
    match date.weekday() {
        Weekday::Sat => tags.insert(DayTag::Shabbat),
        Weekday::Fri => tags.insert(DayTag::ErevShabbat),
        _ => {}
    }

    let yom_tov = is_yom_tov(date, in_israel);
    if yom_tov {
        tags.insert(DayTag::YomTov);
    } else if let Ok(next) = date.next_day() {
        if is_yom_tov(&next, in_israel) {
            tags.insert(DayTag::ErevYomTov);
        }
    }

    for event in holidays_on(date, in_israel) {
        match event.holiday {
            Holiday::CholHamoedSukkot | Holiday::HoshanaRabba | Holiday::CholHamoedPesach => {
                tags.insert(DayTag::CholHamoed)
            }
            Holiday::YomKippur => {
                tags.insert(DayTag::YomKippur);
                tags.insert(DayTag::Taanit);
            }
            Holiday::TishaBAv => {
                tags.insert(DayTag::TishaBAv);
                tags.insert(DayTag::Taanit);
            }
            Holiday::TzomGedaliah
            | Holiday::AsaraBTevet
            | Holiday::TaanitEsther
            | Holiday::TzomTamuz => tags.insert(DayTag::Taanit),
            Holiday::ErevYomKippur => tags.insert(DayTag::ErevYomKippur),
            Holiday::ErevPesach => tags.insert(DayTag::ErevPesach),
            Holiday::Purim => tags.insert(DayTag::Purim),
            _ => {}
        }
    }

    if is_rosh_chodesh(date) {
        tags.insert(DayTag::RoshChodesh);
    }
    if chanukah_day(date).is_some() {
        tags.insert(DayTag::Chanukah);
    }
    if omer_day(date).is_some() {
        tags.insert(DayTag::Omer);
    }
    if date.month() == HebrewMonth::Elul
        || (date.month() == HebrewMonth::Tishrei && date.day() <= 9)
    {
        tags.insert(DayTag::Selichot);
    }
    tags
}
