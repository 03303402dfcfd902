//! Weekly Torah reading (parashat hashavua).
//!
//! The annual cycle starts with Bereshit on the first Shabbat after
//! Simchat Torah and ends with Nitzavim (or Nitzavim-Vayeilech) before the
//! next Rosh Hashana. Shabbatot that coincide with Pesach or Shavuot have a
//! festival reading instead. The year is split at Pesach, Shavuot and
//! Tisha B'Av; within each segment, readings that do not fit are doubled
//! up following the customary order of combinations, and surplus Shabbatot
//! push later readings forward.
//!
//! Israel and the diaspora diverge when the eighth day of Pesach or the
//! second day of Shavuot falls on Shabbat.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::hebrew_date::HebrewDate;
use crate::month::HebrewMonth;
use crate::year::{is_leap_year, new_year_fixed};

/// The 54 parshiyot in Torah order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Parsha {
    Bereshit,
    Noach,
    LechLecha,
    Vayera,
    ChayeiSara,
    Toldot,
    Vayetzei,
    Vayishlach,
    Vayeshev,
    Miketz,
    Vayigash,
    Vayechi,
    Shemot,
    Vaera,
    Bo,
    Beshalach,
    Yitro,
    Mishpatim,
    Terumah,
    Tetzaveh,
    KiTisa,
    Vayakhel,
    Pekudei,
    Vayikra,
    Tzav,
    Shmini,
    Tazria,
    Metzora,
    AchreiMot,
    Kedoshim,
    Emor,
    Behar,
    Bechukotai,
    Bamidbar,
    Nasso,
    Behaalotcha,
    Shlach,
    Korach,
    Chukat,
    Balak,
    Pinchas,
    Matot,
    Masei,
    Devarim,
    Vaetchanan,
    Eikev,
    Reeh,
    Shoftim,
    KiTeitzei,
    KiTavo,
    Nitzavim,
    Vayeilech,
    Haazinu,
    VezotHaberakhah,
}

/// All parshiyot in Torah order.
pub const ALL_PARSHIYOT: [Parsha; 54] = [
    Parsha::Bereshit,
    Parsha::Noach,
    Parsha::LechLecha,
    Parsha::Vayera,
    Parsha::ChayeiSara,
    Parsha::Toldot,
    Parsha::Vayetzei,
    Parsha::Vayishlach,
    Parsha::Vayeshev,
    Parsha::Miketz,
    Parsha::Vayigash,
    Parsha::Vayechi,
    Parsha::Shemot,
    Parsha::Vaera,
    Parsha::Bo,
    Parsha::Beshalach,
    Parsha::Yitro,
    Parsha::Mishpatim,
    Parsha::Terumah,
    Parsha::Tetzaveh,
    Parsha::KiTisa,
    Parsha::Vayakhel,
    Parsha::Pekudei,
    Parsha::Vayikra,
    Parsha::Tzav,
    Parsha::Shmini,
    Parsha::Tazria,
    Parsha::Metzora,
    Parsha::AchreiMot,
    Parsha::Kedoshim,
    Parsha::Emor,
    Parsha::Behar,
    Parsha::Bechukotai,
    Parsha::Bamidbar,
    Parsha::Nasso,
    Parsha::Behaalotcha,
    Parsha::Shlach,
    Parsha::Korach,
    Parsha::Chukat,
    Parsha::Balak,
    Parsha::Pinchas,
    Parsha::Matot,
    Parsha::Masei,
    Parsha::Devarim,
    Parsha::Vaetchanan,
    Parsha::Eikev,
    Parsha::Reeh,
    Parsha::Shoftim,
    Parsha::KiTeitzei,
    Parsha::KiTavo,
    Parsha::Nitzavim,
    Parsha::Vayeilech,
    Parsha::Haazinu,
    Parsha::VezotHaberakhah,
];

impl Parsha {
    /// 0-based position in the Torah.
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(i: u8) -> Option<Self> {
        if (i as usize) < ALL_PARSHIYOT.len() {
            Some(ALL_PARSHIYOT[i as usize])
        } else {
            None
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bereshit => "Bereshit",
            Self::Noach => "Noach",
            Self::LechLecha => "Lech-Lecha",
            Self::Vayera => "Vayera",
            Self::ChayeiSara => "Chayei Sara",
            Self::Toldot => "Toldot",
            Self::Vayetzei => "Vayetzei",
            Self::Vayishlach => "Vayishlach",
            Self::Vayeshev => "Vayeshev",
            Self::Miketz => "Miketz",
            Self::Vayigash => "Vayigash",
            Self::Vayechi => "Vayechi",
            Self::Shemot => "Shemot",
            Self::Vaera => "Vaera",
            Self::Bo => "Bo",
            Self::Beshalach => "Beshalach",
            Self::Yitro => "Yitro",
            Self::Mishpatim => "Mishpatim",
            Self::Terumah => "Terumah",
            Self::Tetzaveh => "Tetzaveh",
            Self::KiTisa => "Ki Tisa",
            Self::Vayakhel => "Vayakhel",
            Self::Pekudei => "Pekudei",
            Self::Vayikra => "Vayikra",
            Self::Tzav => "Tzav",
            Self::Shmini => "Shmini",
            Self::Tazria => "Tazria",
            Self::Metzora => "Metzora",
            Self::AchreiMot => "Achrei Mot",
            Self::Kedoshim => "Kedoshim",
            Self::Emor => "Emor",
            Self::Behar => "Behar",
            Self::Bechukotai => "Bechukotai",
            Self::Bamidbar => "Bamidbar",
            Self::Nasso => "Nasso",
            Self::Behaalotcha => "Beha'alotcha",
            Self::Shlach => "Sh'lach",
            Self::Korach => "Korach",
            Self::Chukat => "Chukat",
            Self::Balak => "Balak",
            Self::Pinchas => "Pinchas",
            Self::Matot => "Matot",
            Self::Masei => "Masei",
            Self::Devarim => "Devarim",
            Self::Vaetchanan => "Vaetchanan",
            Self::Eikev => "Eikev",
            Self::Reeh => "Re'eh",
            Self::Shoftim => "Shoftim",
            Self::KiTeitzei => "Ki Teitzei",
            Self::KiTavo => "Ki Tavo",
            Self::Nitzavim => "Nitzavim",
            Self::Vayeilech => "Vayeilech",
            Self::Haazinu => "Ha'azinu",
            Self::VezotHaberakhah => "Vezot Haberakhah",
        }
    }

    pub const fn hebrew_name(self) -> &'static str {
        match self {
            Self::Bereshit => "בראשית",
            Self::Noach => "נח",
            Self::LechLecha => "לך לך",
            Self::Vayera => "וירא",
            Self::ChayeiSara => "חיי שרה",
            Self::Toldot => "תולדות",
            Self::Vayetzei => "ויצא",
            Self::Vayishlach => "וישלח",
            Self::Vayeshev => "וישב",
            Self::Miketz => "מקץ",
            Self::Vayigash => "ויגש",
            Self::Vayechi => "ויחי",
            Self::Shemot => "שמות",
            Self::Vaera => "וארא",
            Self::Bo => "בא",
            Self::Beshalach => "בשלח",
            Self::Yitro => "יתרו",
            Self::Mishpatim => "משפטים",
            Self::Terumah => "תרומה",
            Self::Tetzaveh => "תצוה",
            Self::KiTisa => "כי תשא",
            Self::Vayakhel => "ויקהל",
            Self::Pekudei => "פקודי",
            Self::Vayikra => "ויקרא",
            Self::Tzav => "צו",
            Self::Shmini => "שמיני",
            Self::Tazria => "תזריע",
            Self::Metzora => "מצורע",
            Self::AchreiMot => "אחרי מות",
            Self::Kedoshim => "קדושים",
            Self::Emor => "אמור",
            Self::Behar => "בהר",
            Self::Bechukotai => "בחקתי",
            Self::Bamidbar => "במדבר",
            Self::Nasso => "נשא",
            Self::Behaalotcha => "בהעלתך",
            Self::Shlach => "שלח",
            Self::Korach => "קרח",
            Self::Chukat => "חקת",
            Self::Balak => "בלק",
            Self::Pinchas => "פינחס",
            Self::Matot => "מטות",
            Self::Masei => "מסעי",
            Self::Devarim => "דברים",
            Self::Vaetchanan => "ואתחנן",
            Self::Eikev => "עקב",
            Self::Reeh => "ראה",
            Self::Shoftim => "שופטים",
            Self::KiTeitzei => "כי תצא",
            Self::KiTavo => "כי תבוא",
            Self::Nitzavim => "נצבים",
            Self::Vayeilech => "וילך",
            Self::Haazinu => "האזינו",
            Self::VezotHaberakhah => "וזאת הברכה",
        }
    }

    pub const fn all() -> &'static [Parsha; 54] {
        &ALL_PARSHIYOT
    }
}

/// The reading for one Shabbat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parasha {
    Single(Parsha),
    /// Two consecutive parshiyot read together.
    Combined(Parsha, Parsha),
}

impl Parasha {
    /// First (or only) parsha read.
    pub const fn first(self) -> Parsha {
        match self {
            Self::Single(p) | Self::Combined(p, _) => p,
        }
    }

    pub const fn is_combined(self) -> bool {
        matches!(self, Self::Combined(..))
    }

    /// Name joined with a hyphen for combined readings.
    pub fn name(self) -> String {
        match self {
            Self::Single(p) => p.name().to_string(),
            Self::Combined(a, b) => format!("{}-{}", a.name(), b.name()),
        }
    }

    pub fn hebrew_name(self) -> String {
        match self {
            Self::Single(p) => p.hebrew_name().to_string(),
            Self::Combined(a, b) => format!("{}-{}", a.hebrew_name(), b.hebrew_name()),
        }
    }
}

impl Display for Parasha {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

// Parshiyot that may be combined with their successor.
const VAYAKHEL: u8 = Parsha::Vayakhel.index();
const TAZRIA: u8 = Parsha::Tazria.index();
const ACHREI_MOT: u8 = Parsha::AchreiMot.index();
const BEHAR: u8 = Parsha::Behar.index();
const CHUKAT: u8 = Parsha::Chukat.index();
const MATOT: u8 = Parsha::Matot.index();
const NITZAVIM: u8 = Parsha::Nitzavim.index();

const SATURDAY: i64 = 6;

const fn shabbat_on_or_after(fixed: i64) -> i64 {
    fixed + (SATURDAY - fixed).rem_euclid(7)
}

const fn shabbat_on_or_before(fixed: i64) -> i64 {
    fixed - (fixed - SATURDAY).rem_euclid(7)
}

/// Segment of the year read as a unit.
struct Segment {
    shabbatot: Vec<i64>,
    /// Last parsha read in the segment.
    last: u8,
    /// Combinable parshiyot in the order they are doubled up.
    combinable: &'static [u8],
}

/// All Shabbat readings from Bereshit to the end of a Hebrew year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParashaSchedule {
    year: i32,
    in_israel: bool,
    readings: Vec<(i64, Parasha)>,
}

impl ParashaSchedule {
    /// Schedule of `year` from Bereshit (after Simchat Torah) to Elul.
    pub fn for_year(year: i32, in_israel: bool) -> Result<Self, CalendarError> {
        let simchat_torah_day = if in_israel { 22 } else { 23 };
        let simchat_torah = HebrewDate::new(year, HebrewMonth::Tishrei, simchat_torah_day)?;
        let pesach = HebrewDate::new(year, HebrewMonth::Nisan, 15)?.to_fixed();
        let shavuot = HebrewDate::new(year, HebrewMonth::Sivan, 6)?.to_fixed();
        let tisha_bav = HebrewDate::new(year, HebrewMonth::Av, 9)?.to_fixed();
        let next_new_year = new_year_fixed(year + 1);

        let pesach_last = pesach + if in_israel { 6 } else { 7 };
        let shavuot_last = shavuot + if in_israel { 0 } else { 1 };
        let is_festival =
            |s: i64| (pesach..=pesach_last).contains(&s) || (shavuot..=shavuot_last).contains(&s);

        let mut shabbatot = Vec::with_capacity(52);
        let mut s = shabbat_on_or_after(simchat_torah.to_fixed() + 1);
        while s < next_new_year {
            if !is_festival(s) {
                shabbatot.push(s);
            }
            s += 7;
        }

        let chazon = shabbat_on_or_before(tisha_bav);
        // Nitzavim-Vayeilech are joined when Rosh Hashana falls on Thursday
        // or Shabbat, leaving no Shabbat Shuva for Vayeilech.
        let nitzavim_vayeilech = matches!(next_new_year.rem_euclid(7), 4 | 6);
        let leap = is_leap_year(year);

        let segments = [
            Segment {
                shabbatot: shabbatot.iter().copied().filter(|&s| s < pesach).collect(),
                last: if leap { Parsha::Metzora.index() } else { Parsha::Tzav.index() },
                combinable: if leap { &[VAYAKHEL, TAZRIA] } else { &[VAYAKHEL] },
            },
            Segment {
                shabbatot: shabbatot
                    .iter()
                    .copied()
                    .filter(|&s| s > pesach && s < shavuot)
                    .collect(),
                last: Parsha::Bamidbar.index(),
                combinable: &[TAZRIA, ACHREI_MOT, BEHAR],
            },
            Segment {
                shabbatot: shabbatot
                    .iter()
                    .copied()
                    .filter(|&s| s > shavuot && s <= chazon)
                    .collect(),
                last: Parsha::Devarim.index(),
                combinable: &[MATOT, CHUKAT],
            },
            Segment {
                shabbatot: shabbatot.iter().copied().filter(|&s| s > chazon).collect(),
                last: if nitzavim_vayeilech { Parsha::Vayeilech.index() } else { NITZAVIM },
                combinable: &[NITZAVIM],
            },
        ];

        let mut readings = Vec::with_capacity(shabbatot.len());
        let mut next: u8 = 0;
        for seg in &segments {
            let needed = (seg.last + 1).saturating_sub(next) as usize;
            let shortfall = needed.saturating_sub(seg.shabbatot.len());
            let doubled: Vec<u8> = seg
                .combinable
                .iter()
                .copied()
                .filter(|&p| p >= next && p < seg.last)
                .take(shortfall)
                .collect();
            for &day in &seg.shabbatot {
                let Some(first) = Parsha::from_index(next) else {
                    break;
                };
                if let (true, Some(second)) = (doubled.contains(&next), Parsha::from_index(next + 1)) {
                    readings.push((day, Parasha::Combined(first, second)));
                    next += 2;
                } else {
                    readings.push((day, Parasha::Single(first)));
                    next += 1;
                }
            }
        }
        tracing::trace!(year, in_israel, count = readings.len(), "parasha schedule");

        Ok(Self {
            year,
            in_israel,
            readings,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn in_israel(&self) -> bool {
        self.in_israel
    }

    /// Reading on the Shabbat with fixed day `fixed`, if any.
    pub fn reading_on_fixed(&self, fixed: i64) -> Option<Parasha> {
        self.readings
            .binary_search_by_key(&fixed, |(d, _)| *d)
            .ok()
            .map(|i| self.readings[i].1)
    }

    /// (date, reading) pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (HebrewDate, Parasha)> + '_ {
        self.readings
            .iter()
            .filter_map(|&(d, p)| HebrewDate::from_fixed(d).ok().map(|h| (h, p)))
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

/// Reading for a Shabbat between Rosh Hashana and Simchat Torah.
fn tishrei_reading(date: &HebrewDate) -> Option<Parasha> {
    let new_year_weekday = new_year_fixed(date.year()).rem_euclid(7);
    match date.day() {
        2..=9 if matches!(new_year_weekday, 1 | 2) => Some(Parasha::Single(Parsha::Vayeilech)),
        2..=9 | 11..=14 => Some(Parasha::Single(Parsha::Haazinu)),
        _ => None,
    }
}

/// Torah reading on `date`, or `None` if it is not Shabbat or the Shabbat
/// has a festival reading.
pub fn parasha_on(date: &HebrewDate, in_israel: bool) -> Result<Option<Parasha>, CalendarError> {
    if !date.is_shabbat() {
        return Ok(None);
    }
    let simchat_torah = if in_israel { 22 } else { 23 };
    if date.month() == HebrewMonth::Tishrei && date.day() <= simchat_torah {
        return Ok(tishrei_reading(date));
    }
    let schedule = ParashaSchedule::for_year(date.year(), in_israel)?;
    Ok(schedule.reading_on_fixed(date.to_fixed()))
}

/// The first Shabbat on or after `date` that has a weekly reading.
pub fn upcoming_parasha(
    date: &HebrewDate,
    in_israel: bool,
) -> Result<(HebrewDate, Parasha), CalendarError> {
    let mut shabbat = date.upcoming_shabbat()?;
    // At most three consecutive Shabbatot lack a reading (Yom Kippur,
    // Sukkot, Shemini Atzeret), so this terminates quickly.
    loop {
        if let Some(p) = parasha_on(&shabbat, in_israel)? {
            return Ok((shabbat, p));
        }
        shabbat = shabbat.add_days(7)?;
    }
}
