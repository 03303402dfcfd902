//! Named applicability predicates.

use zmanim_calendar::{DayTag, HebrewMonth};

use crate::context::DayContext;
use crate::definition::Condition;

impl Condition {
    /// `Ok` when the condition holds, otherwise the diagnostic code.
    pub fn check(self, ctx: &DayContext<'_>) -> Result<(), &'static str> {
        let (holds, code) = match self {
            Self::IsTaanitNotYomKippur => (
                ctx.tags.contains(DayTag::Taanit) && !ctx.tags.contains(DayTag::YomKippur),
                "not-taanit",
            ),
            Self::IsDawnFast => (
                ctx.tags.contains(DayTag::Taanit)
                    && !ctx.tags.contains(DayTag::YomKippur)
                    && !ctx.tags.contains(DayTag::TishaBAv),
                "not-dawn-fast",
            ),
            Self::ErevTishaBAv => (
                ctx.tomorrow_tags.contains(DayTag::TishaBAv),
                "not-erev-tisha-bav",
            ),
            Self::LateNight => (
                ctx.tags.contains(DayTag::Selichot)
                    || (ctx.hebrew.month() == HebrewMonth::Nisan && ctx.hebrew.day() == 13),
                "not-late-night",
            ),
            Self::AllNight => (
                matches!(
                    (ctx.hebrew.month(), ctx.hebrew.day()),
                    (HebrewMonth::Sivan, 5) | (HebrewMonth::Tishrei, 20)
                ),
                "not-all-night",
            ),
            Self::TzetMelakha => (ctx.tags.is_rest_day(), "not-shabbat"),
            Self::CandleLighting => (ctx.tomorrow_tags.is_rest_day(), "not-shabbat"),
            Self::ErevPesach => (ctx.tags.contains(DayTag::ErevPesach), "not-erev-pesach"),
        };
        if holds { Ok(()) } else { Err(code) }
    }
}
