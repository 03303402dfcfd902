//! Per-id adjustments applied after a definition is computed.
//!
//! A handler may relabel a result or replace its instant with a chained
//! computation (candle lighting after a rest day ends at nightfall).

use chrono::Weekday;

use zmanim_calendar::DayTag;

use crate::compute::{Computed, OffsetMeta, SunriseResult, stringent_tzet, tzet_melakha};
use crate::context::DayContext;
use crate::definition::Labels;

/// A computed value with its labels, before conditions and rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct Pending {
    pub computed: Computed,
    pub labels: Labels,
    pub merge_labels: Option<Labels>,
}

pub type SpecialCase = fn(&mut Pending, &DayContext<'_>);

const SPECIAL_CASES: [(&str, SpecialCase); 5] = [
    ("sunrise", sunrise),
    ("candleLighting", candle_lighting),
    ("tzetMelakha", tzet_melakha_label),
    ("tzetStringent", end_of_fast),
    ("tzetRabbeinuTam", rabbeinu_tam),
];

/// Handler registered for `id`, if any.
pub fn special_case(id: &str) -> Option<SpecialCase> {
    SPECIAL_CASES
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, handler)| *handler)
}

fn labels(en: &str, he: &str) -> Labels {
    Labels::from([("en".to_string(), en.to_string()), ("he".to_string(), he.to_string())])
}

fn sunrise(p: &mut Pending, _ctx: &DayContext<'_>) {
    match p.computed {
        Computed::Sunrise(SunriseResult::SeaLevel { .. }) => {
            p.labels = labels("Sunrise (sea level)", "הנץ החמה (גובה פני הים)");
        }
        Computed::Sunrise(SunriseResult::Visible { flags, .. }) => {
            p.labels = if flags.approximate {
                labels("Visible Sunrise (approx.)", "הנץ החמה הנראה (משוער)")
            } else {
                labels("Visible Sunrise", "הנץ החמה הנראה")
            };
        }
        _ => {}
    }
}

fn candle_lighting(p: &mut Pending, ctx: &DayContext<'_>) {
    if !(ctx.tags.is_rest_day() && ctx.tomorrow_tags.is_rest_day()) {
        return;
    }
    // Yom Tov on Friday: light before sunset for Shabbat
    if ctx.hebrew.weekday() == Weekday::Fri {
        return;
    }
    if ctx.tags.contains(DayTag::Shabbat) {
        p.computed = tzet_melakha(ctx);
        p.labels = labels("Candle lighting (after Shabbat ends)", "הדלקת נרות (אחרי צאת השבת)");
    } else {
        p.computed = stringent_tzet(ctx);
        p.labels = labels("Candle lighting (after nightfall)", "הדלקת נרות (אחרי צאת הכוכבים)");
    }
}

fn tzet_melakha_label(p: &mut Pending, ctx: &DayContext<'_>) {
    let shabbat = ctx.tags.contains(DayTag::Shabbat);
    let yom_tov = ctx.tags.contains(DayTag::YomTov);
    let base = match (shabbat, yom_tov) {
        (true, true) => labels("End of Shabbat and Yom Tov", "צאת השבת והחג"),
        (true, false) => labels("End of Shabbat", "צאת השבת"),
        (false, true) => labels("End of Yom Tov", "צאת החג"),
        (false, false) => p.labels.clone(),
    };
    p.labels = match p.computed.offset_meta() {
        Some(meta) => base
            .into_iter()
            .map(|(locale, text)| {
                let suffix = modifier(meta, &locale);
                (locale, format!("{text}{suffix}"))
            })
            .collect(),
        None => base,
    };
}

fn modifier(meta: OffsetMeta, locale: &str) -> String {
    match meta {
        OffsetMeta::Degrees(d) => format!(" ({d}°)"),
        OffsetMeta::Minutes(m) if locale == "he" => format!(" ({m} דק׳)"),
        OffsetMeta::Minutes(m) => format!(" ({m} min)"),
    }
}

fn end_of_fast(p: &mut Pending, ctx: &DayContext<'_>) {
    if ctx.tags.contains(DayTag::Taanit) && !ctx.tags.contains(DayTag::YomKippur) {
        let l = labels("End of fast", "סוף הצום");
        p.merge_labels = Some(l.clone());
        p.labels = l;
    }
}

fn rabbeinu_tam(p: &mut Pending, ctx: &DayContext<'_>) {
    let same = p.computed.instant().is_some()
        && p.computed.instant() == tzet_melakha(ctx).instant();
    if same {
        p.labels = labels("Nightfall / Rabbeinu Tam", "צאת הכוכבים / רבנו תם");
    }
}
