use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use zmanim_astro::{AstronomicalDay, GeoCoordinate, SolarInstant};
use zmanim_calendar::{ALL_MONTHS, HebrewDate, HebrewMonth, daf_yomi, molad, parasha_on, upcoming_parasha};
use zmanim_engine::{DisplayState, VisibleSunriseTable, ZmanConfig, ZmanRuleEngine, ZmanTable};
use zmanim_rs::DayCursor;
use zmanim_time::to_local;

#[derive(Parser)]
#[command(name = "zmanim", about = "Hebrew calendar and halachic times")]
struct Cli {
    /// Log pipeline decisions (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct LocationArgs {
    /// Latitude in degrees, north positive
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,
    /// Longitude in degrees, east positive
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,
    /// Elevation in metres
    #[arg(long, default_value = "0")]
    elevation: f64,
    /// IANA time zone (e.g. Asia/Jerusalem)
    #[arg(long)]
    tz: Option<String>,
    /// JSON file with a list of named locations
    #[arg(long)]
    locations: Option<PathBuf>,
    /// Name of the entry to use from --locations
    #[arg(long)]
    location: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Hebrew date of a Gregorian date
    HebrewDate {
        /// Gregorian date (YYYY-MM-DD)
        date: NaiveDate,
    },
    /// Gregorian date of a Hebrew date
    Gregorian {
        year: i32,
        /// Month name (Nisan, "Adar II", ...) or number, Nisan = 1
        month: String,
        day: u8,
    },
    /// Molad of a Hebrew month
    Molad {
        year: i32,
        /// Month name or number, Nisan = 1
        month: String,
    },
    /// Sunrise, sunset and twilight for a date and place
    Sun {
        date: NaiveDate,
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Evaluate a zman table for a date and place
    Zmanim {
        date: NaiveDate,
        #[command(flatten)]
        location: LocationArgs,
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// JSON rule table (default: built-in table)
        #[arg(long)]
        table: Option<PathBuf>,
        /// JSON visible-sunrise table
        #[arg(long)]
        visible_sunrise: Option<PathBuf>,
        /// Include suppressed and invalid rows
        #[arg(long)]
        all: bool,
        /// Print the sheet as JSON
        #[arg(long)]
        json: bool,
        /// Label locale
        #[arg(long, default_value = "en")]
        locale: String,
    },
    /// Day-by-day listing of a month
    Calendar {
        year: i32,
        /// Gregorian month number, or a Hebrew month name with --hebrew
        month: String,
        /// Treat year and month as Hebrew
        #[arg(long)]
        hebrew: bool,
        /// Israeli festival calendar
        #[arg(long)]
        israel: bool,
    },
    /// Weekly Torah reading for a Shabbat, or the next one
    Parasha {
        date: NaiveDate,
        #[arg(long)]
        israel: bool,
    },
    /// Daf Yomi page for a date
    DafYomi { date: NaiveDate },
    /// Geodesic and rhumb-line distance between two points
    Geodesic {
        #[arg(allow_hyphen_values = true)]
        lat1: f64,
        #[arg(allow_hyphen_values = true)]
        lon1: f64,
        #[arg(allow_hyphen_values = true)]
        lat2: f64,
        #[arg(allow_hyphen_values = true)]
        lon2: f64,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_month(s: &str, year: i32) -> Result<HebrewMonth> {
    if let Ok(n) = s.parse::<u8>() {
        return HebrewMonth::from_number(n).ok_or_else(|| anyhow!("month number {n} not in 1..=13"));
    }
    let key = |t: &str| {
        t.chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase()
    };
    let wanted = key(s);
    if wanted == "adari" {
        return Ok(HebrewMonth::Adar);
    }
    ALL_MONTHS
        .into_iter()
        .find(|m| key(m.name()) == wanted || key(m.name_in_year(year)) == wanted)
        .ok_or_else(|| anyhow!("unknown Hebrew month: {s}"))
}

fn resolve_location(args: &LocationArgs) -> Result<GeoCoordinate> {
    if let Some(path) = &args.locations {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let list: Vec<GeoCoordinate> =
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        return match &args.location {
            Some(name) => list
                .into_iter()
                .find(|g| g.name().eq_ignore_ascii_case(name))
                .ok_or_else(|| anyhow!("no location named {name} in {}", path.display())),
            None => list
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("{} lists no locations", path.display())),
        };
    }
    let (Some(lat), Some(lon), Some(tz)) = (args.lat, args.lon, args.tz.as_deref()) else {
        bail!("give --lat, --lon and --tz, or --locations");
    };
    Ok(GeoCoordinate::new("", lat, lon, args.elevation, tz)?)
}

fn load_config(path: Option<&PathBuf>) -> Result<ZmanConfig> {
    let Some(path) = path else {
        return Ok(ZmanConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(ZmanConfig::from_toml_str(&text)?)
}

fn local_time(geo: &GeoCoordinate, t: DateTime<Utc>) -> String {
    to_local(&geo.time_zone(), t).format("%H:%M:%S").to_string()
}

fn solar(geo: &GeoCoordinate, s: SolarInstant) -> String {
    match s.instant() {
        Some(t) => local_time(geo, t),
        None => "--".into(),
    }
}

fn print_sun(date: NaiveDate, geo: GeoCoordinate) {
    let day = AstronomicalDay::new(date, geo);
    let geo = day.geo();
    let rows = [
        ("Astronomical dawn", day.astronomical_dawn()),
        ("Nautical dawn", day.nautical_dawn()),
        ("Civil dawn", day.civil_dawn()),
        ("Sunrise (sea level)", day.sea_level_sunrise()),
        ("Sunrise", day.sunrise()),
        ("Solar noon", day.solar_noon()),
        ("Sunset", day.sunset()),
        ("Sunset (sea level)", day.sea_level_sunset()),
        ("Civil dusk", day.civil_dusk()),
        ("Nautical dusk", day.nautical_dusk()),
        ("Astronomical dusk", day.astronomical_dusk()),
        ("Solar midnight", day.solar_midnight()),
    ];
    println!("{date} {} ({})", geo.name(), geo.time_zone().name());
    for (name, s) in rows {
        println!("  {name:<22} {}", solar(geo, s));
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::HebrewDate { date } => {
            let h = HebrewDate::from_gregorian(date)?;
            println!(
                "{} {} {} ({})",
                h.day(),
                h.month().name_in_year(h.year()),
                h.year(),
                h.weekday()
            );
        }

        Commands::Gregorian { year, month, day } => {
            let month = parse_month(&month, year)?;
            let h = HebrewDate::new(year, month, day)?;
            println!("{} ({})", h.to_gregorian()?, h.weekday());
        }

        Commands::Molad { year, month } => {
            let month = parse_month(&month, year)?;
            let m = molad(year, month)?;
            println!(
                "{} {}: {} {}h {}m {} chalakim",
                month.name_in_year(year),
                year,
                m.weekday,
                m.hours,
                m.minutes,
                m.chalakim
            );
        }

        Commands::Sun { date, location } => {
            let geo = resolve_location(&location)?;
            print_sun(date, geo);
        }

        Commands::Zmanim {
            date,
            location,
            config,
            table,
            visible_sunrise,
            all,
            json,
            locale,
        } => {
            let geo = resolve_location(&location)?;
            let config = load_config(config.as_ref())?;
            let table = match table {
                Some(path) => {
                    let text = fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    ZmanTable::from_json_str(&text)?
                }
                None => ZmanTable::standard()?,
            };
            let mut engine = ZmanRuleEngine::new(table, config)?;
            if let Some(path) = visible_sunrise {
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                engine = engine.with_visible_sunrise(VisibleSunriseTable::from_json_str(&text)?);
            }
            let sheet = engine.evaluate(date, &geo)?;
            debug!(results = sheet.len(), "evaluated sheet");
            if json {
                println!("{}", serde_json::to_string_pretty(&sheet)?);
                return Ok(());
            }
            println!("{date} / {}", sheet.hebrew_date);
            for r in sheet.iter() {
                if !all && r.display != DisplayState::Visible {
                    continue;
                }
                let label = r.label(&locale).unwrap_or(&r.id);
                let time = r.instant.map_or_else(|| "--".into(), |t| local_time(&geo, t));
                if all {
                    let notes: Vec<String> = r.diagnostics.iter().map(ToString::to_string).collect();
                    println!("  {time:>8}  {:>2}  {label}  {}", r.display.code(), notes.join(", "));
                } else {
                    println!("  {time:>8}  {label}");
                }
            }
        }

        Commands::Calendar {
            year,
            month,
            hebrew,
            israel,
        } => {
            let cursor = if hebrew {
                DayCursor::hebrew_month(year, parse_month(&month, year)?, israel)?
            } else {
                let m: u32 = month.parse().context("Gregorian month must be a number")?;
                DayCursor::gregorian_month(year, m, israel)?
            };
            for day in cursor {
                let day = day?;
                let mut notes: Vec<String> = day
                    .holidays
                    .iter()
                    .map(|h| match h.day {
                        0 => h.holiday.name().to_string(),
                        n => format!("{} {n}", h.holiday.name()),
                    })
                    .collect();
                if let Some(p) = &day.parasha {
                    notes.push(p.name());
                }
                if let Some(o) = day.omer {
                    notes.push(format!("Omer {o}"));
                }
                println!("{}  {:<24} {}", day.date, day.hebrew.to_string(), notes.join("; "));
            }
        }

        Commands::Parasha { date, israel } => {
            let h = HebrewDate::from_gregorian(date)?;
            match parasha_on(&h, israel)? {
                Some(p) => println!("{p} ({})", p.hebrew_name()),
                None => {
                    let (on, p) = upcoming_parasha(&h, israel)?;
                    println!("{p} ({}) on {}", p.hebrew_name(), on.to_gregorian()?);
                }
            }
        }

        Commands::DafYomi { date } => {
            let d = daf_yomi(date)?;
            println!("{d} ({} {}, cycle {})", d.tractate.hebrew_name(), d.page, d.cycle);
        }

        Commands::Geodesic {
            lat1,
            lon1,
            lat2,
            lon2,
        } => {
            let a = GeoCoordinate::new("from", lat1, lon1, 0.0, "UTC")?;
            let b = GeoCoordinate::new("to", lat2, lon2, 0.0, "UTC")?;
            match a.geodesic_to(&b) {
                Some(g) => println!(
                    "geodesic {:.3} km, initial {:.4}°, final {:.4}°",
                    g.distance_m / 1000.0,
                    g.initial_bearing_deg,
                    g.final_bearing_deg
                ),
                None => println!("geodesic: did not converge (near-antipodal points)"),
            }
            println!(
                "rhumb line {:.3} km, bearing {:.4}°",
                a.rhumb_line_distance_m(&b) / 1000.0,
                a.rhumb_line_bearing_deg(&b)
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}
