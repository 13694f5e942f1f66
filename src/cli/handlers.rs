use anyhow::{Context, Result};
use chrono::Local;

use crate::config::AppConfig;
use crate::models::{Countdown, NextPrayer, PrayerSchedule, PrayerType};
use crate::prayer_times::resolve_with_countdown;
use crate::state::{LoadOutcome, Loader};
use crate::utils::format::{
    format_12h, format_date, format_time, format_time_12h, pad_display, parse_time_of_day,
};
use crate::utils::hijri::hijri_string;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;212;175;85m";
const TEAL: &str = "\x1b[38;2;72;160;150m";

fn print_notices(outcome: &LoadOutcome, config: &AppConfig) {
    for notice in outcome.notices(&config.location) {
        println_colored!(RED, "  ⚠ {}", notice);
    }
}

fn print_next(next: &NextPrayer, countdown: &Countdown) {
    let when = if next.is_tomorrow { "غداً" } else { "اليوم" };
    println_colored!(
        TEAL,
        "  الصلاة القادمة: {} {} {}  ({})",
        next.display_name,
        when,
        format_time_12h(next.time),
        countdown
    );
}

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(config: &AppConfig) -> Result<()> {
    let outcome = Loader::from_config(config).load();
    let now = Local::now().naive_local();
    let schedule: &PrayerSchedule = &outcome.fetched.schedule;
    let (next, countdown) = resolve_with_countdown(schedule, now);

    println!();
    println_colored!(GOLD, "  {}", outcome.location.label());
    let hijri = hijri_string(now.date(), config.display.hijri_offset).unwrap_or_default();
    println_colored!(DIM, "  {}  ·  {}", hijri, format_date(now.date()));
    print_notices(&outcome, config);
    println!();

    for (prayer, time) in schedule.iter() {
        let line = format!(
            "  {}{}{}",
            pad_display(prayer.display_name(), 10),
            pad_display(prayer.api_key(), 10),
            format_time_12h(time)
        );
        if prayer == next.prayer {
            println_colored!(BOLD, "{}  ◀", line);
        } else if time <= now.time() {
            println_colored!(DIM, "{}", line);
        } else {
            println!("{}", line);
        }
    }

    println!();
    print_next(&next, &countdown);
    println!();
    Ok(())
}

// ─── Next ────────────────────────────────────────────────────────────────────

pub fn handle_next(config: &AppConfig, at: Option<&str>) -> Result<()> {
    let mut now = Local::now().naive_local();
    if let Some(at) = at {
        let time = parse_time_of_day(at).with_context(|| format!("Parsing --at {:?}", at))?;
        now = now.date().and_time(time);
    }

    let outcome = Loader::from_config(config).load();
    let (next, countdown) = resolve_with_countdown(&outcome.fetched.schedule, now);

    print_notices(&outcome, config);
    if let Some(at) = at {
        println_colored!(DIM, "  كما في {}", format_12h(at)?);
    }
    print_next(&next, &countdown);
    Ok(())
}

// ─── Locate ──────────────────────────────────────────────────────────────────

pub fn handle_locate(config: &AppConfig) -> Result<()> {
    let outcome = Loader::from_config(config).load();
    let location = &outcome.location;

    println!();
    println_colored!(GOLD, "  {}", location.label());
    match location.coordinates {
        Some(coords) => println_colored!(DIM, "  {}", coords),
        None => println_colored!(
            DIM,
            "  {}, {} (حسب المدينة)",
            config.location.city,
            config.location.country
        ),
    }
    println_colored!(
        DIM,
        "  {} {}  ·  {}",
        PrayerType::Fajr.display_name(),
        format_time(outcome.fetched.schedule.time(PrayerType::Fajr)),
        outcome.fetched.source.label()
    );
    print_notices(&outcome, config);
    println!();
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig, init: bool) -> Result<()> {
    let path = AppConfig::config_path()?;
    if init {
        // Defaults only; one-run flags like --no-locate never reach the file
        if AppConfig::init_at(&path)? {
            println_colored!(GOLD, "  Wrote {}", path.display());
        } else {
            println!("  Config already exists at {}", path.display());
        }
    } else {
        println_colored!(GOLD, "  {}", path.display());
    }
    println!();
    let rendered = toml::to_string_pretty(config).context("Serializing config")?;
    println!("{}", rendered);
    Ok(())
}
