// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use kalendae::queries::{self, SystemClock};
use kalendae::{
    create_calendar, AnyCalendarDate, CalendarError, DateDuration, Disambiguation, TimeZone,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), CalendarError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let zone: TimeZone = "America/New_York".parse()?;
    let today = queries::today(&zone, &SystemClock);
    println!("today: {today}");

    for id in ["hebrew", "islamic-civil", "japanese", "persian", "ethiopic"] {
        let date = today.to_calendar(&create_calendar(id)?);
        println!("{id:>14}: {} {}-{:02}-{:02}", date.era(), date.year(), date.month(), date.day());
    }

    let next_month = today.add(DateDuration::months(1));
    println!("in one month: {next_month}");

    let gap = kalendae::parse_date_time("2021-03-14T02:30")?;
    match gap.to_zoned_with(&zone, Disambiguation::Reject) {
        Ok(zoned) => println!("resolved: {zoned}"),
        Err(err) => println!("rejected: {err}"),
    }
    println!("compatible: {}", gap.to_zoned(&zone));
    Ok(())
}
