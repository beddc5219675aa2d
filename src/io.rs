use crate::model::{AbsenceKind, MonthSchedule, StaffMember};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import du personnel depuis CSV: header `name,part_time[,can_on_call][,can_support]`
pub fn import_staff_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<StaffMember>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid staff row (empty name)");
        }
        let mut member = StaffMember::new(name);
        if let Some(flag) = non_empty(rec.get(1)) {
            let part_time = parse_bool(flag)
                .with_context(|| format!("invalid part_time value for {name}"))?;
            if part_time {
                member = StaffMember::part_timer(name);
            }
        }
        if let Some(flag) = non_empty(rec.get(2)) {
            member.can_on_call = parse_bool(flag)
                .with_context(|| format!("invalid can_on_call value for {name}"))?;
        }
        if let Some(flag) = non_empty(rec.get(3)) {
            member.can_support = parse_bool(flag)
                .with_context(|| format!("invalid can_support value for {name}"))?;
        }
        out.push(member);
    }
    Ok(out)
}

/// Import d'absences: header `name,dates,kind`.
///
/// `dates` accepte un jour (`2025-10-03`) ou une plage inclusive
/// (`2025-10-03..2025-10-07` ou `2025-10-03/2025-10-07`) ; une ligne par jour
/// est produite.
pub fn import_absences_csv<P: AsRef<Path>>(
    path: P,
) -> anyhow::Result<Vec<(String, NaiveDate, AbsenceKind)>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        let dates = rec.get(1).context("missing dates")?.trim();
        let kind: AbsenceKind = rec
            .get(2)
            .context("missing kind")?
            .parse()
            .map_err(anyhow::Error::msg)?;
        for date in parse_dates(dates).with_context(|| format!("invalid dates for {name}"))? {
            out.push((name.to_string(), date, kind));
        }
    }
    Ok(out)
}

fn non_empty(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|f| !f.is_empty())
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

fn parse_dates(raw: &str) -> anyhow::Result<Vec<NaiveDate>> {
    let Some((start_raw, end_raw)) = raw.split_once("..").or_else(|| raw.split_once('/')) else {
        return Ok(vec![parse_date(raw)?]);
    };
    let start = parse_date(start_raw.trim())?;
    let end = parse_date(end_raw.trim())?;
    if end < start {
        bail!("range end before start: {raw}");
    }
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("invalid date: {raw}"))
}

/// Export JSON d'un planning (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &MonthSchedule) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(schedule)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV en grille: header `staff,1,1_on_call,2,2_on_call,...`,
/// une ligne par membre dans l'ordre de `staff`.
pub fn export_schedule_csv<P: AsRef<Path>>(
    path: P,
    schedule: &MonthSchedule,
    staff: &[StaffMember],
) -> anyhow::Result<()> {
    let month = schedule.period()?;
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;

    let mut header = vec!["staff".to_string()];
    for day in 1..=month.num_days() {
        header.push(day.to_string());
        header.push(format!("{day}_on_call"));
    }
    w.write_record(&header)?;

    for member in staff {
        let mut row = vec![member.name.clone()];
        for day in 1..=month.num_days() {
            let entry = schedule.entry(&member.id, day).copied().unwrap_or_default();
            row.push(entry.shift.code().to_string());
            row.push(if entry.on_call { "X" } else { "" }.to_string());
        }
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}
