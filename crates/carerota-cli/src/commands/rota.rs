//! Rota viewing and editing against the shared document.
//!
//! Every action opens the store, waits for the first snapshot, applies
//! its edit, and lets the write settle before the process exits.

use std::sync::Arc;

use chrono::NaiveDate;
use clap::Subcommand;
use serde::Serialize;

use carerota_core::engine::{visible_shifts, EffectiveShift};
use carerota_core::rota::OverrideField;
use carerota_core::shift::ShiftId;
use carerota_core::sync::{DocumentStore, FileStore, SyncController};
use carerota_core::{format_display, generate_days, Config};

#[derive(Subcommand)]
pub enum RotaAction {
    /// Show the rota from today onwards
    Show {
        /// Number of days to render
        #[arg(long)]
        days: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save both times of a shift (morning saves pull the night shift along)
    SetTime {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Shift (morning or evening)
        shift: String,
        /// Start time (HH:MM)
        start: String,
        /// End time (HH:MM)
        end: String,
    },
    /// Assign a carer to a shift
    Assign {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Shift (morning or evening)
        shift: String,
        /// Carer name
        name: String,
    },
    /// Attach a note to a shift
    Note {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Shift (morning or evening)
        shift: String,
        /// Note text
        text: String,
    },
    /// Clear a field back to its default
    Clear {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Shift (morning or evening)
        shift: String,
        /// Field (start, end, name or comment)
        field: String,
    },
}

#[derive(Serialize)]
struct DayView {
    date: String,
    is_today: bool,
    is_weekend: bool,
    shifts: Vec<EffectiveShift>,
}

pub async fn run(action: RotaAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RotaAction::Show { days, json } => {
            let (ctl, config) = connect().await?;
            let count = days.unwrap_or(config.view.initial_days);
            show(&ctl, count, json)?;
        }
        RotaAction::SetTime {
            date,
            shift,
            start,
            end,
        } => {
            let date = parse_date(&date)?;
            let shift: ShiftId = shift.parse()?;
            let (ctl, _) = connect().await?;
            ctl.save_shift_times(&date, shift, &start, &end)?.await?;
            match shift {
                ShiftId::Morning => {
                    println!(
                        "morning times saved; night shift now starts at {}",
                        format_display(&end)
                    );
                }
                ShiftId::Evening => println!("evening times saved"),
            }
        }
        RotaAction::Assign { date, shift, name } => {
            let date = parse_date(&date)?;
            let shift: ShiftId = shift.parse()?;
            let (ctl, _) = connect().await?;
            ctl.update_shift_field(&date, shift, OverrideField::Name, &name)?
                .await?;
            println!("assigned {} to {date} {shift}", name.trim());
        }
        RotaAction::Note { date, shift, text } => {
            let date = parse_date(&date)?;
            let shift: ShiftId = shift.parse()?;
            let (ctl, _) = connect().await?;
            ctl.update_shift_field(&date, shift, OverrideField::Comment, &text)?
                .await?;
            println!("note saved for {date} {shift}");
        }
        RotaAction::Clear { date, shift, field } => {
            let date = parse_date(&date)?;
            let shift: ShiftId = shift.parse()?;
            let field: OverrideField = field.parse()?;
            let (ctl, _) = connect().await?;
            ctl.clear_field(&date, shift, field).await?;
            println!("cleared {field} for {date} {shift}");
        }
    }
    Ok(())
}

async fn connect() -> Result<(SyncController, Config), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store: Arc<dyn DocumentStore> = Arc::new(FileStore::new(config.store_file()?));
    let ctl = SyncController::new(store, config.store.path.clone());
    ctl.subscribe().await?;
    ctl.wait_until_loaded().await;
    Ok((ctl, config))
}

fn parse_date(input: &str) -> Result<String, Box<dyn std::error::Error>> {
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{input}' (expected YYYY-MM-DD)"))?;
    Ok(date.format("%Y-%m-%d").to_string())
}

fn show(ctl: &SyncController, count: usize, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = ctl.document();
    let days = generate_days(count);

    if json {
        let views: Vec<DayView> = days
            .iter()
            .map(|day| {
                let key = day.date_key();
                DayView {
                    shifts: visible_shifts(&doc, &key),
                    date: key,
                    is_today: day.is_today,
                    is_weekend: day.is_weekend,
                }
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    for day in days {
        let (weekday, num, month) = day.display_parts();
        let tag = if day.is_today { "  (today)" } else { "" };
        println!("{weekday} {num:>2} {month}  {}{tag}", day.date_key());

        for shift in visible_shifts(&doc, &day.date_key()) {
            let times = format!(
                "{}-{}",
                format_display(&shift.start),
                format_display(&shift.end)
            );
            let name = if shift.name.is_empty() { "-" } else { shift.name.as_str() };
            if shift.comment.is_empty() {
                println!("  {} {:<6} {:<16} {}", shift.icon, shift.label, times, name);
            } else {
                println!(
                    "  {} {:<6} {:<16} {:<14} {}",
                    shift.icon, shift.label, times, name, shift.comment
                );
            }
        }
    }
    Ok(())
}
