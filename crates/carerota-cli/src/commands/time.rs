use clap::Subcommand;

use carerota_core::{adjust, format_display, Config};

#[derive(Subcommand)]
pub enum TimeAction {
    /// Step a time forward or back
    Adjust {
        /// Time (HH:MM)
        time: String,
        /// Steps to move, negative for earlier
        #[arg(allow_negative_numbers = true)]
        steps: i32,
        /// Minutes per step (default from config)
        #[arg(long)]
        step_minutes: Option<u32>,
    },
    /// Render a time in compact 12-hour form
    Display {
        /// Time (HH:MM)
        time: String,
    },
}

pub fn run(action: TimeAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimeAction::Adjust {
            time,
            steps,
            step_minutes,
        } => {
            let step = step_minutes.unwrap_or_else(|| Config::load_or_default().edit.step_minutes);
            println!("{}", adjust(&time, steps, step)?);
        }
        TimeAction::Display { time } => {
            println!("{}", format_display(&time));
        }
    }
    Ok(())
}
