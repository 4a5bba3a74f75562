// --- File: crates/services/playon_cli/src/args.rs ---
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use playon_availability::Slot;

#[derive(Parser)]
#[command(name = "playon", version, about = "Book sports courts on PlayOn")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open reservations and gyms, as on the home screen
    Home,
    /// List gyms with their opening hours
    Gyms,
    /// List the courts of one gym, or of every gym
    Courts {
        #[arg(long)]
        gym: Option<i64>,
    },
    /// Print a month calendar, marking past days
    Month {
        /// Year and month as YYYY-MM; defaults to the current month
        #[arg(long, value_parser = parse_month)]
        month: Option<(i32, u32)>,
    },
    /// Show the free hours of a court on a day
    Slots(DayArgs),
    /// Book consecutive hours on a court
    Book {
        #[command(flatten)]
        day: DayArgs,
        /// First hour, e.g. 18 or 18:00
        #[arg(long)]
        from: Slot,
        /// Number of consecutive hours
        #[arg(long, default_value_t = 1)]
        hours: u8,
        #[arg(long)]
        sport: i64,
        #[arg(long, default_value = "")]
        notes: String,
        /// Keep other players from joining
        #[arg(long)]
        private: bool,
    },
    /// Reservations of the signed-in user
    Bookings,
    /// Search open reservations
    Explore(ExploreArgs),
    /// Show a reservation with its players and cost per player
    Reservation { id: i64 },
    /// Join a reservation as the signed-in user
    Join { id: i64 },
    /// Leave a reservation
    Leave { id: i64 },
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account; a verification code is emailed first
    Signup {
        #[arg(long)]
        email: String,
    },
    /// Sign out
    Logout,
    /// Show who is signed in
    Whoami,
}

#[derive(Args)]
pub struct DayArgs {
    #[arg(long)]
    pub court: i64,
    /// Day as YYYY-MM-DD
    #[arg(long)]
    pub date: NaiveDate,
    /// Gym of the court; its published hours replace the configured defaults
    #[arg(long)]
    pub gym: Option<i64>,
}

#[derive(Args, Default)]
pub struct ExploreArgs {
    /// Free text search
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub sport: Option<i64>,
    #[arg(long)]
    pub court: Option<i64>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
}

fn parse_month(text: &str) -> Result<(i32, u32), String> {
    let (year, month) = text
        .split_once('-')
        .ok_or_else(|| format!("expected YYYY-MM, got '{}'", text))?;
    let year = year.parse().map_err(|_| format!("bad year '{}'", year))?;
    let month = month
        .parse()
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| format!("bad month '{}'", month))?;
    Ok((year, month))
}
