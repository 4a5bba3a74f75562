// --- File: crates/services/playon_cli/src/commands.rs ---
use chrono::Datelike;
use playon_availability::calendar::{days_of_month, is_past_date, leading_blanks};
use playon_availability::{
    BookingDetails, DayViewController, DayViewState, OperatingHours, Slot,
};
use playon_common::models::{short_time, BookingRecord, BookingSearch};
use playon_common::{validation_error, PlayonError};
use playon_reservations::{
    load_home, my_bookings, operating_hours, Catalog, Explorer, ReservationDetail,
};
use playon_session::{
    landing_route, login_redirect, LoginForm, RegistrationForm, Route, SignUpWizard,
};
use std::io::{self, BufRead, Write};
use tracing::info;

use crate::app::App;
use crate::args::{Command, DayArgs, ExploreArgs};

pub async fn run(app: &App, command: Command) -> Result<(), PlayonError> {
    match command {
        Command::Home => home(app).await,
        Command::Gyms => gyms(app).await,
        Command::Courts { gym } => courts(app, gym).await,
        Command::Month { month } => {
            let today = app.clock.today();
            let (year, month) = month.unwrap_or((today.year(), today.month()));
            print_month(year, month, today);
            Ok(())
        }
        Command::Slots(day) => slots(app, &day).await,
        Command::Book {
            day,
            from,
            hours,
            sport,
            notes,
            private,
        } => {
            let details = BookingDetails {
                sport_id: sport,
                notes,
                private,
            };
            book(app, &day, from, hours, &details).await
        }
        Command::Bookings => {
            if landing_route(&app.session) == Route::Login {
                println!("Not signed in.");
                return Ok(());
            }
            let bookings = my_bookings(app.client.as_ref(), app.session.as_ref()).await?;
            print_bookings(&bookings);
            Ok(())
        }
        Command::Explore(args) => explore(app, args).await,
        Command::Reservation { id } => reservation(app, id).await,
        Command::Join { id } => {
            let mut detail = load_detail(app, id).await?;
            if detail.join().await? {
                println!("Joined reservation {}.", id);
            } else {
                println!("The reservation did not accept you.");
            }
            Ok(())
        }
        Command::Leave { id } => {
            let mut detail = load_detail(app, id).await?;
            detail.leave().await?;
            println!("Left reservation {}.", id);
            Ok(())
        }
        Command::Login { email, password } => login(app, email, password).await,
        Command::Signup { email } => signup(app, &email).await,
        Command::Logout => {
            app.auth().logout()?;
            println!("Signed out.");
            Ok(())
        }
        Command::Whoami => {
            match app.session.current_user() {
                Some(user) => println!("{} <{}> (id {})", user.name, user.email, user.id),
                None => println!("Not signed in."),
            }
            Ok(())
        }
    }
}

async fn home(app: &App) -> Result<(), PlayonError> {
    let feed = load_home(app.client.as_ref(), app.client.as_ref()).await?;
    println!("Open reservations:");
    print_bookings(&feed.bookings);
    println!("Gyms:");
    for gym in &feed.gyms {
        println!("  {:>4}  {}", gym.id, gym.name);
    }
    Ok(())
}

async fn gyms(app: &App) -> Result<(), PlayonError> {
    let catalog = catalog(app);
    for gym in catalog.gyms().await? {
        let hours = operating_hours(&gym, app.default_hours);
        let place = [gym.city.as_deref(), gym.state.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("/");
        println!("{:>4}  {:<30} {}  {}", gym.id, gym.name, hours, place);
    }
    Ok(())
}

async fn courts(app: &App, gym_id: Option<i64>) -> Result<(), PlayonError> {
    let catalog = catalog(app);
    let gym_ids = match gym_id {
        Some(id) => vec![id],
        None => catalog.gyms().await?.into_iter().map(|gym| gym.id).collect(),
    };
    for (gym_id, courts) in catalog.courts_for_gyms(&gym_ids).await {
        println!("Gym {}:", gym_id);
        if courts.is_empty() {
            println!("  (no courts)");
        }
        for court in courts {
            let sports = catalog.sports_for_court(court.id).await?;
            let names: Vec<_> = sports.iter().map(|s| format!("{} ({})", s.name, s.id)).collect();
            println!("  {:>4}  {:<20} {}", court.id, court.label(), names.join(", "));
        }
    }
    Ok(())
}

fn print_month(year: i32, month: u32, today: chrono::NaiveDate) {
    println!("{:04}-{:02}", year, month);
    println!(" Su  Mo  Tu  We  Th  Fr  Sa");
    let mut line = "    ".repeat(leading_blanks(year, month) as usize);
    for day in days_of_month(year, month) {
        let mark = if is_past_date(day, today) { ' ' } else { '*' };
        line.push_str(&format!("{:>3}{}", day.day(), mark));
        if day.weekday() == chrono::Weekday::Sat {
            println!("{}", line.trim_end());
            line.clear();
        }
    }
    if !line.is_empty() {
        println!("{}", line.trim_end());
    }
}

/// Hours of the court's gym when `--gym` is given, else the configured defaults.
async fn hours_for(app: &App, day: &DayArgs) -> Result<OperatingHours, PlayonError> {
    match day.gym {
        Some(gym_id) => {
            let gym = catalog(app).gym(gym_id).await?;
            Ok(operating_hours(&gym, app.default_hours))
        }
        None => Ok(app.default_hours),
    }
}

async fn day_view(app: &App, day: &DayArgs) -> Result<DayViewController, PlayonError> {
    let hours = hours_for(app, day).await?;
    let controller = DayViewController::new(
        day.court,
        hours,
        app.client.clone(),
        app.client.clone(),
        app.session.clone(),
        app.clock.clone(),
    );
    controller.select_date(day.date).await?;
    Ok(controller)
}

async fn slots(app: &App, day: &DayArgs) -> Result<(), PlayonError> {
    let controller = day_view(app, day).await?;
    print_free_slots(&controller.snapshot().await);
    Ok(())
}

fn print_free_slots(state: &DayViewState) {
    let free = state.free_slots();
    if free.is_empty() {
        println!("No free hours.");
        return;
    }
    let labels: Vec<String> = free.iter().map(Slot::to_string).collect();
    println!("Free: {}", labels.join(" "));
}

async fn book(
    app: &App,
    day: &DayArgs,
    from: Slot,
    hours: u8,
    details: &BookingDetails,
) -> Result<(), PlayonError> {
    if hours == 0 {
        return Err(validation_error("Book at least one hour"));
    }
    let controller = day_view(app, day).await?;
    for hour in from.hour()..from.hour().saturating_add(hours) {
        let slot = Slot::new(hour)
            .ok_or_else(|| validation_error(format!("{}:00 is past midnight", hour)))?;
        controller.toggle_slot(slot).await?;
    }
    match controller.submit(details).await? {
        Some(booking_id) => println!("Booked (reservation {}).", booking_id),
        None => println!("Booked."),
    }
    print_free_slots(&controller.snapshot().await);
    Ok(())
}

async fn explore(app: &App, args: ExploreArgs) -> Result<(), PlayonError> {
    let search = BookingSearch {
        search: args.search,
        date: args.date,
        status: args.status,
        sport_id: args.sport,
        court_id: args.court,
        city: args.city,
        state: args.state,
    };
    let mut explorer = Explorer::new(app.client.clone());
    let results = explorer.search(&search).await?;
    print_bookings(&results);
    let sports: Vec<String> = explorer
        .sports()
        .iter()
        .map(|sport| format!("{} ({})", sport.name, sport.id))
        .collect();
    if !sports.is_empty() {
        println!("Sports: {}", sports.join(", "));
    }
    Ok(())
}

async fn load_detail(app: &App, id: i64) -> Result<ReservationDetail, PlayonError> {
    ReservationDetail::load(
        id,
        app.client.as_ref(),
        app.client.clone(),
        app.session.clone(),
    )
    .await
}

async fn reservation(app: &App, id: i64) -> Result<(), PlayonError> {
    let detail = load_detail(app, id).await?;
    print_bookings(std::slice::from_ref(detail.booking()));
    let ended = detail.has_ended(app.clock.now());
    println!(
        "Players ({}), {:.2} each{}:",
        detail.players().len(),
        detail.cost_per_player(),
        if ended { ", finished" } else { "" }
    );
    for player in detail.players() {
        println!("  {}", player.name);
    }
    if let Some(user) = app.session.current_user() {
        if detail.is_participant(&user) {
            println!("You take part in this reservation.");
        }
    }
    Ok(())
}

async fn login(app: &App, email: String, password: Option<String>) -> Result<(), PlayonError> {
    if login_redirect(&app.session).is_some() {
        println!("Already signed in; log out first.");
        return Ok(());
    }
    let password = match password {
        Some(password) => password,
        None => prompt("Password")?,
    };
    let user = app.auth().login(&LoginForm { email, password }).await?;
    println!("Welcome, {}.", user.name);
    Ok(())
}

async fn signup(app: &App, email: &str) -> Result<(), PlayonError> {
    let auth = app.auth();
    let mut wizard = SignUpWizard::new();
    wizard.start();
    auth.send_code(&mut wizard, email).await?;
    println!("A verification code was sent to {}.", email);
    wizard.verify_code(&prompt("Code")?)?;

    let form = RegistrationForm {
        name: prompt("Name")?,
        phone: prompt("Phone")?,
        password: prompt("Password")?,
        password_confirmation: prompt("Repeat password")?,
    };
    let user = auth.register(&mut wizard, &form).await?;
    info!("Signed up as user {}", user.id);
    println!("Welcome, {}.", user.name);
    Ok(())
}

fn catalog(app: &App) -> Catalog {
    Catalog::new(app.client.clone(), app.client.clone())
}

fn print_bookings(bookings: &[BookingRecord]) {
    if bookings.is_empty() {
        println!("  (none)");
    }
    for booking in bookings {
        let id = booking.id.map(|id| id.to_string()).unwrap_or_default();
        let place = [booking.gym_name.as_deref(), booking.court_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" / ");
        println!(
            "  {:>5}  {} {}-{}  {:<12} {}",
            id,
            booking.date,
            short_time(&booking.start_time),
            short_time(&booking.end_time),
            booking.sport_name.as_deref().unwrap_or("-"),
            place
        );
    }
}

fn prompt(label: &str) -> Result<String, PlayonError> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
