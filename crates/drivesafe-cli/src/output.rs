//! Output formatting module

use drivesafe_app::app::{ObligationView, VehicleDetail};
use drivesafe_domain::model::license::group_by_category;
use drivesafe_domain::model::{Countdown, ExpirationStatus};
use drivesafe_domain::service::PerformanceSnapshot;
use drivesafe_types::{OutputFormat, Result, Route, UserProfile};
use serde::Serialize;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn plural(n: i64, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, plural)
    }
}

/// Human text for a countdown ("1 month and 5 days", "today", ...)
pub fn format_countdown(countdown: &Countdown) -> String {
    match countdown {
        Countdown::None => String::new(),
        Countdown::DueToday => "today".to_string(),
        Countdown::Days { days } => plural(*days, "day", "days"),
        Countdown::Months { months } => plural(*months, "month", "months"),
        Countdown::MonthsAndDays { months, days } => format!(
            "{} and {}",
            plural(*months, "month", "months"),
            plural(*days, "day", "days")
        ),
    }
}

/// Status column text, e.g. "due soon (in 12 days)"
pub fn format_obligation(view: &ObligationView) -> String {
    match view.status {
        ExpirationStatus::Unknown => "-".to_string(),
        ExpirationStatus::Expired => "EXPIRED".to_string(),
        ExpirationStatus::Today => "due today".to_string(),
        status => format!("{} (in {})", status.label(), format_countdown(&view.countdown)),
    }
}

fn marker(status: ExpirationStatus) -> &'static str {
    match status {
        ExpirationStatus::Expired | ExpirationStatus::Today => "!!",
        ExpirationStatus::Near => "! ",
        _ => "  ",
    }
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}

pub fn print_vehicle_list(format: OutputFormat, vehicles: &[VehicleDetail]) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(vehicles);
    }

    if vehicles.is_empty() {
        println!("No vehicles registered. Add one with `drivesafe garage add`.");
        return Ok(());
    }

    println!(
        "{:>4}  {:<24} {:<26} {:<26} {:<26}",
        "ID", "Vehicle", "Insurance", "Inspection", "Road tax"
    );
    println!("{}", "-".repeat(110));
    for v in vehicles {
        println!(
            "{:>4}  {:<24} {:<26} {:<26} {:<26}",
            v.record.id,
            truncate_str(&v.record.display_name(), 23),
            format_obligation(&v.insurance),
            format_obligation(&v.inspection),
            format_obligation(&v.tax),
        );
    }
    let attention = vehicles.iter().filter(|v| v.needs_attention()).count();
    println!();
    println!("{} vehicle(s), {} needing attention", vehicles.len(), attention);
    Ok(())
}

pub fn print_vehicle_detail(format: OutputFormat, detail: &VehicleDetail) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(detail);
    }

    let record = &detail.record;
    println!("\n{} [#{}]", record.display_name(), record.id);
    println!("{}", "=".repeat(40));

    for (label, view) in detail.obligations() {
        let date = view
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "not set".to_string());
        println!(
            "{} {:<11} {:<11} {}",
            marker(view.status),
            label,
            date,
            format_obligation(view)
        );
    }

    println!();
    if let Some(paid) = record.insurance_paid_date {
        println!("Insurance paid:     {}", paid);
    }
    if let Some(km) = record.odometer_at_inspection {
        println!("Odometer at insp.:  {} km", km);
    }
    if let Some(date) = record.registration_date {
        println!("Registered:         {}", date);
    }
    if let Some(cost) = record.tax_cost {
        println!("Road tax cost:      {:.2}", cost);
    }
    println!("As of:              {}", detail.today);
    Ok(())
}

pub fn print_route(format: OutputFormat, route: &Route) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(route);
    }

    println!("\nRoute {}", route.id);
    println!("{}", "=".repeat(44));
    println!("User:          {}", route.user_id);
    println!("Start:         {}", route.start_time);
    println!("End:           {}", route.end_time);
    println!("Duration:      {} s", route.duration_seconds());
    println!("Points:        {}", route.path_points.len());
    println!("Distance:      {:.2} km", route.total_distance_m / 1000.0);
    println!("Average speed: {} km/h", route.average_speed_kmh());
    println!("Max speed:     {} km/h", route.max_speed_kmh());
    Ok(())
}

pub fn print_route_list(format: OutputFormat, routes: &[Route]) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(routes);
    }

    if routes.is_empty() {
        println!("No routes recorded.");
        return Ok(());
    }

    println!(
        "{:<36}  {:<12} {:<19} {:>9} {:>8} {:>8}",
        "ID", "User", "Start", "Distance", "Avg", "Max"
    );
    println!("{}", "-".repeat(98));
    for r in routes {
        println!(
            "{:<36}  {:<12} {:<19} {:>6.2} km {:>4} km/h {:>4} km/h",
            r.id,
            truncate_str(&r.user_id, 12),
            r.start_time.format("%Y-%m-%d %H:%M:%S"),
            r.total_distance_m / 1000.0,
            r.average_speed_kmh(),
            r.max_speed_kmh(),
        );
    }
    Ok(())
}

pub fn print_performance(format: OutputFormat, snapshot: &PerformanceSnapshot) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(snapshot);
    }

    println!("\nDriving Performance");
    println!("===================");
    println!("Samples:            {}", snapshot.samples);
    println!("Final speed:        {} km/h", snapshot.current_kmh);
    println!("Average speed:      {} km/h", snapshot.average_kmh);
    println!("Max speed:          {} km/h", snapshot.max_kmh);
    println!("Sudden accel.:      {}", snapshot.acceleration_events);
    println!("Sudden braking:     {}", snapshot.braking_events);
    Ok(())
}

pub fn print_profile(format: OutputFormat, profile: &UserProfile) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(profile);
    }

    let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };

    println!("\nProfile {}", profile.uid);
    println!("{}", "=".repeat(40));
    println!("Email:          {}", or_dash(&profile.email));
    println!("Username:       {}", or_dash(&profile.username));
    println!("Favorite brand: {}", or_dash(&profile.favorite_car_brand));
    println!("Place of birth: {}", or_dash(&profile.place_of_birth));
    println!("Address:        {}", or_dash(&profile.street_address));
    println!("City:           {}", or_dash(&profile.city_of_residence));
    println!(
        "Year of birth:  {}",
        profile
            .year_of_birth
            .map(|y| y.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!("Registered:     {}", profile.registered_at.format("%Y-%m-%d %H:%M"));

    let groups = group_by_category(profile.licenses.as_slice());
    if groups.is_empty() {
        println!("Licenses:       -");
    } else {
        println!("Licenses:");
        for (category, codes) in groups {
            println!("  {}: {}", category, codes.join(", "));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(&Countdown::None), "");
        assert_eq!(format_countdown(&Countdown::DueToday), "today");
        assert_eq!(format_countdown(&Countdown::Days { days: 1 }), "1 day");
        assert_eq!(format_countdown(&Countdown::Days { days: 5 }), "5 days");
        assert_eq!(format_countdown(&Countdown::Months { months: 2 }), "2 months");
        assert_eq!(
            format_countdown(&Countdown::MonthsAndDays { months: 1, days: 1 }),
            "1 month and 1 day"
        );
    }

    #[test]
    fn test_format_obligation() {
        let near = ObligationView {
            date: None,
            status: ExpirationStatus::Near,
            countdown: Countdown::Days { days: 12 },
            days_left: Some(12),
        };
        assert_eq!(format_obligation(&near), "due soon (in 12 days)");

        let expired = ObligationView {
            status: ExpirationStatus::Expired,
            countdown: Countdown::None,
            ..near
        };
        assert_eq!(format_obligation(&expired), "EXPIRED");
    }
}
