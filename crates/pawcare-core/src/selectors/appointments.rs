use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

use crate::models::{Appointment, AppointmentStatus};

/// First (Sunday) and last (Saturday) day of the week containing `today`.
pub fn week_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = u64::from(today.weekday().num_days_from_sunday());
    let start = today - Days::new(offset);
    let end = start + Days::new(6);
    (start, end)
}

/// Appointments dated within the current Sunday..Saturday week.
pub fn count_this_week(appointments: &[Appointment], now: NaiveDateTime) -> usize {
    let (start, end) = week_bounds(now.date());
    appointments
        .iter()
        .filter(|a| {
            let day = a.appointment_date.date();
            day >= start && day <= end
        })
        .count()
}

/// Appointments dated today.
pub fn count_today(appointments: &[Appointment], now: NaiveDateTime) -> usize {
    let today = now.date();
    appointments
        .iter()
        .filter(|a| a.appointment_date.date() == today)
        .count()
}

/// Open appointments at or after `now`, soonest first.
pub fn upcoming(appointments: &[Appointment], now: NaiveDateTime) -> Vec<Appointment> {
    let mut result: Vec<Appointment> = appointments
        .iter()
        .filter(|a| a.appointment_date >= now && !a.status.is_terminal())
        .cloned()
        .collect();
    result.sort_by_key(|a| (a.appointment_date, a.id));
    result
}

/// Count per status. Every status is present, zero included.
pub fn count_by_status(appointments: &[Appointment]) -> BTreeMap<AppointmentStatus, usize> {
    let mut counts: BTreeMap<AppointmentStatus, usize> =
        AppointmentStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for appointment in appointments {
        *counts.entry(appointment.status).or_insert(0) += 1;
    }
    counts
}

/// Sorted copy by appointment date.
pub fn sort_by_date(appointments: &[Appointment], newest_first: bool) -> Vec<Appointment> {
    let mut sorted = appointments.to_vec();
    sorted.sort_by_key(|a| (a.appointment_date, a.id));
    if newest_first {
        sorted.reverse();
    }
    sorted
}
