//! Property tests for the derived views.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use pawcare_core::models::{
    Address, Appointment, AppointmentStatus, Clinic, ClinicStatus, Rating, Role,
};
use pawcare_core::selectors::{
    count_by_status, count_this_week, count_today, filter_clinics, rating_summary, upcoming,
    ClinicFilter, ClinicSort,
};

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn status_strategy<T: Copy + std::fmt::Debug + 'static>(all: &'static [T]) -> impl Strategy<Value = T> {
    (0..all.len()).prop_map(move |i| all[i])
}

fn rating_strategy() -> impl Strategy<Value = Rating> {
    (1i64..1000, 1u8..=5).prop_map(|(id, value)| Rating {
        id,
        clinic_id: 1,
        user_id: format!("user-{}", id),
        rating_value: value,
        comment: None,
        created_at: base_time(),
        user_name: None,
    })
}

fn clinic_strategy() -> impl Strategy<Value = Clinic> {
    (
        1i64..1000,
        "[a-z]{1,8}( [a-z]{1,8})?",
        prop_oneof![Just("Cairo"), Just("Giza"), Just("Alexandria")],
        0.0f64..=5.0,
        status_strategy(ClinicStatus::ALL),
    )
        .prop_map(|(id, name, city, rating, status)| Clinic {
            id,
            name,
            address: Address {
                city: city.to_string(),
                ..Default::default()
            },
            rating,
            status,
            owner_id: None,
            picture_url: None,
            phone_number: None,
            created_at: None,
        })
}

fn filter_strategy() -> impl Strategy<Value = ClinicFilter> {
    (
        proptest::option::of("[a-z]{0,6}"),
        proptest::option::of(prop_oneof![Just("cairo".to_string()), Just("giza".to_string())]),
        any::<bool>(),
        proptest::option::of(status_strategy(ClinicStatus::ALL)),
        prop_oneof![
            Just(ClinicSort::RatingDesc),
            Just(ClinicSort::NameAsc),
            Just(ClinicSort::Newest)
        ],
    )
        .prop_map(|(query, city, premium_only, status, sort)| ClinicFilter {
            query,
            city,
            premium_only,
            status,
            sort,
        })
}

fn appointment_strategy() -> impl Strategy<Value = Appointment> {
    (
        1i64..1000,
        -20i64..20,
        0i64..24,
        status_strategy(AppointmentStatus::ALL),
    )
        .prop_map(|(id, days, hours, status)| Appointment {
            id,
            pet_id: 1,
            clinic_id: 1,
            doctor_id: None,
            appointment_date: base_time() + Duration::days(days) + Duration::hours(hours),
            status,
            notes: None,
            pet_name: None,
            clinic_name: None,
        })
}

proptest! {
    #[test]
    fn rating_percentages_sum_to_hundred(ratings in prop::collection::vec(rating_strategy(), 0..50)) {
        let summary = rating_summary(&ratings);
        let sum: f64 = summary.buckets.iter().map(|b| b.percent).sum();
        let count: usize = summary.buckets.iter().map(|b| b.count).sum();

        prop_assert_eq!(summary.buckets.len(), 5);
        prop_assert_eq!(count, ratings.len());
        if ratings.is_empty() {
            prop_assert_eq!(sum, 0.0);
            prop_assert_eq!(summary.average, 0.0);
        } else {
            prop_assert!((sum - 100.0).abs() < 1e-6);
            prop_assert!(summary.average >= 1.0 && summary.average <= 5.0);
        }
    }

    #[test]
    fn non_admins_only_see_approved(
        clinics in prop::collection::vec(clinic_strategy(), 0..20),
        filter in filter_strategy(),
        viewer in proptest::option::of(prop_oneof![Just(Role::PetOwner), Just(Role::Doctor)]),
    ) {
        let visible = filter_clinics(&clinics, &filter, viewer);
        prop_assert!(visible.iter().all(|c| c.status == ClinicStatus::Approved));
        prop_assert!(visible.len() <= clinics.len());
    }

    #[test]
    fn clinic_filter_is_pure(
        clinics in prop::collection::vec(clinic_strategy(), 0..20),
        filter in filter_strategy(),
    ) {
        let before = clinics.clone();
        let first = filter_clinics(&clinics, &filter, Some(Role::Admin));
        let second = filter_clinics(&clinics, &filter, Some(Role::Admin));

        prop_assert_eq!(&clinics, &before);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn premium_filter_respects_threshold(
        clinics in prop::collection::vec(clinic_strategy(), 0..20),
    ) {
        let filter = ClinicFilter { premium_only: true, ..Default::default() };
        let visible = filter_clinics(&clinics, &filter, Some(Role::Admin));
        prop_assert!(visible.iter().all(|c| c.rating >= 4.5));
    }

    #[test]
    fn appointment_counts_are_bounded(
        appointments in prop::collection::vec(appointment_strategy(), 0..40),
    ) {
        let now = base_time();
        let today = count_today(&appointments, now);
        let week = count_this_week(&appointments, now);
        let ahead = upcoming(&appointments, now);

        prop_assert!(today <= week);
        prop_assert!(week <= appointments.len());
        prop_assert!(ahead.iter().all(|a| a.appointment_date >= now));
        prop_assert!(ahead.windows(2).all(|w| w[0].appointment_date <= w[1].appointment_date));

        let by_status = count_by_status(&appointments);
        prop_assert_eq!(by_status.len(), AppointmentStatus::ALL.len());
        prop_assert_eq!(by_status.values().sum::<usize>(), appointments.len());
    }
}
