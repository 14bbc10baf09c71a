use std::cmp::Ordering;

use strsim::{jaro_winkler, normalized_levenshtein};

use crate::models::{Clinic, ClinicStatus, Role};

/// Minimum rating of a "premium" clinic.
pub const PREMIUM_RATING: f64 = 4.5;

/// Minimum similarity for a fuzzy search hit.
pub const FUZZY_THRESHOLD: f64 = 0.85;

/// Clinic listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClinicSort {
    #[default]
    RatingDesc,
    NameAsc,
    Newest,
}

/// Listing filter chosen by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClinicFilter {
    /// Free-text search over name and city
    pub query: Option<String>,
    pub city: Option<String>,
    pub premium_only: bool,
    /// Admin-only narrowing by moderation status
    pub status: Option<ClinicStatus>,
    pub sort: ClinicSort,
}

/// Filter and sort clinics for a viewer.
///
/// Non-admin viewers only ever see approved clinics, whatever the filter says.
pub fn filter_clinics(clinics: &[Clinic], filter: &ClinicFilter, viewer: Option<Role>) -> Vec<Clinic> {
    let is_admin = viewer == Some(Role::Admin);
    let query = filter
        .query
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());
    let city = filter
        .city
        .as_deref()
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty());

    let mut result: Vec<Clinic> = clinics
        .iter()
        .filter(|c| {
            if is_admin {
                filter.status.map_or(true, |s| c.status == s)
            } else {
                c.status == ClinicStatus::Approved
            }
        })
        .filter(|c| !filter.premium_only || c.rating >= PREMIUM_RATING)
        .filter(|c| {
            city.as_deref()
                .map_or(true, |city| c.address.city.to_lowercase() == city)
        })
        .filter(|c| query.as_deref().map_or(true, |q| matches_query(c, q)))
        .cloned()
        .collect();

    sort_clinics(&mut result, filter.sort);
    result
}

/// Distinct cities of the listed clinics, sorted.
pub fn clinic_cities(clinics: &[Clinic]) -> Vec<String> {
    let mut cities: Vec<String> = clinics
        .iter()
        .map(|c| c.address.city.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    cities.sort();
    cities.dedup();
    cities
}

fn sort_clinics(clinics: &mut [Clinic], sort: ClinicSort) {
    match sort {
        ClinicSort::RatingDesc => clinics.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        }),
        ClinicSort::NameAsc => {
            clinics.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
        ClinicSort::Newest => clinics.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))),
    }
}

/// Substring match on name or city, else a fuzzy match on any word.
fn matches_query(clinic: &Clinic, query: &str) -> bool {
    let name = clinic.name.to_lowercase();
    let city = clinic.address.city.to_lowercase();
    if name.contains(query) || city.contains(query) {
        return true;
    }
    let hit = name
        .split_whitespace()
        .chain(city.split_whitespace())
        .chain([name.as_str()])
        .any(|word| similarity(word, query) >= FUZZY_THRESHOLD);
    hit
}

/// Jaro-Winkler for typos, blended with normalized Levenshtein.
fn similarity(a: &str, b: &str) -> f64 {
    jaro_winkler(a, b) * 0.6 + normalized_levenshtein(a, b) * 0.4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Address;

    fn clinic(id: i64, name: &str, rating: f64, status: ClinicStatus, city: &str) -> Clinic {
        Clinic {
            id,
            name: name.into(),
            address: Address {
                city: city.into(),
                ..Default::default()
            },
            rating,
            status,
            owner_id: None,
            picture_url: None,
            phone_number: None,
            created_at: None,
        }
    }

    fn names(clinics: &[Clinic]) -> Vec<&str> {
        clinics.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_premium_view_for_non_admin() {
        let list = vec![
            clinic(1, "A Vet", 4.8, ClinicStatus::Approved, "Cairo"),
            clinic(2, "B Vet", 4.0, ClinicStatus::Pending, "Cairo"),
        ];
        let filter = ClinicFilter {
            premium_only: true,
            ..Default::default()
        };
        assert_eq!(names(&filter_clinics(&list, &filter, Some(Role::PetOwner))), vec!["A Vet"]);
        assert_eq!(names(&filter_clinics(&list, &filter, None)), vec!["A Vet"]);
    }

    #[test]
    fn test_admin_sees_every_status() {
        let list = vec![
            clinic(1, "A Vet", 4.8, ClinicStatus::Approved, "Cairo"),
            clinic(2, "B Vet", 4.0, ClinicStatus::Pending, "Cairo"),
            clinic(3, "C Vet", 3.0, ClinicStatus::Rejected, "Giza"),
        ];
        let all = filter_clinics(&list, &ClinicFilter::default(), Some(Role::Admin));
        assert_eq!(names(&all), vec!["A Vet", "B Vet", "C Vet"]);

        let pending = ClinicFilter {
            status: Some(ClinicStatus::Pending),
            ..Default::default()
        };
        assert_eq!(names(&filter_clinics(&list, &pending, Some(Role::Admin))), vec!["B Vet"]);
    }

    #[test]
    fn test_query_substring_and_typo() {
        let list = vec![
            clinic(1, "Happy Paws", 4.0, ClinicStatus::Approved, "Alexandria"),
            clinic(2, "Cat Corner", 4.2, ClinicStatus::Approved, "Cairo"),
        ];
        let search = |q: &str| {
            let filter = ClinicFilter {
                query: Some(q.into()),
                ..Default::default()
            };
            names(&filter_clinics(&list, &filter, None))
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        };

        assert_eq!(search("paws"), vec!["Happy Paws"]);
        assert_eq!(search("CAIRO"), vec!["Cat Corner"]);
        assert_eq!(search("alexandra"), vec!["Happy Paws"]);
        assert!(search("zzz").is_empty());
    }

    #[test]
    fn test_city_and_sort() {
        let list = vec![
            clinic(1, "b clinic", 4.1, ClinicStatus::Approved, "Giza"),
            clinic(2, "A clinic", 4.9, ClinicStatus::Approved, "Giza"),
            clinic(3, "C clinic", 5.0, ClinicStatus::Approved, "Cairo"),
        ];
        let by_rating = ClinicFilter {
            city: Some("giza".into()),
            ..Default::default()
        };
        assert_eq!(names(&filter_clinics(&list, &by_rating, None)), vec!["A clinic", "b clinic"]);

        let by_name = ClinicFilter {
            sort: ClinicSort::NameAsc,
            ..Default::default()
        };
        assert_eq!(
            names(&filter_clinics(&list, &by_name, None)),
            vec!["A clinic", "b clinic", "C clinic"]
        );
        assert_eq!(clinic_cities(&list), vec!["Cairo", "Giza"]);
    }
}
