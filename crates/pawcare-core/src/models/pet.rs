//! Pet models.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

coded_enum! {
    pub enum PetType {
        Dog = 0,
        Cat = 1,
    }
}

coded_enum! {
    pub enum Gender {
        Male = 0,
        Female = 1,
    }
}

/// A pet owned by the signed-in pet owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: PetType,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub color: Option<String>,
    /// Avatar image URL (CDN hosted)
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Pet {
    /// Age in whole years on the given day.
    pub fn age_years(&self, today: NaiveDate) -> u32 {
        let mut years = today.year() - self.birth_date.year();
        if (today.month(), today.day()) < (self.birth_date.month(), self.birth_date.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }
}

/// Body for creating or editing a pet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPet {
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: PetType,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub color: Option<String>,
    pub avatar: Option<String>,
}

impl From<&Pet> for NewPet {
    fn from(pet: &Pet) -> Self {
        Self {
            name: pet.name.clone(),
            pet_type: pet.pet_type,
            gender: pet.gender,
            birth_date: pet.birth_date,
            color: pet.color.clone(),
            avatar: pet.avatar.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet(birth: NaiveDate) -> Pet {
        Pet {
            id: 1,
            name: "Max".into(),
            pet_type: PetType::Dog,
            gender: Gender::Male,
            birth_date: birth,
            color: None,
            avatar: None,
        }
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let max = pet(NaiveDate::from_ymd_opt(2020, 6, 15).unwrap());
        assert_eq!(max.age_years(NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()), 3);
        assert_eq!(max.age_years(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()), 4);
    }

    #[test]
    fn test_type_field_name() {
        let json = serde_json::to_value(pet(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())).unwrap();
        assert_eq!(json["type"], 0);
        assert_eq!(json["birthDate"], "2020-01-01");
    }
}
