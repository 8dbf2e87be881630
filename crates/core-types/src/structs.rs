use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A team entered in the championship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constructor {
    pub id: Uuid,
    /// Stable short code, e.g. "mercedes". Unique across constructors.
    #[serde(rename = "ref")]
    pub reference: String,
    pub name: String,
    pub nationality: String,
    pub url: String,
}

/// Body of `POST /constructors` and `PUT /constructors/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorInput {
    #[serde(rename = "ref")]
    pub reference: String,
    pub name: String,
    pub nationality: String,
    pub url: String,
}

impl ConstructorInput {
    pub fn into_record(self, id: Uuid) -> Constructor {
        Constructor {
            id,
            reference: self.reference,
            name: self.name,
            nationality: self.nationality,
            url: self.url,
        }
    }
}

/// A driver as returned by the API.
///
/// `constructor` is the team's display name. It is never stored on the driver
/// row; reads rebuild it by joining against the constructors table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub id: Uuid,
    pub constructor: String,
    #[serde(rename = "ref")]
    pub reference: String,
    /// Three-letter timing code ("HAM"). Older drivers have none.
    pub code: Option<String>,
    /// Permanent car number, only assigned since 2014.
    pub number: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub nationality: String,
    pub status: String,
    pub url: String,
}

/// Body of `POST /drivers` and `PUT /drivers/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverInput {
    /// Constructor display name, resolved to an id at write time.
    pub constructor: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub number: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub nationality: String,
    pub status: String,
    pub url: String,
}

impl DriverInput {
    pub fn into_record(self, id: Uuid) -> Driver {
        Driver {
            id,
            constructor: self.constructor,
            reference: self.reference,
            code: self.code,
            number: self.number,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            nationality: self.nationality,
            status: self.status,
            url: self.url,
        }
    }
}

/// The three drivers who finished on the podium at a circuit's most recent race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Podium {
    pub first: Uuid,
    pub second: Uuid,
    pub third: Uuid,
}

impl Podium {
    /// Rebuilds a podium from three nullable columns.
    ///
    /// All three set gives `Some`, none set gives `None`. Any other
    /// combination is a half-written podium and is rejected.
    pub fn from_places(
        first: Option<Uuid>,
        second: Option<Uuid>,
        third: Option<Uuid>,
    ) -> Result<Option<Self>, CoreError> {
        match (first, second, third) {
            (Some(first), Some(second), Some(third)) => Ok(Some(Self { first, second, third })),
            (None, None, None) => Ok(None),
            _ => Err(CoreError::InvalidInput(
                "podium".to_string(),
                "either all three places or none must be set".to_string(),
            )),
        }
    }

    /// Splits an optional podium back into its three nullable places.
    pub fn places(podium: Option<&Podium>) -> (Option<Uuid>, Option<Uuid>, Option<Uuid>) {
        match podium {
            Some(p) => (Some(p.first), Some(p.second), Some(p.third)),
            None => (None, None, None),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    pub id: Uuid,
    #[serde(rename = "ref")]
    pub reference: String,
    pub name: String,
    pub location: String,
    pub country: String,
    /// Whether the circuit is on the current calendar.
    pub current: bool,
    pub url: String,
    pub podium: Option<Podium>,
}

/// Body of `POST /circuits` and `PUT /circuits/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitInput {
    #[serde(rename = "ref")]
    pub reference: String,
    pub name: String,
    pub location: String,
    pub country: String,
    pub current: bool,
    pub url: String,
    #[serde(default)]
    pub podium: Option<Podium>,
}

impl CircuitInput {
    pub fn into_record(self, id: Uuid) -> Circuit {
        Circuit {
            id,
            reference: self.reference,
            name: self.name,
            location: self.location,
            country: self.country,
            current: self.current,
            url: self.url,
            podium: self.podium,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn driver_serializes_reference_as_ref_and_keeps_null_optionals() {
        let driver = Driver {
            id: Uuid::nil(),
            constructor: "McLaren".to_string(),
            reference: "senna".to_string(),
            code: None,
            number: None,
            first_name: "Ayrton".to_string(),
            last_name: "Senna".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1960, 3, 21).unwrap(),
            nationality: "Brazilian".to_string(),
            status: "retired".to_string(),
            url: "http://en.wikipedia.org/wiki/Ayrton_Senna".to_string(),
        };

        let value = serde_json::to_value(&driver).unwrap();
        assert_eq!(value["ref"], "senna");
        assert_eq!(value["code"], serde_json::Value::Null);
        assert_eq!(value["number"], serde_json::Value::Null);
        assert_eq!(value["date_of_birth"], "1960-03-21");
        assert!(value.get("reference").is_none());
    }

    #[test]
    fn driver_input_accepts_missing_code_and_number_and_ignores_id() {
        let input: DriverInput = serde_json::from_value(json!({
            "id": "not-even-a-uuid",
            "constructor": "Mercedes",
            "ref": "hamilton",
            "first_name": "Lewis",
            "last_name": "Hamilton",
            "date_of_birth": "1985-01-07",
            "nationality": "British",
            "status": "active",
            "url": "http://en.wikipedia.org/wiki/Lewis_Hamilton"
        }))
        .unwrap();

        assert_eq!(input.code, None);
        assert_eq!(input.number, None);
        assert_eq!(input.constructor, "Mercedes");
    }

    #[test]
    fn constructor_input_requires_every_field() {
        let result = serde_json::from_value::<ConstructorInput>(json!({ "name": "Ferrari" }));
        assert!(result.is_err());
    }

    #[test]
    fn podium_is_all_or_nothing() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        let full = Podium::from_places(Some(a), Some(b), Some(c)).unwrap();
        assert_eq!(full, Some(Podium { first: a, second: b, third: c }));
        assert_eq!(Podium::from_places(None, None, None).unwrap(), None);
        assert!(Podium::from_places(Some(a), None, Some(c)).is_err());

        assert_eq!(Podium::places(full.as_ref()), (Some(a), Some(b), Some(c)));
        assert_eq!(Podium::places(None), (None, None, None));
    }
}
