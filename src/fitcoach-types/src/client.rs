use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, non_blank, positive};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub age: i32,
    /// Height in centimeters
    pub height: f64,
    /// Weight in kilograms on the start date
    pub start_weight: f64,
    pub goal: String,
    /// Injuries or limitations the coach should keep in mind
    pub injuries: String,
    pub start_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Client {
    /// Whole days elapsed between the start date and `today`, never negative.
    pub fn days_since_start(&self, today: NaiveDate) -> i64 {
        (today - self.start_date).num_days().max(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub age: i32,
    pub height: f64,
    pub start_weight: f64,
    pub goal: String,
    pub injuries: String,
    pub start_date: NaiveDate,
}

impl NewClient {
    pub fn validate(&self) -> Result<(), ValidationError> {
        non_blank("client", &self.name)?;
        positive("age", f64::from(self.age))?;
        positive("height", self.height)?;
        positive("start weight", self.start_weight)
    }
}

/// Partial update of a client, `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub height: Option<f64>,
    pub start_weight: Option<f64>,
    pub goal: Option<String>,
    pub injuries: Option<String>,
    pub start_date: Option<NaiveDate>,
}

impl ClientUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.height.is_none()
            && self.start_weight.is_none()
            && self.goal.is_none()
            && self.injuries.is_none()
            && self.start_date.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        if let Some(name) = &self.name {
            non_blank("client", name)?;
        }
        if let Some(age) = self.age {
            positive("age", f64::from(age))?;
        }
        if let Some(height) = self.height {
            positive("height", height)?;
        }
        if let Some(weight) = self.start_weight {
            positive("start weight", weight)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_client() -> NewClient {
        NewClient {
            name: "Ana".into(),
            age: 31,
            height: 168.0,
            start_weight: 64.5,
            goal: "Deadlift 120kg".into(),
            injuries: String::new(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
        }
    }

    #[test]
    fn valid_client_passes() {
        assert!(new_client().validate().is_ok());
    }

    #[test]
    fn rejects_blank_name_and_non_positive_numbers() {
        let mut client = new_client();
        client.name = "   ".into();
        assert_eq!(
            client.validate(),
            Err(ValidationError::BlankName { record: "client" })
        );

        let mut client = new_client();
        client.height = 0.0;
        assert!(matches!(
            client.validate(),
            Err(ValidationError::NonPositive { field: "height", .. })
        ));

        let mut client = new_client();
        client.age = -3;
        assert!(client.validate().is_err());
    }

    #[test]
    fn empty_update_is_rejected() {
        assert_eq!(
            ClientUpdate::default().validate(),
            Err(ValidationError::EmptyUpdate)
        );

        let update = ClientUpdate {
            goal: Some("Run 10k".into()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn days_since_start_clamps_future_dates() {
        let client = Client {
            id: 1,
            name: "Ana".into(),
            age: 31,
            height: 168.0,
            start_weight: 64.5,
            goal: String::new(),
            injuries: String::new(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            created_at: NaiveDate::from_ymd_opt(2025, 1, 6)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            updated_at: NaiveDate::from_ymd_opt(2025, 1, 6)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        };

        let today = NaiveDate::from_ymd_opt(2025, 2, 5).unwrap();
        assert_eq!(client.days_since_start(today), 30);

        let before = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(client.days_since_start(before), 0);
    }
}
