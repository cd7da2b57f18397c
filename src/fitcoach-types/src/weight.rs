use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, positive};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightLog {
    pub id: i32,
    pub client_id: i32,
    pub weight: f64,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWeightLog {
    pub client_id: i32,
    pub weight: f64,
    pub date: NaiveDate,
}

impl NewWeightLog {
    pub fn validate(&self) -> Result<(), ValidationError> {
        positive("weight", self.weight)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightLogUpdate {
    pub weight: Option<f64>,
    pub date: Option<NaiveDate>,
}

impl WeightLogUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (self.weight, self.date) {
            (None, None) => Err(ValidationError::EmptyUpdate),
            (Some(weight), _) => positive("weight", weight),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_must_be_positive() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let log = NewWeightLog {
            client_id: 1,
            weight: 0.0,
            date,
        };
        assert!(log.validate().is_err());

        let update = WeightLogUpdate {
            weight: None,
            date: Some(date),
        };
        assert!(update.validate().is_ok());
        assert_eq!(
            WeightLogUpdate::default().validate(),
            Err(ValidationError::EmptyUpdate)
        );
    }
}
