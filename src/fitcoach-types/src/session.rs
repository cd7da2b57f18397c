use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, non_blank, non_negative};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: i32,
    pub client_id: i32,
    pub date: NaiveDate,
    pub notes: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSession {
    pub client_id: i32,
    pub date: NaiveDate,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUpdate {
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl SessionUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.date.is_none() && self.notes.is_none() {
            return Err(ValidationError::EmptyUpdate);
        }
        Ok(())
    }
}

/// One logged set of an exercise inside a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub id: i32,
    pub session_id: i32,
    pub name: String,
    pub weight: f64,
    pub reps: i32,
    /// Reps in reserve, 0 when not recorded
    pub rir: i32,
    pub notes: String,
    pub position: i32,
}

impl ExerciseSet {
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewExerciseSet {
    pub name: String,
    pub weight: f64,
    pub reps: i32,
    pub rir: i32,
    pub notes: String,
}

impl NewExerciseSet {
    pub fn validate(&self) -> Result<(), ValidationError> {
        non_blank("exercise", &self.name)?;
        non_negative("weight", self.weight)?;
        non_negative("reps", f64::from(self.reps))?;
        non_negative("rir", f64::from(self.rir))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSetUpdate {
    pub name: Option<String>,
    pub weight: Option<f64>,
    pub reps: Option<i32>,
    pub rir: Option<i32>,
    pub notes: Option<String>,
    pub position: Option<i32>,
}

impl ExerciseSetUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_none()
            && self.weight.is_none()
            && self.reps.is_none()
            && self.rir.is_none()
            && self.notes.is_none()
            && self.position.is_none()
        {
            return Err(ValidationError::EmptyUpdate);
        }
        if let Some(name) = &self.name {
            non_blank("exercise", name)?;
        }
        if let Some(weight) = self.weight {
            non_negative("weight", weight)?;
        }
        if let Some(reps) = self.reps {
            non_negative("reps", f64::from(reps))?;
        }
        if let Some(rir) = self.rir {
            non_negative("rir", f64::from(rir))?;
        }
        Ok(())
    }
}
