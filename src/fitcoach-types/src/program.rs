use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, non_blank, positive};

/// A planned exercise inside a training program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseTemplate {
    pub name: String,
    pub target_sets: u32,
    pub target_reps: u32,
}

impl ExerciseTemplate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        non_blank("template", &self.name)?;
        positive("target sets", f64::from(self.target_sets))?;
        positive("target reps", f64::from(self.target_reps))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: i32,
    pub client_id: i32,
    pub name: String,
    pub description: String,
    pub exercises: Vec<ExerciseTemplate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProgram {
    pub client_id: i32,
    pub name: String,
    pub description: String,
    pub exercises: Vec<ExerciseTemplate>,
}

impl NewProgram {
    pub fn validate(&self) -> Result<(), ValidationError> {
        non_blank("program", &self.name)?;
        self.exercises.iter().try_for_each(ExerciseTemplate::validate)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub exercises: Option<Vec<ExerciseTemplate>>,
}

impl ProgramUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_none() && self.description.is_none() && self.exercises.is_none() {
            return Err(ValidationError::EmptyUpdate);
        }
        if let Some(name) = &self.name {
            non_blank("program", name)?;
        }
        self.exercises
            .iter()
            .flatten()
            .try_for_each(ExerciseTemplate::validate)
    }
}
