pub mod client;
pub mod error;
pub mod program;
pub mod session;
pub mod weight;

pub use client::{Client, ClientUpdate, NewClient};
pub use error::ValidationError;
pub use program::{ExerciseTemplate, NewProgram, Program, ProgramUpdate};
pub use session::{ExerciseSet, ExerciseSetUpdate, NewExerciseSet, NewSession, Session, SessionUpdate};
pub use weight::{NewWeightLog, WeightLog, WeightLogUpdate};
