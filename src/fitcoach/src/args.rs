use std::str::FromStr;

use anyhow::{anyhow, bail};
use fitcoach_types::{ExerciseTemplate, NewExerciseSet};

/// `name:weight:reps[:rir]`, e.g. `Bench press:60:8:2`
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseArg(pub NewExerciseSet);

impl FromStr for ExerciseArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let (name, weight, reps, rir) = match parts.as_slice() {
            [name, weight, reps] => (name, weight, reps, None),
            [name, weight, reps, rir] => (name, weight, reps, Some(rir)),
            _ => bail!("Invalid exercise `{s}`, expected name:weight:reps[:rir]"),
        };

        let set = NewExerciseSet {
            name: name.to_string(),
            weight: weight
                .parse()
                .map_err(|_| anyhow!("Invalid weight `{weight}` in `{s}`"))?,
            reps: reps
                .parse()
                .map_err(|_| anyhow!("Invalid reps `{reps}` in `{s}`"))?,
            rir: rir
                .map(|rir| rir.parse())
                .transpose()
                .map_err(|_| anyhow!("Invalid rir in `{s}`"))?
                .unwrap_or_default(),
            notes: String::new(),
        };
        set.validate()?;
        Ok(Self(set))
    }
}

/// `name:sets:reps`, e.g. `Squat:5:5`
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateArg(pub ExerciseTemplate);

impl FromStr for TemplateArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let [name, sets, reps] = parts[..] else {
            bail!("Invalid template `{s}`, expected name:sets:reps");
        };

        let template = ExerciseTemplate {
            name: name.to_string(),
            target_sets: sets
                .parse()
                .map_err(|_| anyhow!("Invalid sets `{sets}` in `{s}`"))?,
            target_reps: reps
                .parse()
                .map_err(|_| anyhow!("Invalid reps `{reps}` in `{s}`"))?,
        };
        template.validate()?;
        Ok(Self(template))
    }
}
