use fitcoach_algos::{ExerciseProgress, ProgressAnalyzer, SessionEntries};

use crate::DatabaseHandler;

impl DatabaseHandler {
    /// Volume trend per exercise over the client's latest sessions, sorted by exercise name.
    pub async fn analyze_exercise_progress(
        &self,
        client_id: i32,
    ) -> anyhow::Result<Vec<ExerciseProgress>> {
        let window = u64::try_from(ProgressAnalyzer::SESSION_WINDOW)?;
        let sessions = self.client_sessions(client_id, Some(window)).await?;
        if sessions.len() < ProgressAnalyzer::MIN_SESSIONS {
            debug!(
                "Client #{client_id} has {} sessions, not enough for progress",
                sessions.len()
            );
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = sessions.iter().map(|session| session.id).collect();
        let mut entries = self.exercises_by_session(&ids).await?;

        let sessions = sessions
            .into_iter()
            .map(|session| SessionEntries {
                session_id: session.id,
                date: session.date,
                entries: entries.remove(&session.id).unwrap_or_default(),
            })
            .collect();

        Ok(ProgressAnalyzer::new(sessions).analyze())
    }
}

#[cfg(test)]
mod tests {
    use fitcoach_algos::ProgressTrend;
    use fitcoach_types::NewExerciseSet;

    use crate::db::test_helpers::{date, memory_db, new_client, new_session, set};

    use super::*;

    async fn log(db: &DatabaseHandler, client_id: i32, day: u32, sets: Vec<NewExerciseSet>) {
        db.log_session(new_session(client_id, date(3, day)), sets)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn classifies_each_exercise() {
        let db = memory_db().await;
        let client = db.create_client(new_client("Ana")).await.unwrap();

        // Squat volume 1000 -> 1100 -> 1200, bench flat, row falling
        log(&db, client.id, 1, vec![
            set("Squat", 100.0, 10),
            set("bench press", 60.0, 8),
            set("Row", 50.0, 10),
        ])
        .await;
        log(&db, client.id, 3, vec![
            set("squat ", 110.0, 10),
            set("Bench Press", 60.0, 8),
            set("Row", 40.0, 10),
        ])
        .await;
        log(&db, client.id, 5, vec![
            set("SQUAT", 120.0, 10),
            set("bench press", 60.0, 8),
            set("Row", 40.0, 10),
            set("Curl", 15.0, 12),
        ])
        .await;

        let progress = db.analyze_exercise_progress(client.id).await.unwrap();
        let summary: Vec<_> = progress
            .iter()
            .map(|p| (p.exercise_name.as_str(), p.trend))
            .collect();
        assert_eq!(summary, vec![
            ("Bench press", ProgressTrend::Stagnant),
            ("Row", ProgressTrend::Declining),
            ("Squat", ProgressTrend::Improving),
        ]);

        let squat = &progress[2];
        assert_eq!(squat.change_percent, Some(15.0));
        assert_eq!(squat.suggestion, None);
        assert_eq!(squat.last_three_sessions[0].date, date(3, 5));
        assert_eq!(squat.last_three_sessions[0].max_weight, 120.0);
        assert_eq!(squat.last_three_sessions[2].total_volume, 1000.0);

        assert!(progress[0].suggestion.is_some());
    }

    #[tokio::test]
    async fn needs_three_sessions() {
        let db = memory_db().await;
        let client = db.create_client(new_client("Ana")).await.unwrap();
        for day in [1, 2] {
            log(&db, client.id, day, vec![set("Squat", 100.0, 5)]).await;
        }

        assert!(
            db.analyze_exercise_progress(client.id)
                .await
                .unwrap()
                .is_empty()
        );
        assert!(db.analyze_exercise_progress(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn only_latest_ten_sessions_count() {
        let db = memory_db().await;
        let client = db.create_client(new_client("Ana")).await.unwrap();

        for day in 1..=3 {
            log(&db, client.id, day, vec![set("Lunge", 20.0, 10)]).await;
        }
        for day in 4..=13 {
            log(&db, client.id, day, vec![set("Row", 50.0, 10)]).await;
        }

        let progress = db.analyze_exercise_progress(client.id).await.unwrap();
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].exercise_name, "Row");
        assert_eq!(progress[0].trend, ProgressTrend::Stagnant);
    }

    #[tokio::test]
    async fn repeated_analysis_is_identical() {
        let db = memory_db().await;
        let client = db.create_client(new_client("Ana")).await.unwrap();
        for (day, weight) in [(1, 80.0), (2, 85.0), (3, 70.0), (4, 90.0)] {
            log(&db, client.id, day, vec![
                set("Deadlift", weight, 5),
                set("Press", 40.0, 8),
            ])
            .await;
        }

        let first = db.analyze_exercise_progress(client.id).await.unwrap();
        let second = db.analyze_exercise_progress(client.id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
