use fitcoach_entities::programs;
use fitcoach_types::{ExerciseTemplate, NewProgram, Program, ProgramUpdate};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::{
    DatabaseHandler, StoreError,
    changes::{Change, ChangeKind, Collection},
    db::now,
    type_impl::clients::client_exists,
};

impl DatabaseHandler {
    pub async fn create_program(&self, program: NewProgram) -> anyhow::Result<Program> {
        program.validate()?;
        if !client_exists(&self.db, program.client_id).await? {
            return Err(StoreError::not_found(Collection::Clients, program.client_id));
        }

        let created = now();
        let model = programs::ActiveModel {
            id: NotSet,
            client_id: Set(program.client_id),
            name: Set(program.name.trim().to_string()),
            description: Set(program.description),
            exercises: Set(serde_json::to_value(&program.exercises)?),
            created_at: Set(created),
            updated_at: Set(created),
        };

        let program = map_program(model.insert(&self.db).await?)?;
        self.publish(
            Change::new(Collection::Programs, ChangeKind::Inserted, program.id)
                .client(program.client_id),
        );
        Ok(program)
    }

    pub async fn get_program(&self, id: i32) -> anyhow::Result<Option<Program>> {
        programs::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(map_program)
            .transpose()
    }

    /// Programs of a client, newest first.
    pub async fn client_programs(&self, client_id: i32) -> anyhow::Result<Vec<Program>> {
        programs::Entity::find()
            .filter(programs::Column::ClientId.eq(client_id))
            .order_by_desc(programs::Column::CreatedAt)
            .order_by_desc(programs::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(map_program)
            .collect()
    }

    pub async fn update_program(&self, id: i32, update: ProgramUpdate) -> anyhow::Result<Program> {
        update.validate()?;

        let existing = programs::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found(Collection::Programs, id))?;

        let mut model: programs::ActiveModel = existing.into();
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(exercises) = update.exercises {
            model.exercises = Set(serde_json::to_value(&exercises)?);
        }
        model.updated_at = Set(now());

        let program = map_program(model.update(&self.db).await?)?;
        self.publish(
            Change::new(Collection::Programs, ChangeKind::Updated, id).client(program.client_id),
        );
        Ok(program)
    }

    pub async fn delete_program(&self, id: i32) -> anyhow::Result<()> {
        let existing = programs::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found(Collection::Programs, id))?;

        programs::Entity::delete_by_id(id).exec(&self.db).await?;
        self.publish(
            Change::new(Collection::Programs, ChangeKind::Deleted, id).client(existing.client_id),
        );
        Ok(())
    }
}

fn map_program(value: programs::Model) -> anyhow::Result<Program> {
    let exercises: Vec<ExerciseTemplate> = serde_json::from_value(value.exercises)?;

    Ok(Program {
        id: value.id,
        client_id: value.client_id,
        name: value.name,
        description: value.description,
        exercises,
        created_at: value.created_at,
        updated_at: value.updated_at,
    })
}
