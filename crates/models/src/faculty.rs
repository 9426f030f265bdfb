use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::{errors, student};

/// A school faculty. Equality covers exactly `id`, `name` and `color`;
/// the student collection lives in the `student` table and is fetched by join.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "faculty")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub color: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Student }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Student => Entity::has_many(student::Entity).into() }
    }
}

impl Related<student::Entity> for Entity {
    fn to() -> RelationDef { Relation::Student.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, name: &str, color: &str) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        name: Set(name.to_string()),
        color: Set(color.to_string()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Overwrite every column of an existing row. Callers check existence first.
pub async fn overwrite(db: &DatabaseConnection, model: Model) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: Set(model.id),
        name: Set(model.name),
        color: Set(model.color),
    };
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Faculty together with its students, loaded in one joined query.
pub async fn find_with_students(
    db: &DatabaseConnection,
    id: i64,
) -> Result<Option<(Model, Vec<student::Model>)>, errors::ModelError> {
    let mut rows = Entity::find_by_id(id)
        .find_with_related(student::Entity)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(rows.pop().map(|(faculty, mut students)| {
        students.sort_by_key(|s| s.id);
        (faculty, students)
    }))
}
