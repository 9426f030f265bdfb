use std::fmt;

use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::{errors, faculty};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub age: i32,
    #[serde(default)]
    pub faculty_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Faculty }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Faculty => Entity::belongs_to(faculty::Entity)
                .from(Column::FacultyId)
                .to(faculty::Column::Id)
                .into(),
        }
    }
}

impl Related<faculty::Entity> for Entity {
    fn to() -> RelationDef { Relation::Faculty.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Student{{id={}, name='{}', age={}}}", self.id, self.name, self.age)
    }
}

pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    age: i32,
    faculty_id: Option<i64>,
) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        name: Set(name.to_string()),
        age: Set(age),
        faculty_id: Set(faculty_id),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Overwrite every column of an existing row. Callers check existence first.
pub async fn overwrite(db: &DatabaseConnection, model: Model) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: Set(model.id),
        name: Set(model.name),
        age: Set(model.age),
        faculty_id: Set(model.faculty_id),
    };
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
