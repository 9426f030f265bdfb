use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Statement,
};
use tracing::debug;

use models::{faculty, student};

use super::domain::NewStudent;
use crate::errors::{db_err, ServiceError};

const LAST_N: u64 = 5;

/// Persistence abstraction for students, including the derived queries.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn create(&self, input: NewStudent) -> Result<student::Model, ServiceError>;
    /// Overwrite an existing row with `model`.
    async fn update(&self, model: student::Model) -> Result<student::Model, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<student::Model>, ServiceError>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
    async fn find_all(&self) -> Result<Vec<student::Model>, ServiceError>;
    async fn find_by_age(&self, age: i32) -> Result<Vec<student::Model>, ServiceError>;
    /// Inclusive on both ends.
    async fn find_by_age_between(&self, min: i32, max: i32) -> Result<Vec<student::Model>, ServiceError>;
    async fn find_faculty(&self, student: &student::Model) -> Result<Option<faculty::Model>, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
    /// Database-side average; 0.0 for an empty table.
    async fn avg_age(&self) -> Result<f64, ServiceError>;
    /// Highest ids first.
    async fn last_five(&self) -> Result<Vec<student::Model>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn create(&self, input: NewStudent) -> Result<student::Model, ServiceError> {
        Ok(student::create(&self.db, &input.name, input.age, input.faculty_id).await?)
    }

    async fn update(&self, model: student::Model) -> Result<student::Model, ServiceError> {
        Ok(student::overwrite(&self.db, model).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<student::Model>, ServiceError> {
        student::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let res = student::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }

    async fn find_all(&self) -> Result<Vec<student::Model>, ServiceError> {
        student::Entity::find()
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_by_age(&self, age: i32) -> Result<Vec<student::Model>, ServiceError> {
        student::Entity::find()
            .filter(student::Column::Age.eq(age))
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_by_age_between(&self, min: i32, max: i32) -> Result<Vec<student::Model>, ServiceError> {
        student::Entity::find()
            .filter(student::Column::Age.between(min, max))
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_faculty(&self, student: &student::Model) -> Result<Option<faculty::Model>, ServiceError> {
        student.find_related(faculty::Entity).one(&self.db).await.map_err(db_err)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        student::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn avg_age(&self) -> Result<f64, ServiceError> {
        // AVG over an integer column is NUMERIC in Postgres
        let sql = "SELECT CAST(AVG(age) AS DOUBLE PRECISION) AS avg_age FROM student";
        debug!(sql = %sql, "query");
        let row = self
            .db
            .query_one(Statement::from_string(DbBackend::Postgres, sql))
            .await
            .map_err(db_err)?;
        let avg: Option<f64> = match row {
            Some(r) => r.try_get("", "avg_age").map_err(db_err)?,
            None => None,
        };
        Ok(avg.unwrap_or(0.0))
    }

    async fn last_five(&self) -> Result<Vec<student::Model>, ServiceError> {
        student::Entity::find()
            .order_by_desc(student::Column::Id)
            .limit(LAST_N)
            .all(&self.db)
            .await
            .map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn seaorm_student_repository_queries() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let repo = SeaOrmStudentRepository { db: db.clone() };

        let tag = uuid::Uuid::new_v4().simple().to_string();
        let f = faculty::create(&db, &format!("repo_faculty_{tag}"), "silver").await?;
        let a = repo.create(NewStudent { name: format!("a_{tag}"), age: 91, faculty_id: Some(f.id) }).await?;
        let b = repo.create(NewStudent { name: format!("b_{tag}"), age: 93, faculty_id: None }).await?;

        let by_age = repo.find_by_age(91).await?;
        assert!(by_age.iter().any(|s| s.id == a.id));
        assert!(by_age.iter().all(|s| s.age == 91));

        let between = repo.find_by_age_between(91, 93).await?;
        assert!(between.iter().any(|s| s.id == a.id));
        assert!(between.iter().any(|s| s.id == b.id));

        assert_eq!(repo.find_faculty(&a).await?, Some(f.clone()));
        assert_eq!(repo.find_faculty(&b).await?, None);

        assert!(repo.count().await? >= 2);
        assert!(repo.avg_age().await? > 0.0);

        let last = repo.last_five().await?;
        assert!(last.len() <= 5);
        assert!(last.windows(2).all(|w| w[0].id > w[1].id));

        assert!(repo.delete(a.id).await?);
        assert!(!repo.delete(a.id).await?);
        repo.delete(b.id).await?;
        faculty::Entity::delete_by_id(f.id).exec(&db).await?;
        Ok(())
    }
}
