use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use models::{faculty, student};

use super::domain::NewFaculty;
use crate::errors::{db_err, ServiceError};

#[async_trait]
pub trait FacultyRepository: Send + Sync {
    async fn create(&self, input: NewFaculty) -> Result<faculty::Model, ServiceError>;
    /// Overwrite an existing row with `model`.
    async fn update(&self, model: faculty::Model) -> Result<faculty::Model, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<faculty::Model>, ServiceError>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
    async fn find_all(&self) -> Result<Vec<faculty::Model>, ServiceError>;
    async fn find_by_color(&self, color: &str) -> Result<Vec<faculty::Model>, ServiceError>;
    /// Match on color OR name, case-insensitively; an absent argument drops its branch.
    async fn find_by_color_or_name_ignore_case(
        &self,
        color: Option<&str>,
        name: Option<&str>,
    ) -> Result<Vec<faculty::Model>, ServiceError>;
    /// Eager fetch of the faculty and its students.
    async fn find_with_students(&self, id: i64) -> Result<Option<(faculty::Model, Vec<student::Model>)>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmFacultyRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl FacultyRepository for SeaOrmFacultyRepository {
    async fn create(&self, input: NewFaculty) -> Result<faculty::Model, ServiceError> {
        Ok(faculty::create(&self.db, &input.name, &input.color).await?)
    }

    async fn update(&self, model: faculty::Model) -> Result<faculty::Model, ServiceError> {
        Ok(faculty::overwrite(&self.db, model).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<faculty::Model>, ServiceError> {
        faculty::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let res = faculty::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }

    async fn find_all(&self) -> Result<Vec<faculty::Model>, ServiceError> {
        faculty::Entity::find()
            .order_by_asc(faculty::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_by_color(&self, color: &str) -> Result<Vec<faculty::Model>, ServiceError> {
        faculty::Entity::find()
            .filter(faculty::Column::Color.eq(color))
            .order_by_asc(faculty::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_by_color_or_name_ignore_case(
        &self,
        color: Option<&str>,
        name: Option<&str>,
    ) -> Result<Vec<faculty::Model>, ServiceError> {
        if color.is_none() && name.is_none() {
            return Ok(Vec::new());
        }
        let mut cond = Condition::any();
        if let Some(c) = color {
            cond = cond.add(Expr::expr(Func::lower(Expr::col(faculty::Column::Color))).eq(c.to_lowercase()));
        }
        if let Some(n) = name {
            cond = cond.add(Expr::expr(Func::lower(Expr::col(faculty::Column::Name))).eq(n.to_lowercase()));
        }
        faculty::Entity::find()
            .filter(cond)
            .order_by_asc(faculty::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_with_students(&self, id: i64) -> Result<Option<(faculty::Model, Vec<student::Model>)>, ServiceError> {
        Ok(faculty::find_with_students(&self.db, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn seaorm_color_or_name_ignores_case() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let repo = SeaOrmFacultyRepository { db: db.clone() };

        let tag = uuid::Uuid::new_v4().simple().to_string();
        let by_name = repo.create(NewFaculty { name: format!("Name_{tag}"), color: "x".into() }).await?;
        let by_color = repo.create(NewFaculty { name: "other".into(), color: format!("Color_{tag}") }).await?;

        let found = repo
            .find_by_color_or_name_ignore_case(
                Some(&format!("COLOR_{tag}").to_lowercase()),
                Some(&format!("name_{tag}").to_uppercase()),
            )
            .await?;
        let ids: Vec<i64> = found.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![by_name.id, by_color.id]);

        assert!(repo.find_by_color_or_name_ignore_case(None, None).await?.is_empty());

        assert!(repo.delete(by_name.id).await?);
        assert!(repo.delete(by_color.id).await?);
        assert!(repo.find_by_id(by_name.id).await?.is_none());
        Ok(())
    }
}
