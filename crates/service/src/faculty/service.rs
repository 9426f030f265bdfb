use std::sync::Arc;

use tracing::{debug, info, instrument};

use models::{faculty, student};

use super::domain::NewFaculty;
use super::repository::FacultyRepository;
use crate::errors::ServiceError;

/// Faculty business service independent of web framework
pub struct FacultyService<R: FacultyRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: FacultyRepository + ?Sized> FacultyService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Persist a new faculty and return it with its generated id.
    ///
    /// # Examples
    /// ```
    /// use service::mock::MockSchoolRepository;
    /// use service::faculty::{domain::NewFaculty, FacultyService};
    /// use std::sync::Arc;
    /// let svc = FacultyService::new(Arc::new(MockSchoolRepository::new()));
    /// let f = tokio_test::block_on(svc.create(NewFaculty { name: "Ravenclaw".into(), color: "blue".into() })).unwrap();
    /// let found = tokio_test::block_on(svc.find(f.id)).unwrap();
    /// assert_eq!((found.name.as_str(), found.color.as_str()), ("Ravenclaw", "blue"));
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewFaculty) -> Result<faculty::Model, ServiceError> {
        info!("Faculty.create was invoked");
        let f = self.repo.create(input).await?;
        debug!(faculty_id = f.id, "faculty_created");
        Ok(f)
    }

    #[instrument(skip(self))]
    pub async fn find(&self, id: i64) -> Result<faculty::Model, ServiceError> {
        info!("Faculty.find was invoked");
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("faculty"))
    }

    /// `true` when a faculty existed and was removed; its students are detached.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        info!("Faculty.delete was invoked");
        if self.repo.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        self.repo.delete(id).await
    }

    #[instrument(skip(self, faculty), fields(faculty_id = faculty.id))]
    pub async fn edit(&self, faculty: faculty::Model) -> Result<Option<faculty::Model>, ServiceError> {
        info!("Faculty.edit was invoked");
        if self.repo.find_by_id(faculty.id).await?.is_none() {
            return Ok(None);
        }
        self.repo.update(faculty).await.map(Some)
    }

    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<Vec<faculty::Model>, ServiceError> {
        info!("Faculty.all was invoked");
        self.repo.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn by_color(&self, color: &str) -> Result<Vec<faculty::Model>, ServiceError> {
        info!("Faculty.by_color was invoked");
        self.repo.find_by_color(color).await
    }

    /// Case-insensitive match on either field; absent arguments are ignored.
    #[instrument(skip(self))]
    pub async fn by_color_or_name(
        &self,
        color: Option<&str>,
        name: Option<&str>,
    ) -> Result<Vec<faculty::Model>, ServiceError> {
        info!("Faculty.by_color_or_name was invoked");
        self.repo.find_by_color_or_name_ignore_case(color, name).await
    }

    #[instrument(skip(self))]
    pub async fn students_of(&self, id: i64) -> Result<Vec<student::Model>, ServiceError> {
        info!("Faculty.students_of was invoked");
        let (_, students) = self
            .repo
            .find_with_students(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("faculty"))?;
        Ok(students)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSchoolRepository;
    use crate::student::domain::NewStudent;
    use crate::student::repository::StudentRepository;

    fn svc() -> (Arc<MockSchoolRepository>, FacultyService<MockSchoolRepository>) {
        let repo = Arc::new(MockSchoolRepository::new());
        (repo.clone(), FacultyService::new(repo))
    }

    fn new_faculty(name: &str, color: &str) -> NewFaculty {
        NewFaculty { name: name.into(), color: color.into() }
    }

    #[tokio::test]
    async fn create_then_find_round_trips() {
        let (_, svc) = svc();
        let f = svc.create(new_faculty("Slytherin", "green")).await.unwrap();
        assert_eq!(svc.find(f.id).await.unwrap(), f);
    }

    #[tokio::test]
    async fn delete_then_find_fails() {
        let (_, svc) = svc();
        let f = svc.create(new_faculty("Slytherin", "green")).await.unwrap();
        assert!(svc.delete(f.id).await.unwrap());
        assert!(matches!(svc.find(f.id).await, Err(ServiceError::NotFound(_))));
        assert!(!svc.delete(f.id).await.unwrap());
    }

    #[tokio::test]
    async fn edit_missing_is_none() {
        let (_, svc) = svc();
        let ghost = faculty::Model { id: 3, name: "Durmstrang".into(), color: "red".into() };
        assert_eq!(svc.edit(ghost).await.unwrap(), None);
        assert!(svc.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn edit_overwrites_existing() {
        let (_, svc) = svc();
        let f = svc.create(new_faculty("Ravenclaw", "blue")).await.unwrap();
        let changed = faculty::Model { color: "bronze".into(), ..f.clone() };

        assert_eq!(svc.edit(changed.clone()).await.unwrap(), Some(changed.clone()));
        assert_eq!(svc.find(f.id).await.unwrap(), changed);
        assert_eq!(svc.all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn by_color_is_exact() {
        let (_, svc) = svc();
        svc.create(new_faculty("Gryffindor", "red")).await.unwrap();
        svc.create(new_faculty("Other", "Red")).await.unwrap();
        let names: Vec<String> = svc.by_color("red").await.unwrap().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["Gryffindor"]);
    }

    #[tokio::test]
    async fn by_color_or_name_ignores_case() {
        let (_, svc) = svc();
        let g = svc.create(new_faculty("Gryffindor", "red")).await.unwrap();
        let r = svc.create(new_faculty("Ravenclaw", "blue")).await.unwrap();
        svc.create(new_faculty("Hufflepuff", "yellow")).await.unwrap();

        let ids: Vec<i64> = svc
            .by_color_or_name(Some("BLUE"), Some("gryffindor"))
            .await
            .unwrap()
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, vec![g.id, r.id]);

        let only_name = svc.by_color_or_name(None, Some("RAVENCLAW")).await.unwrap();
        assert_eq!(only_name, vec![r]);
        assert!(svc.by_color_or_name(None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn students_of_returns_only_members() {
        let (repo, svc) = svc();
        let g = svc.create(new_faculty("Gryffindor", "red")).await.unwrap();
        let s = svc.create(new_faculty("Slytherin", "green")).await.unwrap();
        for (name, age, fid) in [("Harry", 11, g.id), ("Draco", 11, s.id), ("Hermione", 12, g.id)] {
            StudentRepository::create(repo.as_ref(), NewStudent { name: name.into(), age, faculty_id: Some(fid) })
                .await
                .unwrap();
        }

        let members: Vec<(String, i32)> = svc
            .students_of(g.id)
            .await
            .unwrap()
            .into_iter()
            .map(|st| (st.name, st.age))
            .collect();
        assert_eq!(members, vec![("Harry".to_string(), 11), ("Hermione".to_string(), 12)]);
        assert!(matches!(svc.students_of(999).await, Err(ServiceError::NotFound(_))));
    }
}
