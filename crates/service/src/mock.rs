//! In-memory repository used by unit tests, doc examples and the HTTP end-to-end tests.
//! One store backs both traits so faculty -> students traversal sees the same rows.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use models::{faculty, student};

use crate::errors::ServiceError;
use crate::faculty::domain::NewFaculty;
use crate::faculty::repository::FacultyRepository;
use crate::student::domain::NewStudent;
use crate::student::repository::StudentRepository;

#[derive(Default)]
struct State {
    next_student_id: i64,
    next_faculty_id: i64,
    students: BTreeMap<i64, student::Model>, // key: id
    faculties: BTreeMap<i64, faculty::Model>, // key: id
}

#[derive(Default)]
pub struct MockSchoolRepository {
    state: Mutex<State>,
}

impl MockSchoolRepository {
    pub fn new() -> Self { Self::default() }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn check_faculty(state: &State, faculty_id: Option<i64>) -> Result<(), ServiceError> {
    match faculty_id {
        Some(id) if !state.faculties.contains_key(&id) => {
            Err(ServiceError::Db(format!("faculty {id} violates fk_student_faculty")))
        }
        _ => Ok(()),
    }
}

#[async_trait]
impl StudentRepository for MockSchoolRepository {
    async fn create(&self, input: NewStudent) -> Result<student::Model, ServiceError> {
        let mut state = self.state();
        check_faculty(&state, input.faculty_id)?;
        state.next_student_id += 1;
        let model = student::Model {
            id: state.next_student_id,
            name: input.name,
            age: input.age,
            faculty_id: input.faculty_id,
        };
        state.students.insert(model.id, model.clone());
        Ok(model)
    }

    async fn update(&self, model: student::Model) -> Result<student::Model, ServiceError> {
        let mut state = self.state();
        check_faculty(&state, model.faculty_id)?;
        match state.students.get_mut(&model.id) {
            Some(slot) => {
                *slot = model.clone();
                Ok(model)
            }
            None => Err(ServiceError::not_found("student")),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<student::Model>, ServiceError> {
        Ok(self.state().students.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(self.state().students.remove(&id).is_some())
    }

    async fn find_all(&self) -> Result<Vec<student::Model>, ServiceError> {
        Ok(self.state().students.values().cloned().collect())
    }

    async fn find_by_age(&self, age: i32) -> Result<Vec<student::Model>, ServiceError> {
        Ok(self.state().students.values().filter(|s| s.age == age).cloned().collect())
    }

    async fn find_by_age_between(&self, min: i32, max: i32) -> Result<Vec<student::Model>, ServiceError> {
        Ok(self
            .state()
            .students
            .values()
            .filter(|s| (min..=max).contains(&s.age))
            .cloned()
            .collect())
    }

    async fn find_faculty(&self, student: &student::Model) -> Result<Option<faculty::Model>, ServiceError> {
        let state = self.state();
        Ok(student.faculty_id.and_then(|fid| state.faculties.get(&fid).cloned()))
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(self.state().students.len() as u64)
    }

    async fn avg_age(&self) -> Result<f64, ServiceError> {
        let state = self.state();
        if state.students.is_empty() {
            return Ok(0.0);
        }
        let sum: i64 = state.students.values().map(|s| i64::from(s.age)).sum();
        Ok(sum as f64 / state.students.len() as f64)
    }

    async fn last_five(&self) -> Result<Vec<student::Model>, ServiceError> {
        Ok(self.state().students.values().rev().take(5).cloned().collect())
    }
}

#[async_trait]
impl FacultyRepository for MockSchoolRepository {
    async fn create(&self, input: NewFaculty) -> Result<faculty::Model, ServiceError> {
        let mut state = self.state();
        state.next_faculty_id += 1;
        let model = faculty::Model { id: state.next_faculty_id, name: input.name, color: input.color };
        state.faculties.insert(model.id, model.clone());
        Ok(model)
    }

    async fn update(&self, model: faculty::Model) -> Result<faculty::Model, ServiceError> {
        let mut state = self.state();
        match state.faculties.get_mut(&model.id) {
            Some(slot) => {
                *slot = model.clone();
                Ok(model)
            }
            None => Err(ServiceError::not_found("faculty")),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<faculty::Model>, ServiceError> {
        Ok(self.state().faculties.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let mut state = self.state();
        if state.faculties.remove(&id).is_none() {
            return Ok(false);
        }
        // same as ON DELETE SET NULL
        for s in state.students.values_mut().filter(|s| s.faculty_id == Some(id)) {
            s.faculty_id = None;
        }
        Ok(true)
    }

    async fn find_all(&self) -> Result<Vec<faculty::Model>, ServiceError> {
        Ok(self.state().faculties.values().cloned().collect())
    }

    async fn find_by_color(&self, color: &str) -> Result<Vec<faculty::Model>, ServiceError> {
        Ok(self.state().faculties.values().filter(|f| f.color == color).cloned().collect())
    }

    async fn find_by_color_or_name_ignore_case(
        &self,
        color: Option<&str>,
        name: Option<&str>,
    ) -> Result<Vec<faculty::Model>, ServiceError> {
        let color = color.map(str::to_lowercase);
        let name = name.map(str::to_lowercase);
        Ok(self
            .state()
            .faculties
            .values()
            .filter(|f| {
                color.as_deref().is_some_and(|c| f.color.to_lowercase() == c)
                    || name.as_deref().is_some_and(|n| f.name.to_lowercase() == n)
            })
            .cloned()
            .collect())
    }

    async fn find_with_students(&self, id: i64) -> Result<Option<(faculty::Model, Vec<student::Model>)>, ServiceError> {
        let state = self.state();
        Ok(state.faculties.get(&id).map(|f| {
            let students = state.students.values().filter(|s| s.faculty_id == Some(id)).cloned().collect();
            (f.clone(), students)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn faculty_delete_detaches_students() {
        let repo = MockSchoolRepository::new();
        let f = FacultyRepository::create(&repo, NewFaculty { name: "Hufflepuff".into(), color: "yellow".into() })
            .await
            .unwrap();
        let s = StudentRepository::create(&repo, NewStudent { name: "Cedric".into(), age: 17, faculty_id: Some(f.id) })
            .await
            .unwrap();

        assert!(FacultyRepository::delete(&repo, f.id).await.unwrap());
        let s = StudentRepository::find_by_id(&repo, s.id).await.unwrap().unwrap();
        assert_eq!(s.faculty_id, None);
    }

    #[tokio::test]
    async fn student_with_unknown_faculty_is_rejected() {
        let repo = MockSchoolRepository::new();
        let err = StudentRepository::create(&repo, NewStudent { name: "Ghost".into(), age: 1, faculty_id: Some(42) })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)));
        assert_eq!(StudentRepository::count(&repo).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn last_five_is_highest_ids_first() {
        let repo = MockSchoolRepository::new();
        for i in 0..7 {
            StudentRepository::create(&repo, NewStudent { name: format!("s{i}"), age: 11 + i, faculty_id: None })
                .await
                .unwrap();
        }
        let ids: Vec<i64> = repo.last_five().await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3]);
    }
}
