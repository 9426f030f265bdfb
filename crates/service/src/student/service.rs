use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, info, instrument};

use models::{faculty, student};

use super::domain::NewStudent;
use super::printer::{spawn_print, LineSink, PrintJob, PrintMode, TracingSink};
use super::repository::StudentRepository;
use crate::errors::ServiceError;

const DEFAULT_PRINT_DELAY: Duration = Duration::from_millis(3000);

/// Student business service independent of web framework
pub struct StudentService<R: StudentRepository + ?Sized> {
    repo: Arc<R>,
    sink: Arc<dyn LineSink>,
    print_lock: Arc<Mutex<()>>,
    print_delay: Duration,
}

impl<R: StudentRepository + ?Sized> StudentService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            sink: Arc::new(TracingSink),
            print_lock: Arc::new(Mutex::new(())),
            print_delay: DEFAULT_PRINT_DELAY,
        }
    }

    pub fn with_print_delay(mut self, delay: Duration) -> Self {
        self.print_delay = delay;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn LineSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Persist a new student and return it with its generated id.
    ///
    /// # Examples
    /// ```
    /// use service::mock::MockSchoolRepository;
    /// use service::student::{domain::NewStudent, StudentService};
    /// use std::sync::Arc;
    /// let svc = StudentService::new(Arc::new(MockSchoolRepository::new()));
    /// let s = tokio_test::block_on(svc.create(NewStudent { name: "Harry".into(), age: 11, faculty_id: None })).unwrap();
    /// assert_eq!(s.id, 1);
    /// assert_eq!(tokio_test::block_on(svc.find(s.id)).unwrap().name, "Harry");
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewStudent) -> Result<student::Model, ServiceError> {
        info!("Student.create was invoked");
        let s = self.repo.create(input).await?;
        debug!(student_id = s.id, "student_created");
        Ok(s)
    }

    #[instrument(skip(self))]
    pub async fn find(&self, id: i64) -> Result<student::Model, ServiceError> {
        info!("Student.find was invoked");
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("student"))
    }

    /// `true` when a student existed and was removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        info!("Student.delete was invoked");
        if self.repo.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        self.repo.delete(id).await
    }

    /// Overwrite an existing student; `None` when the id is unknown.
    #[instrument(skip(self, student), fields(student_id = student.id))]
    pub async fn edit(&self, student: student::Model) -> Result<Option<student::Model>, ServiceError> {
        info!("Student.edit was invoked");
        if self.repo.find_by_id(student.id).await?.is_none() {
            return Ok(None);
        }
        self.repo.update(student).await.map(Some)
    }

    #[instrument(skip(self))]
    pub async fn by_age(&self, age: i32) -> Result<Vec<student::Model>, ServiceError> {
        info!("Student.by_age was invoked");
        self.repo.find_by_age(age).await
    }

    #[instrument(skip(self))]
    pub async fn by_age_between(&self, min: i32, max: i32) -> Result<Vec<student::Model>, ServiceError> {
        info!("Student.by_age_between was invoked");
        self.repo.find_by_age_between(min, max).await
    }

    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<Vec<student::Model>, ServiceError> {
        info!("Student.all was invoked");
        self.repo.find_all().await
    }

    /// Faculty of the student, `None` if unassigned.
    #[instrument(skip(self))]
    pub async fn faculty_of(&self, id: i64) -> Result<Option<faculty::Model>, ServiceError> {
        info!("Student.faculty_of was invoked");
        let s = self.find(id).await?;
        self.repo.find_faculty(&s).await
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<u64, ServiceError> {
        info!("Student.count was invoked");
        self.repo.count().await
    }

    /// Average computed by the store.
    #[instrument(skip(self))]
    pub async fn avg_age(&self) -> Result<f64, ServiceError> {
        info!("Student.avg_age was invoked");
        self.repo.avg_age().await
    }

    /// Average recomputed over all loaded rows.
    #[instrument(skip(self))]
    pub async fn average_age(&self) -> Result<f64, ServiceError> {
        info!("Student.average_age was invoked");
        let all = self.repo.find_all().await?;
        if all.is_empty() {
            return Ok(0.0);
        }
        let sum: i64 = all.iter().map(|s| i64::from(s.age)).sum();
        Ok(sum as f64 / all.len() as f64)
    }

    #[instrument(skip(self))]
    pub async fn last_five(&self) -> Result<Vec<student::Model>, ServiceError> {
        info!("Student.last_five was invoked");
        self.repo.last_five().await
    }

    /// Uppercased names beginning with `A`, sorted.
    #[instrument(skip(self))]
    pub async fn names_starting_with_a(&self) -> Result<Vec<String>, ServiceError> {
        info!("Student.names_starting_with_a was invoked");
        let mut names: Vec<String> = self
            .repo
            .find_all()
            .await?
            .into_iter()
            .map(|s| s.name.to_uppercase())
            .filter(|n| n.starts_with('A'))
            .collect();
        names.sort();
        Ok(names)
    }

    /// Print six students from two threads without coordination.
    #[instrument(skip(self))]
    pub async fn print_parallel(&self) -> Result<PrintJob, ServiceError> {
        info!("Student.print_parallel was invoked");
        self.print(PrintMode::Parallel).await
    }

    /// Same as [`Self::print_parallel`] with every write under the print lock.
    #[instrument(skip(self))]
    pub async fn print_synchronized(&self) -> Result<PrintJob, ServiceError> {
        info!("Student.print_synchronized was invoked");
        self.print(PrintMode::Synchronized).await
    }

    async fn print(&self, mode: PrintMode) -> Result<PrintJob, ServiceError> {
        let students = self.repo.find_all().await?;
        spawn_print(students, mode, self.sink.clone(), self.print_lock.clone(), self.print_delay)
    }
}
