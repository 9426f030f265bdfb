use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorBody { pub error: String, pub message: String }

#[derive(ToSchema)]
pub struct FacultyDoc { pub id: i64, pub name: String, pub color: String }

#[derive(ToSchema)]
pub struct NewFacultyDoc {
    pub name: String,
    /// Defaults to an empty string.
    pub color: Option<String>,
}

#[derive(ToSchema)]
pub struct StudentDoc { pub id: i64, pub name: String, pub age: i32, pub faculty_id: Option<i64> }

#[derive(ToSchema)]
pub struct NewStudentDoc { pub name: String, pub age: i32, pub faculty_id: Option<i64> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::faculty::get,
        crate::routes::faculty::create,
        crate::routes::faculty::edit,
        crate::routes::faculty::delete,
        crate::routes::faculty::all,
        crate::routes::faculty::by_color,
        crate::routes::faculty::by_color_or_name,
        crate::routes::faculty::students,
        crate::routes::student::get,
        crate::routes::student::create,
        crate::routes::student::edit,
        crate::routes::student::delete,
        crate::routes::student::all,
        crate::routes::student::by_age,
        crate::routes::student::by_age_between,
        crate::routes::student::faculty,
        crate::routes::student::count,
        crate::routes::student::avg_age,
        crate::routes::student::average_age,
        crate::routes::student::last_five,
        crate::routes::student::names_starting_with_a,
        crate::routes::student::print_parallel,
        crate::routes::student::print_synchronized,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            FacultyDoc,
            NewFacultyDoc,
            StudentDoc,
            NewStudentDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "faculty"),
        (name = "student")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/health", "/faculty", "/faculty/byColorOrName", "/student", "/student/print-synchronized"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
