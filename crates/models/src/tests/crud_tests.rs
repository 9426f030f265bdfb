use sea_orm::{EntityTrait, ModelTrait, QueryFilter, ColumnTrait};
use anyhow::Result;
use uuid::Uuid;

use super::setup_test_db;
use crate::{faculty, student};

/// Test faculty CRUD operations
#[tokio::test]
async fn test_faculty_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    // Create
    let name = format!("faculty_{}", Uuid::new_v4());
    let created = faculty::create(&db, &name, "scarlet").await?;
    assert!(created.id > 0);
    assert_eq!(created.name, name);
    assert_eq!(created.color, "scarlet");

    // Read
    let found = faculty::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.as_ref(), Some(&created));

    // Find by color
    let by_color = faculty::Entity::find()
        .filter(faculty::Column::Color.eq("scarlet"))
        .all(&db)
        .await?;
    assert!(by_color.iter().any(|f| f.id == created.id));

    // Overwrite
    let updated = faculty::overwrite(
        &db,
        faculty::Model { id: created.id, name: name.clone(), color: "gold".into() },
    )
    .await?;
    assert_eq!(updated.color, "gold");

    // Delete
    created.delete(&db).await?;
    let after = faculty::Entity::find_by_id(updated.id).one(&db).await?;
    assert!(after.is_none());
    Ok(())
}

/// Test student CRUD operations
#[tokio::test]
async fn test_student_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let name = format!("student_{}", Uuid::new_v4());
    let created = student::create(&db, &name, 14, None).await?;
    assert_eq!(created.age, 14);
    assert_eq!(created.faculty_id, None);

    let updated = student::overwrite(
        &db,
        student::Model { id: created.id, name: name.clone(), age: 15, faculty_id: None },
    )
    .await?;
    assert_eq!(updated.age, 15);

    let found = student::Entity::find_by_id(created.id).one(&db).await?.unwrap();
    assert_eq!(found, updated);

    let res = student::Entity::delete_by_id(created.id).exec(&db).await?;
    assert_eq!(res.rows_affected, 1);
    let res = student::Entity::delete_by_id(created.id).exec(&db).await?;
    assert_eq!(res.rows_affected, 0);
    Ok(())
}
