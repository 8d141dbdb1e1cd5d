mod test_support;

use academic_records::repositories::{
    DisciplineRepository, GradeSheetRepository, GroupRepository, SpecialtyRepository,
};
use academic_records::seed::seed_demo;
use pretty_assertions::assert_eq;
use rand::{SeedableRng, rngs::StdRng};
use test_support::spawn_app;

#[tokio::test]
async fn demo_data_is_graded_and_staffed() {
    let app = spawn_app().await;
    let mut rng = StdRng::seed_from_u64(7);

    let summary = seed_demo(&app.db, &mut rng).await.unwrap();

    assert!(summary.students > 0);
    assert_eq!(summary.grade_rows as usize, summary.graded);

    let rows = GradeSheetRepository::new(&app.db)
        .find_by_students((1..=summary.students as i32).collect())
        .await
        .unwrap();
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|row| (3..=5).contains(&row.grade)));
    assert!(rows.iter().all(|row| row.teacher_id.is_some()));

    assert_eq!(SpecialtyRepository::new(&app.db).find_all().await.unwrap().len(), 2);
    assert_eq!(GroupRepository::new(&app.db).find_all().await.unwrap().len(), 3);
    assert_eq!(DisciplineRepository::new(&app.db).find_all().await.unwrap().len(), 8);
}

#[tokio::test]
async fn reseeding_keeps_the_catalog() {
    let app = spawn_app().await;
    let mut rng = StdRng::seed_from_u64(11);

    seed_demo(&app.db, &mut rng).await.unwrap();
    seed_demo(&app.db, &mut rng).await.unwrap();

    assert_eq!(SpecialtyRepository::new(&app.db).find_all().await.unwrap().len(), 2);
    assert_eq!(GroupRepository::new(&app.db).find_all().await.unwrap().len(), 3);
    assert_eq!(DisciplineRepository::new(&app.db).find_all().await.unwrap().len(), 8);
}
