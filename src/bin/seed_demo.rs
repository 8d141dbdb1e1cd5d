use academic_records::bootstrap::initialize_system_data;
use academic_records::database::get_database_connection;
use academic_records::seed::seed_demo;
use academic_records::{config::Config, utils::tracing::init_standard_tracing};
use anyhow::Context;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::parse();

    init_standard_tracing(env!("CARGO_CRATE_NAME"), &config.log_level);

    let db = get_database_connection(&config).await?;

    initialize_system_data(&db, &config)
        .await
        .context("Failed to initialize system data")?;

    let mut rng = StdRng::from_rng(&mut rand::rng());
    let summary = seed_demo(&db, &mut rng)
        .await
        .context("Failed to seed demo data")?;

    tracing::info!(
        "Seeded {} students, {} grade rows, {} graded",
        summary.students,
        summary.grade_rows,
        summary.graded
    );

    Ok(())
}
