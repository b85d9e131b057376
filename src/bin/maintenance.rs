use std::env;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use diesel::PgConnection;
use tracing_subscriber::EnvFilter;

use campaign_backend::{
    auth::jwt::JwtService,
    config::AppConfig,
    db,
    domain::UserId,
    repository::{PgCampaignRepository, PgTransactionService, TransactionService},
    usecases::CampaignUseCase,
};

const USAGE: &str = "Usage: maintenance <update-status | issue-token <user_id>>";

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let mut args = env::args().skip(1);
    match args.next().as_deref() {
        Some("update-status") => update_status()?,
        Some("issue-token") => {
            let raw = args.next().context(USAGE)?;
            issue_token(&raw)?
        }
        Some(cmd) => {
            eprintln!("Unknown command: {cmd}\n{USAGE}");
            std::process::exit(1);
        }
        None => {
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    }

    Ok(())
}

fn update_status() -> Result<()> {
    let config = AppConfig::from_env()?;
    tracing::info!(
        component = "maintenance",
        database_url = %config.redacted_database_url(),
        "loaded backend configuration"
    );
    let pool = db::init_pool(&config)?;
    let mut pooled = pool.get().context("failed to get database connection")?;
    let conn: &mut PgConnection = &mut pooled;

    let campaigns = CampaignUseCase::new(PgCampaignRepository);
    let today = Utc::now().date_naive();
    let transition = PgTransactionService
        .run_with_transaction(conn, |conn| campaigns.update_status(conn, today))?;

    println!(
        "{today}: {} campaigns activated, {} deactivated",
        transition.activated, transition.deactivated
    );
    Ok(())
}

fn issue_token(raw_user_id: &str) -> Result<()> {
    let user_id: i64 = raw_user_id
        .parse()
        .with_context(|| format!("invalid user id '{raw_user_id}'"))?;
    if user_id <= 0 {
        bail!("user id must be positive");
    }

    let config = AppConfig::from_env()?;
    let jwt = JwtService::from_config(&config)?;
    println!("{}", jwt.generate_token(UserId(user_id))?);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
