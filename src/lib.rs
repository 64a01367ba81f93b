mod db;
mod i18n;
mod intelligence;
mod settings;
mod sync;

use std::{path::Path, time::Duration};

use anyhow::Result;
use chrono::Utc;
use log::info;
use uuid::Uuid;

pub use db::{Customer, Database, Job, JobInfo, JobStatus, ServiceItem};
pub use i18n::{Language, Translator};
pub use intelligence::{
    analyze, analyze_at, CommonProblem, CustomerIntelligence, IntelligenceConfig, IssuePattern,
    RecurringIssue,
};
pub use settings::{SettingsStore, SyncSettings};
pub use sync::{PendingOperation, SyncController, SyncSnapshot, SyncStatus};

/// Initialize logging (reads RUST_LOG env var).
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}

/// Intake form for a new service order.
#[derive(Debug, Clone)]
pub struct JobIntake {
    pub customer_phone: String,
    pub customer_name: String,
    pub vehicle: Option<String>,
    pub fault_category: Option<String>,
    pub problem_description: String,
}

/// Wired-up application core: store, sync indicator, settings, translations.
pub struct GarageApp {
    pub db: Database,
    pub sync: SyncController,
    pub settings: SettingsStore,
    pub translator: Translator,
    intelligence_config: IntelligenceConfig,
}

impl GarageApp {
    pub fn init(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;

        let database = Database::new(data_dir.join("garagepro.sqlite3"))?;

        let settings = SettingsStore::new(data_dir.join("settings.json"))?;
        let sync_settings = settings.sync();
        let sync = SyncController::new(Duration::from_millis(sync_settings.sync_delay_ms));
        let translator = Translator::new(settings.language());

        info!("GaragePRO core initialized at {}", data_dir.display());

        Ok(Self {
            db: database,
            sync,
            settings,
            translator,
            intelligence_config: IntelligenceConfig::default(),
        })
    }

    /// Register a new job: persists the record, refreshes the customer row,
    /// and notes the write in the sync queue when the app is offline.
    pub async fn intake_job(&self, intake: JobIntake) -> Result<Job> {
        let now = Utc::now();
        let job = Job {
            id: Uuid::new_v4().to_string(),
            customer_phone: intake.customer_phone,
            customer_name: intake.customer_name,
            vehicle: intake.vehicle,
            fault_category: intake.fault_category,
            problem_description: intake.problem_description,
            status: JobStatus::Received,
            created_at: now,
            updated_at: now,
        };

        self.db.insert_job(&job).await?;
        self.db
            .upsert_customer(&job.customer_phone, &job.customer_name, now)
            .await?;

        if self.sync.snapshot().await.status == SyncStatus::Offline {
            self.sync
                .queue_operation(&format!("create job {}", job.id))
                .await;
        }

        Ok(job)
    }

    /// Lightweight job list for the jobs overview, newest first.
    pub async fn recent_jobs(&self) -> Result<Vec<JobInfo>> {
        let jobs = self.db.list_jobs().await?;
        Ok(jobs.into_iter().map(JobInfo::from).collect())
    }

    /// Run the history analyzer for one customer over the full job
    /// collection. `None` means the customer has no jobs on record.
    pub async fn customer_intelligence(
        &self,
        customer_phone: &str,
    ) -> Result<Option<CustomerIntelligence>> {
        let all_jobs = self.db.list_jobs().await?;
        Ok(analyze(&all_jobs, customer_phone, &self.intelligence_config))
    }
}
