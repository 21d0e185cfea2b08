use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vitals_alert::{Collaborators, EmergencyResponder, ReadingOutcome};
use vitals_core::{EmergencyConfig, EmergencyContact, Location, VitalSigns};

mod adapters;

use adapters::{FileContacts, FixedLocation, LoggingAlertStore, LoggingPhone};

#[derive(Parser, Debug)]
#[command(
    name = "vitals-cli",
    about = "Đánh giá chỉ số sống và chạy thử quy trình cấp cứu."
)]
struct Args {
    /// Đường dẫn tới file JSON chỉ số sống.
    #[arg(short, long)]
    input: PathBuf,

    /// File JSON danh sách người liên hệ khẩn cấp.
    #[arg(short, long)]
    contacts: Option<PathBuf>,

    #[arg(long, default_value = "local-user")]
    user_id: String,

    #[arg(long, requires = "longitude", allow_hyphen_values = true)]
    latitude: Option<f64>,

    #[arg(long, requires = "latitude", allow_hyphen_values = true)]
    longitude: Option<f64>,

    /// Ghi đè số gọi cấp cứu mặc định.
    #[arg(long)]
    ambulance_number: Option<String>,

    /// Không gọi xe cấp cứu.
    #[arg(long)]
    no_call: bool,

    /// Không gửi SMS.
    #[arg(long)]
    no_sms: bool,
}

impl Args {
    fn config(&self) -> EmergencyConfig {
        let mut config = EmergencyConfig::default();
        if let Some(number) = &self.ambulance_number {
            config.ambulance_number = number.clone();
        }
        config.call_ambulance = !self.no_call;
        config.sms_enabled = !self.no_sms;
        config
    }

    fn location(&self) -> Option<Location> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Location {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let args = Args::parse();

    let data = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Không đọc được file {:?}", args.input))?;
    let vitals: VitalSigns =
        serde_json::from_str(&data).context("File chỉ số sống không hợp lệ")?;

    let contacts: Vec<EmergencyContact> = match &args.contacts {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Không đọc được file {path:?}"))?;
            serde_json::from_str(&raw).context("File danh bạ không hợp lệ")?
        }
        None => Vec::new(),
    };

    let phone = Arc::new(LoggingPhone);
    let services = Collaborators {
        location: Arc::new(FixedLocation(args.location())),
        contacts: Arc::new(FileContacts(contacts)),
        telephony: phone.clone(),
        sms: phone,
        alerts: Arc::new(LoggingAlertStore),
    };

    let responder = EmergencyResponder::new(args.config(), services)?;

    match responder.handle_reading(vitals, &args.user_id).await? {
        ReadingOutcome::Normal => {
            println!("Vitals within normal thresholds, no dispatch.");
        }
        ReadingOutcome::Dispatched { reason, report } => {
            println!(
                "Critical: {reason}\nSMS sent: {}/{}\nAlert records: {}",
                report.sms_sent(),
                report.deliveries.len(),
                report.alerts_submitted()
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
