//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::read_json;
use crate::idr::{CveListFilter, IdrClient, ReserveRequest};
use chrono::{DateTime, Datelike, Utc};
use futures::TryStreamExt;
use serde_json::Value;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = self.client()?;

        match &self.cli.command {
            Commands::Reserve {
                count,
                random,
                year,
                owning_cna,
            } => {
                let request = ReserveRequest::new(
                    *count,
                    *random,
                    year.unwrap_or_else(|| Utc::now().year()),
                    owning_cna.as_deref().unwrap_or_else(|| client.org()),
                );
                self.reserve(&client, &request).await
            }
            Commands::Show { cve_id } => self.show(&client, cve_id).await,
            Commands::List {
                year,
                state,
                reserved_lt,
                reserved_gt,
            } => {
                let filter = CveListFilter {
                    year: *year,
                    state: state.map(|s| s.as_str().to_string()),
                    reserved_lt: *reserved_lt,
                    reserved_gt: *reserved_gt,
                };
                self.list(&client, &filter).await
            }
            Commands::Quota => self.quota(&client).await,
            Commands::Ping => self.ping(&client).await,
        }
    }

    /// Build the IDR client from the global options
    fn client(&self) -> Result<IdrClient> {
        let mut builder = ClientConfig::builder().environment(&self.cli.environment);
        if let Some(username) = &self.cli.username {
            builder = builder.username(username);
        }
        if let Some(org) = &self.cli.org {
            builder = builder.org(org);
        }
        if let Some(api_key) = &self.cli.api_key {
            builder = builder.api_key(api_key);
        }
        if let Some(url) = self.cli.api_url.as_deref().filter(|u| !u.is_empty()) {
            builder = builder.url(url);
        }

        let config = builder.build()?;
        debug!("Using IDR at {}", config.base_url());
        IdrClient::new(&config)
    }

    async fn reserve(&self, client: &IdrClient, request: &ReserveRequest) -> Result<()> {
        let body = read_json(client.reserve_with(request).await?).await?;
        match self.cli.format {
            OutputFormat::Json => print_json(&body),
            OutputFormat::Pretty => {
                let ids = body["cve_ids"].as_array().cloned().unwrap_or_default();
                println!("Reserved the following CVE ID(s):\n");
                for id in &ids {
                    println!("{}", str_field(id, "cve_id"));
                }
                if let Some(remaining) = body["meta"]["remaining_quota"].as_u64() {
                    println!("\nRemaining quota: {remaining}");
                }
            }
        }
        Ok(())
    }

    async fn show(&self, client: &IdrClient, cve_id: &str) -> Result<()> {
        let body = read_json(client.show_cve(cve_id).await?).await?;
        match self.cli.format {
            OutputFormat::Json => print_json(&body),
            OutputFormat::Pretty => print_cve(&body),
        }
        Ok(())
    }

    async fn list(&self, client: &IdrClient, filter: &CveListFilter) -> Result<()> {
        let mut items = client.list_cves(filter);
        let mut count = 0usize;

        if self.cli.format == OutputFormat::Pretty {
            println!(
                "{:<18}{:<12}{:<20}{:<28}{}",
                "CVE ID", "STATE", "OWNING CNA", "RESERVED BY", "RESERVED ON"
            );
        }

        while let Some(item) = items.try_next().await? {
            count += 1;
            match self.cli.format {
                OutputFormat::Json => println!("{item}"),
                OutputFormat::Pretty => println!(
                    "{:<18}{:<12}{:<20}{:<28}{}",
                    str_field(&item, "cve_id"),
                    str_field(&item, "state"),
                    str_field(&item, "owning_cna"),
                    reserved_by(&item),
                    human_time(str_field(&item, "reserved"))
                ),
            }
        }

        debug!("Listed {count} CVE IDs");
        Ok(())
    }

    async fn quota(&self, client: &IdrClient) -> Result<()> {
        let body = read_json(client.quota().await?).await?;
        match self.cli.format {
            OutputFormat::Json => print_json(&body),
            OutputFormat::Pretty => {
                println!("CNA quota for {}:", client.org());
                println!("├─ Limit:\t{}", body["id_quota"]);
                println!("├─ Reserved:\t{}", body["total_reserved"]);
                println!("└─ Available:\t{}", body["available"]);
            }
        }
        Ok(())
    }

    async fn ping(&self, client: &IdrClient) -> Result<()> {
        client.ping().await?;
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::json!({"status": "ok"})),
            OutputFormat::Pretty => println!("IDR API: OK"),
        }
        Ok(())
    }
}

fn print_json(value: &Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn print_cve(record: &Value) {
    println!("{}", str_field(record, "cve_id"));
    println!("├─ State:\t{}", str_field(record, "state"));
    println!("├─ Owning CNA:\t{}", str_field(record, "owning_cna"));
    println!("├─ Reserved by:\t{}", reserved_by(record));
    println!("└─ Reserved on:\t{}", human_time(str_field(record, "reserved")));
}

fn str_field<'a>(record: &'a Value, field: &str) -> &'a str {
    record.get(field).and_then(Value::as_str).unwrap_or("")
}

fn reserved_by(record: &Value) -> String {
    let requested = &record["requested_by"];
    match (requested["user"].as_str(), requested["cna"].as_str()) {
        (Some(user), Some(cna)) => format!("{user} ({cna})"),
        (Some(user), None) => user.to_string(),
        _ => String::new(),
    }
}

/// Render an IDR timestamp as `YYYY-MM-DD HH:MM UTC`, or as-is if unparsable
fn human_time(value: &str) -> String {
    DateTime::parse_from_rfc3339(value).map_or_else(
        |_| value.to_string(),
        |t| t.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string(),
    )
}
