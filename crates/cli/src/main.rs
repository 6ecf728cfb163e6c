//! JobLink CLI - Command-line client for the JobLink engine
//!
//! Thin JSON-RPC client used to exercise the daemon: send and answer
//! private offers, read the notification feed, trigger admin operations.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9544";

#[derive(Parser)]
#[command(name = "joblink")]
#[command(about = "JobLink offer and notification engine CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "JOBLINK_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a private offer to a job seeker
    Send {
        /// Employer user id
        #[arg(long)]
        employer: String,

        /// Job seeker user id
        #[arg(long)]
        seeker: String,

        /// Job title
        #[arg(long)]
        title: String,

        /// City of the position
        #[arg(long, default_value = "")]
        city: String,

        /// State of the position
        #[arg(long, default_value = "")]
        state: String,

        /// Response deadline in days from now
        #[arg(long, default_value = "5")]
        deadline_days: i64,

        /// Personal message to the candidate
        #[arg(long)]
        message: Option<String>,
    },

    /// List offers for a user
    List {
        /// User id
        user: String,

        /// Role: seeker or employer
        #[arg(long, default_value = "seeker")]
        role: String,
    },

    /// Mark an offer as viewed by its seeker
    View {
        /// Offer id
        offer_id: String,

        /// Acting seeker user id
        #[arg(long)]
        user: String,
    },

    /// Accept or reject an offer
    Respond {
        /// Offer id
        offer_id: String,

        /// Acting seeker user id
        #[arg(long)]
        user: String,

        /// Decision: accepted or rejected
        #[arg(long)]
        decision: String,

        /// Response message to the employer
        #[arg(long)]
        message: Option<String>,
    },

    /// Show the notification feed for a user
    Feed {
        /// User id
        user: String,

        /// Show the 5-item dashboard preview instead of the full page
        #[arg(long)]
        preview: bool,
    },

    /// Mark one notification read (numeric id) or all with --all
    MarkRead {
        /// User id
        user: String,

        /// Stored notification id
        #[arg(long, conflicts_with = "all")]
        id: Option<i64>,

        /// Mark every stored notification read
        #[arg(long)]
        all: bool,
    },

    /// Dismiss a synthetic reminder for this session
    Dismiss {
        /// User id
        user: String,

        /// Reminder kind: profile_incomplete, cv_missing, subscription_expiring
        kind: String,
    },

    /// Persist EXPIRED on lapsed offers
    Sweep,

    /// Show engine status
    Status,
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize, Tabled)]
struct OfferSummaryRow {
    offer_id: String,
    job_title: String,
    city: String,
    state: String,
    status: String,
    deadline: i64,
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Send {
            employer,
            seeker,
            title,
            city,
            state,
            deadline_days,
            message,
        } => {
            let deadline = now_millis() + deadline_days * 24 * 60 * 60 * 1000;
            let params = json!({
                "employer_id": employer,
                "seeker_id": seeker,
                "terms": {
                    "job_title": title,
                    "description": "",
                    "job_type": "",
                    "category": "",
                    "location_type": "",
                    "city": city,
                    "state": state,
                    "skills": "",
                    "personal_message": message,
                },
                "deadline": deadline,
            });

            let result = call_rpc(&cli.rpc_url, "offer.create.v1", params).await?;

            println!("{}", "✓ Offer sent".green().bold());
            println!();
            println!("  {} {}", "Offer ID:".bold(), result["offer_id"]);
            println!("  {} {}", "Status:".bold(), result["status"]);
        }

        Commands::List { user, role } => {
            let params = json!({ "user_id": user, "role": role });
            let result = call_rpc(&cli.rpc_url, "offer.list.v1", params).await?;

            let offers: Vec<OfferSummaryRow> =
                serde_json::from_value(result["offers"].clone())?;

            if offers.is_empty() {
                println!("{}", "No offers".yellow());
            } else {
                let table = Table::new(offers).to_string();
                println!("{}", table);
            }
        }

        Commands::View { offer_id, user } => {
            let params = json!({ "offer_id": offer_id, "user_id": user });
            let result = call_rpc(&cli.rpc_url, "offer.view.v1", params).await?;

            println!(
                "{} (status: {})",
                format!("✓ Offer {} viewed", offer_id).green().bold(),
                result["status"]
            );
        }

        Commands::Respond {
            offer_id,
            user,
            decision,
            message,
        } => {
            let params = json!({
                "offer_id": offer_id,
                "user_id": user,
                "decision": decision,
                "message": message,
            });

            let result = call_rpc(&cli.rpc_url, "offer.respond.v1", params).await?;

            println!("{}", "✓ Response recorded".green().bold());
            println!();
            println!("  {} {}", "Offer ID:".bold(), result["offer_id"]);
            println!("  {} {}", "Status:".bold(), result["status"]);
        }

        Commands::Feed { user, preview } => {
            let params = json!({ "user_id": user, "preview": preview });
            let result = call_rpc(&cli.rpc_url, "notifications.feed.v1", params).await?;

            let unread = result["unread_count"].as_u64().unwrap_or(0);
            println!(
                "{} ({} unread)",
                "Notifications".cyan().bold(),
                unread.to_string().bold()
            );
            println!();

            let items = result["items"].as_array().cloned().unwrap_or_default();
            if items.is_empty() {
                println!("  {}", "Nothing new".yellow());
            }

            for item in items {
                let read_marker = if item["is_read"].as_bool().unwrap_or(false) {
                    " ".normal()
                } else {
                    "•".green().bold()
                };
                println!(
                    "  {} [{}] {}: {}",
                    read_marker,
                    item["id"],
                    item["title"].as_str().unwrap_or_default().bold(),
                    item["message"].as_str().unwrap_or_default()
                );
            }
        }

        Commands::MarkRead { user, id, all } => {
            if all {
                let params = json!({ "user_id": user });
                let result =
                    call_rpc(&cli.rpc_url, "notifications.mark_all_read.v1", params).await?;
                println!(
                    "{}",
                    format!("✓ {} notifications marked read", result["updated"])
                        .green()
                        .bold()
                );
            } else {
                let id = id.context("either --id or --all is required")?;
                let params = json!({ "user_id": user, "notification_id": id });
                call_rpc(&cli.rpc_url, "notifications.mark_read.v1", params).await?;
                println!("{}", format!("✓ Notification {} marked read", id).green().bold());
            }
        }

        Commands::Dismiss { user, kind } => {
            let params = json!({ "user_id": user, "reminder": kind });
            call_rpc(&cli.rpc_url, "notifications.dismiss.v1", params).await?;
            println!("{}", format!("✓ Reminder '{}' dismissed for this session", kind).green());
        }

        Commands::Sweep => {
            let result = call_rpc(&cli.rpc_url, "admin.expire_sweep.v1", json!({})).await?;
            println!(
                "{}",
                format!("✓ {} offers expired", result["swept"]).green().bold()
            );
        }

        Commands::Status => {
            println!("{}", "Engine Status".cyan().bold());
            println!();

            match call_rpc(&cli.rpc_url, "admin.stats.v1", json!({})).await {
                Ok(stats) => {
                    println!("  {} {}", "RPC URL:".bold(), cli.rpc_url);
                    println!("  {} {}", "Status:".bold(), "ONLINE".green());
                    println!();
                    println!("  {} {}", "Pending:".bold(), stats["pending_offers"]);
                    println!("  {} {}", "Viewed:".bold(), stats["viewed_offers"]);
                    println!("  {} {}", "Accepted:".bold(), stats["accepted_offers"]);
                    println!("  {} {}", "Rejected:".bold(), stats["rejected_offers"]);
                    println!("  {} {}", "Expired:".bold(), stats["expired_offers"]);
                    println!();
                    println!("  {} {} seconds", "Uptime:".bold(), stats["uptime_seconds"]);
                }
                Err(e) => {
                    println!("  {} {}", "Status:".bold(), "ERROR".red());
                    println!("  {} {}", "Error:".bold(), e);
                }
            }
        }
    }

    Ok(())
}
