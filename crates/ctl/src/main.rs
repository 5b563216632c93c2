use anyhow::Context;
use clap::{Parser, Subcommand};
use employee_core::api::{
    ApiEnvelope, CreateEmployeeRequest, EmployeeDto, Paged, UpdateEmployeeRequest,
};
use employee_core::model::Department;

#[derive(Parser, Debug)]
#[command(name = "employeectl", version, about = "Client for the employee daemon")]
struct Args {
    /// Daemon base url, e.g. http://127.0.0.1:8080
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    daemon: String,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Create an employee; the daemon assigns the EM#### identifier.
    Create {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        /// HR, ENGINEERING, MARKETING or SALES (case-insensitive).
        #[arg(long)]
        department: String,
    },
    /// Fetch one employee by external id (EM####).
    Get {
        #[arg(long)]
        employee_id: String,
    },
    /// Fetch one employee by internal storage key.
    GetByKey {
        #[arg(long)]
        id: String,
    },
    /// List employees page by page.
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
    },
    /// Search by name and/or department substring.
    Search {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
    },
    /// Patch an employee; absent flags leave fields untouched.
    Update {
        #[arg(long)]
        employee_id: String,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        department: Option<String>,
    },
    /// Delete an employee by external id.
    Delete {
        #[arg(long)]
        employee_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let client = reqwest::Client::new();
    let base = args.daemon.trim_end_matches('/').to_string();

    match args.cmd {
        Cmd::Create {
            full_name,
            email,
            department,
        } => {
            let department: Department = department
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
            let req = CreateEmployeeRequest {
                full_name,
                email,
                department,
            };
            let resp = client
                .post(format!("{base}/employees"))
                .json(&req)
                .send()
                .await?;
            print_envelope::<EmployeeDto>(resp).await?;
        }
        Cmd::Get { employee_id } => {
            let resp = client
                .get(format!("{base}/employees"))
                .query(&[("employeeId", employee_id)])
                .send()
                .await?;
            print_envelope::<EmployeeDto>(resp).await?;
        }
        Cmd::GetByKey { id } => {
            let resp = client.get(format!("{base}/employees/{id}")).send().await?;
            print_envelope::<EmployeeDto>(resp).await?;
        }
        Cmd::List { page, size } => {
            let mut query = Vec::new();
            if let Some(page) = page {
                query.push(("page", page.to_string()));
            }
            if let Some(size) = size {
                query.push(("size", size.to_string()));
            }
            let resp = client
                .get(format!("{base}/employees"))
                .query(&query)
                .send()
                .await?;
            print_envelope::<Paged<EmployeeDto>>(resp).await?;
        }
        Cmd::Search {
            full_name,
            department,
            page,
            size,
        } => {
            let mut query = Vec::new();
            if let Some(full_name) = full_name {
                query.push(("fullName", full_name));
            }
            if let Some(department) = department {
                query.push(("department", department));
            }
            if let Some(page) = page {
                query.push(("page", page.to_string()));
            }
            if let Some(size) = size {
                query.push(("size", size.to_string()));
            }
            let resp = client
                .get(format!("{base}/employees/search"))
                .query(&query)
                .send()
                .await?;
            print_envelope::<Paged<EmployeeDto>>(resp).await?;
        }
        Cmd::Update {
            employee_id,
            full_name,
            email,
            department,
        } => {
            let department = match department {
                Some(d) => Some(d.parse::<Department>().map_err(|e| anyhow::anyhow!(e))?),
                None => None,
            };
            let patch = UpdateEmployeeRequest {
                full_name,
                email,
                department,
            };
            anyhow::ensure!(!patch.is_empty(), "nothing to update: pass at least one field flag");
            let resp = client
                .put(format!("{base}/employees/{employee_id}"))
                .json(&patch)
                .send()
                .await?;
            print_envelope::<EmployeeDto>(resp).await?;
        }
        Cmd::Delete { employee_id } => {
            let resp = client
                .delete(format!("{base}/employees/{employee_id}"))
                .send()
                .await?;
            print_envelope::<EmployeeDto>(resp).await?;
        }
    }

    Ok(())
}

/// Prints the response envelope as pretty JSON. Error envelopes carry the
/// daemon's message, so they are printed the same way.
async fn print_envelope<T: serde::de::DeserializeOwned + serde::Serialize>(
    resp: reqwest::Response,
) -> anyhow::Result<()> {
    let envelope: ApiEnvelope<T> = resp.json().await.context("parse response envelope")?;
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}
