//! Customer commands.

use std::str::FromStr;

use clap::Subcommand;
use soundstore_client::resources::{CustomerQuery, CustomerStatus, CustomersClient};
use soundstore_client::{ApiClient, PagedAccessor};
use strum::VariantNames;

use crate::commands::{ListArgs, command_error, print_json, print_page_footer};

#[derive(Debug, Subcommand)]
pub enum CustomerCommands {
    /// List customers, one page at a time.
    List(ListArgs),
    /// Show one customer.
    Get { id: String },
    /// Change a customer's account status.
    SetStatus {
        id: String,
        /// New status (Actived, Inactived, or Deleted).
        #[arg(long)]
        status: String,
    },
}

pub async fn run(client: ApiClient, command: CustomerCommands, json: bool) -> anyhow::Result<()> {
    let customers = CustomersClient::new(client.clone());

    match command {
        CustomerCommands::List(args) => list(client, args, json).await,
        CustomerCommands::Get { id } => {
            let customer = customers.get(&id).await.map_err(command_error)?;

            if json {
                return print_json(&customer);
            }

            println!("{} <{}>", customer.full_name, customer.email);
            println!("id:      {}", customer.id);
            println!("status:  {}", customer.status_label());
            if !customer.phone_number.is_empty() {
                println!("phone:   {}", customer.phone_number);
            }
            if !customer.address.is_empty() {
                println!("address: {}", customer.address);
            }
            if !customer.date_of_birth.is_empty() {
                println!("born:    {}", customer.date_of_birth);
            }
            Ok(())
        }
        CustomerCommands::SetStatus { id, status } => {
            let status = CustomerStatus::from_str(&status).map_err(|_| {
                anyhow::anyhow!(
                    "unknown status '{status}', expected one of: {}",
                    CustomerStatus::VARIANTS.join(", ")
                )
            })?;

            let message = customers
                .update_status(&id, status)
                .await
                .map_err(command_error)?;
            println!("{message}");
            Ok(())
        }
    }
}

async fn list(client: ApiClient, args: ListArgs, json: bool) -> anyhow::Result<()> {
    let mut accessor = PagedAccessor::new(client, CustomerQuery);
    accessor
        .fetch_page(args.page, args.page_size)
        .await
        .map_err(command_error)?;

    if let Some(error) = accessor.error() {
        anyhow::bail!("{error}");
    }

    if json {
        return print_json(&accessor.items());
    }

    println!("{:<26} {:<28} {:<32} {}", "ID", "NAME", "EMAIL", "STATUS");
    for customer in accessor.items() {
        println!(
            "{:<26} {:<28} {:<32} {}",
            customer.id,
            customer.full_name,
            customer.email,
            customer.status_label()
        );
    }
    print_page_footer(accessor.page_info());

    Ok(())
}
