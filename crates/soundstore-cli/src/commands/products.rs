//! Product commands.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::{Args, Subcommand};
use soundstore_client::resources::{
    NewProduct, NewProductImage, ProductQuery, ProductState, ProductsClient, UpdateProduct,
};
use soundstore_client::{ApiClient, PagedAccessor};
use strum::VariantNames;

use crate::commands::{ListArgs, command_error, print_json, print_page_footer};

#[derive(Debug, Subcommand)]
pub enum ProductCommands {
    /// List products, one page at a time.
    List(ListArgs),
    /// Show one product.
    Get { id: i64 },
    /// Create a product with image uploads.
    Create(CreateArgs),
    /// Update a product (no image changes).
    Update(UpdateArgs),
    /// Delete a product.
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value_t = 0)]
    pub stock_quantity: i64,
    #[arg(long)]
    pub price: i64,
    /// Product type (e.g. Headphones, Speaker).
    #[arg(long = "type", default_value = "")]
    pub kind: String,
    #[arg(long, default_value = "")]
    pub connectivity: String,
    #[arg(long, default_value = "")]
    pub special_features: String,
    #[arg(long, default_value = "")]
    pub frequency_response: String,
    #[arg(long, default_value = "")]
    pub sensitivity: String,
    #[arg(long, default_value = "")]
    pub battery_life: String,
    #[arg(long, default_value = "")]
    pub accessories_included: String,
    #[arg(long, default_value = "")]
    pub warranty: String,
    #[arg(long)]
    pub sub_category_id: i64,
    /// Image file to upload; repeat for multiple images.
    #[arg(long = "image", required = true)]
    pub images: Vec<PathBuf>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: i64,
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value_t = 0)]
    pub stock_quantity: i64,
    #[arg(long)]
    pub price: i64,
    /// Product type (e.g. Headphones, Speaker).
    #[arg(long = "type", default_value = "")]
    pub kind: String,
    #[arg(long, default_value = "")]
    pub connectivity: String,
    #[arg(long, default_value = "")]
    pub special_features: String,
    #[arg(long, default_value = "")]
    pub frequency_response: String,
    #[arg(long, default_value = "")]
    pub sensitivity: String,
    #[arg(long, default_value = "")]
    pub battery_life: String,
    #[arg(long, default_value = "")]
    pub accessories_included: String,
    #[arg(long, default_value = "")]
    pub warranty: String,
    #[arg(long)]
    pub sub_category_id: i64,
    /// New stock state (InStock, OutOfStock, or Discontinued).
    #[arg(long, default_value = "InStock")]
    pub status: String,
}

pub async fn run(client: ApiClient, command: ProductCommands, json: bool) -> anyhow::Result<()> {
    let products = ProductsClient::new(client.clone());

    match command {
        ProductCommands::List(args) => list(client, args, json).await,
        ProductCommands::Get { id } => {
            let product = products.get(id).await.map_err(command_error)?;

            if json {
                return print_json(&product);
            }

            println!("{} (#{})", product.name, product.id);
            if !product.description.is_empty() {
                println!("{}", product.description);
            }
            println!("price:    {}", product.price);
            println!("stock:    {}", product.stock_quantity);
            println!("status:   {}", product.status);
            println!(
                "category: {} / {}",
                product.category_name, product.sub_category_name
            );
            if let Some(score) = product.overall_rating_score {
                println!("rating:   {score:.1}");
            }
            for image in &product.images {
                println!("  image: {}", image.image_url);
            }
            Ok(())
        }
        ProductCommands::Create(args) => {
            let message = products
                .create(&new_product(args)?)
                .await
                .map_err(command_error)?;
            println!("{message}");
            Ok(())
        }
        ProductCommands::Update(args) => {
            let status = parse_state(&args.status)?;
            let update = UpdateProduct {
                name: args.name,
                description: args.description,
                stock_quantity: args.stock_quantity,
                price: args.price,
                kind: args.kind,
                connectivity: args.connectivity,
                special_features: args.special_features,
                frequency_response: args.frequency_response,
                sensitivity: args.sensitivity,
                battery_life: args.battery_life,
                accessories_included: args.accessories_included,
                warranty: args.warranty,
                sub_category_id: args.sub_category_id,
                status,
            };

            let message = products
                .update(args.id, &update)
                .await
                .map_err(command_error)?;
            println!("{message}");
            Ok(())
        }
        ProductCommands::Delete { id } => {
            let message = products.delete(id).await.map_err(command_error)?;
            println!("{message}");
            Ok(())
        }
    }
}

fn parse_state(raw: &str) -> anyhow::Result<ProductState> {
    ProductState::from_str(raw).map_err(|_| {
        anyhow::anyhow!(
            "unknown status '{raw}', expected one of: {}",
            ProductState::VARIANTS.join(", ")
        )
    })
}

fn new_product(args: CreateArgs) -> anyhow::Result<NewProduct> {
    let mut images = Vec::with_capacity(args.images.len());
    for path in &args.images {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read image {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        images.push(NewProductImage::new(file_name, bytes));
    }

    Ok(NewProduct {
        name: args.name,
        description: args.description,
        stock_quantity: args.stock_quantity,
        price: args.price,
        kind: args.kind,
        connectivity: args.connectivity,
        special_features: args.special_features,
        frequency_response: args.frequency_response,
        sensitivity: args.sensitivity,
        battery_life: args.battery_life,
        accessories_included: args.accessories_included,
        warranty: args.warranty,
        sub_category_id: args.sub_category_id,
        images,
    })
}

async fn list(client: ApiClient, args: ListArgs, json: bool) -> anyhow::Result<()> {
    let mut accessor = PagedAccessor::new(client, ProductQuery);
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

    println!(
        "{:<8} {:<32} {:>8} {:>6} {:<14} {}",
        "ID", "NAME", "PRICE", "STOCK", "STATUS", "CATEGORY"
    );
    for product in accessor.items() {
        println!(
            "{:<8} {:<32} {:>8} {:>6} {:<14} {}",
            product.id,
            product.name,
            product.price,
            product.stock_quantity,
            product.status,
            product.category_name
        );
    }
    print_page_footer(accessor.page_info());

    Ok(())
}
