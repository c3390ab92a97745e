//! swap-cli - command-line interface for the p2p-swap program
//!
//! Builds transactions through `swap-client`, signs them with a local
//! keypair file and submits them. Defaults for the RPC URL and keypair path
//! come from the standard Solana CLI configuration.

use anyhow::{Result, anyhow};
use clap::Parser;
use serde_json::json;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, read_keypair_file};
use solana_sdk::signer::Signer;
use swap_base::{
    CreateOrderRequest, FillOrderRequest, OrderDescriptor, OrderRecord, P2P_SWAP_DEVNET,
    amount_to_display, decode_unlock_key, encode_unlock_key,
};
use swap_client::SwapClient;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match &*solana_cli_config::CONFIG_FILE {
        Some(path) => solana_cli_config::Config::load(path).unwrap_or_default(),
        None => solana_cli_config::Config::default(),
    };
    let url = cli.url.clone().unwrap_or(config.json_rpc_url);
    let keypair_path = cli.keypair.clone().unwrap_or(config.keypair_path);
    let program_id = cli.program_id.unwrap_or(P2P_SWAP_DEVNET);

    let client = SwapClient::new(url, program_id);

    match cli.command {
        Commands::CreateOrder {
            sell_token,
            sell_amount,
            sell_minimum,
            buy_token,
            buy_amount,
            private,
        } => {
            let signer = load_signer(&keypair_path)?;
            let (_, creation_slot) = client.find_free_order_slot(&signer.pubkey()).await?;

            let request = CreateOrderRequest {
                program_id,
                signer: signer.pubkey(),
                sell_token,
                buy_token,
                sell_amount,
                buy_amount,
                min_sell_amount: sell_minimum,
                creation_slot,
                is_private: private,
            };

            let (mut transaction, order_address) =
                client.create_order_transaction(&request).await?;
            let blockhash = transaction.message.recent_blockhash;
            transaction.try_sign(&[&signer], blockhash)?;
            let signature = client.send_transaction(&transaction).await?;

            let unlock_key = if private {
                let sig = signer.sign_message(&order_address.to_bytes());
                let bytes: [u8; 64] = sig
                    .as_ref()
                    .try_into()
                    .map_err(|_| anyhow!("unexpected signature length"))?;
                Some(encode_unlock_key(&bytes))
            } else {
                None
            };

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "order": order_address.to_string(),
                        "creation_slot": creation_slot,
                        "transaction": signature.to_string(),
                        "unlock_key": unlock_key,
                    }))?
                );
            } else {
                println!("New order created: {order_address}");
                println!("Creation slot: {creation_slot}");
                println!("Transaction: {signature}");
                if let Some(key) = unlock_key {
                    println!("Order is private. Unlock key: {key}");
                }
            }
        }

        Commands::GetOrder { order_address } => {
            let order = client.get_order_checked(&order_address).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&order_json(&order_address, &order))?);
            } else {
                print_order(&order_address, &order);
            }
        }

        Commands::BuyOrder {
            order_address,
            amount,
            unlock_key,
        } => {
            let signer = load_signer(&keypair_path)?;
            let order = client.get_order_checked(&order_address).await?;

            let unlock_key = match unlock_key {
                Some(text) => Some(decode_unlock_key(&text).ok_or_else(|| {
                    anyhow!("invalid unlock key: not base58 or not 64 bytes once decoded")
                })?),
                None => None,
            };

            let request = FillOrderRequest {
                program_id,
                signer: signer.pubkey(),
                order_address,
                order,
                sell_token_amount: amount,
                unlock_key,
            };

            let mut transaction = client.fill_order_transaction(&request).await?;
            let blockhash = transaction.message.recent_blockhash;
            transaction.try_sign(&[&signer], blockhash)?;
            let signature = client.send_transaction(&transaction).await?;

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "transaction": signature.to_string(),
                    }))?
                );
            } else {
                println!("Transaction: {signature}");
            }
        }

        Commands::ListOrders => {
            let orders = client.list_orders().await?;
            if cli.json {
                let entries: Vec<_> = orders
                    .iter()
                    .map(|(address, record)| record_json(address, record))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if orders.is_empty() {
                println!("No orders found");
            } else {
                for (address, record) in &orders {
                    println!(
                        "{address}: selling {} (remaining {}) for {}, min fill {}{}",
                        record.sell_amount,
                        record.remains_to_fill,
                        record.buy_amount,
                        record.min_sell_amount,
                        if record.is_private { ", private" } else { "" },
                    );
                }
            }
        }
    }

    Ok(())
}

fn load_signer(keypair_path: &str) -> Result<Keypair> {
    read_keypair_file(keypair_path)
        .map_err(|err| anyhow!("failed to read keypair {keypair_path}: {err}"))
}

fn print_order(address: &Pubkey, order: &OrderDescriptor) {
    let record = &order.record;
    println!("Order {address}");
    println!("  Seller:        {}", record.seller);
    println!("  Sell token:    {}", order.sell_token.mint);
    println!("  Buy token:     {}", order.buy_token.mint);
    println!(
        "  Sell amount:   {}",
        amount_to_display(record.sell_amount, order.sell_token.decimals)
    );
    println!(
        "  Buy amount:    {}",
        amount_to_display(record.buy_amount, order.buy_token.decimals)
    );
    println!(
        "  Min fill:      {}",
        amount_to_display(record.min_sell_amount, order.sell_token.decimals)
    );
    println!(
        "  Remaining:     {}",
        amount_to_display(record.remains_to_fill, order.sell_token.decimals)
    );
    println!("  Creation slot: {}", record.creation_slot);
    println!("  Private:       {}", record.is_private);
}

fn order_json(address: &Pubkey, order: &OrderDescriptor) -> serde_json::Value {
    let mut value = record_json(address, &order.record);
    value["sell_token"] = json!({
        "mint": order.sell_token.mint.to_string(),
        "decimals": order.sell_token.decimals,
    });
    value["buy_token"] = json!({
        "mint": order.buy_token.mint.to_string(),
        "decimals": order.buy_token.decimals,
    });
    value
}

fn record_json(address: &Pubkey, record: &OrderRecord) -> serde_json::Value {
    json!({
        "address": address.to_string(),
        "creation_slot": record.creation_slot,
        "seller": record.seller.to_string(),
        "sell_amount": record.sell_amount,
        "order_wallet": record.order_wallet.to_string(),
        "token_mint": record.token_mint.map(|mint| mint.to_string()),
        "price_mint": record.price_mint.to_string(),
        "buy_amount": record.buy_amount,
        "min_sell_amount": record.min_sell_amount,
        "remains_to_fill": record.remains_to_fill,
        "is_private": record.is_private,
    })
}
