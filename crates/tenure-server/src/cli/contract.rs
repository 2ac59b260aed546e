use super::ListArgs;
use anyhow::Result;
use tenure_client::TenureClient;

pub async fn list(args: ListArgs, server: &str) -> Result<()> {
    let client = TenureClient::new(server);
    let contracts = client
        .list_contracts()
        .await
        .map_err(|e| anyhow::anyhow!("{}. Is `tenure serve` running?", e))?;

    if contracts.is_empty() {
        println!("(no contracts yet — add one via `POST /api/contracts`)");
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&contracts)?);
        return Ok(());
    }

    println!(
        "{:<4}  {:<24}  {:<16}  {:<16}  {:<10}  {:<8}  {}",
        "ID", "TITLE", "COMPANY", "CLIENT", "ENDS", "STATUS", "DAYS"
    );
    println!("{}", "─".repeat(94));
    for view in &contracts {
        let c = &view.contract;
        println!(
            "{:<4}  {:<24}  {:<16}  {:<16}  {:<10}  {:<8}  {}",
            c.id,
            c.title,
            c.company,
            c.client_name,
            c.end_date.to_string(),
            view.status.to_string(),
            view.days_remaining,
        );
    }

    Ok(())
}

pub async fn alerts(server: &str) -> Result<()> {
    let client = TenureClient::new(server);
    let alerts = client
        .alerts()
        .await
        .map_err(|e| anyhow::anyhow!("{}. Is `tenure serve` running?", e))?;

    if alerts.is_empty() {
        println!("No contracts are expiring or expired.");
        return Ok(());
    }

    println!("{:<4}  {:<10}  {:<10}  {}", "ID", "STATUS", "ENDS", "MESSAGE");
    println!("{}", "─".repeat(70));
    for alert in &alerts {
        println!(
            "{:<4}  {:<10}  {:<10}  {}",
            alert.contract_id,
            alert.status.to_string(),
            alert.end_date.to_string(),
            alert.message,
        );
    }

    Ok(())
}
