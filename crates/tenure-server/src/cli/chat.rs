use super::ChatArgs;
use anyhow::Result;
use tenure_client::TenureClient;

pub async fn run(args: ChatArgs, server: &str) -> Result<()> {
    let client = TenureClient::new(server);
    let reply = client
        .chat(&args.message, args.chat_id.as_deref())
        .await
        .map_err(|e| anyhow::anyhow!("{}. Is `tenure serve` running?", e))?;

    println!("{}", reply.response);
    eprintln!();
    eprintln!("(session: {} — pass --chat-id to continue it)", reply.chat_id);

    Ok(())
}
