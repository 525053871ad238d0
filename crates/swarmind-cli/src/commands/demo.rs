use anyhow::{Context, Result};
use console::style;
use swarmind::api::transport::Transport;
use swarmind::models::content::MessageContent;
use swarmind::models::message::Message;
use swarmind::models::role::ChatMessageType;
use swarmind::utils::contents_to_messages;
use swarmind::ApiClient;

use super::history::{print_list, print_messages};

/// Walk a chat through its whole lifecycle: push, read, edit, delete, drop
pub async fn execute<T: Transport>(client: &ApiClient<T>, chat: &str) -> Result<()> {
    let heads = client.list_heads().await.context("listing heads")?;
    print_list("Swarmind API heads", &heads);
    println!();

    let messages = contents_to_messages(vec![
        MessageContent::text_parts(ChatMessageType::Ai, "Message 1"),
        MessageContent::text_parts(ChatMessageType::Human, "Message 2"),
        MessageContent::text_parts(ChatMessageType::Ai, "Message 3"),
        MessageContent::text_parts(ChatMessageType::Human, "Message 4"),
    ]);
    let to_edit = Message::with_id(
        messages[1].id.clone(),
        MessageContent::text_parts(ChatMessageType::Human, "EDITED MESSAGE"),
    );
    let to_delete = Message::deletion(messages[3].id.clone());

    client
        .update_history(chat, &messages)
        .await
        .context("pushing new messages")?;
    println!("{}", style("Pushed new messages").green());

    let chats = client.list_chats().await.context("listing chats")?;
    print_list("Chat list", &chats);
    println!();

    let stored = client.get_history(chat).await.context("reading history")?;
    println!("{}", style("Messages stored:").bold());
    print_messages(&stored);

    client
        .update_history(chat, &[to_edit, to_delete])
        .await
        .context("editing and deleting messages")?;
    println!("{}\n", style("Updated messages (edit + delete)").green());

    let changed = client.get_history(chat).await.context("reading history")?;
    println!("{}", style("Changed messages:").bold());
    print_messages(&changed);

    client.drop_history(chat).await.context("dropping chat")?;
    println!("{}", style("Dropped chat").red());

    let chats = client.list_chats().await.context("listing chats")?;
    print_list("Chat list", &chats);
    Ok(())
}
