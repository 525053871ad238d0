use anyhow::{Context, Result};
use console::style;
use swarmind::api::transport::Transport;
use swarmind::models::content::MessageContent;
use swarmind::models::message::Message;
use swarmind::models::role::ChatMessageType;
use swarmind::utils::contents_to_messages;
use swarmind::ApiClient;

pub async fn heads<T: Transport>(client: &ApiClient<T>) -> Result<()> {
    let heads = client.list_heads().await.context("listing heads")?;
    print_list("Heads", &heads);
    Ok(())
}

pub async fn chats<T: Transport>(client: &ApiClient<T>) -> Result<()> {
    let chats = client.list_chats().await.context("listing chats")?;
    print_list(&format!("Chats in {}", client.namespace()), &chats);
    Ok(())
}

pub async fn show<T: Transport>(client: &ApiClient<T>, chat: &str) -> Result<()> {
    let messages = client
        .get_history(chat)
        .await
        .with_context(|| format!("reading history of {}", chat))?;
    print_messages(&messages);
    Ok(())
}

pub async fn push<T: Transport>(
    client: &ApiClient<T>,
    chat: &str,
    role: ChatMessageType,
    texts: Vec<String>,
) -> Result<()> {
    let messages = contents_to_messages(
        texts
            .into_iter()
            .map(|text| MessageContent::text_parts(role, text)),
    );
    client
        .update_history(chat, &messages)
        .await
        .with_context(|| format!("pushing messages to {}", chat))?;

    for msg in &messages {
        println!("{} {}", style("pushed").green(), msg.id);
    }
    Ok(())
}

pub async fn edit<T: Transport>(
    client: &ApiClient<T>,
    chat: &str,
    id: String,
    role: ChatMessageType,
    text: String,
) -> Result<()> {
    let msg = Message::with_id(id, MessageContent::text_parts(role, text));
    client
        .update_history(chat, std::slice::from_ref(&msg))
        .await
        .with_context(|| format!("editing message {} in {}", msg.id, chat))?;
    println!("{} {}", style("edited").yellow(), msg.id);
    Ok(())
}

pub async fn delete<T: Transport>(
    client: &ApiClient<T>,
    chat: &str,
    ids: Vec<String>,
) -> Result<()> {
    let messages: Vec<Message> = ids.into_iter().map(Message::deletion).collect();
    client
        .update_history(chat, &messages)
        .await
        .with_context(|| format!("deleting messages from {}", chat))?;

    for msg in &messages {
        println!("{} {}", style("deleted").red(), msg.id);
    }
    Ok(())
}

pub async fn drop_chat<T: Transport>(client: &ApiClient<T>, chat: &str) -> Result<()> {
    client
        .drop_history(chat)
        .await
        .with_context(|| format!("dropping {}", chat))?;
    println!("{} {}", style("dropped").red(), chat);
    Ok(())
}

pub fn print_list(title: &str, items: &[String]) {
    println!("{}", style(title).bold());
    if items.is_empty() {
        println!("  {}", style("(none)").dim());
    }
    for item in items {
        println!("  {}", item);
    }
}

fn stamp(formatted: Option<String>) -> String {
    formatted.unwrap_or_else(|| "-".to_string())
}

pub fn print_messages(messages: &[Message]) {
    if messages.is_empty() {
        println!("{}", style("(empty history)").dim());
        return;
    }
    for msg in messages {
        let role = msg
            .message
            .as_ref()
            .map(|content| content.role.to_string())
            .unwrap_or_else(|| "deleted".to_string());
        println!("{} {}", style("ID:").bold(), msg.id);
        println!(
            "{} {}, {} {}",
            style("CreatedAt:").dim(),
            stamp(msg.created_at.map(|t| t.to_rfc3339())),
            style("UpdatedAt:").dim(),
            stamp(msg.updated_at.map(|t| t.to_rfc3339())),
        );
        println!("{} {}", style(format!("[{}]", role)).cyan(), msg.text());
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use swarmind::api::memory::MemoryStore;
    use swarmind::ApiConfig;

    fn setup() -> ApiClient<Arc<MemoryStore>> {
        ApiClient::new(
            ApiConfig::new("http://store.local", "test", "secret"),
            Arc::new(MemoryStore::new()),
        )
    }

    #[tokio::test]
    async fn test_push_edit_delete_drop() -> Result<()> {
        let client = setup();
        push(
            &client,
            "notes",
            ChatMessageType::Human,
            vec!["first".to_string(), "second".to_string()],
        )
        .await?;

        let stored = client.get_history("notes").await?;
        assert_eq!(stored.len(), 2);
        let (first, second) = (stored[0].id.clone(), stored[1].id.clone());

        edit(
            &client,
            "notes",
            first.clone(),
            ChatMessageType::Ai,
            "rewritten".to_string(),
        )
        .await?;
        delete(&client, "notes", vec![second]).await?;

        let stored = client.get_history("notes").await?;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, first);
        assert_eq!(stored[0].text(), "rewritten");
        assert_eq!(
            stored[0].message.as_ref().map(|c| c.role),
            Some(ChatMessageType::Ai)
        );

        show(&client, "notes").await?;
        chats(&client).await?;
        drop_chat(&client, "notes").await?;
        assert!(client.list_chats().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_read_commands_fail_on_bad_route() {
        let client = ApiClient::new(
            ApiConfig::new("http://store.local/missing", "test", "secret"),
            Arc::new(MemoryStore::new()),
        );
        let err = heads(&client).await.unwrap_err();
        assert!(err.to_string().contains("listing heads"));
    }
}
