//! Shared interaction helpers (ephemeral replies + logged responses).
use serenity::builder::{CreateInteractionResponse, CreateInteractionResponseMessage};
use serenity::model::application::{ComponentInteraction, ModalInteraction};
use serenity::prelude::Context;

/// An ephemeral text reply.
pub fn ephemeral_text(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}

/// Respond to a component interaction; logs failure with a tag for observability.
pub async fn respond_component(
    ctx: &Context,
    c: &ComponentInteraction,
    tag: &str,
    response: CreateInteractionResponse,
) {
    if let Err(e) = c.create_response(&ctx.http, response).await {
        tracing::error!(target="ui.respond", cid=%c.data.custom_id, tag=%tag, error=?e, "create_response failed");
    }
}

pub async fn respond_modal(
    ctx: &Context,
    m: &ModalInteraction,
    tag: &str,
    response: CreateInteractionResponse,
) {
    if let Err(e) = m.create_response(&ctx.http, response).await {
        tracing::error!(target="ui.respond", cid=%m.data.custom_id, tag=%tag, error=?e, "create_response failed");
    }
}
