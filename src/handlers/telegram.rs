use chrono::Utc;
use std::error::Error;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, User};

use crate::handlers::conversation::respond;
use crate::keyboard::create_quick_pick_keyboard;
use crate::state::BotState;
use crate::types::{Channel, SenderProfile};

type HandlerResult = Result<(), Box<dyn Error + Send + Sync>>;

pub fn schema() -> UpdateHandler<Box<dyn Error + Send + Sync + 'static>> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(message_handler))
        .branch(Update::filter_callback_query().endpoint(callback_handler))
}

fn profile_of(user: Option<&User>) -> SenderProfile {
    SenderProfile {
        username: user.and_then(|u| u.username.clone()),
        first_name: user.map(|u| u.first_name.clone()),
    }
}

async fn reply_in_chat(
    bot: &Bot,
    chat_id: ChatId,
    profile: &SenderProfile,
    text: &str,
    state: &BotState,
) -> HandlerResult {
    let reply = respond(
        state.store.as_ref(),
        state.catalog,
        Channel::Telegram,
        &chat_id.0.to_string(),
        profile,
        text,
        Utc::now().date_naive(),
    )
    .await?;

    let mut request = bot.send_message(chat_id, reply.text);
    if reply.quick_pick {
        request = request.reply_markup(create_quick_pick_keyboard(state.catalog, reply.language));
    }
    request.await?;
    Ok(())
}

pub async fn message_handler(bot: Bot, msg: Message, state: Arc<BotState>) -> HandlerResult {
    let text = msg.text().unwrap_or_default();
    log::debug!("Message from chat {}: {:?}", msg.chat.id, text);

    reply_in_chat(&bot, msg.chat.id, &profile_of(msg.from()), text, &state).await
}

/// Quick-pick buttons carry their code as callback data and go through the
/// same conversation path as a typed reply.
pub async fn callback_handler(bot: Bot, query: CallbackQuery, state: Arc<BotState>) -> HandlerResult {
    let chat_id = query
        .message
        .as_ref()
        .map(|m| m.chat.id)
        .unwrap_or(ChatId(query.from.id.0 as i64));

    let replied = match query.data.as_deref() {
        Some(data) => reply_in_chat(&bot, chat_id, &profile_of(Some(&query.from)), data, &state).await,
        None => Ok(()),
    };

    // Answer even when the reply failed, or the button keeps spinning.
    bot.answer_callback_query(query.id).await?;
    replied
}
