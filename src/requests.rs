//! Typed parameters for every bot API method.
//!
//! Each struct serializes to exactly the payload of one call. Optional fields
//! are skipped when unset, so a request built from required arguments only
//! carries nothing else.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::keypad::{InlineKeypad, Keypad};

/// Remote operations exposed by the bot API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GetMe,
    SendMessage,
    SendPoll,
    SendLocation,
    SendContact,
    GetChat,
    GetUpdates,
    ForwardMessage,
    EditMessageText,
    EditInlineKeypad,
    DeleteMessage,
    SetCommands,
    UpdateBotEndpoints,
    EditChatKeypad,
}

impl Method {
    /// Method name as used in the request path
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GetMe => "getMe",
            Method::SendMessage => "sendMessage",
            Method::SendPoll => "sendPoll",
            Method::SendLocation => "sendLocation",
            Method::SendContact => "sendContact",
            Method::GetChat => "getChat",
            Method::GetUpdates => "getUpdates",
            Method::ForwardMessage => "forwardMessage",
            Method::EditMessageText => "editMessageText",
            Method::EditInlineKeypad => "editInlineKeypad",
            Method::DeleteMessage => "deleteMessage",
            Method::SetCommands => "setCommands",
            Method::UpdateBotEndpoints => "updateBotEndpoints",
            Method::EditChatKeypad => "editChatKeypad",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with the chat keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChatKeypadType {
    None,
    New,
    Remove,
}

/// Which kind of inbound notification an endpoint receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateEndpointType {
    ReceiveUpdate,
    ReceiveInlineMessage,
    ReceiveQuery,
    GetSelectionItem,
    SearchSelectionItems,
}

/// A command shown in the bot's command menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotCommand {
    pub command: String,
    pub description: String,
}

impl BotCommand {
    /// Create a command entry; `command` is given without the leading slash
    pub fn new<S: Into<String>, T: Into<String>>(command: S, description: T) -> Self {
        BotCommand {
            command: command.into(),
            description: description.into(),
        }
    }
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Parameters for `sendMessage`
#[derive(Debug, Clone, Serialize)]
pub struct SendMessage {
    chat_id: String,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    chat_keypad_type: Option<ChatKeypadType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chat_keypad: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_keypad: Option<Value>,
    #[serde(skip_serializing_if = "is_false")]
    disable_notification: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to_message_id: Option<String>,
}

impl SendMessage {
    /// Create a plain text message with no optional fields set
    pub fn new<S: Into<String>, T: Into<String>>(chat_id: S, text: T) -> Self {
        SendMessage {
            chat_id: chat_id.into(),
            text: text.into(),
            chat_keypad_type: None,
            chat_keypad: None,
            inline_keypad: None,
            disable_notification: false,
            reply_to_message_id: None,
        }
    }

    /// Attach a chat keypad; the keypad is serialized immediately
    pub fn chat_keypad(mut self, keypad: &Keypad) -> Self {
        self.chat_keypad = Some(keypad.to_value());
        self
    }

    /// Say whether the attached chat keypad is new or should be removed
    pub fn chat_keypad_type(mut self, keypad_type: ChatKeypadType) -> Self {
        self.chat_keypad_type = Some(keypad_type);
        self
    }

    /// Attach an inline keypad; the keypad is serialized immediately
    pub fn inline_keypad(mut self, keypad: &InlineKeypad) -> Self {
        self.inline_keypad = Some(keypad.to_value());
        self
    }

    /// Deliver silently; `false` leaves the field out
    pub fn disable_notification(mut self, disable: bool) -> Self {
        self.disable_notification = disable;
        self
    }

    /// Reply to an earlier message; an empty id is ignored
    pub fn reply_to_message_id<S: Into<String>>(mut self, message_id: S) -> Self {
        let message_id = message_id.into();
        self.reply_to_message_id = if message_id.is_empty() {
            None
        } else {
            Some(message_id)
        };
        self
    }
}

/// Parameters for `sendPoll`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SendPoll<'a> {
    pub chat_id: &'a str,
    pub question: &'a str,
    pub options: &'a [String],
}

/// Parameters for `sendLocation`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SendLocation<'a> {
    pub chat_id: &'a str,
    pub latitude: &'a str,
    pub longitude: &'a str,
}

/// Parameters for `sendContact`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SendContact<'a> {
    pub chat_id: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub phone_number: &'a str,
}

/// Parameters for `getChat`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct GetChat<'a> {
    pub chat_id: &'a str,
}

/// Parameters for `getUpdates`
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

impl GetUpdates {
    /// Request the first page with the service's default size
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue from the cursor returned by a previous call
    pub fn offset_id<S: Into<String>>(mut self, offset_id: S) -> Self {
        self.offset_id = Some(offset_id.into());
        self
    }

    /// Cap the number of updates returned
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Parameters for `forwardMessage`
#[derive(Debug, Clone, Serialize)]
pub struct ForwardMessage {
    from_chat_id: String,
    message_id: String,
    to_chat_id: String,
    #[serde(skip_serializing_if = "is_false")]
    disable_notification: bool,
}

impl ForwardMessage {
    /// Forward `message_id` from one chat to another
    pub fn new<F: Into<String>, M: Into<String>, T: Into<String>>(
        from_chat_id: F,
        message_id: M,
        to_chat_id: T,
    ) -> Self {
        ForwardMessage {
            from_chat_id: from_chat_id.into(),
            message_id: message_id.into(),
            to_chat_id: to_chat_id.into(),
            disable_notification: false,
        }
    }

    /// Deliver silently; `false` leaves the field out
    pub fn disable_notification(mut self, disable: bool) -> Self {
        self.disable_notification = disable;
        self
    }
}

/// Parameters for `editMessageText`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct EditMessageText<'a> {
    pub chat_id: &'a str,
    pub message_id: &'a str,
    pub text: &'a str,
}

/// Parameters for `editInlineKeypad`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct EditInlineKeypad<'a> {
    pub chat_id: &'a str,
    pub message_id: &'a str,
    pub inline_keypad: Value,
}

/// Parameters for `deleteMessage`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct DeleteMessage<'a> {
    pub chat_id: &'a str,
    pub message_id: &'a str,
}

/// Parameters for `setCommands`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SetCommands<'a> {
    pub bot_commands: &'a [BotCommand],
}

/// Parameters for `updateBotEndpoints`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct UpdateBotEndpoints<'a> {
    pub url: &'a str,
    #[serde(rename = "type")]
    pub endpoint_type: UpdateEndpointType,
}

/// Parameters for `editChatKeypad`
#[derive(Debug, Clone, Serialize)]
pub struct EditChatKeypad {
    chat_id: String,
    chat_keypad_type: ChatKeypadType,
    #[serde(skip_serializing_if = "Option::is_none")]
    chat_keypad: Option<Value>,
}

impl EditChatKeypad {
    /// Change the chat keypad of `chat_id`
    pub fn new<S: Into<String>>(chat_id: S, chat_keypad_type: ChatKeypadType) -> Self {
        EditChatKeypad {
            chat_id: chat_id.into(),
            chat_keypad_type,
            chat_keypad: None,
        }
    }

    /// Attach the new keypad; the keypad is serialized immediately
    pub fn chat_keypad(mut self, keypad: &Keypad) -> Self {
        self.chat_keypad = Some(keypad.to_value());
        self
    }
}
