/*!
 * rubika-bot - A small, typed Rust client for the Rubika bot API
 *
 * This library turns bot API methods into HTTP calls, builds the chat and
 * inline keypads embedded in outgoing messages, and extracts the useful
 * fields from inbound webhook notifications.
 */

pub mod client;
pub mod configuration;
pub mod error;
pub mod keypad;
pub mod requests;
pub mod transport;
pub mod webhook;

/// The main entry point for the rubika-bot library.
///
/// Provides shortcuts for building a configured [`Client`].
pub struct Rubika;

impl Rubika {
    /// Build a client from a configuration closure.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubika_bot::Rubika;
    /// use std::time::Duration;
    ///
    /// let client = Rubika::configure(|config| {
    ///     config.set_bot_token("YOUR_BOT_TOKEN");
    ///     config.set_timeout(Duration::from_secs(10));
    ///     config.set_user_agent("my-bot/1.0");
    /// })
    /// .unwrap();
    /// assert_eq!(client.configuration().user_agent(), Some("my-bot/1.0"));
    /// ```
    pub fn configure<F>(config_fn: F) -> Result<Client, Error>
    where
        F: FnOnce(&mut Configuration),
    {
        let mut config = Configuration::default();
        config_fn(&mut config);
        Client::new(config)
    }

    /// Build a client for `token` with default settings.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rubika_bot::{Button, Keypad, KeypadRow, Rubika, SendMessage};
    ///
    /// let client = Rubika::client("YOUR_BOT_TOKEN").unwrap();
    /// let keypad = Keypad::new()
    ///     .add_row(KeypadRow::new().add_button(Button::simple("yes", "Yes")))
    ///     .set_resize_keyboard(true);
    ///
    /// let message = SendMessage::new("CHAT_ID", "Continue?").chat_keypad(&keypad);
    /// let result = client.send_message(&message);
    /// ```
    pub fn client<S: AsRef<str>>(token: S) -> Result<Client, Error> {
        Client::new(Configuration::new(token))
    }
}

// Re-export main components for easy access
pub use client::{Client, Response};
pub use configuration::Configuration;
pub use error::Error;
pub use keypad::{Button, ButtonType, InlineKeypad, Keypad, KeypadRow};
pub use requests::{
    BotCommand, ChatKeypadType, EditChatKeypad, ForwardMessage, GetUpdates, Method, SendMessage,
    UpdateEndpointType,
};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use webhook::WebhookKind;
