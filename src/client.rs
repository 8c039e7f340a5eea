use log::{debug, error};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::configuration::Configuration;
use crate::error::Error;
use crate::keypad::InlineKeypad;
use crate::requests::{
    BotCommand, DeleteMessage, EditChatKeypad, EditInlineKeypad, EditMessageText, ForwardMessage,
    GetChat, GetUpdates, Method, SendContact, SendLocation, SendMessage, SendPoll, SetCommands,
    UpdateBotEndpoints, UpdateEndpointType,
};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

/// Decoded JSON returned by the bot API
///
/// The shape depends on the method; nothing is validated beyond the body
/// being JSON.
pub type Response = Value;

/// HTTP client for the bot API
///
/// The client only holds immutable settings, so one instance can serve
/// concurrent calls from several threads. Calls are independent: each one
/// carries its own timeout and nothing orders them against each other.
pub struct Client<T: HttpTransport = ReqwestTransport> {
    config: Configuration,
    transport: T,
}

impl Client<ReqwestTransport> {
    /// Create a client sending through `reqwest`
    pub fn new(config: Configuration) -> Result<Self, Error> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.timeout())?;
        Ok(Client { config, transport })
    }
}

impl<T: HttpTransport> Client<T> {
    /// Create a client sending through a custom transport
    pub fn with_transport(config: Configuration, transport: T) -> Result<Self, Error> {
        config.validate()?;
        Ok(Client { config, transport })
    }

    /// Settings this client was built with
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Transport the client sends through
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform one API call with `payload` as the JSON body
    ///
    /// No retries: the first transport failure, non-2xx status or malformed
    /// body is returned as is.
    pub fn call<P: Serialize + ?Sized>(
        &self,
        method: Method,
        payload: &P,
    ) -> Result<Response, Error> {
        let token = self.config.bot_token()?;
        let body = serde_json::to_vec(payload)
            .map_err(|e| Error::encode(format!("Failed to encode {} payload: {}", method, e)))?;

        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(user_agent) = self.config.user_agent() {
            headers.push(("User-Agent".to_string(), user_agent.to_string()));
        }

        let request = HttpRequest {
            url: method_url(self.config.base_url(), token, method),
            headers,
            body,
            timeout: self.config.timeout(),
        };

        debug!("Calling {}", method);
        let response = self.transport.execute(request).map_err(|e| {
            error!("{} failed before a response arrived: {}", method, e);
            e
        })?;
        debug!("{} answered with status {}", method, response.status);

        handle_response(method, response)
    }

    /// Information about the bot itself
    pub fn get_me(&self) -> Result<Response, Error> {
        self.call(Method::GetMe, &Map::new())
    }

    /// Send a text message, optionally with keypads attached
    pub fn send_message(&self, message: &SendMessage) -> Result<Response, Error> {
        self.call(Method::SendMessage, message)
    }

    /// Send a poll; options keep the given order
    pub fn send_poll<S: AsRef<str>>(
        &self,
        chat_id: &str,
        question: &str,
        options: &[S],
    ) -> Result<Response, Error> {
        let options: Vec<String> = options.iter().map(|o| o.as_ref().to_string()).collect();
        self.call(
            Method::SendPoll,
            &SendPoll {
                chat_id,
                question,
                options: &options,
            },
        )
    }

    /// Send a location pin
    pub fn send_location(
        &self,
        chat_id: &str,
        latitude: &str,
        longitude: &str,
    ) -> Result<Response, Error> {
        self.call(
            Method::SendLocation,
            &SendLocation {
                chat_id,
                latitude,
                longitude,
            },
        )
    }

    /// Send a contact card
    pub fn send_contact(
        &self,
        chat_id: &str,
        first_name: &str,
        last_name: &str,
        phone_number: &str,
    ) -> Result<Response, Error> {
        self.call(
            Method::SendContact,
            &SendContact {
                chat_id,
                first_name,
                last_name,
                phone_number,
            },
        )
    }

    /// Information about a chat
    pub fn get_chat(&self, chat_id: &str) -> Result<Response, Error> {
        self.call(Method::GetChat, &GetChat { chat_id })
    }

    /// Fetch one batch of pending updates
    pub fn get_updates(&self, request: &GetUpdates) -> Result<Response, Error> {
        self.call(Method::GetUpdates, request)
    }

    /// Forward a message to another chat
    pub fn forward_message(&self, request: &ForwardMessage) -> Result<Response, Error> {
        self.call(Method::ForwardMessage, request)
    }

    /// Replace the text of a sent message
    pub fn edit_message_text(
        &self,
        chat_id: &str,
        message_id: &str,
        text: &str,
    ) -> Result<Response, Error> {
        self.call(
            Method::EditMessageText,
            &EditMessageText {
                chat_id,
                message_id,
                text,
            },
        )
    }

    /// Replace the inline keypad of a sent message
    pub fn edit_inline_keypad(
        &self,
        chat_id: &str,
        message_id: &str,
        inline_keypad: &InlineKeypad,
    ) -> Result<Response, Error> {
        self.call(
            Method::EditInlineKeypad,
            &EditInlineKeypad {
                chat_id,
                message_id,
                inline_keypad: inline_keypad.to_value(),
            },
        )
    }

    /// Delete a sent message
    pub fn delete_message(&self, chat_id: &str, message_id: &str) -> Result<Response, Error> {
        self.call(
            Method::DeleteMessage,
            &DeleteMessage {
                chat_id,
                message_id,
            },
        )
    }

    /// Replace the bot's command menu; commands keep the given order
    pub fn set_commands(&self, bot_commands: &[BotCommand]) -> Result<Response, Error> {
        self.call(Method::SetCommands, &SetCommands { bot_commands })
    }

    /// Point one kind of inbound notification at `url`
    pub fn update_bot_endpoints(
        &self,
        url: &str,
        endpoint_type: UpdateEndpointType,
    ) -> Result<Response, Error> {
        self.call(
            Method::UpdateBotEndpoints,
            &UpdateBotEndpoints { url, endpoint_type },
        )
    }

    /// Show, replace or remove the chat keypad
    pub fn edit_chat_keypad(&self, request: &EditChatKeypad) -> Result<Response, Error> {
        self.call(Method::EditChatKeypad, request)
    }
}

/// Build `<base>/<percent-encoded token>/<method>`
pub fn method_url(base_url: &str, token: &str, method: Method) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(token),
        method.as_str()
    )
}

fn handle_response(method: Method, response: HttpResponse) -> Result<Response, Error> {
    if !(200..=299).contains(&response.status) {
        let body = String::from_utf8_lossy(&response.body).into_owned();
        error!("{} returned HTTP status {}: {}", method, response.status, body);
        return Err(Error::HttpStatus {
            status: response.status,
            body,
        });
    }

    serde_json::from_slice(&response.body).map_err(|e| {
        error!("Failed to parse {} response: {}", method, e);
        Error::decode(format!(
            "Failed to parse {} response: {} Body: {}",
            method,
            e,
            String::from_utf8_lossy(&response.body)
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypad::{Button, Keypad, KeypadRow};
    use crate::requests::ChatKeypadType;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every request and answers with a canned response
    struct RecordingTransport {
        requests: Mutex<Vec<HttpRequest>>,
        status: u16,
        body: &'static str,
    }

    impl RecordingTransport {
        fn answering(status: u16, body: &'static str) -> Self {
            RecordingTransport {
                requests: Mutex::new(Vec::new()),
                status,
                body,
            }
        }

        fn last_request(&self) -> HttpRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }

        fn last_payload(&self) -> Value {
            serde_json::from_slice(&self.last_request().body).unwrap()
        }
    }

    impl HttpTransport for RecordingTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
            self.requests.lock().unwrap().push(request);
            Ok(HttpResponse {
                status: self.status,
                body: self.body.as_bytes().to_vec(),
            })
        }
    }

    struct FailingTransport;

    impl HttpTransport for FailingTransport {
        fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, Error> {
            Err(Error::timeout("deadline elapsed"))
        }
    }

    fn ok_client() -> Client<RecordingTransport> {
        Client::with_transport(
            Configuration::new("secret"),
            RecordingTransport::answering(200, r#"{"status":"OK","data":{}}"#),
        )
        .unwrap()
    }

    #[test]
    fn test_method_url_encodes_token() {
        assert_eq!(
            method_url("https://botapi.rubika.ir/v3/", "a b/c", Method::GetMe),
            "https://botapi.rubika.ir/v3/a%20b%2Fc/getMe"
        );
        assert_eq!(
            method_url("http://localhost:8080", "tok", Method::SendMessage),
            "http://localhost:8080/tok/sendMessage"
        );
    }

    #[test]
    fn test_call_sets_headers_and_timeout() {
        let mut config = Configuration::new("secret");
        config.set_user_agent("rubika-test/0.1");
        let client =
            Client::with_transport(config, RecordingTransport::answering(200, "{}")).unwrap();

        client.get_me().unwrap();

        let request = client.transport().last_request();
        assert_eq!(request.url, "https://botapi.rubika.ir/v3/secret/getMe");
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.header("User-Agent"), Some("rubika-test/0.1"));
        assert_eq!(request.timeout, crate::configuration::DEFAULT_TIMEOUT);
        assert_eq!(client.transport().last_payload(), json!({}));
    }

    #[test]
    fn test_no_user_agent_header_by_default() {
        let client = ok_client();
        client.get_me().unwrap();
        assert!(client.transport().last_request().header("User-Agent").is_none());
    }

    #[test]
    fn test_send_message_minimal_payload() {
        let client = ok_client();
        let response = client.send_message(&SendMessage::new("100", "hi")).unwrap();

        assert_eq!(response, json!({"status": "OK", "data": {}}));
        assert_eq!(
            client.transport().last_payload(),
            json!({"chat_id": "100", "text": "hi"})
        );
    }

    #[test]
    fn test_send_poll_keeps_option_order() {
        let client = ok_client();
        client.send_poll("1", "Pick", &["b", "a", "b"]).unwrap();
        assert_eq!(
            client.transport().last_payload(),
            json!({"chat_id": "1", "question": "Pick", "options": ["b", "a", "b"]})
        );
    }

    #[test]
    fn test_set_commands_keeps_order() {
        let client = ok_client();
        client
            .set_commands(&[
                BotCommand::new("start", "Start"),
                BotCommand::new("help", "Help"),
            ])
            .unwrap();
        assert_eq!(
            client.transport().last_payload(),
            json!({"bot_commands": [
                {"command": "start", "description": "Start"},
                {"command": "help", "description": "Help"}
            ]})
        );
    }

    #[test]
    fn test_field_name_mapping() {
        let client = ok_client();

        client.send_contact("1", "Ada", "Lovelace", "+100").unwrap();
        assert_eq!(
            client.transport().last_payload(),
            json!({
                "chat_id": "1",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "phone_number": "+100"
            })
        );

        client.send_location("1", "35.7", "51.4").unwrap();
        assert_eq!(
            client.transport().last_payload(),
            json!({"chat_id": "1", "latitude": "35.7", "longitude": "51.4"})
        );

        client.edit_message_text("1", "2", "new").unwrap();
        assert_eq!(
            client.transport().last_payload(),
            json!({"chat_id": "1", "message_id": "2", "text": "new"})
        );

        client.delete_message("1", "2").unwrap();
        assert_eq!(
            client.transport().last_payload(),
            json!({"chat_id": "1", "message_id": "2"})
        );

        client.get_chat("1").unwrap();
        assert_eq!(client.transport().last_payload(), json!({"chat_id": "1"}));

        client
            .forward_message(&ForwardMessage::new("1", "2", "3").disable_notification(true))
            .unwrap();
        assert_eq!(
            client.transport().last_payload(),
            json!({
                "from_chat_id": "1",
                "message_id": "2",
                "to_chat_id": "3",
                "disable_notification": true
            })
        );

        client
            .update_bot_endpoints("https://example.com/hook", UpdateEndpointType::ReceiveUpdate)
            .unwrap();
        assert_eq!(
            client.transport().last_payload(),
            json!({"url": "https://example.com/hook", "type": "ReceiveUpdate"})
        );
        assert!(client.transport().last_request().url.ends_with("/updateBotEndpoints"));
    }

    #[test]
    fn test_keypads_are_embedded_as_values() {
        let client = ok_client();
        let row = KeypadRow::new().add_button(Button::simple("yes", "Yes"));

        client
            .edit_inline_keypad("1", "2", &InlineKeypad::new().add_row(row.clone()))
            .unwrap();
        assert_eq!(
            client.transport().last_payload()["inline_keypad"],
            json!({"rows": [{"buttons": [{"id": "yes", "type": "Simple", "button_text": "Yes"}]}]})
        );

        let keypad = Keypad::new().add_row(row).set_on_time_keyboard(false);
        let request = EditChatKeypad::new("1", ChatKeypadType::New).chat_keypad(&keypad);
        client.edit_chat_keypad(&request).unwrap();
        let payload = client.transport().last_payload();
        assert_eq!(payload["chat_keypad_type"], json!("New"));
        assert_eq!(payload["chat_keypad"]["on_time_keyboard"], json!(false));
        assert!(payload["chat_keypad"].get("resize_keyboard").is_none());
    }

    #[test]
    fn test_non_success_status_is_http_error() {
        let client = Client::with_transport(
            Configuration::new("secret"),
            RecordingTransport::answering(404, "not found"),
        )
        .unwrap();

        match client.get_me() {
            Err(Error::HttpStatus { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body, "not found");
            }
            other => panic!("expected HttpStatus error, got {:?}", other),
        }
    }

    #[test]
    fn test_success_range_boundaries() {
        for (status, is_ok) in [(199, false), (200, true), (299, true), (300, false)] {
            let client = Client::with_transport(
                Configuration::new("secret"),
                RecordingTransport::answering(status, "{}"),
            )
            .unwrap();
            assert_eq!(client.get_me().is_ok(), is_ok, "status {}", status);
        }
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let client = Client::with_transport(
            Configuration::new("secret"),
            RecordingTransport::answering(200, "<html>oops</html>"),
        )
        .unwrap();
        assert!(matches!(client.get_me(), Err(Error::Decode(_))));
    }

    #[test]
    fn test_unencodable_payload_is_encode_error() {
        let client = ok_client();
        let mut payload = std::collections::BTreeMap::new();
        payload.insert(vec![1u8, 2], "non-string key");

        let err = client.call(Method::SendMessage, &payload).unwrap_err();
        assert!(matches!(err, Error::Encode(_)));
        assert!(client.transport().requests.lock().unwrap().is_empty());
    }

    #[test]
    fn test_transport_failure_is_surfaced() {
        let client =
            Client::with_transport(Configuration::new("secret"), FailingTransport).unwrap();
        let err = client.get_chat("1").unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn test_concurrent_calls_share_one_client() {
        fn assert_send_sync<C: Send + Sync>() {}
        assert_send_sync::<Client>();

        let client = ok_client();
        std::thread::scope(|scope| {
            for i in 0..8 {
                let client = &client;
                scope.spawn(move || client.get_chat(&i.to_string()).unwrap());
            }
        });
        assert_eq!(client.transport().requests.lock().unwrap().len(), 8);
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let result = Client::with_transport(
            Configuration::default(),
            RecordingTransport::answering(200, "{}"),
        );
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
