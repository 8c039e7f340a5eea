//! Builders for chat keypads and inline keypads.
//!
//! Every model is a plain value assembled with chained calls and turned into
//! its wire form with `to_value()`. Nothing is validated here: empty keypads
//! and duplicate button ids are passed through, the service decides.

use serde_json::{Map, Value};
use std::fmt;

/// Kind of a keypad button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonType {
    Simple,
    AskMyPhoneNumber,
    AskLocation,
    CameraImage,
    Barcode,
}

impl ButtonType {
    /// Wire name of the button type
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonType::Simple => "Simple",
            ButtonType::AskMyPhoneNumber => "AskMyPhoneNumber",
            ButtonType::AskLocation => "AskLocation",
            ButtonType::CameraImage => "CameraImage",
            ButtonType::Barcode => "Barcode",
        }
    }
}

impl fmt::Display for ButtonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    id: String,
    button_type: ButtonType,
    text: Option<String>,
}

impl Button {
    /// Build a button of the given type without display text
    pub fn new<S: Into<String>>(id: S, button_type: ButtonType) -> Self {
        Button {
            id: id.into(),
            button_type,
            text: None,
        }
    }

    fn with_text<S: Into<String>, T: Into<String>>(
        id: S,
        button_type: ButtonType,
        text: T,
    ) -> Self {
        Button {
            id: id.into(),
            button_type,
            text: Some(text.into()),
        }
    }

    /// A plain button that sends its id back when pressed
    pub fn simple<S: Into<String>, T: Into<String>>(id: S, text: T) -> Self {
        Self::with_text(id, ButtonType::Simple, text)
    }

    /// A button asking the user to share their phone number
    pub fn ask_my_phone_number<S: Into<String>, T: Into<String>>(id: S, text: T) -> Self {
        Self::with_text(id, ButtonType::AskMyPhoneNumber, text)
    }

    /// A button asking the user to share a location
    pub fn ask_location<S: Into<String>, T: Into<String>>(id: S, text: T) -> Self {
        Self::with_text(id, ButtonType::AskLocation, text)
    }

    /// A button opening the camera
    pub fn camera_image<S: Into<String>, T: Into<String>>(id: S, text: T) -> Self {
        Self::with_text(id, ButtonType::CameraImage, text)
    }

    /// A button opening the barcode scanner
    pub fn barcode<S: Into<String>, T: Into<String>>(id: S, text: T) -> Self {
        Self::with_text(id, ButtonType::Barcode, text)
    }

    /// Id reported back in `aux_data.button_id` when pressed
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Kind of the button
    pub fn button_type(&self) -> ButtonType {
        self.button_type
    }

    /// Display text, if the button has one
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Wire form: `id` and `type` always, `button_text` only when set
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("id".to_string(), Value::String(self.id.clone()));
        out.insert(
            "type".to_string(),
            Value::String(self.button_type.as_str().to_string()),
        );
        if let Some(text) = &self.text {
            out.insert("button_text".to_string(), Value::String(text.clone()));
        }
        Value::Object(out)
    }
}

/// A row of buttons, displayed left to right in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeypadRow {
    buttons: Vec<Button>,
}

impl KeypadRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a button to the end of the row
    pub fn add_button(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }

    /// Buttons in display order
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Wire form: `buttons` in insertion order, possibly empty
    pub fn to_value(&self) -> Value {
        let buttons = self.buttons.iter().map(Button::to_value).collect();
        let mut out = Map::new();
        out.insert("buttons".to_string(), Value::Array(buttons));
        Value::Object(out)
    }
}

fn rows_to_value(rows: &[KeypadRow]) -> Value {
    Value::Array(rows.iter().map(KeypadRow::to_value).collect())
}

/// A keypad attached to the chat itself
///
/// `resize_keyboard` and `on_time_keyboard` are tri-state: a flag that was
/// never set is left out of the wire form, one set to `false` is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keypad {
    rows: Vec<KeypadRow>,
    resize_keyboard: Option<bool>,
    on_time_keyboard: Option<bool>,
}

impl Keypad {
    /// Create a keypad with no rows and both flags unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row below the existing ones
    pub fn add_row(mut self, row: KeypadRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Ask the app to fit the keypad to its buttons
    pub fn set_resize_keyboard(mut self, resize: bool) -> Self {
        self.resize_keyboard = Some(resize);
        self
    }

    /// Hide the keypad once a button has been pressed
    pub fn set_on_time_keyboard(mut self, on_time: bool) -> Self {
        self.on_time_keyboard = Some(on_time);
        self
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> &[KeypadRow] {
        &self.rows
    }

    /// `None` while the flag was never set
    pub fn resize_keyboard(&self) -> Option<bool> {
        self.resize_keyboard
    }

    /// `None` while the flag was never set
    pub fn on_time_keyboard(&self) -> Option<bool> {
        self.on_time_keyboard
    }

    /// Wire form: `rows` always, each flag only when it was set
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("rows".to_string(), rows_to_value(&self.rows));
        if let Some(resize) = self.resize_keyboard {
            out.insert("resize_keyboard".to_string(), Value::Bool(resize));
        }
        if let Some(on_time) = self.on_time_keyboard {
            out.insert("on_time_keyboard".to_string(), Value::Bool(on_time));
        }
        Value::Object(out)
    }
}

/// A keypad attached to a single message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineKeypad {
    rows: Vec<KeypadRow>,
}

impl InlineKeypad {
    /// Create an inline keypad with no rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row below the existing ones
    pub fn add_row(mut self, row: KeypadRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> &[KeypadRow] {
        &self.rows
    }

    /// Wire form: `rows` only
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("rows".to_string(), rows_to_value(&self.rows));
        Value::Object(out)
    }
}
