#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ButtonStyle {
    #[default]
    Primary,
    Accent,
    Warn,
}

impl ButtonStyle {
    pub fn classes(self) -> &'static str {
        match self {
            ButtonStyle::Primary => "bg-blue-600 hover:bg-blue-700 text-white",
            ButtonStyle::Accent => "bg-pink-600 hover:bg-pink-700 text-white",
            ButtonStyle::Warn => "bg-red-600 hover:bg-red-700 text-white",
        }
    }
}

/// Options understood by the confirmation dialog. Unset texts fall back to the
/// success-notice defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DialogConfig {
    pub title: Option<String>,
    pub description: Option<String>,
    pub success_button_label: Option<String>,
    pub cancel_button_label: Option<String>,
    pub success_button_style: ButtonStyle,
    pub cancel_button_style: ButtonStyle,
    pub show_close_button: bool,
}

impl DialogConfig {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Success!")
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("Your record was registered successfully!")
    }

    pub fn success_button_label(&self) -> &str {
        self.success_button_label.as_deref().unwrap_or("OK")
    }

    /// The cancel button is only rendered when a label was configured.
    pub fn cancel_button_label(&self) -> Option<&str> {
        self.cancel_button_label.as_deref()
    }
}

/// What happens once the dialog closes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CloseAction {
    NavigateToListing,
    StartNew,
    ResetForm,
    Dismiss,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dialog {
    pub config: DialogConfig,
    pub on_success: CloseAction,
    /// Applied for the cancel button and for a plain dismissal.
    pub on_cancel: CloseAction,
}

const GO_TO_LISTING: &str = "Go to listing";
const REGISTER_NEW: &str = "Register a new movie";

impl Dialog {
    pub fn invalid_form() -> Self {
        Self {
            config: DialogConfig {
                title: Some("Error".into()),
                description: Some("Could not save: some fields are invalid.".into()),
                success_button_label: Some(GO_TO_LISTING.into()),
                cancel_button_label: Some(REGISTER_NEW.into()),
                success_button_style: ButtonStyle::Accent,
                cancel_button_style: ButtonStyle::Warn,
                show_close_button: false,
            },
            on_success: CloseAction::NavigateToListing,
            on_cancel: CloseAction::StartNew,
        }
    }

    pub fn created() -> Self {
        Self {
            config: DialogConfig {
                success_button_label: Some(GO_TO_LISTING.into()),
                cancel_button_label: Some(REGISTER_NEW.into()),
                success_button_style: ButtonStyle::Accent,
                cancel_button_style: ButtonStyle::Warn,
                show_close_button: true,
                ..DialogConfig::default()
            },
            on_success: CloseAction::NavigateToListing,
            on_cancel: CloseAction::ResetForm,
        }
    }

    pub fn create_failed() -> Self {
        Self::failure(
            "Error saving the record!",
            "We could not save your record, please try again later.",
            ButtonStyle::Accent,
        )
    }

    pub fn updated() -> Self {
        Self {
            config: DialogConfig {
                description: Some("Your record was updated successfully!".into()),
                success_button_label: Some(GO_TO_LISTING.into()),
                success_button_style: ButtonStyle::Warn,
                ..DialogConfig::default()
            },
            on_success: CloseAction::NavigateToListing,
            on_cancel: CloseAction::NavigateToListing,
        }
    }

    pub fn update_failed() -> Self {
        Self::failure(
            "Error editing the record!",
            "We could not edit your record, please try again later.",
            ButtonStyle::Warn,
        )
    }

    fn failure(title: &str, description: &str, style: ButtonStyle) -> Self {
        Self {
            config: DialogConfig {
                title: Some(title.into()),
                description: Some(description.into()),
                success_button_label: Some("Close".into()),
                success_button_style: style,
                ..DialogConfig::default()
            },
            on_success: CloseAction::Dismiss,
            on_cancel: CloseAction::Dismiss,
        }
    }

    /// Maps the dialog result (`Some(true)` for the success button) to its action.
    pub fn action_for(&self, choice: Option<bool>) -> CloseAction {
        match choice {
            Some(true) => self.on_success,
            Some(false) | None => self.on_cancel,
        }
    }
}
