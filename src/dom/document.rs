// ============================================================================
// The DOM boundary: everything the engine reads or writes on a page
// ============================================================================

/// Current state of one form control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlState {
    pub id: Option<String>,
    pub value: String,
    pub checked: bool,
}

/// A bound form. Lookups are scoped to the form's own controls.
///
/// Handles behave like DOM nodes: they are cheap references to shared page
/// state, so mutation goes through `&self`.
pub trait FormScope {
    /// First control matching `selector`, or `None` if there is none or the
    /// selector cannot be parsed.
    fn query(&self, selector: &str) -> Option<ControlState>;

    /// First checked control matching `selector`.
    fn query_checked(&self, selector: &str) -> Option<ControlState> {
        self.query(&format!("{}:checked", selector))
    }

    /// Restore every control to its initial value.
    fn reset(&self);
}

/// The control that triggers a submission.
pub trait SubmitButton {
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
    fn is_disabled(&self) -> bool;
    fn set_disabled(&self, disabled: bool);
}

/// Document-level lookups used while the engine attaches.
pub trait Document {
    type Form: FormScope;
    type Button: SubmitButton;

    fn form(&self, selector: &str) -> Option<Self::Form>;

    /// Find the submit control inside `form`.
    fn submit_button(&self, form: &Self::Form, selector: &str) -> Option<Self::Button>;
}
