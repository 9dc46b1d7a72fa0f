use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::config::field_model::{PageConfig, RootConfig};
use crate::config::loader::{ConfigLoader, ConfigSource};
use crate::dom::document::{Document, FormScope, SubmitButton};
use crate::engine::error::{BindingError, InitError, SubmitError};
use crate::engine::feedback::Notifier;
use crate::form::payload::{PayloadMetadata, assemble_payload};
use crate::form::validator::validate;
use crate::locale::messages::Locale;
use crate::page::context::PageContext;
use crate::store::document_store::{DocumentRef, DocumentStore};

/// Where the engine is in handling a submit click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
}

/// Pick the feedback language: page language, then the configured site
/// default, then zh-TW.
pub fn resolve_locale(context: &PageContext, config: &RootConfig) -> Locale {
    context
        .lang
        .as_deref()
        .and_then(Locale::from_tag)
        .or_else(|| config.default_locale().and_then(Locale::from_tag))
        .unwrap_or_default()
}

// ============================================================================
// Busy guard: keeps the submit control disabled while a store call is pending
// ============================================================================

/// Disables and relabels the button on creation; puts both back on drop, so
/// the control is restored on every exit path.
struct BusyGuard<'a, B: SubmitButton> {
    button: &'a B,
    state: &'a mut SubmissionState,
    original_label: String,
}

impl<'a, B: SubmitButton> BusyGuard<'a, B> {
    fn engage(button: &'a B, state: &'a mut SubmissionState, busy_label: &str) -> Self {
        let original_label = button.label();
        button.set_disabled(true);
        button.set_label(busy_label);
        *state = SubmissionState::Submitting;
        Self {
            button,
            state,
            original_label,
        }
    }
}

impl<B: SubmitButton> Drop for BusyGuard<'_, B> {
    fn drop(&mut self) {
        self.button.set_label(&self.original_label);
        self.button.set_disabled(false);
        *self.state = SubmissionState::Idle;
    }
}

// ============================================================================
// FormEngine: one bound form, its submit control and its collaborators
// ============================================================================

/// A form engine attached to one page.
///
/// Built by [`FormEngine::attach`] or [`FormEngine::bind`]; if either fails
/// there is no engine and the page keeps its plain, unbound form.
pub struct FormEngine<F, B, S, N> {
    page_id: String,
    context: PageContext,
    locale: Locale,
    collection: String,
    config: PageConfig,
    form: F,
    button: B,
    store: S,
    notifier: N,
    state: SubmissionState,
}

impl<F, B, S, N> FormEngine<F, B, S, N>
where
    F: FormScope,
    B: SubmitButton,
    S: DocumentStore,
    N: Notifier,
{
    /// Load the configuration and bind to the page.
    pub async fn attach<D, C>(
        loader: &ConfigLoader<C>,
        document: &D,
        context: PageContext,
        store: S,
        notifier: N,
    ) -> Result<Self, InitError>
    where
        D: Document<Form = F, Button = B>,
        C: ConfigSource,
    {
        let config = loader.load().await.inspect_err(|e| {
            error!(error = %e, "form engine not attached: configuration unavailable");
        })?;
        Self::bind(&config, document, context, store, notifier)
    }

    /// Bind to the page using an already loaded configuration.
    pub fn bind<D>(
        config: &RootConfig,
        document: &D,
        context: PageContext,
        store: S,
        notifier: N,
    ) -> Result<Self, InitError>
    where
        D: Document<Form = F, Button = B>,
    {
        let page_id = context.page_id();

        let result = Self::bind_elements(config, document, page_id);
        let (page_config, form, button) = result.inspect_err(|e| {
            error!(page = page_id, error = %e, "form engine not attached");
        })?;

        let locale = resolve_locale(&context, config);
        let collection = config.collection().to_string();
        info!(page = page_id, %locale, collection = %collection, "form engine attached");

        Ok(Self {
            page_id: page_id.to_string(),
            context,
            locale,
            collection,
            config: page_config,
            form,
            button,
            store,
            notifier,
            state: SubmissionState::Idle,
        })
    }

    fn bind_elements<D>(
        config: &RootConfig,
        document: &D,
        page_id: &str,
    ) -> Result<(PageConfig, F, B), InitError>
    where
        D: Document<Form = F, Button = B>,
    {
        let page_config = config
            .page(page_id)
            .ok_or_else(|| InitError::UnknownPage(page_id.to_string()))?;

        let form = document.form(&page_config.form_selector).ok_or_else(|| {
            BindingError::FormNotFound {
                selector: page_config.form_selector.clone(),
            }
        })?;

        let button = document
            .submit_button(&form, &page_config.submit_button_selector)
            .ok_or_else(|| BindingError::ButtonNotFound {
                selector: page_config.submit_button_selector.clone(),
            })?;

        Ok((page_config.clone(), form, button))
    }

    /// Handle one click on the submit control.
    ///
    /// Validation and store failures are shown to the user through the
    /// notifier before being returned; the form stays usable either way.
    pub async fn submit(&mut self) -> Result<DocumentRef, SubmitError> {
        if self.state != SubmissionState::Idle || self.button.is_disabled() {
            debug!(page = %self.page_id, "submit ignored: control is disabled");
            return Err(SubmitError::Busy);
        }

        self.state = SubmissionState::Validating;
        let errors = validate(&self.form, &self.config.fields, self.locale);
        if !errors.is_empty() {
            debug!(page = %self.page_id, count = errors.len(), "validation failed");
            self.notifier.notify(&errors.join("\n"));
            self.state = SubmissionState::Idle;
            return Err(SubmitError::Validation(errors));
        }

        let messages = self.locale.messages();
        let meta = PayloadMetadata {
            source_page: self.page_id.clone(),
            locale: self.locale,
            path: self.context.path.clone(),
            created_at: Utc::now(),
            user_agent: self.context.user_agent.clone(),
        };

        let _busy = BusyGuard::engage(&self.button, &mut self.state, messages.submitting);
        let payload = assemble_payload(&self.form, &self.config.fields, meta);

        match self.store.add(&self.collection, &payload).await {
            Ok(doc) => {
                info!(page = %self.page_id, collection = %self.collection, document_id = %doc.id, "submission stored");
                self.notifier.notify(&messages.success_message(&doc.id));
                self.form.reset();
                Ok(doc)
            }
            Err(e) => {
                warn!(page = %self.page_id, collection = %self.collection, error = %e, "submission failed");
                self.notifier.notify(&messages.failure_message(&e.to_string()));
                Err(SubmitError::Persistence(e))
            }
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn button(&self) -> &B {
        &self.button
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
