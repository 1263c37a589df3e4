//! Email capture for the custom ROI report.
//!
//! The form collects a work email (required), name and company, and is handed
//! a snapshot of the current inputs and savings. Delivery goes through a
//! [`LeadSink`]; the bundled [`LoggingLeadSink`] only logs and always succeeds.
//!
//! [`LeadCapture`] drives the modal lifecycle:
//! `Editing → Submitting → Submitted → Closed`, with a fixed delay before
//! delivery and another before the form auto-closes. Closing the modal while a
//! submission is in flight aborts it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use roi_core::error::LeadError;
use roi_core::types::{Currency, DerivedMetrics, InputState};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Contact details entered in the capture form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: String,
}

impl LeadForm {
    /// A non-blank email with a local part and a domain is required.
    pub fn validate(&self) -> Result<(), LeadError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(LeadError::MissingEmail);
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(LeadError::InvalidEmail(email.to_string())),
        }
    }
}

/// What a sink receives: contact details plus the calculator snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub email: String,
    pub name: String,
    pub company: String,
    pub currency: Currency,
    pub inputs: InputState,
    pub payment_savings_low: f64,
    pub payment_savings_high: f64,
    pub captured_at: DateTime<Utc>,
}

impl LeadSubmission {
    pub fn new(form: &LeadForm, inputs: &InputState, metrics: &DerivedMetrics) -> Self {
        Self {
            email: form.email.trim().to_string(),
            name: form.name.trim().to_string(),
            company: form.company.trim().to_string(),
            currency: inputs.currency,
            inputs: *inputs,
            payment_savings_low: metrics.payment_savings_low,
            payment_savings_high: metrics.payment_savings_high,
            captured_at: Utc::now(),
        }
    }
}

/// Transport for captured leads.
#[async_trait]
pub trait LeadSink: Send + Sync {
    async fn submit(&self, lead: &LeadSubmission) -> Result<(), LeadError>;
}

/// Logs each lead and reports success. No data leaves the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLeadSink;

#[async_trait]
impl LeadSink for LoggingLeadSink {
    async fn submit(&self, lead: &LeadSubmission) -> Result<(), LeadError> {
        info!(
            email = %lead.email,
            name = %lead.name,
            company = %lead.company,
            currency = %lead.currency,
            savings_low = lead.payment_savings_low,
            savings_high = lead.payment_savings_high,
            "Lead captured"
        );
        Ok(())
    }
}

/// Wait `delay`, then hand `lead` to `sink`.
pub async fn deliver(
    sink: &dyn LeadSink,
    lead: &LeadSubmission,
    delay: Duration,
) -> Result<(), LeadError> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    sink.submit(lead).await
}

/// Delays of the capture modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadTiming {
    /// Before the sink is called.
    pub submit_delay: Duration,
    /// After success, before the form clears and the modal closes.
    pub close_delay: Duration,
}

impl Default for LeadTiming {
    fn default() -> Self {
        Self {
            submit_delay: Duration::from_millis(1000),
            close_delay: Duration::from_millis(3000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadState {
    Editing,
    Submitting,
    Submitted,
    Closed,
    /// The sink rejected the lead. Resubmitting is allowed.
    Failed(String),
}

#[derive(Debug)]
struct Shared {
    form: LeadForm,
    state: LeadState,
}

/// State machine behind the capture modal. Must be used inside a tokio runtime.
pub struct LeadCapture {
    sink: Arc<dyn LeadSink>,
    timing: LeadTiming,
    shared: Arc<Mutex<Shared>>,
    task: Option<JoinHandle<()>>,
}

impl LeadCapture {
    pub fn new(sink: Arc<dyn LeadSink>, timing: LeadTiming) -> Self {
        Self {
            sink,
            timing,
            shared: Arc::new(Mutex::new(Shared {
                form: LeadForm::default(),
                state: LeadState::Editing,
            })),
            task: None,
        }
    }

    pub fn state(&self) -> LeadState {
        self.shared.lock().state.clone()
    }

    pub fn form(&self) -> LeadForm {
        self.shared.lock().form.clone()
    }

    /// Replace the form contents. Ignored while a submission is in flight.
    pub fn fill(&self, form: LeadForm) {
        let mut shared = self.shared.lock();
        if shared.state != LeadState::Submitting {
            shared.form = form;
        }
    }

    /// Reopen the modal for editing after it closed or failed.
    pub fn open(&self) {
        let mut shared = self.shared.lock();
        if matches!(shared.state, LeadState::Closed | LeadState::Failed(_)) {
            shared.state = LeadState::Editing;
        }
    }

    /// Validate the form and start delivery of a snapshot of `inputs` and
    /// `metrics`.
    pub fn submit(
        &mut self,
        inputs: &InputState,
        metrics: &DerivedMetrics,
    ) -> Result<(), LeadError> {
        let submission = {
            let mut shared = self.shared.lock();
            // A confirmed lead stays locked until its close delay has run.
            if matches!(shared.state, LeadState::Submitting | LeadState::Submitted) {
                return Err(LeadError::AlreadySubmitting);
            }
            shared.form.validate()?;
            shared.state = LeadState::Submitting;
            LeadSubmission::new(&shared.form, inputs, metrics)
        };

        let sink = Arc::clone(&self.sink);
        let shared = Arc::clone(&self.shared);
        let timing = self.timing;

        if let Some(previous) = self.task.take() {
            previous.abort();
        }
        self.task = Some(tokio::spawn(async move {
            if let Err(e) = deliver(sink.as_ref(), &submission, timing.submit_delay).await {
                warn!(error = %e, email = %submission.email, "Lead submission failed");
                shared.lock().state = LeadState::Failed(e.to_string());
                return;
            }
            shared.lock().state = LeadState::Submitted;

            tokio::time::sleep(timing.close_delay).await;
            let mut guard = shared.lock();
            guard.form = LeadForm::default();
            guard.state = LeadState::Closed;
        }));
        Ok(())
    }

    /// Close the modal. A submission still in flight is aborted.
    pub fn close(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.shared.lock().state = LeadState::Closed;
    }

    /// Wait until the current submission finishes, including the close delay.
    pub async fn finished(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if e.is_panic() {
                    warn!("Lead submission task panicked");
                }
            }
        }
    }
}

impl Drop for LeadCapture {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Default)]
    struct CountingSink {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LeadSink for CountingSink {
        async fn submit(&self, _lead: &LeadSubmission) -> Result<(), LeadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct RejectingSink;

    #[async_trait]
    impl LeadSink for RejectingSink {
        async fn submit(&self, _lead: &LeadSubmission) -> Result<(), LeadError> {
            Err(LeadError::Unreachable("connection refused".into()))
        }
    }

    fn form() -> LeadForm {
        LeadForm {
            email: "ap@acme.test".into(),
            name: "Sam".into(),
            company: "Acme".into(),
        }
    }

    fn snapshot() -> (InputState, DerivedMetrics) {
        let metrics = DerivedMetrics {
            payment_savings_low: 99_750.0,
            payment_savings_high: 187_500.0,
            ..DerivedMetrics::default()
        };
        (InputState::default(), metrics)
    }

    #[test]
    fn validate_email() {
        assert_eq!(form().validate(), Ok(()));
        let blank = LeadForm {
            email: "   ".into(),
            ..form()
        };
        assert_eq!(blank.validate(), Err(LeadError::MissingEmail));
        for bad in ["ap", "@acme.test", "ap@"] {
            let f = LeadForm {
                email: bad.into(),
                ..form()
            };
            assert!(matches!(f.validate(), Err(LeadError::InvalidEmail(_))), "{bad}");
        }
    }

    #[test]
    fn form_without_email_deserializes_then_fails_validation() {
        let f: LeadForm = serde_json::from_str(r#"{"name":"Sam"}"#).unwrap();
        assert_eq!(f.email, "");
        assert_eq!(f.validate(), Err(LeadError::MissingEmail));
    }

    #[test]
    fn submission_snapshots_savings() {
        let (inputs, metrics) = snapshot();
        let lead = LeadSubmission::new(&form(), &inputs, &metrics);
        assert_eq!(lead.currency, Currency::Usd);
        assert_eq!(lead.payment_savings_high, 187_500.0);
        let json = serde_json::to_value(&lead).unwrap();
        assert_eq!(json["email"], "ap@acme.test");
        assert_eq!(json["inputs"]["poInvoiceVolume"], 100_000);
        assert!(json["capturedAt"].is_string());
    }

    #[tokio::test(start_paused = true)]
    async fn full_lifecycle() {
        let sink = Arc::new(CountingSink::default());
        let mut capture = LeadCapture::new(sink.clone(), LeadTiming::default());
        capture.fill(form());
        let (inputs, metrics) = snapshot();

        capture.submit(&inputs, &metrics).unwrap();
        assert_eq!(capture.state(), LeadState::Submitting);
        assert_eq!(
            capture.submit(&inputs, &metrics),
            Err(LeadError::AlreadySubmitting)
        );

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(capture.state(), LeadState::Submitted);
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
        assert_eq!(capture.form(), form());

        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(capture.state(), LeadState::Closed);
        assert_eq!(capture.form(), LeadForm::default());
    }

    #[tokio::test(start_paused = true)]
    async fn resubmit_waits_for_close() {
        let sink = Arc::new(CountingSink::default());
        let mut capture = LeadCapture::new(sink.clone(), LeadTiming::default());
        capture.fill(form());
        let (inputs, metrics) = snapshot();

        capture.submit(&inputs, &metrics).unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(capture.state(), LeadState::Submitted);
        assert_eq!(
            capture.submit(&inputs, &metrics),
            Err(LeadError::AlreadySubmitting)
        );

        // Reopened after the first lead closed, a second one gets its full
        // confirmation window.
        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(capture.state(), LeadState::Closed);
        capture.open();
        capture.fill(form());
        capture.submit(&inputs, &metrics).unwrap();

        tokio::time::sleep(Duration::from_millis(3600)).await;
        assert_eq!(capture.state(), LeadState::Submitted);
        assert_eq!(capture.form(), form());
        assert_eq!(sink.calls.load(Ordering::SeqCst), 2);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(capture.state(), LeadState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn resubmit_after_failure_replaces_task() {
        let mut capture = LeadCapture::new(Arc::new(RejectingSink), LeadTiming::default());
        capture.fill(form());
        let (inputs, metrics) = snapshot();

        capture.submit(&inputs, &metrics).unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(matches!(capture.state(), LeadState::Failed(_)));

        capture.submit(&inputs, &metrics).unwrap();
        capture.close();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(capture.state(), LeadState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_form_never_starts() {
        let sink = Arc::new(CountingSink::default());
        let mut capture = LeadCapture::new(sink.clone(), LeadTiming::default());
        let (inputs, metrics) = snapshot();
        assert_eq!(
            capture.submit(&inputs, &metrics),
            Err(LeadError::MissingEmail)
        );
        assert_eq!(capture.state(), LeadState::Editing);
        capture.finished().await;
        assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn closing_aborts_in_flight_submission() {
        let sink = Arc::new(CountingSink::default());
        let mut capture = LeadCapture::new(sink.clone(), LeadTiming::default());
        capture.fill(form());
        let (inputs, metrics) = snapshot();

        capture.submit(&inputs, &metrics).unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        capture.close();
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
        assert_eq!(capture.state(), LeadState::Closed);
        // The abandoned form is kept for a later reopen.
        capture.open();
        assert_eq!(capture.state(), LeadState::Editing);
        assert_eq!(capture.form(), form());
    }

    #[tokio::test(start_paused = true)]
    async fn sink_failure_allows_retry() {
        let mut capture = LeadCapture::new(Arc::new(RejectingSink), LeadTiming::default());
        capture.fill(form());
        let (inputs, metrics) = snapshot();

        capture.submit(&inputs, &metrics).unwrap();
        capture.finished().await;
        assert!(matches!(capture.state(), LeadState::Failed(_)));

        capture.submit(&inputs, &metrics).unwrap();
        assert_eq!(capture.state(), LeadState::Submitting);
    }

    #[tokio::test(start_paused = true)]
    async fn fill_ignored_while_submitting() {
        let mut capture = LeadCapture::new(Arc::new(LoggingLeadSink), LeadTiming::default());
        capture.fill(form());
        let (inputs, metrics) = snapshot();
        capture.submit(&inputs, &metrics).unwrap();
        capture.fill(LeadForm::default());
        assert_eq!(capture.form(), form());
        capture.finished().await;
        assert_eq!(capture.state(), LeadState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn deliver_without_delay() {
        let sink = CountingSink::default();
        let (inputs, metrics) = snapshot();
        let lead = LeadSubmission::new(&form(), &inputs, &metrics);
        deliver(&sink, &lead, Duration::ZERO).await.unwrap();
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    }
}
