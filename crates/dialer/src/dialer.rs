//! Dialer
//!
//! Owns the permission flag. Every dial re-reads the platform state
//! first, so a permission revoked in settings is never dialed through.

use std::sync::Arc;

use tracing::{debug, info, warn};

use supser_mmi::{is_dialable, ComposedCode, TelUri};

use crate::permission::{CallIntent, PermissionApi, PermissionState, PlatformError};
use crate::prefs::{PreferenceStore, FIRST_START_KEY};
use crate::prompt::{PromptChoice, SettingsPrompt, PERMISSION_RATIONALE};

/// Dialer errors
#[derive(Debug, thiserror::Error)]
pub enum DialError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error("Preference store error: {0}")]
    Preferences(#[from] std::io::Error),
}

/// What a dial attempt ended in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialOutcome {
    /// Handed to the call intent
    Dispatched(TelUri),
    /// Permission missing; the user went to settings
    SettingsOpened,
    /// Permission missing; the user cancelled
    Dismissed,
}

/// Result of the launch-time permission check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    /// The first-run flag was still set
    pub first_run: bool,
    /// A permission request was issued
    pub requested: bool,
    pub state: PermissionState,
    /// Outcome of the settings prompt after a refused request
    pub prompt: Option<DialOutcome>,
}

pub struct Dialer {
    permissions: Arc<dyn PermissionApi>,
    intent: Arc<dyn CallIntent>,
    prompt: Arc<dyn SettingsPrompt>,
    state: PermissionState,
}

impl Dialer {
    pub fn new(
        permissions: Arc<dyn PermissionApi>,
        intent: Arc<dyn CallIntent>,
        prompt: Arc<dyn SettingsPrompt>,
    ) -> Self {
        Self {
            permissions,
            intent,
            prompt,
            state: PermissionState::Unchecked,
        }
    }

    /// Last synchronised permission state
    pub fn permission_state(&self) -> PermissionState {
        self.state
    }

    async fn sync_permission(&mut self) -> Result<PermissionState, DialError> {
        let granted = self.permissions.is_granted().await?;
        self.state = PermissionState::from_granted(granted);
        debug!("Call permission: {:?}", self.state);
        Ok(self.state)
    }

    /// Back in the foreground: re-read the permission
    pub async fn on_resume(&mut self) -> Result<PermissionState, DialError> {
        self.sync_permission().await
    }

    /// First-run gate
    ///
    /// On the first launch only, request the permission if it is
    /// missing, then clear the flag.
    pub async fn on_launch(
        &mut self,
        prefs: &mut dyn PreferenceStore,
    ) -> Result<LaunchReport, DialError> {
        let first_run = prefs.get_bool(FIRST_START_KEY, true);
        let mut report = LaunchReport {
            first_run,
            requested: false,
            state: self.state,
            prompt: None,
        };

        if !first_run {
            return Ok(report);
        }

        let granted = self.sync_permission().await?.is_granted();
        // Cleared before the request so a failed request or prompt
        // never re-arms it.
        prefs.set_bool(FIRST_START_KEY, false).await?;

        if !granted {
            info!("First run, requesting call permission");
            report.requested = true;
            let granted = self.permissions.request().await?;
            self.state = PermissionState::from_granted(granted);
            if !granted {
                report.prompt = Some(self.show_settings_prompt().await?);
            }
        }

        report.state = self.state;
        Ok(report)
    }

    /// Dial a composed code
    pub async fn dial(&mut self, code: &ComposedCode) -> Result<DialOutcome, DialError> {
        if !self.sync_permission().await?.is_granted() {
            return self.show_settings_prompt().await;
        }

        if !is_dialable(code.as_str()) {
            warn!("Dialing code with non-keypad characters: {}", code);
        }

        let uri = TelUri::for_code(code.as_str());
        info!("Dialing {}", uri);
        self.intent.call(&uri).await?;
        Ok(DialOutcome::Dispatched(uri))
    }

    async fn show_settings_prompt(&self) -> Result<DialOutcome, DialError> {
        match self.prompt.ask(PERMISSION_RATIONALE).await {
            PromptChoice::Settings => {
                self.permissions.open_app_settings().await?;
                Ok(DialOutcome::SettingsOpened)
            }
            PromptChoice::Cancel => Ok(DialOutcome::Dismissed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPreferenceStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;
    use supser_mmi::{Operation, SupplementaryService};

    #[derive(Default)]
    struct FakePlatform {
        granted: AtomicBool,
        grant_on_request: bool,
        settings_fail: bool,
        requests: AtomicUsize,
        settings_opened: AtomicUsize,
        calls: Mutex<Vec<String>>,
    }

    impl FakePlatform {
        fn granted() -> Self {
            let platform = Self::default();
            platform.granted.store(true, Ordering::SeqCst);
            platform
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PermissionApi for FakePlatform {
        async fn is_granted(&self) -> Result<bool, PlatformError> {
            Ok(self.granted.load(Ordering::SeqCst))
        }

        async fn request(&self) -> Result<bool, PlatformError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            self.granted.store(self.grant_on_request, Ordering::SeqCst);
            Ok(self.grant_on_request)
        }

        async fn open_app_settings(&self) -> Result<(), PlatformError> {
            if self.settings_fail {
                return Err(PlatformError::CommandFailed(
                    "Error: Activity not started".to_string(),
                ));
            }
            self.settings_opened.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[async_trait]
    impl CallIntent for FakePlatform {
        async fn call(&self, uri: &TelUri) -> Result<(), PlatformError> {
            self.calls.lock().unwrap().push(uri.to_string());
            Ok(())
        }
    }

    struct FakePrompt {
        choice: PromptChoice,
        asked: AtomicUsize,
    }

    impl FakePrompt {
        fn new(choice: PromptChoice) -> Arc<Self> {
            Arc::new(Self {
                choice,
                asked: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SettingsPrompt for FakePrompt {
        async fn ask(&self, message: &str) -> PromptChoice {
            assert_eq!(message, PERMISSION_RATIONALE);
            self.asked.fetch_add(1, Ordering::SeqCst);
            self.choice
        }
    }

    fn dialer(platform: &Arc<FakePlatform>, prompt: &Arc<FakePrompt>) -> Dialer {
        Dialer::new(platform.clone(), platform.clone(), prompt.clone())
    }

    fn registration_code() -> ComposedCode {
        SupplementaryService::Unconditional
            .option()
            .compose(Operation::Registration, "+48223779542")
    }

    #[tokio::test]
    async fn test_dial_when_granted() {
        let platform = Arc::new(FakePlatform::granted());
        let prompt = FakePrompt::new(PromptChoice::Cancel);
        let mut dialer = dialer(&platform, &prompt);

        let outcome = dialer.dial(&registration_code()).await.unwrap();

        assert!(matches!(outcome, DialOutcome::Dispatched(_)));
        assert_eq!(platform.calls(), vec!["tel:**21*0048223779542%23".to_string()]);
        assert_eq!(prompt.asked.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_denied_never_reaches_intent() {
        let platform = Arc::new(FakePlatform::default());
        let prompt = FakePrompt::new(PromptChoice::Settings);
        let mut dialer = dialer(&platform, &prompt);

        let outcome = dialer.dial(&registration_code()).await.unwrap();

        assert_eq!(outcome, DialOutcome::SettingsOpened);
        assert!(platform.calls().is_empty());
        assert_eq!(platform.settings_opened.load(Ordering::SeqCst), 1);
        assert_eq!(dialer.permission_state(), PermissionState::Denied);
    }

    #[tokio::test]
    async fn test_cancel_does_nothing() {
        let platform = Arc::new(FakePlatform::default());
        let prompt = FakePrompt::new(PromptChoice::Cancel);
        let mut dialer = dialer(&platform, &prompt);

        let outcome = dialer.dial(&registration_code()).await.unwrap();

        assert_eq!(outcome, DialOutcome::Dismissed);
        assert_eq!(platform.settings_opened.load(Ordering::SeqCst), 0);
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dial_rechecks_revoked_permission() {
        let platform = Arc::new(FakePlatform::granted());
        let prompt = FakePrompt::new(PromptChoice::Cancel);
        let mut dialer = dialer(&platform, &prompt);

        assert_eq!(dialer.on_resume().await.unwrap(), PermissionState::Granted);
        platform.granted.store(false, Ordering::SeqCst);

        let outcome = dialer.dial(&registration_code()).await.unwrap();
        assert_eq!(outcome, DialOutcome::Dismissed);
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn test_first_run_requests_once() {
        let platform = Arc::new(FakePlatform {
            grant_on_request: true,
            ..Default::default()
        });
        let prompt = FakePrompt::new(PromptChoice::Cancel);
        let mut prefs = MemoryPreferenceStore::new();

        let mut first = dialer(&platform, &prompt);
        let report = first.on_launch(&mut prefs).await.unwrap();
        assert!(report.first_run);
        assert!(report.requested);
        assert_eq!(report.state, PermissionState::Granted);
        assert!(!prefs.get_bool(FIRST_START_KEY, true));

        platform.granted.store(false, Ordering::SeqCst);
        let mut second = dialer(&platform, &prompt);
        let report = second.on_launch(&mut prefs).await.unwrap();
        assert!(!report.first_run);
        assert!(!report.requested);

        assert_eq!(platform.requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_first_run_refused_prompts_settings() {
        let platform = Arc::new(FakePlatform::default());
        let prompt = FakePrompt::new(PromptChoice::Settings);
        let mut prefs = MemoryPreferenceStore::new();
        let mut dialer = dialer(&platform, &prompt);

        let report = dialer.on_launch(&mut prefs).await.unwrap();

        assert_eq!(report.state, PermissionState::Denied);
        assert_eq!(report.prompt, Some(DialOutcome::SettingsOpened));
        assert_eq!(platform.settings_opened.load(Ordering::SeqCst), 1);
        assert!(!prefs.get_bool(FIRST_START_KEY, true));
    }

    #[tokio::test]
    async fn test_first_run_already_granted_skips_request() {
        let platform = Arc::new(FakePlatform::granted());
        let prompt = FakePrompt::new(PromptChoice::Cancel);
        let mut prefs = MemoryPreferenceStore::new();
        let mut dialer = dialer(&platform, &prompt);

        let report = dialer.on_launch(&mut prefs).await.unwrap();

        assert!(report.first_run);
        assert!(!report.requested);
        assert_eq!(platform.requests.load(Ordering::SeqCst), 0);
        assert!(!prefs.get_bool(FIRST_START_KEY, true));
    }

    #[tokio::test]
    async fn test_failed_first_run_prompt_does_not_rearm() {
        let platform = Arc::new(FakePlatform {
            settings_fail: true,
            ..Default::default()
        });
        let prompt = FakePrompt::new(PromptChoice::Settings);
        let mut prefs = MemoryPreferenceStore::new();

        for _ in 0..3 {
            let mut dialer = dialer(&platform, &prompt);
            let _ = dialer.on_launch(&mut prefs).await;
        }

        assert_eq!(platform.requests.load(Ordering::SeqCst), 1);
        assert!(!prefs.get_bool(FIRST_START_KEY, true));
    }
}
