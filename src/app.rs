//! Application State
//!
//! The supplementary-services screen and everything around it: the
//! number field, the last composed code and the dialer.

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use supser_core::{AppConfig, Branding, Navigator, NumberBook};
use supser_dialer::{
    CallIntent, DialError, DialOutcome, Dialer, LaunchReport, PermissionApi, PermissionState,
    PreferenceStore, SettingsPrompt,
};
use supser_mmi::{ComposedCode, Operation, SupplementaryService};

/// Number field plus the code shown above the buttons
#[derive(Debug, Clone)]
pub struct ServicesScreen {
    pub numbers: NumberBook,
    combined: Option<ComposedCode>,
}

impl ServicesScreen {
    pub fn new(numbers: NumberBook) -> Self {
        Self {
            numbers,
            combined: None,
        }
    }

    /// A button press: compose from the current number
    pub fn press(&mut self, service: SupplementaryService, operation: Operation) -> ComposedCode {
        let code = service.option().compose(operation, self.numbers.selected());
        debug!("{} / {} -> {}", service, operation, code);
        self.combined = Some(code.clone());
        code
    }

    /// Last composed code
    pub fn combined(&self) -> Option<&ComposedCode> {
        self.combined.as_ref()
    }
}

/// Wire one platform into both dialer seams
pub fn dialer_for<P>(platform: P, prompt: Arc<dyn SettingsPrompt>) -> Dialer
where
    P: PermissionApi + CallIntent + 'static,
{
    let platform = Arc::new(platform);
    Dialer::new(platform.clone(), platform, prompt)
}

/// One running application instance
pub struct App {
    pub branding: Branding,
    pub navigator: Navigator,
    pub screen: ServicesScreen,
    dialer: Dialer,
}

impl App {
    pub fn new(config: &AppConfig, dialer: Dialer) -> Result<Self> {
        Ok(Self {
            branding: config.branding()?.clone(),
            navigator: Navigator::new(),
            screen: ServicesScreen::new(NumberBook::new(&config.presets)),
            dialer,
        })
    }

    /// Launch: first-run gate, then the initial resume
    pub async fn start(&mut self, prefs: &mut dyn PreferenceStore) -> Result<LaunchReport> {
        let report = self.dialer.on_launch(prefs).await?;
        self.dialer.on_resume().await?;
        Ok(report)
    }

    pub async fn resume(&mut self) -> std::result::Result<PermissionState, DialError> {
        self.dialer.on_resume().await
    }

    pub fn permission_state(&self) -> PermissionState {
        self.dialer.permission_state()
    }

    /// Compose and dial
    pub async fn press(
        &mut self,
        service: SupplementaryService,
        operation: Operation,
    ) -> std::result::Result<(ComposedCode, DialOutcome), DialError> {
        let code = self.screen.press(service, operation);
        let outcome = self.dialer.dial(&code).await?;
        Ok((code, outcome))
    }
}
