use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::clients::{AuthClient, AuthForm, ProductScreenClient, ScreenHandle, UserScreenClient};
use crate::dashboard::{Dashboard, Slideshow, SlideshowTimer};
use crate::framework::{HttpCollection, HttpTransport};
use crate::lifecycle::ConsoleConfig;
use crate::model::{Product, User};
use crate::navigation::Route;

/// The runtime orchestrator for the admin console.
///
/// `AdminConsole` is responsible for:
/// - **Shared plumbing**: one [`HttpTransport`] for every screen and the auth client
/// - **Mounting screens**: each `open_*` call spawns a fresh screen task and loads it
/// - **Shutdown**: deactivating every screen and waiting for the tasks to finish
///
/// # Example
///
/// ```ignore
/// let mut console = AdminConsole::new(ConsoleConfig::from_env()?);
///
/// let products = console.open_products().await;
/// products.sell(id).await?;
/// let dashboard = console.dashboard();
///
/// drop(products);
/// console.shutdown().await?;
/// ```
pub struct AdminConsole {
    config: ConsoleConfig,
    transport: HttpTransport,
    auth: AuthClient,
    products: Option<ProductScreenClient>,
    users: Option<UserScreenClient>,
    handles: Vec<JoinHandle<()>>,
}

impl AdminConsole {
    pub fn new(config: ConsoleConfig) -> Self {
        let transport = HttpTransport::new(config.api_origin.clone());
        let auth = AuthClient::new(transport.clone());
        Self {
            config,
            transport,
            auth,
            products: None,
            users: None,
            handles: Vec::new(),
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// Submits `form` and returns the next page, or the message the form now shows.
    pub async fn sign_in(&self, form: &mut AuthForm) -> Result<Route, String> {
        form.submit(&self.auth)
            .await
            .map_err(|e| form.error.clone().unwrap_or_else(|| e.to_string()))
    }

    /// Mounts the product screen and loads its list.
    ///
    /// A previously mounted product screen is deactivated first. A failed load
    /// is left in the screen's error slot.
    pub async fn open_products(&mut self) -> ProductScreenClient {
        if let Some(previous) = self.products.take() {
            previous.close();
        }

        let remote = HttpCollection::<Product>::new(self.transport.clone());
        let (actor, client) = crate::product_screen::new(self.config.channel_buffer, remote);
        self.handles.push(tokio::spawn(actor.run()));
        self.products = Some(client.clone());

        if let Err(e) = client.load().await {
            warn!(entity_type = "product", error = %e, "Initial load failed");
        }
        client
    }

    /// Mounts the user screen and loads its list.
    pub async fn open_users(&mut self) -> UserScreenClient {
        if let Some(previous) = self.users.take() {
            previous.close();
        }

        let remote = HttpCollection::<User>::new(self.transport.clone());
        let (actor, client) = crate::user_screen::new(self.config.channel_buffer, remote);
        self.handles.push(tokio::spawn(actor.run()));
        self.users = Some(client.clone());

        if let Err(e) = client.load().await {
            warn!(entity_type = "user", error = %e, "Initial load failed");
        }
        client
    }

    /// The dashboard over the product screen's latest list; empty when no
    /// product screen is mounted.
    pub fn dashboard(&self) -> Dashboard {
        match &self.products {
            Some(products) => Dashboard::from_products(&products.state().items),
            None => Dashboard::default(),
        }
    }

    /// Starts the dashboard slideshow with the configured images and period.
    pub fn start_slideshow(&self) -> SlideshowTimer {
        SlideshowTimer::start(
            Slideshow::new(self.config.slideshow_images.clone()),
            self.config.slideshow_period,
        )
    }

    /// Gracefully shuts down every mounted screen.
    ///
    /// Screens are deactivated, so responses still in flight are discarded.
    /// Each screen task exits once every client for it is dropped, including
    /// the ones handed out by `open_*`; drop those before calling this.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all screens shut down cleanly
    /// - `Err(String)` if any screen task failed or panicked
    pub async fn shutdown(mut self) -> Result<(), String> {
        info!("Shutting down console...");

        if let Some(products) = self.products.take() {
            products.close();
        }
        if let Some(users) = self.users.take() {
            users.close();
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Screen task failed: {:?}", e);
                return Err(format!("Screen task failed: {:?}", e));
            }
        }

        info!("Console shutdown complete.");
        Ok(())
    }
}
